//! Gold Rush Protocol - Shared types for backend and client communication
//!
//! This crate contains the wire-format DTOs returned by the Gold Rush backend
//! and the routes the client calls.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **WASM compatible** - Must compile for both native and wasm32 targets
//! 4. **No domain types** - field names and shapes mirror the backend JSON

pub mod responses;
pub mod routes;

pub use responses::{
    CoordinatesData, EntityData, LeaderboardEntryData, LogEntryData, LogsResponse,
    StatusResponse, WorldResponse,
};
