//! Test doubles shared across unit tests

pub mod fixtures;
mod scripted_api;

pub use scripted_api::ScriptedGameApi;
