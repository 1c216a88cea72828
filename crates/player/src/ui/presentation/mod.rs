//! Presentation layer - Dioxus components for each screen

pub mod components;
