// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between a transport (HTTP, IPC) and the services
// - Request DTOs are parsed here into service requests
// - `AppState` wires one pool, the repositories and the services

pub mod dto;
pub mod state;

pub use dto::*;
pub use state::AppState;
