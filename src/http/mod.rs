//! HTTP server module for the booking engine.
//!
//! This module provides an axum-based HTTP server that exposes discovery and
//! booking as a REST API. It is a thin layer: request parsing, DTO
//! conversion, and status mapping live here; all behavior belongs to the
//! service layer.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
