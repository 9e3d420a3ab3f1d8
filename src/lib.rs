//! # Mesa Rust Backend
//!
//! Table allocation and booking engine for restaurants.
//!
//! This crate assigns seating resources (single tables or table combinations)
//! to incoming party requests within a restaurant's service hours, and commits
//! the chosen assignment exactly once under concurrent demand. The engine is
//! exposed as a REST API via Axum.
//!
//! ## Features
//!
//! - **Slot planning**: turn operating-hours windows plus a requested window
//!   into a sequence of fixed-duration candidate slots
//! - **Gap discovery**: enumerate every free table and table combination able
//!   to seat a party over a time interval
//! - **Ranking**: score candidates by how closely they fit the party size
//! - **Booking**: lock-serialized, idempotent, atomic commit of the best
//!   candidate
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types (tables, service windows, gaps, bookings)
//! - [`scheduler`]: Pure slot planning and the generic combination search
//! - [`services`]: Discovery, ranking, and the booking coordinator
//! - [`db`]: Repository trait and storage implementations
//! - [`locks`]: Distributed lock / idempotency cache collaborator
//! - [`http`]: Axum-based HTTP server and request handlers
//!

pub mod config;
pub mod db;
pub mod locks;
pub mod models;
pub mod scheduler;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
