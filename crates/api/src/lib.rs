//! Scholarship interview scheduling API.
//!
//! Library half of the server so integration tests and the binary share
//! config, state, error mapping, and the router.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
