//! Core types and trait definitions for the CareLink emergency fan-out.
//!
//! This crate is free of HTTP and database dependencies. Every other crate in
//! the workspace depends on it.

pub mod account;
pub mod emergency;
pub mod error;
pub mod message;
pub mod store;
pub mod transport;

pub use error::{Error, Result};
