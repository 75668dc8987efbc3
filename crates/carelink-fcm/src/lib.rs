//! Firebase Cloud Messaging transport for CareLink.
//!
//! Implements [`carelink_core::transport::PushTransport`] over the FCM HTTP
//! v1 `messages:send` endpoint. Minting the OAuth access token is the
//! deployment's job; this crate takes a ready bearer token from config.

mod client;
mod wire;

pub mod config;
pub mod error;

pub use client::FcmTransport;
pub use config::FcmConfig;
pub use error::{Error, Result};
