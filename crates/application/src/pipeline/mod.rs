//! HTTP client pipeline.
//!
//! A request passes through two pure stages around the transport:
//! [`prepare_request`] injects the credential and default headers, and
//! [`classify`] turns the raw transport result into a [`Verdict`]. The
//! [`ApiClient`] wires both to logging, credential clearing and session
//! invalidation.

mod classify;
mod client;
mod config;
mod prepare;

pub use classify::{Verdict, classify};
pub use client::ApiClient;
pub use config::{AUTH_HEADER, ClientConfig, DEFAULT_TIMEOUT};
pub use prepare::{PrepareError, prepare_request};
