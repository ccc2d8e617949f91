//! HTTP transport adapter for the Ariadne kernel.
//!
//! Agent wire messages arrive as `POST` bodies with content type
//! `application/ssi-agent-wire`; replies go back in the response body with the
//! same content type.

pub mod error;
pub mod middleware;
pub mod server;

pub use error::ApiError;
pub use server::{router, serve};
