//! Built-in message handlers registered by every kernel.

pub mod forward;
pub mod trust_ping;

pub use forward::ForwardHandler;
pub use trust_ping::TrustPingHandler;
