//! Core kernel for the Ariadne agent messaging engine.
//!
//! The kernel decodes inbound wire messages, routes each one to the single
//! handler registered for its `@type`, and encodes whatever reply the
//! handler produces. Handlers publish side-channel notifications on the
//! event bus.

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod event_bus;
pub mod handler;
pub mod handlers;
pub mod kernel;

pub use context::{AgentContext, ConfigContextProvider, ContextProvider, ServiceRegistry};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchStage, HandlerError, KernelError, KernelResult};
pub use handler::{HandlerOutcome, HandlerRegistry, MessageContext, MessageHandler};
pub use kernel::{AgentKernel, KernelBuilder};
