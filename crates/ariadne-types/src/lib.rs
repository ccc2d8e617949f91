//! Core types for the Ariadne agent messaging engine.
//!
//! This crate defines the data structures shared by the wire codec, the
//! threading engine and the dispatch kernel: the decorator model, the message
//! model and its concrete shapes, events, configuration and errors. It
//! contains no routing or threading logic.

pub mod config;
pub mod decorator;
pub mod error;
pub mod event;
pub mod message;
pub mod messages;

pub use decorator::{Decorator, DecoratorKind, DecoratorShape, Decorators, ThreadDecorator};
pub use error::{AriadneError, AriadneResult};
pub use message::{AgentMessage, MessageHeader, MessageShape};
