//! Ariadne wire protocol — polymorphic message codec and threading engine.
//!
//! ## Architecture
//!
//! - **TypeRegistry**: maps `@type` discriminators to decode functions and
//!   turns raw bytes into typed messages
//! - **encode_message**: writes any message back in its concrete wire shape
//! - **threading**: pure functions that assign, propagate and branch
//!   conversation thread ids through the `~thread` decorator

pub mod codec;
pub mod threading;

pub use codec::{encode_message, TypeRegistry};
pub use threading::{
    create_child_threaded_reply, create_threaded_reply, get_parent_thread_id, get_thread_id,
    thread_child_message, thread_from, thread_from_parent, thread_from_parent_message, thread_with,
    ThreadExt, THREAD_DECORATOR,
};
