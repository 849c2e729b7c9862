//! # Groupbot Console
//!
//! Line-oriented dispatcher for the group commands: tokenizes input, resolves
//! targets, runs the handlers and renders their replies as plain text.

pub mod args;
pub mod context;
pub mod dispatcher;
pub mod render;

pub use dispatcher::Dispatcher;
