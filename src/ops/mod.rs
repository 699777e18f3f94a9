//! Generic translation of JSON query payloads into remote operation calls.
//!
//! This module provides:
//!
//! - [`bind_args`] and [`ArgumentSpec`]: the argument binder, turning one
//!   JSON object into a positional argument list validated against an
//!   ordered parameter schema
//! - [`OperationRegistry`]: the startup-built mapping from
//!   `resource/method` keys to each operation's schema and handler
//!
//! Together they let a single generic route handler serve every declared
//! remote operation.

mod args;
mod registry;

pub use args::{bind_args, ArgumentSpec, ParamSpec, ValidationError};
pub use registry::{BoxFuture, DispatchError, Operation, OperationHandler, OperationRegistry};
