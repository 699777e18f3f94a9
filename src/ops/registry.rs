//! Registry of remote operations keyed by `resource/method`.
//!
//! Instead of looking operations up by name at request time, the registry is
//! built once at startup from the external operation catalog. Each entry
//! pairs an operation's [`ArgumentSpec`] with a typed handler, so the
//! argument binder and the dispatcher share one validated source of truth.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;

use crate::clients::RemoteApiError;

use super::args::{bind_args, ArgumentSpec, ValidationError};

/// A boxed future, the output of an [`OperationHandler`] invocation.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The invocation target of one remote operation.
///
/// Handlers receive the bound positional arguments and forward them to the
/// remote SDK call they wrap.
pub trait OperationHandler: Send + Sync {
    /// Invokes the operation with bound positional arguments.
    fn call<'a>(&'a self, args: Vec<Value>) -> BoxFuture<'a, Result<Value, RemoteApiError>>;
}

/// One registered remote operation: its key, parameter schema, and handler.
pub struct Operation {
    key: String,
    spec: ArgumentSpec,
    handler: Box<dyn OperationHandler>,
}

impl Operation {
    /// Returns the operation key (`resource/method`).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the operation's parameter schema.
    #[must_use]
    pub const fn spec(&self) -> &ArgumentSpec {
        &self.spec
    }
}

// Implement Debug manually since trait objects don't implement Debug
impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("key", &self.key)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Errors from binding and dispatching through the registry.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No operation is registered under the requested key.
    #[error("Unknown operation '{key}'.")]
    UnknownOperation {
        /// The key that was requested.
        key: String,
    },

    /// The JSON payload failed argument validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote call failed.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),
}

/// Registry mapping operation keys to their schema and handler.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::ops::{
///     ArgumentSpec, BoxFuture, OperationHandler, OperationRegistry, ParamSpec,
/// };
/// use shopify_bridge::RemoteApiError;
/// use serde_json::Value;
///
/// struct GetProduct;
///
/// impl OperationHandler for GetProduct {
///     fn call<'a>(&'a self, args: Vec<Value>) -> BoxFuture<'a, Result<Value, RemoteApiError>> {
///         Box::pin(async move { Ok(Value::from(format!("product {}", args[0]))) })
///     }
/// }
///
/// let mut registry = OperationRegistry::new();
/// registry.register(
///     "product/get",
///     ArgumentSpec::new(vec![ParamSpec::required("id")]),
///     GetProduct,
/// );
///
/// assert!(registry.get("product/get").is_some());
/// assert!(registry.get("product/explode").is_none());
/// ```
#[derive(Default)]
pub struct OperationRegistry {
    operations: HashMap<String, Operation>,
}

// Implement Debug manually since trait objects don't implement Debug
impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &format!("<{} operations>", self.operations.len()))
            .finish()
    }
}

// Verify OperationRegistry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OperationRegistry>();
};

impl OperationRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation under `key`.
    ///
    /// If an operation with the same key already exists, it is replaced.
    /// Returns `&mut Self` to allow method chaining.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        spec: ArgumentSpec,
        handler: impl OperationHandler + 'static,
    ) -> &mut Self {
        let key = key.into();
        self.operations.insert(
            key.clone(),
            Operation {
                key,
                spec,
                handler: Box::new(handler),
            },
        );
        self
    }

    /// Returns the operation registered under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Operation> {
        self.operations.get(key)
    }

    /// Returns all registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Binds a JSON payload against the operation's schema without invoking
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`] for an unregistered key
    /// or [`DispatchError::Validation`] when a required argument is missing.
    pub fn bind(&self, key: &str, json_text: &str) -> Result<Vec<Value>, DispatchError> {
        let operation = self
            .get(key)
            .ok_or_else(|| DispatchError::UnknownOperation {
                key: key.to_string(),
            })?;
        Ok(bind_args(json_text, &operation.spec)?)
    }

    /// Binds a JSON payload and invokes the operation's handler.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`] for an unregistered key,
    /// [`DispatchError::Validation`] when a required argument is missing (no
    /// remote call is issued), or [`DispatchError::Remote`] when the handler
    /// fails.
    pub async fn dispatch(&self, key: &str, json_text: &str) -> Result<Value, DispatchError> {
        let operation = self
            .get(key)
            .ok_or_else(|| DispatchError::UnknownOperation {
                key: key.to_string(),
            })?;
        let args = bind_args(json_text, &operation.spec)?;
        tracing::debug!(key, args = args.len(), "dispatching remote operation");
        Ok(operation.handler.call(args).await?)
    }
}
