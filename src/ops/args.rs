//! Binding of JSON query payloads onto positional argument lists.
//!
//! Remote operations take positional arguments, but the local HTTP surface
//! receives them as one JSON-encoded query value. [`bind_args`] maps the
//! parsed object onto an ordered, named parameter schema so a single generic
//! route handler can serve many distinct operations.

use serde_json::Value;
use thiserror::Error;

/// One named positional parameter of a remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// The parameter name as it appears in the JSON payload.
    pub name: String,
    /// Whether the parameter may be omitted.
    pub optional: bool,
}

impl ParamSpec {
    /// Creates a required parameter.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
        }
    }

    /// Creates an optional parameter.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
        }
    }
}

/// The ordered parameter schema of one remote operation.
///
/// Declaration order defines both the positional order of the bound
/// arguments and the order required-ness is checked in. Supplied by the
/// external operation catalog; immutable once built.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::ops::{ArgumentSpec, ParamSpec};
///
/// let spec = ArgumentSpec::new(vec![
///     ParamSpec::required("id"),
///     ParamSpec::optional("fields"),
/// ]);
/// assert_eq!(spec.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentSpec {
    params: Vec<ParamSpec>,
}

impl ArgumentSpec {
    /// Creates a schema from an ordered parameter list.
    #[must_use]
    pub const fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    /// Returns the number of declared parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns whether the schema declares no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates the declared parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter()
    }
}

impl FromIterator<ParamSpec> for ArgumentSpec {
    fn from_iter<I: IntoIterator<Item = ParamSpec>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// A required argument was missing from the JSON payload.
///
/// Binding fails fast: the error names the first missing required parameter
/// in declared order, and no further parameters are checked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required parameter was absent from the payload.
    #[error("Argument '{name}' is required.")]
    MissingArgument {
        /// The name of the missing parameter.
        name: String,
    },
}

/// Binds a JSON-encoded query payload onto a positional argument list.
///
/// The payload is parsed as a JSON object. An unparsable, null, or
/// non-object payload is treated as "no fields present" — required-parameter
/// validation still applies, so malformed input with any required parameter
/// fails rather than silently binding an empty list.
///
/// For each declared parameter, in order:
/// - a defined value (including JSON `null`) is appended to the output;
/// - a missing required parameter fails immediately with
///   [`ValidationError::MissingArgument`];
/// - a missing optional parameter is omitted.
///
/// The result preserves declared order, not payload key order, and may be
/// shorter than the schema when trailing optional parameters are absent;
/// callers invoking a variadic-style remote operation must tolerate the
/// shorter list.
///
/// # Errors
///
/// Returns [`ValidationError`] naming the first missing required parameter.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::ops::{bind_args, ArgumentSpec, ParamSpec};
///
/// let spec = ArgumentSpec::new(vec![
///     ParamSpec::required("id"),
///     ParamSpec::optional("title"),
/// ]);
///
/// let args = bind_args(r#"{"id": 42}"#, &spec).unwrap();
/// assert_eq!(args, vec![serde_json::json!(42)]);
///
/// assert!(bind_args(r#"{"title": "x"}"#, &spec).is_err());
/// ```
pub fn bind_args(json_text: &str, spec: &ArgumentSpec) -> Result<Vec<Value>, ValidationError> {
    let fields = match serde_json::from_str::<Value>(json_text) {
        Ok(Value::Object(map)) => map,
        // Anything else means no fields are present; required-field
        // validation below still applies.
        Ok(_) | Err(_) => serde_json::Map::new(),
    };

    let mut bound = Vec::with_capacity(spec.len());
    for param in spec.iter() {
        match fields.get(&param.name) {
            Some(value) => bound.push(value.clone()),
            None if param.optional => tracing::trace!(name = %param.name, "ignoring absent optional argument"),
            None => {
                return Err(ValidationError::MissingArgument {
                    name: param.name.clone(),
                })
            }
        }
    }

    Ok(bound)
}
