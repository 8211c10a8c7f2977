//! Operation registry: named pure arithmetic functions.
//!
//! Operations are held as data (name -> function), not as a type
//! hierarchy. Adding an operation is a registration call; nothing in
//! the calling code changes.

use super::error::CalcError;
use std::collections::HashMap;
use std::sync::Arc;

/// A named pure function from two operands to a result.
///
/// Domain preconditions (non-zero divisor, non-negative radicand, ...)
/// are validated inside the function and reported as
/// [`CalcError::Domain`]. No operation has side effects.
#[derive(Clone)]
pub struct Operation {
    name: String,
    apply: Arc<dyn Fn(f64, f64) -> Result<f64, CalcError> + Send + Sync>,
}

impl Operation {
    /// Wrap a function as a named operation.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(f64, f64) -> Result<f64, CalcError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply: Arc::new(f),
        }
    }

    /// The registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the operation to two operands.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, CalcError> {
        (self.apply)(a, b)
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation").field("name", &self.name).finish()
    }
}

/// Name-keyed table of operations.
///
/// # Example
///
/// ```rust
/// use reckon::core::OperationRegistry;
///
/// let registry = OperationRegistry::with_builtins();
/// let add = registry.resolve("add").unwrap();
/// assert_eq!(add.apply(15.0, 7.0).unwrap(), 22.0);
///
/// assert!(registry.resolve("factorial").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct OperationRegistry {
    ops: HashMap<String, Operation>,
}

impl OperationRegistry {
    /// Create a registry with no operations.
    pub fn empty() -> Self {
        Self {
            ops: HashMap::new(),
        }
    }

    /// Create a registry with the ten builtin arithmetic operations:
    /// `add`, `subtract`, `multiply`, `divide`, `power`, `root`,
    /// `modulus`, `int_divide`, `percent`, `abs_diff`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();

        registry.register("add", |a, b| Ok(a + b));
        registry.register("subtract", |a, b| Ok(a - b));
        registry.register("multiply", |a, b| Ok(a * b));
        registry.register("divide", |a, b| {
            if b == 0.0 {
                Err(CalcError::Domain("division by zero is not allowed".into()))
            } else {
                Ok(a / b)
            }
        });
        registry.register("power", |a, b| {
            if b < 0.0 {
                Err(CalcError::Domain(
                    "negative exponents are not supported".into(),
                ))
            } else {
                Ok(a.powf(b))
            }
        });
        registry.register("root", |a, b| {
            if b == 0.0 {
                Err(CalcError::Domain("zero root is undefined".into()))
            } else if a < 0.0 {
                Err(CalcError::Domain(
                    "cannot take the root of a negative number".into(),
                ))
            } else {
                Ok(a.powf(1.0 / b))
            }
        });
        registry.register("modulus", |a, b| {
            if b == 0.0 {
                Err(CalcError::Domain("modulus by zero is not allowed".into()))
            } else {
                // Floored remainder: sign follows the divisor.
                Ok(a - b * (a / b).floor())
            }
        });
        registry.register("int_divide", |a, b| {
            if b == 0.0 {
                Err(CalcError::Domain(
                    "integer division by zero is not allowed".into(),
                ))
            } else {
                Ok((a / b).floor())
            }
        });
        registry.register("percent", |a, b| {
            if b == 0.0 {
                Err(CalcError::Domain(
                    "cannot compute a percentage of a zero base".into(),
                ))
            } else {
                Ok((a / b) * 100.0)
            }
        });
        registry.register("abs_diff", |a, b| Ok((a - b).abs()));

        registry
    }

    /// Register an operation under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: &str, f: F)
    where
        F: Fn(f64, f64) -> Result<f64, CalcError> + Send + Sync + 'static,
    {
        self.ops.insert(name.to_string(), Operation::new(name, f));
    }

    /// Look up an operation by name.
    pub fn resolve(&self, name: &str) -> Result<&Operation, CalcError> {
        self.ops
            .get(name)
            .ok_or_else(|| CalcError::UnknownOperation(name.to_string()))
    }

    /// All registered names, sorted for stable display.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.ops.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
