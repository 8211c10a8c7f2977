//! Immutable record of a single executed calculation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record of one successfully executed operation.
///
/// Calculations are immutable values: once created they are never
/// modified, only evicted or cleared in bulk. Equality is structural
/// over all fields, including the timestamp.
///
/// # Example
///
/// ```rust
/// use reckon::core::Calculation;
///
/// let calc = Calculation::new("add", 15.0, 7.0, 22.0);
/// assert_eq!(calc.operation, "add");
/// assert_eq!(calc.result, 22.0);
/// assert_eq!(calc.to_string(), "add(15, 7) = 22");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Registered name of the operation that produced this entry
    pub operation: String,
    /// First operand
    pub operand1: f64,
    /// Second operand
    pub operand2: f64,
    /// Computed result
    pub result: f64,
    /// When the calculation was performed
    pub timestamp: DateTime<Utc>,
}

impl Calculation {
    /// Create an entry for a result computed now.
    ///
    /// Validation happens in the operation registry before this is
    /// called; the constructor only captures the timestamp.
    pub fn new(operation: impl Into<String>, operand1: f64, operand2: f64, result: f64) -> Self {
        Self {
            operation: operation.into(),
            operand1,
            operand2,
            result,
            timestamp: Utc::now(),
        }
    }

    /// Reconstruct an entry from stored fields, keeping its original
    /// timestamp. Used when loading persisted history.
    pub fn from_parts(
        operation: impl Into<String>,
        operand1: f64,
        operand2: f64,
        result: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            operation: operation.into(),
            operand1,
            operand2,
            result,
            timestamp,
        }
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}) = {}",
            self.operation, self.operand1, self.operand2, self.result
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_captures_timestamp() {
        let before = Utc::now();
        let calc = Calculation::new("add", 1.0, 2.0, 3.0);
        let after = Utc::now();

        assert!(calc.timestamp >= before);
        assert!(calc.timestamp <= after);
    }

    #[test]
    fn from_parts_keeps_given_timestamp() {
        let ts = Utc::now();
        let calc = Calculation::from_parts("divide", 10.0, 4.0, 2.5, ts);
        assert_eq!(calc.timestamp, ts);
    }

    #[test]
    fn equality_is_structural() {
        let ts = Utc::now();
        let a = Calculation::from_parts("add", 1.0, 2.0, 3.0, ts);
        let b = Calculation::from_parts("add", 1.0, 2.0, 3.0, ts);
        let c = Calculation::from_parts("subtract", 1.0, 2.0, -1.0, ts);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_shows_operation_and_result() {
        let calc = Calculation::new("power", 2.0, 8.0, 256.0);
        assert_eq!(calc.to_string(), "power(2, 8) = 256");
    }

    #[test]
    fn calculation_serializes_correctly() {
        let calc = Calculation::new("multiply", 3.0, 4.0, 12.0);
        let json = serde_json::to_string(&calc).unwrap();
        let deserialized: Calculation = serde_json::from_str(&json).unwrap();
        assert_eq!(calc, deserialized);
    }
}
