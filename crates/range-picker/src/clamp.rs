//! Inclusive, optionally-bounded clamping for duration values.
//!
//! A missing bound means the value is unbounded on that side. The lower
//! bound is checked first, so with `min > max` values below `min` come back
//! as `min` and everything else as `max`.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Bound `value` into `[min, max]`, each side optional and inclusive.
///
/// ```
/// use range_picker::clamp::clamp;
///
/// assert_eq!(clamp(0, Some(1), Some(10)), 1);
/// assert_eq!(clamp(11, Some(1), Some(10)), 10);
/// assert_eq!(clamp(5, None, None), 5);
/// ```
pub fn clamp<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> T {
    if let Some(min) = min {
        if value < min {
            return min;
        }
    }
    if let Some(max) = max {
        if value > max {
            return max;
        }
    }
    value
}

/// The configured `[minDuration, maxDuration]` pair.
///
/// Bounds are JSON numbers, like the durations they clamp. A clamped value
/// becomes the bound exactly as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBounds {
    #[serde(default, rename = "minDuration")]
    pub min: Option<Number>,
    #[serde(default, rename = "maxDuration")]
    pub max: Option<Number>,
}

fn magnitude(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

impl DurationBounds {
    pub const UNBOUNDED: DurationBounds = DurationBounds {
        min: None,
        max: None,
    };

    pub fn new(min: Option<Number>, max: Option<Number>) -> Self {
        Self { min, max }
    }

    /// Clamp `value`, returning either `value` itself or one of the bounds.
    pub fn clamp(&self, value: &Number) -> Number {
        let raw = magnitude(value);
        let clamped = clamp(
            raw,
            self.min.as_ref().map(magnitude),
            self.max.as_ref().map(magnitude),
        );
        let bound = if clamped > raw {
            self.min.as_ref()
        } else if clamped < raw {
            self.max.as_ref()
        } else {
            None
        };
        bound.unwrap_or(value).clone()
    }

    /// `minDuration > maxDuration`. Such bounds are still applied, lower
    /// bound first.
    pub fn is_inverted(&self) -> bool {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => magnitude(min) > magnitude(max),
            _ => false,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
