//! Controlled-component adapter.
//!
//! A [`Picker`] carries configuration (offered units, duration bounds, the
//! initial host value) but never the current model. The host passes its
//! model into every call and stores the model that comes back, the same
//! prop-in / event-out contract a form control has with its parent.
//!
//! Emissions:
//! - [`Picker::mount`] / [`Picker::sync`]: only when the host value is not
//!   already a normalized record (a `null` initial value always emits
//!   `{"unit": null}`).
//! - [`Picker::handle`]: exactly one model per interaction.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::clamp::DurationBounds;
use crate::equality::shallow_equal_values;
use crate::error::{PickerError, Result};
use crate::model::Model;
use crate::reconcile::{reconcile, PickerEvent};
use crate::unit::{available_units, verbose_label, Unit};

/// Recognized picker options.
///
/// All fields are optional on the wire:
///
/// ```json
/// {
///   "unitsOptions": ["month", "date-from-to"],
///   "modelValue": null,
///   "minDuration": 1,
///   "maxDuration": 10
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    /// Units offered by the select, in order. `None` offers the whole catalog.
    pub units_options: Option<Vec<Unit>>,
    /// The host's initial value, as supplied.
    pub model_value: Value,
    pub min_duration: Option<Number>,
    pub max_duration: Option<Number>,
}

impl PickerConfig {
    /// Parse a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidConfig`] when the document is not valid
    /// JSON or names an unknown unit in `unitsOptions`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| PickerError::InvalidConfig(err.to_string()))
    }

    pub fn bounds(&self) -> DurationBounds {
        DurationBounds::new(self.min_duration.clone(), self.max_duration.clone())
    }
}

/// Result of normalizing a host-supplied value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synced {
    /// The normalized model.
    pub model: Model,
    /// `Some` when the host must be told about the normalized model.
    pub emission: Option<Model>,
}

#[derive(Debug, Clone)]
pub struct Picker {
    units: Vec<Unit>,
    bounds: DurationBounds,
    initial: Value,
}

impl Picker {
    /// Build a picker from its configuration.
    ///
    /// Inverted bounds are accepted; commits then clamp lower bound first.
    pub fn new(config: PickerConfig) -> Self {
        let bounds = config.bounds();
        if bounds.is_inverted() {
            tracing::warn!(?bounds, "minDuration is greater than maxDuration");
        }
        Self {
            units: available_units(config.units_options.as_deref()),
            bounds,
            initial: config.model_value,
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// `(unit, label)` pairs for the unit select, in display order.
    pub fn options(&self) -> Vec<(Unit, String)> {
        self.units
            .iter()
            .map(|unit| (*unit, verbose_label(*unit)))
            .collect()
    }

    pub fn bounds(&self) -> &DurationBounds {
        &self.bounds
    }

    pub fn offers(&self, unit: Unit) -> bool {
        self.units.contains(&unit)
    }

    /// Normalize the configured initial value.
    pub fn mount(&self) -> Synced {
        self.sync(&self.initial)
    }

    /// Normalize a value re-supplied by the host.
    pub fn sync(&self, value: &Value) -> Synced {
        let model = Model::from_json(value);
        let normalized = Value::Object(model.to_record());
        let emission = if shallow_equal_values(&normalized, value) {
            None
        } else {
            tracing::debug!(supplied = %value, normalized = %normalized, "host value normalized");
            Some(model.clone())
        };
        Synced { model, emission }
    }

    /// Apply one interaction to the host's current model.
    pub fn handle(&self, model: &Model, event: PickerEvent) -> Model {
        let event = match event {
            PickerEvent::SelectUnit(Some(unit)) if !self.offers(unit) => {
                tracing::warn!(%unit, "unit not offered by this picker; treated as no unit");
                PickerEvent::SelectUnit(None)
            }
            other => other,
        };
        reconcile(model, event, &self.bounds)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
