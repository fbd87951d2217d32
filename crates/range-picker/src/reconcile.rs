//! Model reconciliation: compute the next model from the current one and a
//! single interaction.
//!
//! Every function here is pure. The caller owns the model, passes it in, and
//! stores whatever comes back; nothing is retained between calls.
//!
//! # Transitions
//!
//! - [`select_unit`] — switch unit, carrying fields both categories share
//! - [`edit_field`] — replace one field verbatim (no clamping)
//! - [`commit_duration`] — clamp the duration once editing is finalized
//! - [`mount`] — normalize the initial host value
//! - [`reconcile`] — dispatch a [`PickerEvent`] to one of the above

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::clamp::DurationBounds;
use crate::error::{PickerError, Result};
use crate::model::{date_from_json, duration_from_json, FieldEdit, Model};
use crate::unit::{normalize_unit, Unit};

// ── Events ──────────────────────────────────────────────────────────────────

/// One discrete interaction delivered by the host form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// The unit select changed. `None` clears the selection.
    SelectUnit(Option<Unit>),
    /// The duration input changed (every keystroke). Any number is taken,
    /// in range or not.
    EditDuration(Option<Number>),
    /// The duration input lost focus.
    CommitDuration,
    EditDateFrom(Option<String>),
    EditDateTo(Option<String>),
}

#[derive(Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
enum RawEvent {
    SelectUnit {
        #[serde(default)]
        unit: Option<String>,
    },
    EditDuration {
        #[serde(default)]
        value: Value,
    },
    CommitDuration,
    EditDateFrom {
        #[serde(default)]
        value: Value,
    },
    EditDateTo {
        #[serde(default)]
        value: Value,
    },
}

impl PickerEvent {
    /// Parse an event from its JSON form, e.g.
    /// `{"event": "select-unit", "unit": "month"}`.
    ///
    /// An unknown unit tag becomes `SelectUnit(None)`. Values are read the
    /// way host records are: see [`duration_from_json`] and
    /// [`date_from_json`].
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidEvent`] for an unknown event name or an
    /// event that is not an object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let raw = RawEvent::deserialize(value)
            .map_err(|err| PickerError::InvalidEvent(err.to_string()))?;
        Ok(match raw {
            RawEvent::SelectUnit { unit } => Self::SelectUnit(normalize_unit(unit.as_deref())),
            RawEvent::EditDuration { value } => Self::EditDuration(duration_from_json(&value)),
            RawEvent::CommitDuration => Self::CommitDuration,
            RawEvent::EditDateFrom { value } => Self::EditDateFrom(date_from_json(&value)),
            RawEvent::EditDateTo { value } => Self::EditDateTo(date_from_json(&value)),
        })
    }
}

// ── Transitions ─────────────────────────────────────────────────────────────

/// Switch to `new_unit`.
///
/// Fields required by the new category keep their old value when the old
/// category also had them, and start as `None` otherwise. Everything else is
/// dropped. Selecting `None` always yields [`Model::Unset`].
///
/// ```
/// use range_picker::model::Model;
/// use range_picker::reconcile::select_unit;
/// use range_picker::unit::Unit;
///
/// let from = Model::From { date_from: Some("2025-02-14".into()) };
/// let range = select_unit(&from, Some(Unit::DateFromTo));
/// assert_eq!(
///     range,
///     Model::Range { date_from: Some("2025-02-14".into()), date_to: None }
/// );
/// ```
pub fn select_unit(old: &Model, new_unit: Option<Unit>) -> Model {
    let next = match Model::blank(new_unit) {
        Model::Unset => Model::Unset,
        Model::Duration { unit, .. } => Model::Duration {
            unit,
            duration: old.duration().cloned(),
        },
        Model::From { .. } => Model::From {
            date_from: carried_date_from(old),
        },
        Model::To { .. } => Model::To {
            date_to: carried_date_to(old),
        },
        Model::Range { .. } => Model::Range {
            date_from: carried_date_from(old),
            date_to: carried_date_to(old),
        },
    };
    tracing::debug!(
        from = old.unit().map(Unit::as_str),
        to = next.unit().map(Unit::as_str),
        "unit changed"
    );
    next
}

// Accessors read `None` for absent fields, which is also the initial value.
fn carried_date_from(old: &Model) -> Option<String> {
    old.date_from().map(str::to_string)
}

fn carried_date_to(old: &Model) -> Option<String> {
    old.date_to().map(str::to_string)
}

/// Replace a single field. The value is taken as-is; out-of-range durations
/// stay until [`commit_duration`].
///
/// Editing a field the current category does not have leaves the model
/// unchanged.
pub fn edit_field(old: &Model, edit: FieldEdit) -> Model {
    let field = edit.field();
    match old.with_field(edit) {
        Some(next) => next,
        None => {
            tracing::warn!(
                %field,
                unit = old.unit().map(Unit::as_str),
                "edit ignored: field does not apply to the selected unit"
            );
            old.clone()
        }
    }
}

/// Clamp the duration into `bounds`. Called on blur only.
///
/// A null duration, or a model without one, is returned unchanged.
pub fn commit_duration(old: &Model, bounds: &DurationBounds) -> Model {
    match old {
        Model::Duration {
            unit,
            duration: Some(value),
        } => {
            let clamped = bounds.clamp(value);
            if clamped != *value {
                tracing::debug!(raw = %value, %clamped, "duration clamped on commit");
            }
            Model::Duration {
                unit: *unit,
                duration: Some(clamped),
            }
        }
        _ => old.clone(),
    }
}

/// Normalize the host's initial value. An absent value becomes
/// [`Model::Unset`].
pub fn mount(initial: Option<&Model>) -> Model {
    initial.cloned().unwrap_or_default()
}

/// Apply one event to `model`.
pub fn reconcile(model: &Model, event: PickerEvent, bounds: &DurationBounds) -> Model {
    match event {
        PickerEvent::SelectUnit(unit) => select_unit(model, unit),
        PickerEvent::EditDuration(value) => edit_field(model, FieldEdit::Duration(value)),
        PickerEvent::CommitDuration => commit_duration(model, bounds),
        PickerEvent::EditDateFrom(value) => edit_field(model, FieldEdit::DateFrom(value)),
        PickerEvent::EditDateTo(value) => edit_field(model, FieldEdit::DateTo(value)),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
