//! # range-picker
//!
//! Model reconciliation for a duration / date-boundary / date-range form
//! control.
//!
//! The picker value is either a relative duration (`3 month`), a single date
//! boundary (`from 2025-02-14`), or a date range. Rendering is the host's
//! job; this crate computes what the value becomes after each interaction.
//! It never computes dates from durations.
//!
//! ## Modules
//!
//! - [`unit`] — Unit catalog, categories, labels
//! - [`model`] — The category-tagged model and its JSON record form
//! - [`reconcile`] — Pure transitions: unit change, field edit, commit, mount
//! - [`clamp`] — Optional inclusive bounds for durations
//! - [`guard`] — Integer-only keystroke policy and listener attachment
//! - [`equality`] — Shallow record equality
//! - [`picker`] — Controlled-component adapter (config, mount, events)
//! - [`error`] — Error types

pub mod clamp;
pub mod equality;
pub mod error;
pub mod guard;
pub mod model;
pub mod picker;
pub mod reconcile;
pub mod unit;

pub use clamp::{clamp, DurationBounds};
pub use equality::{shallow_equal, shallow_equal_values};
pub use error::PickerError;
pub use guard::{attach, decide, GuardAttachment, KeyDecision, KeyStroke, KeydownTarget};
pub use model::{date_from_json, duration_from_json, FieldEdit, Model};
pub use picker::{Picker, PickerConfig, Synced};
pub use reconcile::{
    commit_duration, edit_field, mount, reconcile, select_unit, PickerEvent,
};
pub use unit::{
    available_units, categorize, categorize_tag, verbose_label, Category, DurationUnit, Field,
    Unit, ALL_UNITS, BOUNDARY_DATE_UNITS, DURATION_UNITS,
};
