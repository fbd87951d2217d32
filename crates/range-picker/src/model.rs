//! The picker model: a unit tag plus exactly the fields its category needs.
//!
//! Each [`Model`] variant is one category, so a model with a duration unit
//! and a `dateTo` field cannot be constructed. Unset fields are `None`; on the
//! wire they are emitted as `null`, never omitted.
//!
//! # Wire format
//!
//! ```json
//! {"unit": null}
//! {"unit": "month", "duration": 3}
//! {"unit": "date-from", "dateFrom": "2025-02-14"}
//! {"unit": "date-to", "dateTo": null}
//! {"unit": "date-from-to", "dateFrom": "2025-02-14", "dateTo": "2025-02-16"}
//! ```
//!
//! Reading is lenient: unknown units collapse to `{"unit": null}`, keys that
//! do not belong to the category are dropped, and missing ones become `null`.
//! Durations are kept as the JSON number the host supplied (`3`, `3.0` and
//! `1.5` all survive a read unchanged).

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::unit::{normalize_unit, Category, DurationUnit, Field, Unit};

/// Key of the unit tag in the JSON record.
pub const UNIT_KEY: &str = "unit";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Model {
    /// No unit selected.
    #[default]
    Unset,
    Duration {
        unit: DurationUnit,
        duration: Option<Number>,
    },
    From {
        date_from: Option<String>,
    },
    To {
        date_to: Option<String>,
    },
    Range {
        date_from: Option<String>,
        date_to: Option<String>,
    },
}

/// A new value for one model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Duration(Option<Number>),
    DateFrom(Option<String>),
    DateTo(Option<String>),
}

impl FieldEdit {
    pub fn field(&self) -> Field {
        match self {
            Self::Duration(_) => Field::Duration,
            Self::DateFrom(_) => Field::DateFrom,
            Self::DateTo(_) => Field::DateTo,
        }
    }
}

impl Model {
    /// A model for `unit` with every applicable field set to `None`.
    pub fn blank(unit: Option<Unit>) -> Self {
        let Some(unit) = unit else {
            return Self::Unset;
        };
        match unit.category() {
            Category::Duration => unit.as_duration().map_or(Self::Unset, |unit| Self::Duration {
                unit,
                duration: None,
            }),
            Category::BoundaryFrom => Self::From { date_from: None },
            Category::BoundaryTo => Self::To { date_to: None },
            Category::Range => Self::Range {
                date_from: None,
                date_to: None,
            },
        }
    }

    pub fn unit(&self) -> Option<Unit> {
        match self {
            Self::Unset => None,
            Self::Duration { unit, .. } => Some(Unit::from(*unit)),
            Self::From { .. } => Some(Unit::DateFrom),
            Self::To { .. } => Some(Unit::DateTo),
            Self::Range { .. } => Some(Unit::DateFromTo),
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.unit().map(Unit::category)
    }

    /// Fields carried by this model, in record order. Empty when unset.
    pub fn fields(&self) -> &'static [Field] {
        match self.category() {
            Some(category) => category.fields(),
            None => &[],
        }
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }

    /// Current duration, `None` when null or not applicable.
    pub fn duration(&self) -> Option<&Number> {
        match self {
            Self::Duration { duration, .. } => duration.as_ref(),
            _ => None,
        }
    }

    pub fn date_from(&self) -> Option<&str> {
        match self {
            Self::From { date_from } | Self::Range { date_from, .. } => date_from.as_deref(),
            _ => None,
        }
    }

    pub fn date_to(&self) -> Option<&str> {
        match self {
            Self::To { date_to } | Self::Range { date_to, .. } => date_to.as_deref(),
            _ => None,
        }
    }

    /// Apply `edit` if its field belongs to this model's category.
    ///
    /// Returns `None` when the field does not apply; the model is untouched.
    pub fn with_field(&self, edit: FieldEdit) -> Option<Self> {
        let mut next = self.clone();
        let applied = match (&mut next, edit) {
            (Self::Duration { duration, .. }, FieldEdit::Duration(value)) => {
                *duration = value;
                true
            }
            (
                Self::From { date_from } | Self::Range { date_from, .. },
                FieldEdit::DateFrom(value),
            ) => {
                *date_from = value;
                true
            }
            (Self::To { date_to } | Self::Range { date_to, .. }, FieldEdit::DateTo(value)) => {
                *date_to = value;
                true
            }
            _ => false,
        };
        applied.then_some(next)
    }

    // ── JSON record ─────────────────────────────────────────────────────

    /// The model as a flat JSON object: `unit` plus one key per field.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(
            UNIT_KEY.to_string(),
            self.unit()
                .map_or(Value::Null, |unit| Value::String(unit.as_str().to_string())),
        );
        for field in self.fields() {
            record.insert(field.as_str().to_string(), self.field_value(*field));
        }
        record
    }

    fn field_value(&self, field: Field) -> Value {
        match field {
            Field::Duration => self.duration().cloned().map_or(Value::Null, Value::Number),
            Field::DateFrom => self.date_from().map_or(Value::Null, Value::from),
            Field::DateTo => self.date_to().map_or(Value::Null, Value::from),
        }
    }

    /// Normalize any JSON value into a model.
    ///
    /// Anything that is not an object (including `null`) is the unset model.
    pub fn from_json(value: &Value) -> Self {
        let Some(record) = value.as_object() else {
            return Self::Unset;
        };
        let unit = normalize_unit(record.get(UNIT_KEY).and_then(Value::as_str));
        let date = |field: Field| record.get(field.as_str()).and_then(date_from_json);
        match Self::blank(unit) {
            Self::Unset => Self::Unset,
            Self::Duration { unit, .. } => Self::Duration {
                unit,
                duration: record.get(Field::Duration.as_str()).and_then(duration_from_json),
            },
            Self::From { .. } => Self::From {
                date_from: date(Field::DateFrom),
            },
            Self::To { .. } => Self::To {
                date_to: date(Field::DateTo),
            },
            Self::Range { .. } => Self::Range {
                date_from: date(Field::DateFrom),
                date_to: date(Field::DateTo),
            },
        }
    }
}

/// Read a duration from a host value or from the raw text of the input.
///
/// Numbers are kept as given, whole or not and in range or not. Numeric text
/// (`"12"`, `"2.5"`, `"1e3"`) is parsed. An empty field is `None`, and so is
/// anything else that is not a number, with a warning.
///
/// ```
/// use range_picker::model::duration_from_json;
/// use serde_json::json;
///
/// assert_eq!(duration_from_json(&json!(1.5)), serde_json::Number::from_f64(1.5));
/// assert_eq!(duration_from_json(&json!("12")), Some(serde_json::Number::from(12)));
/// assert_eq!(duration_from_json(&json!("")), None);
/// ```
pub fn duration_from_json(value: &Value) -> Option<Number> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.clone()),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => s.trim().parse::<Number>().ok().or_else(|| {
            tracing::warn!(value = %s, "non-numeric duration text read as null");
            None
        }),
        other => {
            tracing::warn!(value = %other, "non-numeric duration read as null");
            None
        }
    }
}

/// Read an opaque date value. Strings pass as-is, malformed ones included;
/// other non-null values are kept in their JSON text form.
pub fn date_from_json(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => {
            tracing::debug!(value = %other, "non-string date kept as its JSON text");
            Some(other.to_string())
        }
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.to_record();
        let mut map = serializer.serialize_map(Some(record.len()))?;
        for (key, value) in &record {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_models_have_null_fields() {
        assert_eq!(Model::blank(None), Model::Unset);
        assert_eq!(
            Model::blank(Some(Unit::Week)),
            Model::Duration {
                unit: DurationUnit::Week,
                duration: None
            }
        );
        assert_eq!(
            Model::blank(Some(Unit::DateFromTo)),
            Model::Range {
                date_from: None,
                date_to: None
            }
        );
    }

    #[test]
    fn test_unset_serializes_to_unit_null_only() {
        let json = serde_json::to_value(Model::Unset).unwrap();
        assert_eq!(json, json!({"unit": null}));
    }

    #[test]
    fn test_serialize_emits_null_fields() {
        let model = Model::blank(Some(Unit::Month));
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({"unit": "month", "duration": null})
        );
        let model = Model::blank(Some(Unit::DateFromTo));
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({"unit": "date-from-to", "dateFrom": null, "dateTo": null})
        );
    }

    #[test]
    fn test_record_keys_follow_category() {
        let model = Model::To {
            date_to: Some("2025-02-16".into()),
        };
        let record = model.to_record();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["unit", "dateTo"]);
    }

    #[test]
    fn test_from_json_null_is_unset() {
        assert_eq!(Model::from_json(&Value::Null), Model::Unset);
        assert_eq!(Model::from_json(&json!({})), Model::Unset);
        assert_eq!(Model::from_json(&json!("month")), Model::Unset);
    }

    #[test]
    fn test_from_json_unknown_unit_collapses() {
        let model = Model::from_json(&json!({"unit": "decade", "duration": 3}));
        assert_eq!(model, Model::Unset);
    }

    #[test]
    fn test_from_json_drops_foreign_fields() {
        let model = Model::from_json(&json!({
            "unit": "date-from",
            "dateFrom": "2025-02-14",
            "dateTo": "2025-02-16",
            "duration": 4
        }));
        assert_eq!(
            model,
            Model::From {
                date_from: Some("2025-02-14".into())
            }
        );
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let model = Model::from_json(&json!({"unit": "date-from-to", "dateTo": "2025-02-16"}));
        assert_eq!(
            model,
            Model::Range {
                date_from: None,
                date_to: Some("2025-02-16".into())
            }
        );
    }

    #[test]
    fn test_from_json_keeps_any_number() {
        for raw in [json!(1.5), json!(3.0), json!(-2), json!(u64::MAX)] {
            let record = json!({"unit": "day", "duration": raw});
            let model = Model::from_json(&record);
            assert!(model.duration().is_some());
            assert_eq!(Value::Object(model.to_record()), record);
        }
    }

    #[test]
    fn test_from_json_numeric_text_duration() {
        let model = Model::from_json(&json!({"unit": "day", "duration": "7"}));
        assert_eq!(model.duration(), Some(&Number::from(7)));
        let model = Model::from_json(&json!({"unit": "day", "duration": "seven"}));
        assert_eq!(model.duration(), None);
    }

    #[test]
    fn test_duration_from_json_input_forms() {
        assert_eq!(duration_from_json(&json!("2.5")), Number::from_f64(2.5));
        assert_eq!(duration_from_json(&json!(" 12 ")), Some(Number::from(12)));
        assert_eq!(duration_from_json(&json!("1e3")), Number::from_f64(1000.0));
        assert_eq!(duration_from_json(&json!("  ")), None);
        assert_eq!(duration_from_json(&json!(true)), None);
    }

    #[test]
    fn test_non_string_date_kept_as_text() {
        assert_eq!(date_from_json(&json!(123)), Some("123".to_string()));
        assert_eq!(date_from_json(&json!(null)), None);
        let model = Model::from_json(&json!({"unit": "date-from", "dateFrom": 20250214}));
        assert_eq!(model.date_from(), Some("20250214"));
    }

    #[test]
    fn test_malformed_date_passes_through() {
        let model = Model::from_json(&json!({"unit": "date-to", "dateTo": "not-a-date"}));
        assert_eq!(model.date_to(), Some("not-a-date"));
    }

    #[test]
    fn test_deserialize_via_serde() {
        let model: Model =
            serde_json::from_str(r#"{"unit":"hour","duration":12}"#).unwrap();
        assert_eq!(
            model,
            Model::Duration {
                unit: DurationUnit::Hour,
                duration: Some(Number::from(12))
            }
        );
        let model: Model = serde_json::from_str("null").unwrap();
        assert_eq!(model, Model::Unset);
    }

    #[test]
    fn test_with_field_applies_only_to_own_category() {
        let model = Model::blank(Some(Unit::DateFrom));
        assert!(model
            .with_field(FieldEdit::DateTo(Some("2025-01-01".into())))
            .is_none());
        let edited = model
            .with_field(FieldEdit::DateFrom(Some("2025-01-01".into())))
            .unwrap();
        assert_eq!(edited.date_from(), Some("2025-01-01"));
    }

    #[test]
    fn test_with_field_range_accepts_both_dates() {
        let model = Model::blank(Some(Unit::DateFromTo))
            .with_field(FieldEdit::DateFrom(Some("2025-02-14".into())))
            .unwrap()
            .with_field(FieldEdit::DateTo(Some("2025-02-16".into())))
            .unwrap();
        assert_eq!(model.date_from(), Some("2025-02-14"));
        assert_eq!(model.date_to(), Some("2025-02-16"));
    }
}
