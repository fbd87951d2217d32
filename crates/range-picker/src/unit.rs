//! Unit catalog: the fixed set of units a picker can offer and the category
//! each one belongs to.
//!
//! The catalog is a single immutable table. Every lookup (category, wire tag,
//! parsing) goes through it, so adding a unit means adding one row.
//!
//! # Categories
//!
//! | Category       | Units                                              | Model fields           |
//! |----------------|----------------------------------------------------|------------------------|
//! | `Duration`     | year, quarter, month, week, day, hour, minute      | `duration`             |
//! | `BoundaryFrom` | date-from                                          | `dateFrom`             |
//! | `BoundaryTo`   | date-to                                            | `dateTo`               |
//! | `Range`        | date-from-to                                       | `dateFrom`, `dateTo`   |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PickerError;

// ── Unit ────────────────────────────────────────────────────────────────────

/// A unit tag selectable in the picker.
///
/// Serialized as its kebab-case tag (`"date-from-to"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    DateFrom,
    DateTo,
    DateFromTo,
}

/// The subset of [`Unit`] that selects a relative duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

/// Which model fields a unit selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// A number of units (`duration`).
    Duration,
    /// A single lower date boundary (`dateFrom`).
    BoundaryFrom,
    /// A single upper date boundary (`dateTo`).
    BoundaryTo,
    /// Both date boundaries (`dateFrom`, `dateTo`).
    Range,
}

/// A value-carrying model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Duration,
    DateFrom,
    DateTo,
}

impl Field {
    /// Key used for this field in the JSON record.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::DateFrom => "dateFrom",
            Self::DateTo => "dateTo",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Catalog table ───────────────────────────────────────────────────────────

/// One row per unit, in declaration order of [`Unit`].
static CATALOG: [(Unit, &str, Category); 10] = [
    (Unit::Year, "year", Category::Duration),
    (Unit::Quarter, "quarter", Category::Duration),
    (Unit::Month, "month", Category::Duration),
    (Unit::Week, "week", Category::Duration),
    (Unit::Day, "day", Category::Duration),
    (Unit::Hour, "hour", Category::Duration),
    (Unit::Minute, "minute", Category::Duration),
    (Unit::DateFrom, "date-from", Category::BoundaryFrom),
    (Unit::DateTo, "date-to", Category::BoundaryTo),
    (Unit::DateFromTo, "date-from-to", Category::Range),
];

/// Every unit, in the default presentation order.
pub const ALL_UNITS: [Unit; 10] = [
    Unit::Year,
    Unit::Quarter,
    Unit::Month,
    Unit::Week,
    Unit::Day,
    Unit::Hour,
    Unit::Minute,
    Unit::DateFrom,
    Unit::DateTo,
    Unit::DateFromTo,
];

/// Units in the `Duration` category.
pub const DURATION_UNITS: [Unit; 7] = [
    Unit::Year,
    Unit::Quarter,
    Unit::Month,
    Unit::Week,
    Unit::Day,
    Unit::Hour,
    Unit::Minute,
];

/// Units selecting a single date boundary.
pub const BOUNDARY_DATE_UNITS: [Unit; 2] = [Unit::DateFrom, Unit::DateTo];

const DURATION_FIELDS: &[Field] = &[Field::Duration];
const FROM_FIELDS: &[Field] = &[Field::DateFrom];
const TO_FIELDS: &[Field] = &[Field::DateTo];
const RANGE_FIELDS: &[Field] = &[Field::DateFrom, Field::DateTo];

impl Unit {
    fn row(self) -> &'static (Unit, &'static str, Category) {
        &CATALOG[self as usize]
    }

    /// The kebab-case wire tag.
    pub fn as_str(self) -> &'static str {
        self.row().1
    }

    pub fn category(self) -> Category {
        self.row().2
    }

    /// Narrow to a [`DurationUnit`], or `None` for date units.
    pub fn as_duration(self) -> Option<DurationUnit> {
        match self {
            Self::Year => Some(DurationUnit::Year),
            Self::Quarter => Some(DurationUnit::Quarter),
            Self::Month => Some(DurationUnit::Month),
            Self::Week => Some(DurationUnit::Week),
            Self::Day => Some(DurationUnit::Day),
            Self::Hour => Some(DurationUnit::Hour),
            Self::Minute => Some(DurationUnit::Minute),
            Self::DateFrom | Self::DateTo | Self::DateFromTo => None,
        }
    }
}

impl DurationUnit {
    pub fn as_str(self) -> &'static str {
        Unit::from(self).as_str()
    }
}

impl From<DurationUnit> for Unit {
    fn from(unit: DurationUnit) -> Self {
        match unit {
            DurationUnit::Year => Unit::Year,
            DurationUnit::Quarter => Unit::Quarter,
            DurationUnit::Month => Unit::Month,
            DurationUnit::Week => Unit::Week,
            DurationUnit::Day => Unit::Day,
            DurationUnit::Hour => Unit::Hour,
            DurationUnit::Minute => Unit::Minute,
        }
    }
}

impl FromStr for Unit {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|(_, tag, _)| *tag == s)
            .map(|(unit, _, _)| *unit)
            .ok_or_else(|| PickerError::UnknownUnit(s.to_string()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Category {
    /// The model fields this category requires, in record order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Duration => DURATION_FIELDS,
            Self::BoundaryFrom => FROM_FIELDS,
            Self::BoundaryTo => TO_FIELDS,
            Self::Range => RANGE_FIELDS,
        }
    }

    pub fn applies(self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

// ── Catalog operations ──────────────────────────────────────────────────────

/// Category of a known unit. Total over [`Unit`].
pub fn categorize(unit: Unit) -> Category {
    unit.category()
}

/// Category of a raw unit tag.
///
/// # Errors
///
/// Returns [`PickerError::UnknownUnit`] for tags outside the catalog.
pub fn categorize_tag(tag: &str) -> Result<Category, PickerError> {
    tag.parse::<Unit>().map(Unit::category)
}

/// Parse a raw unit tag, treating anything unknown as "no unit selected".
///
/// Unknown tags are reported as a `warn` event, never as an error.
pub fn normalize_unit(tag: Option<&str>) -> Option<Unit> {
    let tag = tag?;
    match tag.parse::<Unit>() {
        Ok(unit) => Some(unit),
        Err(err) => {
            tracing::warn!(%err, "unknown unit treated as no unit selected");
            None
        }
    }
}

/// Display label for a unit: upper-cased tag with hyphens turned into spaces.
///
/// ```
/// use range_picker::unit::{verbose_label, Unit};
///
/// assert_eq!(verbose_label(Unit::DateFromTo), "DATE FROM TO");
/// ```
pub fn verbose_label(unit: Unit) -> String {
    unit.as_str().to_uppercase().replace('-', " ")
}

/// Units to offer: the allow-list as given, or the whole catalog.
pub fn available_units(allow_list: Option<&[Unit]>) -> Vec<Unit> {
    match allow_list {
        Some(units) => units.to_vec(),
        None => ALL_UNITS.to_vec(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rows_follow_declaration_order() {
        for (index, (unit, _, _)) in CATALOG.iter().enumerate() {
            assert_eq!(*unit as usize, index, "row {index} out of order");
        }
    }

    #[test]
    fn test_all_units_match_catalog() {
        let from_table: Vec<Unit> = CATALOG.iter().map(|(unit, _, _)| *unit).collect();
        assert_eq!(from_table, ALL_UNITS.to_vec());
    }

    #[test]
    fn test_categorize_duration_units() {
        for unit in DURATION_UNITS {
            assert_eq!(categorize(unit), Category::Duration);
            assert!(unit.as_duration().is_some());
        }
    }

    #[test]
    fn test_categorize_date_units() {
        assert_eq!(categorize(Unit::DateFrom), Category::BoundaryFrom);
        assert_eq!(categorize(Unit::DateTo), Category::BoundaryTo);
        assert_eq!(categorize(Unit::DateFromTo), Category::Range);
        assert!(Unit::DateFromTo.as_duration().is_none());
    }

    #[test]
    fn test_categorize_tag_unknown() {
        let err = categorize_tag("fortnight").unwrap_err();
        assert_eq!(err, PickerError::UnknownUnit("fortnight".to_string()));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Month".parse::<Unit>().is_err());
        assert_eq!("month".parse::<Unit>().unwrap(), Unit::Month);
    }

    #[test]
    fn test_normalize_unit_unknown_is_none() {
        assert_eq!(normalize_unit(Some("decade")), None);
        assert_eq!(normalize_unit(None), None);
        assert_eq!(normalize_unit(Some("date-to")), Some(Unit::DateTo));
    }

    #[test]
    fn test_verbose_label() {
        assert_eq!(verbose_label(Unit::Month), "MONTH");
        assert_eq!(verbose_label(Unit::DateFrom), "DATE FROM");
        assert_eq!(verbose_label(Unit::DateFromTo), "DATE FROM TO");
    }

    #[test]
    fn test_available_units_default_is_full_catalog() {
        assert_eq!(available_units(None), ALL_UNITS.to_vec());
    }

    #[test]
    fn test_available_units_preserves_allow_list_order() {
        let allow = [Unit::DateTo, Unit::DateFrom];
        assert_eq!(available_units(Some(&allow)), vec![Unit::DateTo, Unit::DateFrom]);
    }

    #[test]
    fn test_category_fields() {
        assert_eq!(Category::Duration.fields(), &[Field::Duration]);
        assert_eq!(Category::Range.fields(), &[Field::DateFrom, Field::DateTo]);
        assert!(Category::BoundaryFrom.applies(Field::DateFrom));
        assert!(!Category::BoundaryFrom.applies(Field::DateTo));
    }

    #[test]
    fn test_duration_and_date_categories_share_no_field() {
        for date_category in [Category::BoundaryFrom, Category::BoundaryTo, Category::Range] {
            for field in date_category.fields() {
                assert!(!Category::Duration.applies(*field));
            }
        }
    }

    #[test]
    fn test_unit_serde_tag() {
        let json = serde_json::to_string(&Unit::DateFromTo).unwrap();
        assert_eq!(json, "\"date-from-to\"");
        let parsed: Unit = serde_json::from_str("\"quarter\"").unwrap();
        assert_eq!(parsed, Unit::Quarter);
    }
}
