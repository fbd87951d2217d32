//! WASM bindings for the range-picker core.
//!
//! Models cross the boundary as JSON strings in the record shape the core
//! serializes (`{"unit": "month", "duration": 3}`). The browser side keeps
//! the model and passes it back on every call.

use wasm_bindgen::prelude::*;

use range_picker::guard::{decide, KeyStroke};
use range_picker::model::{date_from_json, duration_from_json, Model};
use range_picker::picker::{Picker, PickerConfig};
use range_picker::reconcile::PickerEvent;
use range_picker::unit::{normalize_unit, verbose_label as unit_label, Unit};

fn to_js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

fn read_model(model_json: &str) -> Result<Model, JsError> {
    serde_json::from_str(model_json).map_err(to_js_error)
}

fn write_model(model: &Model) -> Result<String, JsError> {
    serde_json::to_string(model).map_err(to_js_error)
}

fn build_picker(config_json: &str) -> Result<Picker, JsError> {
    let config = PickerConfig::from_json_str(config_json).map_err(to_js_error)?;
    Ok(Picker::new(config))
}

/// Normalize the configured `modelValue`.
///
/// Returns the model to emit, or `undefined` when the host value is already
/// normalized.
#[wasm_bindgen]
pub fn mount(config_json: &str) -> Result<Option<String>, JsError> {
    let synced = build_picker(config_json)?.mount();
    synced.emission.as_ref().map(write_model).transpose()
}

/// Switch the unit. An empty or unknown tag clears the selection.
#[wasm_bindgen(js_name = selectUnit)]
pub fn select_unit(config_json: &str, model_json: &str, unit: &str) -> Result<String, JsError> {
    let picker = build_picker(config_json)?;
    let model = read_model(model_json)?;
    let unit = normalize_unit(Some(unit).filter(|tag| !tag.is_empty()));
    write_model(&picker.handle(&model, PickerEvent::SelectUnit(unit)))
}

/// Replace a field (`duration`, `dateFrom` or `dateTo`) with the raw input
/// value, given as JSON (`"12"`, `12`, `1.5`, `null`, `"2025-02-14"`).
///
/// Field values never throw: unparseable duration text is `null` and a
/// non-string date keeps its JSON text.
#[wasm_bindgen(js_name = editField)]
pub fn edit_field(
    config_json: &str,
    model_json: &str,
    field: &str,
    value_json: &str,
) -> Result<String, JsError> {
    let picker = build_picker(config_json)?;
    let model = read_model(model_json)?;
    let value: serde_json::Value = serde_json::from_str(value_json).map_err(to_js_error)?;
    let event = match field {
        "duration" => PickerEvent::EditDuration(duration_from_json(&value)),
        "dateFrom" => PickerEvent::EditDateFrom(date_from_json(&value)),
        "dateTo" => PickerEvent::EditDateTo(date_from_json(&value)),
        other => return Err(JsError::new(&format!("Unknown field: {other}"))),
    };
    write_model(&picker.handle(&model, event))
}

/// Clamp the duration to the configured bounds (call on blur).
#[wasm_bindgen(js_name = commitDuration)]
pub fn commit_duration(config_json: &str, model_json: &str) -> Result<String, JsError> {
    let picker = build_picker(config_json)?;
    let model = read_model(model_json)?;
    write_model(&picker.handle(&model, PickerEvent::CommitDuration))
}

#[wasm_bindgen(js_name = verboseLabel)]
pub fn verbose_label(unit: &str) -> Result<String, JsError> {
    let unit: Unit = unit.parse().map_err(to_js_error)?;
    Ok(unit_label(unit))
}

/// The offered unit tags, as a JSON array.
#[wasm_bindgen(js_name = availableUnits)]
pub fn available_units(config_json: &str) -> Result<String, JsError> {
    let picker = build_picker(config_json)?;
    serde_json::to_string(picker.units()).map_err(to_js_error)
}

/// `true` when the keydown's default action must be prevented.
#[wasm_bindgen(js_name = shouldCancelKey)]
pub fn should_cancel_key(key: &str, ctrl: bool) -> bool {
    let stroke = KeyStroke {
        key: key.to_string(),
        ctrl,
    };
    decide(&stroke).is_cancel()
}
