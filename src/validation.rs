//! Coercion and validation of the reserve request body.
//!
//! `event_id` is converted like JavaScript's `Number()` (numeric strings,
//! `0x`/`0b`/`0o` prefixes, single-element arrays); everything that is not a
//! positive integer ends up as a field error. Errors are collected into a
//! [`ValidationReport`] so the client sees every problem at once.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ReserveRequest {
    #[validate(range(min = 1, message = "Number must be greater than 0"))]
    pub event_id: i64,
    #[validate(length(min = 1, message = "String must contain at least 1 character(s)"))]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn form(message: impl Into<String>) -> Self {
        Self {
            form_errors: vec![message.into()],
            field_errors: BTreeMap::new(),
        }
    }

    fn field(&mut self, name: &str, message: impl Into<String>) {
        self.field_errors
            .entry(name.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }
}

impl From<validator::ValidationErrors> for ValidationReport {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut report = ValidationReport::default();
        for (field, list) in errors.field_errors() {
            for err in list {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                report.field(&field, message);
            }
        }
        report
    }
}

impl ReserveRequest {
    pub fn from_json(body: &Value) -> Result<Self, ValidationReport> {
        let Value::Object(fields) = body else {
            return Err(ValidationReport::form(format!(
                "Expected object, received {}",
                type_name(body)
            )));
        };

        let mut report = ValidationReport::default();
        let event_id = coerce_event_id(fields)
            .map_err(|msg| report.field("event_id", msg))
            .ok();
        let user_id = match fields.get("user_id") {
            Some(Value::String(s)) => Some(s.clone()),
            None => {
                report.field("user_id", "Required");
                None
            }
            Some(other) => {
                let message = format!("Expected string, received {}", type_name(other));
                report.field("user_id", message);
                None
            }
        };

        // Правила диапазона только для полей, которые удалось привести к типу
        let request = ReserveRequest {
            event_id: event_id.unwrap_or(1),
            user_id: user_id.clone().unwrap_or_else(|| "-".to_string()),
        };
        if let Err(errors) = request.validate() {
            let checked = ValidationReport::from(errors);
            for (field, messages) in checked.field_errors {
                let coerced = match field.as_str() {
                    "event_id" => event_id.is_some(),
                    "user_id" => user_id.is_some(),
                    _ => true,
                };
                if coerced {
                    for message in messages {
                        report.field(&field, message);
                    }
                }
            }
        }

        if report.is_empty() {
            Ok(request)
        } else {
            Err(report)
        }
    }
}

fn coerce_event_id(fields: &Map<String, Value>) -> Result<i64, String> {
    let number = fields.get("event_id").map_or(f64::NAN, to_number);

    if number.is_nan() {
        return Err("Expected number, received nan".to_string());
    }
    if !number.is_finite() || number.fract() != 0.0 {
        return Err("Expected integer, received float".to_string());
    }
    // `as` насыщает: слишком большой id просто не найдётся
    Ok(number as i64)
}

/// Numeric conversion with the same rules as JavaScript's `Number()`.
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => str_to_number(s),
        // массив сначала превращается в строку: [] -> "", [x] -> String(x)
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => match single {
                Value::Null => 0.0,
                Value::Bool(_) | Value::Object(_) => f64::NAN,
                other => to_number(other),
            },
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn str_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0b" | "0B") => Some(2),
        Some("0o" | "0O") => Some(8),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // `f64::from_str` понимает "inf" и "nan", которых в JS нет
    let decimal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
