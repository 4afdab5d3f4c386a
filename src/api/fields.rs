use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Field name → reason, reported back to the client on validation failure
pub type FieldErrors = BTreeMap<String, String>;

/// Key used for errors that belong to the payload as a whole
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// How much of the writable field set an update request must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PUT: required fields must be present
    Full,
    /// PATCH: only the fields present are validated
    Partial,
}

impl UpdateMode {
    pub fn requires_all(self) -> bool {
        matches!(self, UpdateMode::Full)
    }
}

/// Accumulates per-field validation errors while reading a JSON object payload.
/// Keys not asked for (read-only ones such as `id` or `user`) are never looked at.
pub struct PayloadReader<'a> {
    payload: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a Value) -> Result<Self, FieldErrors> {
        match payload {
            Value::Object(map) => Ok(Self {
                payload: map,
                errors: FieldErrors::new(),
            }),
            other => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    NON_FIELD_ERRORS.to_string(),
                    format!("Invalid data. Expected an object, but got {}.", json_type(other)),
                );
                Err(errors)
            }
        }
    }

    /// Text field, trimmed. Returns `None` when absent (or invalid).
    pub fn text(&mut self, name: &str, required: bool, allow_blank: bool, max_length: usize) -> Option<String> {
        let value = self.present(name, required)?;
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            _ => return self.reject(name, "Not a valid string."),
        };

        if text.is_empty() && !allow_blank {
            return self.reject(name, "This field may not be blank.");
        }
        if text.chars().count() > max_length {
            return self.reject(name, &format!("Ensure this field has no more than {max_length} characters."));
        }
        Some(text)
    }

    /// Non-negative 32-bit integer. Accepts JSON integers, whole-number floats
    /// (`30.0`) and integer strings, including ones with a zero fraction (`"30.00"`).
    pub fn non_negative_integer(&mut self, name: &str, required: bool) -> Option<i32> {
        let value = self.present(name, required)?;
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => parse_whole_number(s),
            _ => None,
        };

        let Some(number) = parsed else {
            return self.reject(name, "A valid integer is required.");
        };
        if number < 0 {
            return self.reject(name, "Ensure this value is greater than or equal to 0.");
        }
        match i32::try_from(number) {
            Ok(n) => Some(n),
            Err(_) => self.reject(name, &format!("Ensure this value is less than or equal to {}.", i32::MAX)),
        }
    }

    /// Non-negative fixed-precision decimal, rescaled to `decimal_places`.
    pub fn non_negative_decimal(
        &mut self,
        name: &str,
        required: bool,
        max_digits: u32,
        decimal_places: u32,
    ) -> Option<Decimal> {
        let value = self.present(name, required)?;
        let parsed = match value {
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        };

        let Some(number) = parsed else {
            return self.reject(name, "A valid number is required.");
        };
        if number < Decimal::ZERO {
            return self.reject(name, "Ensure this value is greater than or equal to 0.");
        }
        if let Err(reason) = check_precision(number, max_digits, decimal_places) {
            return self.reject(name, &reason);
        }

        let mut number = number;
        number.rescale(decimal_places);
        Some(number)
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn present(&mut self, name: &str, required: bool) -> Option<&'a Value> {
        let payload = self.payload;
        match payload.get(name) {
            None if required => self.reject(name, "This field is required."),
            None => None,
            Some(Value::Null) => self.reject(name, "This field may not be null."),
            Some(value) => Some(value),
        }
    }

    fn reject<T>(&mut self, name: &str, reason: &str) -> Option<T> {
        self.errors.insert(name.to_string(), reason.to_string());
        None
    }
}

fn parse_whole_number(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits = match text.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
        Some(_) => return None,
        None => text,
    };
    digits.parse::<i64>().ok()
}

fn check_precision(number: Decimal, max_digits: u32, decimal_places: u32) -> Result<(), String> {
    let normalized = number.normalize();
    let scale = normalized.scale();
    let digits = normalized.mantissa().unsigned_abs().to_string().len() as u32;
    let total = digits.max(scale);
    let whole = total - scale;

    if total > max_digits {
        return Err(format!("Ensure that there are no more than {max_digits} digits in total."));
    }
    if scale > decimal_places {
        return Err(format!("Ensure that there are no more than {decimal_places} decimal places."));
    }
    if whole > max_digits - decimal_places {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            max_digits - decimal_places
        ));
    }
    Ok(())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
