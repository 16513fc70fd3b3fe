use serde_json::{Map, Value};

use crate::error::{CoreError, FieldViolation};

/// Reads typed fields out of a JSON object while accumulating violations.
pub(crate) struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    /// Fails immediately when the payload is not a JSON object: there are
    /// no fields to report on.
    pub(crate) fn new(payload: &'a Value) -> Result<Self, CoreError> {
        match payload.as_object() {
            Some(map) => Ok(Self {
                map,
                violations: Vec::new(),
            }),
            None => Err(CoreError::Validation(vec![FieldViolation::new(
                "body",
                "must be a JSON object",
            )])),
        }
    }

    /// Present and non-null value of `field`.
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub(crate) fn reject(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    /// A required, non-blank string. Returned trimmed.
    pub(crate) fn required_str(&mut self, field: &str) -> Option<String> {
        match self.present(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::String(_)) | None => {
                self.reject(field, "is required");
                None
            }
            Some(_) => {
                self.reject(field, "must be a string");
                None
            }
        }
    }

    /// A required number within `[0, 100]`.
    pub(crate) fn required_percent(&mut self, field: &str) -> Option<f64> {
        match self.present(field).and_then(Value::as_f64) {
            Some(v) if (0.0..=100.0).contains(&v) => Some(v),
            _ => {
                self.reject(field, "must be a number between 0 and 100");
                None
            }
        }
    }

    pub(crate) fn optional_f64(&mut self, field: &str) -> Option<f64> {
        let value = self.present(field)?;
        match value.as_f64() {
            Some(v) => Some(v),
            None => {
                self.reject(field, "must be a number");
                None
            }
        }
    }

    /// An optional integer. Fractional numbers are truncated toward zero;
    /// anything that is not a finite number in `i64` range is rejected.
    pub(crate) fn optional_i64(&mut self, field: &str) -> Option<i64> {
        let value = self.present(field)?;
        let parsed = value.as_i64().or_else(|| {
            value
                .as_f64()
                .map(f64::trunc)
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        });
        if parsed.is_none() {
            self.reject(field, "must be a number");
        }
        parsed
    }

    pub(crate) fn optional_i32(&mut self, field: &str) -> Option<i32> {
        let value = self.optional_i64(field)?;
        match i32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                self.reject(field, "is out of range");
                None
            }
        }
    }

    /// An optional non-negative count, defaulting to zero.
    pub(crate) fn count_or_zero(&mut self, field: &str) -> i32 {
        match self.optional_i32(field) {
            Some(v) if v < 0 => {
                self.reject(field, "must not be negative");
                0
            }
            Some(v) => v,
            None => 0,
        }
    }

    pub(crate) fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.present(field)? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            _ => {
                self.reject(field, "must be a string");
                None
            }
        }
    }

    /// A health flag: only an explicit `false` marks the subsystem unhealthy.
    pub(crate) fn healthy_unless_false(&mut self, field: &str) -> bool {
        match self.present(field) {
            None => true,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.reject(field, "must be a boolean");
                true
            }
        }
    }

    /// Any present JSON value, kept verbatim.
    pub(crate) fn optional_json(&self, field: &str) -> Option<Value> {
        self.present(field).cloned()
    }

    pub(crate) fn finish(self) -> Result<(), CoreError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.violations))
        }
    }
}
