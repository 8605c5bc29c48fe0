//! Declarative write-payload schemas.
//!
//! A [`Schema`] is a fixed list of [`Field`] rules. [`Schema::validate`] walks
//! the whole payload, collecting every violation instead of stopping at the
//! first one, and produces a normalized document with defaults filled in and
//! loosely typed values (boolean strings, date strings, epoch millis) coerced.

use chrono::{Datelike, DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::{errors::{AppError, FieldError}, utils::valid_url::is_valid_url};

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Text { min: Option<usize>, max: Option<usize> },
    Url,
    Date,
    Bool,
    TextList,
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub enum Fallback {
    Bool(bool),
    Text(&'static str),
    EmptyList,
    Null,
}

impl Fallback {
    fn to_value(self) -> Value {
        match self {
            Fallback::Bool(b) => Value::Bool(b),
            Fallback::Text(s) => Value::String(s.to_string()),
            Fallback::EmptyList => Value::Array(Vec::new()),
            Fallback::Null => Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
    pub nullable: bool,
    pub allow_empty: bool,
    pub default: Option<Fallback>,
}

impl Field {
    pub const fn text(name: &'static str, min: usize, max: usize) -> Self {
        Field::new(name, Kind::Text { min: Some(min), max: Some(max) })
    }

    pub const fn free_text(name: &'static str) -> Self {
        Field::new(name, Kind::Text { min: None, max: None })
    }

    pub const fn url(name: &'static str) -> Self {
        Field::new(name, Kind::Url).nullable().allow_empty()
    }

    pub const fn date(name: &'static str) -> Self {
        Field::new(name, Kind::Date)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Field::new(name, Kind::Bool)
    }

    pub const fn text_list(name: &'static str) -> Self {
        Field::new(name, Kind::TextList)
    }

    pub const fn one_of(name: &'static str, values: &'static [&'static str]) -> Self {
        Field::new(name, Kind::OneOf(values))
    }

    const fn new(name: &'static str, kind: Kind) -> Self {
        Field {
            name,
            kind,
            required: false,
            nullable: false,
            allow_empty: false,
            default: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub const fn default_to(mut self, fallback: Fallback) -> Self {
        self.default = Some(fallback);
        self
    }
}

#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [Field],
}

/// Outcome of running a payload through a [`Schema`].
#[derive(Debug, PartialEq)]
pub enum Validation {
    Valid(Map<String, Value>),
    Invalid(Vec<FieldError>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn into_result(self) -> Result<Map<String, Value>, AppError> {
        match self {
            Validation::Valid(data) => Ok(data),
            Validation::Invalid(details) => Err(AppError::Validation(details)),
        }
    }
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Schema { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn validate(&self, payload: &Value) -> Validation {
        let Some(input) = payload.as_object() else {
            return Validation::Invalid(vec![FieldError::new("value", "\"value\" must be of type object")]);
        };

        let mut errors = Vec::new();
        let mut data = Map::new();

        for field in self.fields {
            match input.get(field.name) {
                None => {
                    if field.required {
                        errors.push(FieldError::new(field.name, format!("\"{}\" is required", field.name)));
                    } else if let Some(fallback) = field.default {
                        data.insert(field.name.to_string(), fallback.to_value());
                    }
                }
                Some(Value::Null) if field.nullable => {
                    data.insert(field.name.to_string(), Value::Null);
                }
                Some(value) => match check(field, value) {
                    Ok(normalized) => {
                        data.insert(field.name.to_string(), normalized);
                    }
                    Err(mut violations) => errors.append(&mut violations),
                },
            }
        }

        for key in input.keys() {
            if self.field(key).is_none() {
                errors.push(FieldError::new(key.as_str(), format!("\"{}\" is not allowed", key)));
            }
        }

        if errors.is_empty() {
            Validation::Valid(data)
        } else {
            Validation::Invalid(errors)
        }
    }
}

fn check(field: &Field, value: &Value) -> Result<Value, Vec<FieldError>> {
    let name = field.name;
    let fail = |message: String| Err(vec![FieldError::new(name, message)]);

    match field.kind {
        Kind::Text { min, max } => {
            let Some(raw) = value.as_str() else {
                return fail(format!("\"{}\" must be a string", name));
            };
            let text = raw.trim();
            if text.is_empty() {
                return if field.allow_empty {
                    Ok(Value::String(String::new()))
                } else {
                    fail(format!("\"{}\" is not allowed to be empty", name))
                };
            }
            let len = text.chars().count();
            if let Some(min) = min.filter(|min| len < *min) {
                return fail(format!("\"{}\" length must be at least {} characters long", name, min));
            }
            if let Some(max) = max.filter(|max| len > *max) {
                return fail(format!("\"{}\" length must be less than or equal to {} characters long", name, max));
            }
            Ok(Value::String(text.to_string()))
        }
        Kind::Url => {
            let Some(raw) = value.as_str() else {
                return fail(format!("\"{}\" must be a string", name));
            };
            let url = raw.trim();
            if url.is_empty() {
                return if field.allow_empty {
                    Ok(Value::String(String::new()))
                } else {
                    fail(format!("\"{}\" is not allowed to be empty", name))
                };
            }
            if !is_valid_url(url) {
                return fail(format!("\"{}\" must be a valid uri", name));
            }
            Ok(Value::String(url.to_string()))
        }
        Kind::Date => {
            if field.allow_empty && value.as_str().is_some_and(|s| s.trim().is_empty()) {
                return Ok(Value::Null);
            }
            match parse_date(value) {
                Some(date) => Ok(Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true))),
                None => fail(format!("\"{}\" must be a valid date", name)),
            }
        }
        Kind::Bool => match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => fail(format!("\"{}\" must be a boolean", name)),
        },
        Kind::TextList => {
            let Some(items) = value.as_array() else {
                return fail(format!("\"{}\" must be an array", name));
            };
            let violations: Vec<FieldError> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| !item.is_string())
                .map(|(i, _)| FieldError::new(format!("{}.{}", name, i), format!("\"{}[{}]\" must be a string", name, i)))
                .collect();
            if violations.is_empty() {
                Ok(Value::Array(items.clone()))
            } else {
                Err(violations)
            }
        }
        Kind::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(Value::String(s.to_string())),
            _ => fail(format!("\"{}\" must be one of [{}]", name, allowed.join(", "))),
        },
    }
}

/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates and epoch milliseconds.
/// Years must fit in four digits so the stored value parses again when echoed back.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let parsed = match value {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|naive| naive.and_utc())
                })
        }
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    };
    parsed.filter(|date| (0..=9999).contains(&date.year()))
}
