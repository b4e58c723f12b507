//! Opaque resumption tokens: base64 of `{"values":{"id":..,"<field>":..},"order":".."}`.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::order::{FieldKind, OrderField, OrderSpec};
use crate::Error;

/// Last-seen value of the sort field, typed by the field's [`FieldKind`].
#[derive(Clone, Debug, PartialEq)]
pub enum CursorValue {
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
}

impl CursorValue {
    pub fn to_json(&self) -> Value {
        match self {
            CursorValue::Integer(i) => Value::from(*i),
            CursorValue::Float(f) => Value::from(*f),
            CursorValue::Timestamp(ts) => {
                Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }

    pub fn from_json(field: OrderField, raw: &Value) -> Result<Self, Error> {
        let invalid = || Error::CursorInvalidValue {
            field: field.as_str().to_string(),
            expected: field.kind().describe(),
        };

        match field.kind() {
            FieldKind::Integer => match raw {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                    .map(CursorValue::Integer)
                    .ok_or_else(invalid),
                Value::String(s) => s.parse().map(CursorValue::Integer).map_err(|_| invalid()),
                _ => Err(invalid()),
            },
            FieldKind::Float => match raw {
                Value::Number(n) => n.as_f64().map(CursorValue::Float).ok_or_else(invalid),
                Value::String(s) => s.parse().map(CursorValue::Float).map_err(|_| invalid()),
                _ => Err(invalid()),
            },
            FieldKind::Timestamp => match raw {
                Value::String(s) => DateTime::parse_from_rfc3339(s)
                    .map(|dt| CursorValue::Timestamp(dt.with_timezone(&Utc)))
                    .map_err(|_| invalid()),
                _ => Err(invalid()),
            },
        }
    }
}

/// Decoded cursor. `id` is the tie-break key of the last row of the previous
/// page and `value` its sort-field value under `order`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cursor {
    pub id: String,
    pub value: CursorValue,
    pub order: OrderSpec,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    values: Map<String, Value>,
    order: String,
}

impl Cursor {
    pub fn new(id: impl Into<String>, value: CursorValue, order: OrderSpec) -> Self {
        Self {
            id: id.into(),
            value,
            order,
        }
    }

    /// Fails on a non-finite float, which JSON cannot carry.
    pub fn encode(&self) -> Result<String, Error> {
        if let CursorValue::Float(f) = self.value {
            if !f.is_finite() {
                return Err(Error::CursorEncode(format!(
                    "{} value {f} is not finite",
                    self.order.field.as_str()
                )));
            }
        }

        let mut values = Map::with_capacity(2);
        values.insert("id".to_string(), Value::String(self.id.clone()));
        values.insert(self.order.field.as_str().to_string(), self.value.to_json());

        let envelope = Envelope {
            values,
            order: self.order.to_string(),
        };
        let json =
            serde_json::to_vec(&envelope).map_err(|e| Error::CursorEncode(e.to_string()))?;
        Ok(STANDARD.encode(json))
    }

    pub fn decode(token: &str) -> Result<Self, Error> {
        let bytes = decode_base64(token.trim())?;
        let text = std::str::from_utf8(&bytes).map_err(|_| Error::CursorInvalidJson)?;
        let envelope: Envelope =
            serde_json::from_str(text).map_err(|_| Error::CursorInvalidJson)?;

        let order = OrderSpec::parse(&envelope.order)
            .map_err(|_| Error::CursorInvalidOrder(envelope.order.clone()))?;
        let field = order.field.as_str();

        let id = match envelope.values.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(Error::CursorMissingValue("id".to_string())),
        };
        let raw = envelope
            .values
            .get(field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::CursorMissingValue(field.to_string()))?;
        if envelope.values.len() != 2 {
            return Err(Error::CursorInvalidJson);
        }

        Ok(Self {
            id,
            value: CursorValue::from_json(order.field, raw)?,
            order,
        })
    }
}

/// Accepts standard and URL-safe alphabets, padded or not.
fn decode_base64(token: &str) -> Result<Vec<u8>, Error> {
    if token.is_empty() {
        return Err(Error::CursorInvalidBase64);
    }
    STANDARD
        .decode(token)
        .or_else(|_| STANDARD_NO_PAD.decode(token))
        .or_else(|_| URL_SAFE.decode(token))
        .or_else(|_| URL_SAFE_NO_PAD.decode(token))
        .map_err(|_| Error::CursorInvalidBase64)
}
