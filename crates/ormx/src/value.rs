//! Dynamic values carried by predicates, assignments and insert rows.
//!
//! Field values are captured as [`Value`] through the [`ToValue`] trait so one
//! record walk can feed predicates of any column type. `Value` implements
//! `tokio_postgres::types::ToSql`, converting integers and floats to the width
//! the server asks for.

use bytes::BytesMut;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use uuid::Uuid;

use crate::normalize::Kind;

/// A dynamically typed SQL value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL; also what an absent `Option` normalizes to.
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// A number of unknown width, e.g. decoded from JSON.
    Number(serde_json::Number),
    String(String),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    List(Vec<Value>),
}

impl Value {
    /// The normalized kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::UInt(_) => Kind::UInt,
            Value::Float(_) => Kind::Float,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Timestamp(_) => Kind::Timestamp,
            Value::Uuid(_) => Kind::Uuid,
            Value::List(_) => Kind::Sequence,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this is the zero value of its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Int(i) => *i == 0,
            Value::UInt(u) => *u == 0,
            Value::Float(f) => f.to_bits() == 0,
            Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
            Value::String(s) => s.is_empty(),
            Value::Timestamp(t) => t.timestamp() == 0 && t.timestamp_subsec_nanos() == 0,
            Value::Uuid(u) => u.is_nil(),
            Value::List(items) => items.is_empty(),
        }
    }

    /// Spread a sequence into its items; any other value becomes a one-element list.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Value::List(items) => items,
            other => vec![other],
        }
    }

    /// Interpret an epoch-like value as a point in time.
    ///
    /// Integers, floats (truncated), decimal strings and integral numbers are
    /// accepted. Zero and unparseable inputs yield `None`. Values of ten or more
    /// digits are scaled down by powers of ten until they fall below
    /// 9,000,000,000, so milli/micro/nanosecond stamps land on seconds.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        let mut secs: i64 = match self {
            Value::Int(i) => *i,
            Value::UInt(u) => *u as i64,
            Value::Float(f) => *f as i64,
            Value::String(s) => s.parse().ok()?,
            Value::Number(n) => n.as_i64()?,
            _ => return None,
        };
        if secs == 0 {
            return None;
        }
        while secs.unsigned_abs() >= 9_000_000_000 {
            secs /= 10;
        }
        DateTime::from_timestamp(secs, 0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Conversion of a field or argument into a [`Value`].
///
/// Indirection layers (`&T`, `Box<T>`, `Option<T>`, ...) are forwarded in
/// [`crate::normalize`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

macro_rules! int_to_value {
    ($variant:ident: $($t:ty),+ $(,)?) => {
        $(impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::$variant((*self).into())
            }
        })+
    };
}

int_to_value!(Int: i8, i16, i32, i64);
int_to_value!(UInt: u8, u16, u32, u64);

impl ToValue for isize {
    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value {
        Value::UInt(*self as u64)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float((*self).into())
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.and_utc())
    }
}

impl ToValue for Uuid {
    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl ToValue for serde_json::Number {
    fn to_value(&self) -> Value {
        Value::Number(self.clone())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

type BoxError = Box<dyn std::error::Error + Sync + Send>;

fn int_to_sql(v: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(v)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(v)?.to_sql(ty, out),
        Type::OID => u32::try_from(v)?.to_sql(ty, out),
        Type::FLOAT4 => (v as f32).to_sql(ty, out),
        Type::FLOAT8 => (v as f64).to_sql(ty, out),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR => v.to_string().to_sql(ty, out),
        _ => v.to_sql(ty, out),
    }
}

fn float_to_sql(v: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::FLOAT4 => (v as f32).to_sql(ty, out),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR => v.to_string().to_sql(ty, out),
        _ => v.to_sql(ty, out),
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => b.to_sql(ty, out),
            Value::Int(i) => int_to_sql(*i, ty, out),
            Value::UInt(u) => int_to_sql(i64::try_from(*u)?, ty, out),
            Value::Float(f) => float_to_sql(*f, ty, out),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    int_to_sql(i, ty, out)
                } else if let Some(f) = n.as_f64() {
                    float_to_sql(f, ty, out)
                } else {
                    Err(format!("number {n} does not fit a SQL numeric type").into())
                }
            }
            Value::String(s) => s.to_sql(ty, out),
            Value::Timestamp(t) => match *ty {
                Type::TIMESTAMP => t.naive_utc().to_sql(ty, out),
                Type::DATE => t.date_naive().to_sql(ty, out),
                _ => t.to_sql(ty, out),
            },
            Value::Uuid(u) => u.to_sql(ty, out),
            Value::List(items) => items.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}
