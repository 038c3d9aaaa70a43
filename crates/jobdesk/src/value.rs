//! Dynamic scalar bind values.
//!
//! Request payloads arrive as loosely typed JSON, but `tokio-postgres` binds
//! parameters against the concrete type PostgreSQL infers for each
//! placeholder. [`Scalar`] bridges the two: it holds one scalar value and
//! adapts its wire encoding to the placeholder type at bind time, so a
//! payload integer can serve an `INT4`, `INT8`, or `NUMERIC` placeholder
//! alike.
//!
//! Builders emit their parameter lists as `Vec<Scalar>`, which keeps
//! generated fragments directly comparable in tests.

use crate::error::StoreError;
use bytes::BytesMut;
use rust_decimal::Decimal;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A single scalar bind value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text value (TEXT, VARCHAR, ...)
    Text(String),
    /// Integer value (INT2/INT4/INT8/NUMERIC placeholders)
    Int(i64),
    /// Floating-point value (FLOAT4/FLOAT8/NUMERIC placeholders)
    Float(f64),
    /// Exact decimal value (NUMERIC)
    Numeric(Decimal),
    /// Boolean value
    Bool(bool),
    /// SQL NULL
    Null,
}

impl Scalar {
    /// Whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Numeric(d) => write!(f, "{d}"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Null => Ok(()),
        }
    }
}

impl ToSql for Scalar {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Scalar::Null => Ok(IsNull::Yes),
            Scalar::Text(s) => s.to_sql(ty, out),
            Scalar::Bool(b) => b.to_sql(ty, out),
            Scalar::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*v).to_sql(ty, out),
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                Type::FLOAT8 => (*v as f64).to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Scalar::Float(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*v)?.to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Scalar::Numeric(d) => d.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::BOOL
                | Type::TEXT
                | Type::VARCHAR
                | Type::BPCHAR
                | Type::NAME
                | Type::UNKNOWN
                | Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::NUMERIC
        )
    }

    tokio_postgres::types::to_sql_checked!();
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<Decimal> for Scalar {
    fn from(value: Decimal) -> Self {
        Scalar::Numeric(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Scalar::Null,
        }
    }
}

impl TryFrom<serde_json::Value> for Scalar {
    type Error = StoreError;

    /// Convert a JSON value into a scalar.
    ///
    /// Arrays and objects are rejected: payload values are scalars by
    /// contract, and anything structured must be handled before it reaches
    /// the query builders.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Scalar::Null),
            serde_json::Value::Bool(b) => Ok(Scalar::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Scalar::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Scalar::Float(f))
                } else {
                    Err(StoreError::validation(format!(
                        "unsupported number value: {n}"
                    )))
                }
            }
            serde_json::Value::String(s) => Ok(Scalar::Text(s)),
            other => Err(StoreError::validation(format!(
                "payload value must be a scalar, got: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_and_int() {
        assert_eq!(Scalar::from("hi"), Scalar::Text("hi".to_string()));
        assert_eq!(Scalar::from(7i32), Scalar::Int(7));
        assert_eq!(Scalar::from(None::<i64>), Scalar::Null);
        assert_eq!(Scalar::from(Some("x")), Scalar::Text("x".to_string()));
    }

    #[test]
    fn from_json_scalars() {
        assert_eq!(
            Scalar::try_from(serde_json::json!("abc")).unwrap(),
            Scalar::Text("abc".to_string())
        );
        assert_eq!(Scalar::try_from(serde_json::json!(3)).unwrap(), Scalar::Int(3));
        assert_eq!(
            Scalar::try_from(serde_json::json!(1.5)).unwrap(),
            Scalar::Float(1.5)
        );
        assert_eq!(
            Scalar::try_from(serde_json::json!(true)).unwrap(),
            Scalar::Bool(true)
        );
        assert_eq!(
            Scalar::try_from(serde_json::Value::Null).unwrap(),
            Scalar::Null
        );
    }

    #[test]
    fn from_json_rejects_composites() {
        assert!(Scalar::try_from(serde_json::json!([1, 2])).is_err());
        assert!(Scalar::try_from(serde_json::json!({"a": 1})).is_err());
    }

    #[test]
    fn accepts_common_column_types() {
        assert!(<Scalar as ToSql>::accepts(&Type::TEXT));
        assert!(<Scalar as ToSql>::accepts(&Type::INT4));
        assert!(<Scalar as ToSql>::accepts(&Type::NUMERIC));
        assert!(<Scalar as ToSql>::accepts(&Type::BOOL));
        assert!(!<Scalar as ToSql>::accepts(&Type::JSONB));
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(Scalar::Text("j".into()).to_string(), "j");
        assert_eq!(Scalar::Int(42).to_string(), "42");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
    }
}
