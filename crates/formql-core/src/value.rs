//! SQL argument values.
//!
//! Arguments ride alongside the rendered query text and are bound
//! positionally by the database client. The serializer itself only ever
//! produces [`SqlArg::Text`] (parameter values arrive as strings); the wider
//! set of variants exists for callers binding their own values and for the
//! debug literal renderer.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// A positional SQL argument.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// UTC timestamp value.
    Timestamp(DateTime<Utc>),
    /// Structured JSON value.
    Json(JsonValue),
}

impl SqlArg {
    /// Creates a text argument.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Trait for types that convert into a [`SqlArg`].
pub trait ToSqlArg {
    /// Converts the value into a `SqlArg`.
    fn to_sql_arg(self) -> SqlArg;
}

impl ToSqlArg for SqlArg {
    fn to_sql_arg(self) -> SqlArg {
        self
    }
}

impl ToSqlArg for bool {
    fn to_sql_arg(self) -> SqlArg {
        SqlArg::Bool(self)
    }
}

impl ToSqlArg for i64 {
    fn to_sql_arg(self) -> SqlArg {
        SqlArg::Int(self)
    }
}

impl ToSqlArg for i32 {
    fn to_sql_arg(self) -> SqlArg {
        SqlArg::Int(i64::from(self))
    }
}

impl ToSqlArg for f64 {
    fn to_sql_arg(self) -> SqlArg {
        SqlArg::Float(self)
    }
}

impl ToSqlArg for String {
    fn to_sql_arg(self) -> SqlArg {
        SqlArg::Text(self)
    }
}

impl ToSqlArg for &str {
    fn to_sql_arg(self) -> SqlArg {
        SqlArg::Text(String::from(self))
    }
}

impl ToSqlArg for DateTime<Utc> {
    fn to_sql_arg(self) -> SqlArg {
        SqlArg::Timestamp(self)
    }
}

impl ToSqlArg for JsonValue {
    fn to_sql_arg(self) -> SqlArg {
        SqlArg::Json(self)
    }
}

impl<T: ToSqlArg> ToSqlArg for Option<T> {
    fn to_sql_arg(self) -> SqlArg {
        match self {
            Some(value) => value.to_sql_arg(),
            None => SqlArg::Null,
        }
    }
}
