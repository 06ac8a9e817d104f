//! Error types for statement rendering and value mapping.

use thiserror::Error;

use crate::codec::DataType;
use crate::dialect::Dialect;
use crate::meta::ServerMeta;
use crate::value::Value;

/// The main error type for statement construction and rendering.
///
/// Every variant is detected eagerly at the point of violation; no partial
/// SQL text is ever returned alongside an error, and nothing is retried
/// inside this crate.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A mapping type was requested against a database family/version that
    /// does not support it.
    #[error("{target} is not supported by {server}")]
    UnsupportedDialect { target: String, server: ServerMeta },

    /// A bound value's runtime shape does not match the codec's expected
    /// shape. Signals a caller bug.
    #[error("expected {expected}, got {} value {value}", .value.kind())]
    TypeMismatch {
        expected: &'static str,
        value: Value,
        data_type: DataType,
    },

    /// A value exceeds a declared bound, length, or precision.
    #[error("value {value} exceeds {limit} for {data_type}")]
    ValueOutOfRange {
        value: Value,
        limit: String,
        data_type: DataType,
    },

    /// Array or range literal text failed structural validation.
    #[error("malformed literal {text:?}: {reason}")]
    MalformedLiteral { text: String, reason: String },

    /// An identifier is empty or contains a forbidden NUL.
    #[error("invalid identifier {name:?}")]
    InvalidIdentifier { name: String },

    /// The AST requests a clause combination the dialect forbids.
    /// Detected at render time so the AST itself stays dialect-agnostic.
    #[error("{shape} cannot be rendered for {dialect}")]
    UnsupportedStatementShape { shape: String, dialect: Dialect },

    /// A clause (WITH, RETURNING, ...) is not available on the dialect.
    #[error("{clause} is not supported by {dialect}")]
    UnsupportedClause { clause: &'static str, dialect: Dialect },

    /// A parent/child statement-shape invariant was violated.
    #[error("illegal statement mode: {reason}")]
    IllegalStatementMode { reason: String },

    /// A raw result value's shape was unexpected while converting back to a
    /// domain value.
    #[error("cannot read {} value {value} as {expected}", .value.kind())]
    Access {
        expected: &'static str,
        value: Value,
        data_type: DataType,
    },
}

impl SqlError {
    /// Create a `TypeMismatch` for a bind-time shape failure.
    pub fn mismatch(expected: &'static str, data_type: &DataType, value: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            value: value.clone(),
            data_type: data_type.clone(),
        }
    }

    /// Create a `ValueOutOfRange` carrying the violated limit.
    pub fn out_of_range(value: &Value, limit: impl Into<String>, data_type: &DataType) -> Self {
        Self::ValueOutOfRange {
            value: value.clone(),
            limit: limit.into(),
            data_type: data_type.clone(),
        }
    }

    /// Create a `MalformedLiteral` for array/range text that failed to parse.
    pub fn malformed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedLiteral {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Create an `Access` error for a result-parsing shape failure.
    pub fn access(expected: &'static str, data_type: &DataType, value: &Value) -> Self {
        Self::Access {
            expected,
            value: value.clone(),
            data_type: data_type.clone(),
        }
    }

    /// Create an `UnsupportedDialect` for a codec on the wrong family.
    pub fn unsupported(target: impl Into<String>, server: &ServerMeta) -> Self {
        Self::UnsupportedDialect {
            target: target.into(),
            server: *server,
        }
    }

    /// Create an `UnsupportedStatementShape` detected at render time.
    pub fn shape(shape: impl Into<String>, dialect: Dialect) -> Self {
        Self::UnsupportedStatementShape {
            shape: shape.into(),
            dialect,
        }
    }

    /// Create an `IllegalStatementMode` for a parent/child invariant breach.
    pub fn illegal_mode(reason: impl Into<String>) -> Self {
        Self::IllegalStatementMode {
            reason: reason.into(),
        }
    }
}

/// Result type alias for statement operations.
pub type SqlResult<T> = Result<T, SqlError>;
