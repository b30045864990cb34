use crate::error::ErrorType;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Valor listo para la base de datos. El motor no lo interpreta salvo para
/// comparar componentes de clustering.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i32),
    BigInt(i64),
    Boolean(bool),
    Double(f64),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Nombre del tipo CQL equivalente, usado en los mensajes de error.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Boolean(_) => "boolean",
            Value::Double(_) => "double",
            Value::Uuid(_) => "uuid",
            Value::Timestamp(_) => "timestamp",
            Value::List(_) => "list",
        }
    }

    /// Compara dos valores del mismo tipo. Int y BigInt se comparan entre sí.
    pub fn compare(&self, other: &Value) -> Result<Ordering, ErrorType> {
        let ordering = match (self, other) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::BigInt(a), Value::BigInt(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::BigInt(b)) => Some(i64::from(*a).cmp(b)),
            (Value::BigInt(a), Value::Int(b)) => Some(a.cmp(&i64::from(*b))),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Double(a), Value::Double(b)) => a.partial_cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        };
        ordering.ok_or_else(|| {
            ErrorType::InvalidArgument(format!(
                "cannot compare {} value {} with {} value {}",
                self.type_name(),
                self,
                other.type_name(),
                other
            ))
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Text(texto) => write!(f, "{}", texto),
            Value::Int(numero) => write!(f, "{}", numero),
            Value::BigInt(numero) => write!(f, "{}", numero),
            Value::Boolean(valor) => write!(f, "{}", valor),
            Value::Double(numero) => write!(f, "{}", numero),
            Value::Uuid(id) => write!(f, "{}", id),
            Value::Timestamp(fecha) => write!(f, "{}", fecha.to_rfc3339()),
            Value::List(valores) => write!(f, "{}", render_tuple(valores)),
        }
    }
}

/// Representa una tupla como `[a, b, null]` para los mensajes de validación.
pub fn render_tuple(values: &[Value]) -> String {
    let partes: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", partes.join(", "))
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::BigInt(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Convierte cualquier colección de valores convertibles en un `Vec<Value>`.
pub fn collect_values<I, V>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}
