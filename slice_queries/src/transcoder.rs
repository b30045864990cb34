use crate::error::ErrorType;
use crate::metadata_functions::table::TableMeta;
use crate::slice_functions::value::Value;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Codifica los valores de clave que pasa el cliente antes de ubicarlos en el
/// array de valores ligados.
pub trait ValueTranscoder {
    fn encode(&self, table: &TableMeta, column: &str, value: Value) -> Result<Value, ErrorType>;
}

/// Deja los valores como vienen.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranscoder;

impl ValueTranscoder for IdentityTranscoder {
    fn encode(&self, _table: &TableMeta, _column: &str, value: Value) -> Result<Value, ErrorType> {
        Ok(value)
    }
}

/// Convierte valores de texto al tipo CQL declarado de la columna. Los valores
/// que ya tienen tipo, o las columnas sin tipo declarado, pasan sin cambios.
#[derive(Debug, Default, Clone, Copy)]
pub struct CqlTypeTranscoder;

impl ValueTranscoder for CqlTypeTranscoder {
    fn encode(&self, table: &TableMeta, column: &str, value: Value) -> Result<Value, ErrorType> {
        let texto = match value {
            Value::Text(texto) => texto,
            Value::List(valores) => {
                return valores
                    .into_iter()
                    .map(|v| self.encode(table, column, v))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List)
            }
            otro => return Ok(otro),
        };
        let tipo = match table.column_type(column) {
            Some(tipo) => tipo.to_lowercase(),
            None => return Ok(Value::Text(texto)),
        };
        let invalido = |e: String| {
            ErrorType::InvalidArgument(format!(
                "{}: '{}' is not a valid {} ({})",
                column, texto, tipo, e
            ))
        };
        match tipo.as_str() {
            "int" => texto
                .trim()
                .parse::<i32>()
                .map(Value::Int)
                .map_err(|e| invalido(e.to_string())),
            "bigint" | "counter" => texto
                .trim()
                .parse::<i64>()
                .map(Value::BigInt)
                .map_err(|e| invalido(e.to_string())),
            "boolean" => texto
                .trim()
                .to_lowercase()
                .parse::<bool>()
                .map(Value::Boolean)
                .map_err(|e| invalido(e.to_string())),
            "double" | "float" => texto
                .trim()
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|e| invalido(e.to_string())),
            "uuid" | "timeuuid" => Uuid::parse_str(texto.trim())
                .map(Value::Uuid)
                .map_err(|e| invalido(e.to_string())),
            "timestamp" => parse_timestamp(texto.trim())
                .map(Value::Timestamp)
                .map_err(invalido),
            _ => Ok(Value::Text(texto)),
        }
    }
}

// Acepta RFC 3339 o milisegundos desde epoch
fn parse_timestamp(texto: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(millis) = texto.parse::<i64>() {
        return Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| "timestamp out of range".to_string());
    }
    DateTime::parse_from_rfc3339(texto)
        .map(|fecha| fecha.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}
