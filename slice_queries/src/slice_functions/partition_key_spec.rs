use crate::error::ErrorType;
use crate::slice_functions::value::Value;

/// Restricción sobre la clave de partición. El IN sólo puede ir en el último
/// componente.
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionKeySpec {
    Equal(Vec<Value>),
    In { prefix: Vec<Value>, last: Vec<Value> },
}

impl PartitionKeySpec {
    /// Controla que la cantidad de componentes coincida con las columnas de
    /// partición y que ninguno sea nulo.
    pub fn validate(&self, columns: &[String]) -> Result<(), ErrorType> {
        if columns.is_empty() {
            return Err(ErrorType::InvalidArgument(
                "partition components: table declares no partition key columns".to_string(),
            ));
        }
        match self {
            PartitionKeySpec::Equal(valores) => {
                if valores.len() != columns.len() {
                    return Err(ErrorType::InvalidArgument(format!(
                        "partition components: expected {} value(s) for {:?}, got {}",
                        columns.len(),
                        columns,
                        valores.len()
                    )));
                }
                reject_nulls("partition components", valores)
            }
            PartitionKeySpec::In { prefix, last } => {
                if prefix.len() + 1 != columns.len() {
                    return Err(ErrorType::InvalidArgument(format!(
                        "partition components IN: expected {} value(s) before the IN on '{}', got {}",
                        columns.len() - 1,
                        columns[columns.len() - 1],
                        prefix.len()
                    )));
                }
                if last.is_empty() {
                    return Err(ErrorType::InvalidArgument(
                        "partition components IN: the IN list must not be empty".to_string(),
                    ));
                }
                reject_nulls("partition components", prefix)?;
                reject_nulls("partition components IN", last)
            }
        }
    }

    /// Valores que van con `=`, en orden de columna.
    pub fn equal_values(&self) -> &[Value] {
        match self {
            PartitionKeySpec::Equal(valores) => valores,
            PartitionKeySpec::In { prefix, .. } => prefix,
        }
    }

    /// Lista del IN, si hay.
    pub fn in_values(&self) -> Option<&[Value]> {
        match self {
            PartitionKeySpec::Equal(_) => None,
            PartitionKeySpec::In { last, .. } => Some(last),
        }
    }

    pub fn map_values<F>(self, mut encode: F) -> Result<Self, ErrorType>
    where
        F: FnMut(usize, Value) -> Result<Value, ErrorType>,
    {
        match self {
            PartitionKeySpec::Equal(valores) => Ok(PartitionKeySpec::Equal(
                encode_all(valores, 0, &mut encode)?,
            )),
            PartitionKeySpec::In { prefix, last } => {
                let posicion_in = prefix.len();
                let prefix = encode_all(prefix, 0, &mut encode)?;
                let last = last
                    .into_iter()
                    .map(|v| encode(posicion_in, v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PartitionKeySpec::In { prefix, last })
            }
        }
    }
}

pub(crate) fn reject_nulls(field: &str, values: &[Value]) -> Result<(), ErrorType> {
    match values.iter().position(Value::is_null) {
        Some(posicion) => Err(ErrorType::InvalidArgument(format!(
            "{}: component {} must not be null",
            field,
            posicion + 1
        ))),
        None => Ok(()),
    }
}

// Codifica cada valor con la posición de su columna, empezando en `offset`
pub(crate) fn encode_all<F>(
    values: Vec<Value>,
    offset: usize,
    encode: &mut F,
) -> Result<Vec<Value>, ErrorType>
where
    F: FnMut(usize, Value) -> Result<Value, ErrorType>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| encode(offset + i, v))
        .collect()
}
