use crate::clustering_validator::ClusteringKeyValidator;
use crate::error::ErrorType;
use crate::slice_functions::{
    ordering_mode::OrderingMode,
    partition_key_spec::{encode_all, reject_nulls},
    value::Value,
};

/// Forma de la restricción sobre las columnas de clustering.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ClusteringKeySpec {
    #[default]
    Unset,
    /// Igualdad sobre los primeros componentes.
    Exact(Vec<Value>),
    /// Rango sobre tuplas; una tupla vacía deja ese lado abierto.
    Range { from: Vec<Value>, to: Vec<Value> },
    /// Igualdad sobre todos los componentes menos el último, IN sobre el último.
    In { prefix: Vec<Value>, values: Vec<Value> },
}

impl ClusteringKeySpec {
    pub fn kind(&self) -> &'static str {
        match self {
            ClusteringKeySpec::Unset => "unset",
            ClusteringKeySpec::Exact(_) => "exact",
            ClusteringKeySpec::Range { .. } => "range",
            ClusteringKeySpec::In { .. } => "IN",
        }
    }

    pub fn validate(&self, columns: &[String], ordering: OrderingMode) -> Result<(), ErrorType> {
        match self {
            ClusteringKeySpec::Unset => Ok(()),
            ClusteringKeySpec::Exact(valores) => {
                if valores.is_empty() || valores.len() > columns.len() {
                    return Err(ErrorType::InvalidArgument(format!(
                        "clustering components: expected between 1 and {} value(s) for {:?}, got {}",
                        columns.len(),
                        columns,
                        valores.len()
                    )));
                }
                reject_nulls("clustering components", valores)
            }
            ClusteringKeySpec::Range { from, to } => {
                for (lado, tupla) in [("from", from), ("to", to)] {
                    if tupla.len() > columns.len() {
                        return Err(ErrorType::InvalidArgument(format!(
                            "{} clustering components: at most {} value(s) for {:?}, got {}",
                            lado,
                            columns.len(),
                            columns,
                            tupla.len()
                        )));
                    }
                }
                ClusteringKeyValidator::validate(from, to, ordering)
            }
            ClusteringKeySpec::In { prefix, values } => {
                if columns.is_empty() || prefix.len() + 1 != columns.len() {
                    return Err(ErrorType::InvalidArgument(format!(
                        "clustering components IN: expected {} value(s) before the IN on the last clustering column of {:?}, got {}",
                        columns.len().saturating_sub(1),
                        columns,
                        prefix.len()
                    )));
                }
                if values.is_empty() {
                    return Err(ErrorType::InvalidArgument(
                        "clustering components IN: the IN list must not be empty".to_string(),
                    ));
                }
                reject_nulls("clustering components", prefix)?;
                reject_nulls("clustering components IN", values)
            }
        }
    }

    pub fn map_values<F>(self, mut encode: F) -> Result<Self, ErrorType>
    where
        F: FnMut(usize, Value) -> Result<Value, ErrorType>,
    {
        // Los nulos de un rango no pasan por el transcoder
        let mut encode_nullable = |posicion: usize, valor: Value| {
            if valor.is_null() {
                Ok(valor)
            } else {
                encode(posicion, valor)
            }
        };
        match self {
            ClusteringKeySpec::Unset => Ok(ClusteringKeySpec::Unset),
            ClusteringKeySpec::Exact(valores) => Ok(ClusteringKeySpec::Exact(encode_all(
                valores,
                0,
                &mut encode_nullable,
            )?)),
            ClusteringKeySpec::Range { from, to } => Ok(ClusteringKeySpec::Range {
                from: encode_all(from, 0, &mut encode_nullable)?,
                to: encode_all(to, 0, &mut encode_nullable)?,
            }),
            ClusteringKeySpec::In { prefix, values } => {
                let posicion_in = prefix.len();
                let prefix = encode_all(prefix, 0, &mut encode_nullable)?;
                let values = values
                    .into_iter()
                    .map(|v| encode_nullable(posicion_in, v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ClusteringKeySpec::In { prefix, values })
            }
        }
    }
}
