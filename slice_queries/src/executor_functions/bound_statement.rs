use crate::error::ErrorType;
use crate::executor_functions::{query_parameters::QueryParameters, query_value::QueryValue};
use crate::slice_functions::{consistency::Consistency, value::Value};

/// Sentencia lista para el ejecutor: texto, valores ligados en el orden de los
/// marcadores y las opciones de ejecución tal como las pidió el cliente.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    pub query_string: String,
    pub bind_names: Vec<String>,
    pub values: Vec<Value>,
    pub consistency: Option<Consistency>,
    pub fetch_size: Option<u32>,
    pub is_async: bool,
}

impl BoundStatement {
    /// Parámetros del cuerpo de un QUERY/EXECUTE del protocolo nativo. Sin
    /// consistencia explícita se usa ONE, que es la que exige el protocolo.
    pub fn to_query_parameters(&self) -> Result<QueryParameters, ErrorType> {
        let valores = self
            .bind_names
            .iter()
            .zip(&self.values)
            .map(|(nombre, valor)| QueryValue::from_value(Some(nombre.clone()), valor))
            .collect::<Result<Vec<_>, _>>()?;

        let mut parametros =
            QueryParameters::new(self.consistency.unwrap_or(Consistency::One)).with_values(valores);
        if let Some(fetch_size) = self.fetch_size {
            let fetch_size = i32::try_from(fetch_size).map_err(|_| {
                ErrorType::InvalidArgument(format!("fetch size: {} is too large", fetch_size))
            })?;
            parametros = parametros.with_page_size(fetch_size);
        }
        Ok(parametros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor_functions::query_parameters::{FLAG_NAMES_FOR_VALUES, FLAG_VALUES};

    #[test]
    fn parameters_carry_names_values_and_hints() {
        let statement = BoundStatement {
            query_string: "SELECT * FROM t WHERE id=:id LIMIT :limitSize;".to_string(),
            bind_names: vec!["id".to_string(), "limitSize".to_string()],
            values: vec![Value::from("a"), Value::Int(10)],
            consistency: Some(Consistency::Quorum),
            fetch_size: Some(20),
            is_async: false,
        };
        let parametros = statement.to_query_parameters().unwrap();

        assert_eq!(parametros.consistency, Consistency::Quorum);
        assert_ne!(parametros.flags & FLAG_VALUES, 0);
        assert_ne!(parametros.flags & FLAG_NAMES_FOR_VALUES, 0);
        assert_eq!(parametros.result_page_size, Some(20));
        let nombres: Vec<_> = parametros
            .values
            .unwrap_or_default()
            .into_iter()
            .filter_map(|v| v.name)
            .collect();
        assert_eq!(nombres, vec!["id", "limitSize"]);
    }

    #[test]
    fn missing_consistency_defaults_to_one() {
        let statement = BoundStatement {
            query_string: "DELETE FROM t WHERE id=:id;".to_string(),
            bind_names: vec!["id".to_string()],
            values: vec![Value::from("a")],
            consistency: None,
            fetch_size: None,
            is_async: true,
        };
        let parametros = statement.to_query_parameters().unwrap();
        assert_eq!(parametros.consistency, Consistency::One);
        assert_eq!(parametros.result_page_size, None);
    }
}
