use crate::bounding_mode::BoundingMode;
use crate::clustering_validator::ClusteringKeyValidator;
use crate::error::ErrorType;
use crate::executor_functions::bound_statement::BoundStatement;
use crate::metadata_functions::table::TableMeta;
use crate::slice_functions::{
    clustering_key_spec::ClusteringKeySpec, consistency::Consistency, operator::Operator,
    ordering_mode::OrderingMode, partition_key_spec::PartitionKeySpec, value::Value,
};
use crate::transcoder::ValueTranscoder;
use log::debug;

pub const PARTITION_IN_MARKER: &str = "partitionComponentsIn";
pub const CLUSTERING_IN_MARKER: &str = "clusteringComponentsIn";
pub const LIMIT_MARKER: &str = "limitSize";
const TO_MARKER_SUFFIX: &str = "_to";

/// Tipo de sentencia a generar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Delete,
}

/// Especificación compilada de una consulta por rango.
///
/// Se crea por consulta, se completa durante la declaración y se renderiza una
/// vez. El texto de la cláusula y el array de valores ligados salen de la misma
/// pasada (`bindings`), así los marcadores y los valores no se desfasan.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceQueryProperties {
    partition_columns: Vec<String>,
    clustering_columns: Vec<String>,
    partition: Option<PartitionKeySpec>,
    clustering: ClusteringKeySpec,
    ordering: Option<OrderingMode>,
    table_ordering: OrderingMode,
    bounding: BoundingMode,
    limit: Option<u32>,
    consistency: Option<Consistency>,
    fetch_size: Option<u32>,
    is_async: bool,
}

// Una condición del WHERE junto con los valores que liga
struct Binding {
    condition: String,
    values: Vec<(String, Value)>,
}

impl SliceQueryProperties {
    pub fn new(partition_columns: Vec<String>, clustering_columns: Vec<String>) -> Self {
        SliceQueryProperties {
            partition_columns,
            clustering_columns,
            partition: None,
            clustering: ClusteringKeySpec::Unset,
            ordering: None,
            table_ordering: OrderingMode::Asc,
            bounding: BoundingMode::Inclusive,
            limit: None,
            consistency: None,
            fetch_size: None,
            is_async: false,
        }
    }

    pub fn for_table(table: &TableMeta) -> Self {
        Self::new(
            table.partition_columns().to_vec(),
            table.clustering_columns().to_vec(),
        )
        .with_table_ordering(table.clustering_order)
    }

    /// Orden declarado por la tabla, el que se usa si no se pide otro.
    pub fn with_table_ordering(mut self, ordering: OrderingMode) -> Self {
        self.table_ordering = ordering;
        self
    }

    // ---------------------------------------------------------------
    // Declaración
    // ---------------------------------------------------------------

    pub fn with_partition_components(&mut self, values: Vec<Value>) -> Result<&mut Self, ErrorType> {
        if self.partition.is_some() {
            return Err(ErrorType::InvalidArgument(
                "partition components: already declared for this query".to_string(),
            ));
        }
        self.partition = Some(PartitionKeySpec::Equal(values));
        Ok(self)
    }

    /// IN sobre el último componente de partición, después de los valores con `=`.
    pub fn and_partition_components_in(&mut self, values: Vec<Value>) -> Result<&mut Self, ErrorType> {
        self.partition = match self.partition.take() {
            None => Some(PartitionKeySpec::In {
                prefix: Vec::new(),
                last: values,
            }),
            Some(PartitionKeySpec::Equal(prefix)) => Some(PartitionKeySpec::In {
                prefix,
                last: values,
            }),
            Some(en_curso @ PartitionKeySpec::In { .. }) => {
                self.partition = Some(en_curso);
                return Err(ErrorType::InvalidArgument(
                    "partition components IN: already declared for this query".to_string(),
                ));
            }
        };
        Ok(self)
    }

    /// IN directo, para claves de partición de un solo componente.
    pub fn with_partition_components_in(&mut self, values: Vec<Value>) -> Result<&mut Self, ErrorType> {
        if self.partition.is_some() {
            return Err(ErrorType::InvalidArgument(
                "partition components IN: partition components already declared".to_string(),
            ));
        }
        self.and_partition_components_in(values)
    }

    pub fn with_clusterings(&mut self, values: Vec<Value>) -> Result<&mut Self, ErrorType> {
        match self.clustering {
            ClusteringKeySpec::Unset => {
                self.clustering = ClusteringKeySpec::Exact(values);
                Ok(self)
            }
            _ => Err(self.clustering_conflict("exact")),
        }
    }

    pub fn from_clusterings(&mut self, values: Vec<Value>) -> Result<&mut Self, ErrorType> {
        match &mut self.clustering {
            ClusteringKeySpec::Unset => {
                self.clustering = ClusteringKeySpec::Range {
                    from: values,
                    to: Vec::new(),
                };
                Ok(self)
            }
            ClusteringKeySpec::Range { from, .. } if from.is_empty() => {
                *from = values;
                Ok(self)
            }
            _ => Err(self.clustering_conflict("from range")),
        }
    }

    pub fn to_clusterings(&mut self, values: Vec<Value>) -> Result<&mut Self, ErrorType> {
        match &mut self.clustering {
            ClusteringKeySpec::Unset => {
                self.clustering = ClusteringKeySpec::Range {
                    from: Vec::new(),
                    to: values,
                };
                Ok(self)
            }
            ClusteringKeySpec::Range { to, .. } if to.is_empty() => {
                *to = values;
                Ok(self)
            }
            _ => Err(self.clustering_conflict("to range")),
        }
    }

    /// IN sobre la última columna de clustering. Los valores exactos declarados
    /// antes pasan a ser el prefijo con `=`.
    pub fn and_clusterings_in(&mut self, values: Vec<Value>) -> Result<&mut Self, ErrorType> {
        let prefix = match &mut self.clustering {
            ClusteringKeySpec::Unset => Vec::new(),
            ClusteringKeySpec::Exact(prefix) => std::mem::take(prefix),
            _ => return Err(self.clustering_conflict("IN")),
        };
        self.clustering = ClusteringKeySpec::In { prefix, values };
        Ok(self)
    }

    pub fn ordering(&mut self, ordering: OrderingMode) -> &mut Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn bounding(&mut self, bounding: BoundingMode) -> &mut Self {
        self.bounding = bounding;
        self
    }

    pub fn limit(&mut self, limit: u32) -> Result<&mut Self, ErrorType> {
        if limit == 0 || i32::try_from(limit).is_err() {
            return Err(ErrorType::InvalidArgument(format!(
                "limit: must be a positive 32-bit integer, got {}",
                limit
            )));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn consistency(&mut self, consistency: Consistency) -> &mut Self {
        self.consistency = Some(consistency);
        self
    }

    pub fn fetch_size(&mut self, fetch_size: u32) -> Result<&mut Self, ErrorType> {
        if fetch_size == 0 {
            return Err(ErrorType::InvalidArgument(
                "fetch size: must be strictly positive".to_string(),
            ));
        }
        self.fetch_size = Some(fetch_size);
        Ok(self)
    }

    pub fn with_async(&mut self, is_async: bool) -> &mut Self {
        self.is_async = is_async;
        self
    }

    /// Invierte el sentido de lectura e intercambia los extremos del rango,
    /// así el mismo rango se recorre desde el otro lado.
    pub fn reverse_ordering(&mut self) -> &mut Self {
        self.ordering = Some(self.effective_ordering().reverse());
        if let ClusteringKeySpec::Range { from, to } = &mut self.clustering {
            std::mem::swap(from, to);
        }
        self
    }

    fn clustering_conflict(&self, pedido: &str) -> ErrorType {
        ErrorType::InvalidArgument(format!(
            "clustering components: cannot declare a {} restriction, a {} restriction is already declared",
            pedido,
            self.clustering.kind()
        ))
    }

    // ---------------------------------------------------------------
    // Consulta
    // ---------------------------------------------------------------

    pub fn partition(&self) -> Option<&PartitionKeySpec> {
        self.partition.as_ref()
    }

    pub fn clustering(&self) -> &ClusteringKeySpec {
        &self.clustering
    }

    pub fn get_ordering(&self) -> Option<OrderingMode> {
        self.ordering
    }

    /// Orden pedido o, si no hay, el declarado por la tabla.
    pub fn effective_ordering(&self) -> OrderingMode {
        self.ordering.unwrap_or(self.table_ordering)
    }

    pub fn get_bounding(&self) -> BoundingMode {
        self.bounding
    }

    pub fn get_limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn get_consistency(&self) -> Option<Consistency> {
        self.consistency
    }

    pub fn get_fetch_size(&self) -> Option<u32> {
        self.fetch_size
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    // ---------------------------------------------------------------
    // Codificación y validación
    // ---------------------------------------------------------------

    /// Pasa cada componente de clave por el transcoder con el nombre de su
    /// columna. Los componentes que sobran quedan como están y los rechaza
    /// `validate`.
    pub fn transcode(
        mut self,
        table: &TableMeta,
        transcoder: &dyn ValueTranscoder,
    ) -> Result<Self, ErrorType> {
        let particion = &self.partition_columns;
        self.partition = match self.partition.take() {
            Some(spec) => Some(spec.map_values(|posicion, valor| match particion.get(posicion) {
                Some(columna) => transcoder.encode(table, columna, valor),
                None => Ok(valor),
            })?),
            None => None,
        };
        let clustering = &self.clustering_columns;
        self.clustering = std::mem::take(&mut self.clustering).map_values(|posicion, valor| {
            match clustering.get(posicion) {
                Some(columna) => transcoder.encode(table, columna, valor),
                None => Ok(valor),
            }
        })?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ErrorType> {
        match &self.partition {
            Some(particion) => particion.validate(&self.partition_columns)?,
            None => {
                return Err(ErrorType::InvalidArgument(format!(
                    "partition components: required for {:?}",
                    self.partition_columns
                )))
            }
        }
        let ordering = self.effective_ordering();
        self.clustering.validate(&self.clustering_columns, ordering)?;
        if self.ordering.is_some() && self.clustering_columns.is_empty() {
            return Err(ErrorType::InvalidArgument(
                "ordering: the table declares no clustering columns".to_string(),
            ));
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Generación
    // ---------------------------------------------------------------

    pub fn generate_where_clause_for_select(&self, skeleton: &str) -> Result<String, ErrorType> {
        self.generate_where_clause(StatementKind::Select, skeleton)
    }

    pub fn generate_where_clause_for_delete(&self, skeleton: &str) -> Result<String, ErrorType> {
        self.generate_where_clause(StatementKind::Delete, skeleton)
    }

    /// Valores ligados de un SELECT, en el orden exacto de los marcadores.
    pub fn get_bound_values(&self) -> Vec<Value> {
        self.bound_values(StatementKind::Select)
    }

    /// Igual que `get_bound_values` pero sin el LIMIT, que un DELETE no lleva.
    pub fn get_bound_values_for_delete(&self) -> Vec<Value> {
        self.bound_values(StatementKind::Delete)
    }

    pub fn bound_values(&self, kind: StatementKind) -> Vec<Value> {
        self.bindings(kind)
            .into_iter()
            .flat_map(|b| b.values)
            .map(|(_, valor)| valor)
            .collect()
    }

    pub fn bind_names(&self, kind: StatementKind) -> Vec<String> {
        self.bindings(kind)
            .into_iter()
            .flat_map(|b| b.values)
            .map(|(nombre, _)| nombre)
            .collect()
    }

    pub fn generate_where_clause(&self, kind: StatementKind, skeleton: &str) -> Result<String, ErrorType> {
        self.validate()?;
        let condiciones: Vec<String> = self
            .bindings(kind)
            .into_iter()
            .map(|b| b.condition)
            // El LIMIT no es una condición del WHERE
            .filter(|condicion| !condicion.is_empty())
            .collect();

        let mut consulta = format!("{} WHERE {}", skeleton.trim_end(), condiciones.join(" AND "));
        if kind == StatementKind::Select {
            // ORDER BY sólo si el cliente lo pidió, si no manda el orden de la tabla
            if let (Some(ordering), Some(primera)) = (self.ordering, self.clustering_columns.first()) {
                consulta.push_str(&format!(" ORDER BY {} {}", primera, ordering));
            }
            if self.limit.is_some() {
                consulta.push_str(&format!(" LIMIT :{}", LIMIT_MARKER));
            }
        }
        consulta.push(';');
        debug!("Cláusula generada: {}", consulta);
        Ok(consulta)
    }

    /// Valida, genera el texto y arma la sentencia para el ejecutor.
    pub fn to_bound_statement(&self, kind: StatementKind, skeleton: &str) -> Result<BoundStatement, ErrorType> {
        let query_string = self.generate_where_clause(kind, skeleton)?;
        Ok(BoundStatement {
            query_string,
            bind_names: self.bind_names(kind),
            values: self.bound_values(kind),
            consistency: self.consistency,
            fetch_size: match kind {
                StatementKind::Select => self.fetch_size,
                StatementKind::Delete => None,
            },
            is_async: self.is_async,
        })
    }

    // Orden fijo: partición con `=`, IN de partición, clustering, LIMIT
    fn bindings(&self, kind: StatementKind) -> Vec<Binding> {
        let mut ligados = Vec::new();

        if let Some(particion) = &self.partition {
            ligados.extend(equalities(&self.partition_columns, particion.equal_values()));
            if let (Some(lista), Some(columna)) =
                (particion.in_values(), self.partition_columns.last())
            {
                ligados.push(in_binding(columna, PARTITION_IN_MARKER, lista));
            }
        }

        match &self.clustering {
            ClusteringKeySpec::Unset => {}
            ClusteringKeySpec::Exact(valores) => {
                ligados.extend(equalities(&self.clustering_columns, valores));
            }
            ClusteringKeySpec::Range { from, to } => {
                let ordering = self.effective_ordering();
                let desde = ClusteringKeyValidator::trim_trailing_nulls(from);
                if !desde.is_empty() {
                    ligados.push(tuple_binding(
                        &self.clustering_columns,
                        self.bounding.from_operator(ordering),
                        desde,
                        "",
                    ));
                }
                let hasta = ClusteringKeyValidator::trim_trailing_nulls(to);
                if !hasta.is_empty() {
                    ligados.push(tuple_binding(
                        &self.clustering_columns,
                        self.bounding.to_operator(ordering),
                        hasta,
                        TO_MARKER_SUFFIX,
                    ));
                }
            }
            ClusteringKeySpec::In { prefix, values } => {
                ligados.extend(equalities(&self.clustering_columns, prefix));
                if let Some(columna) = self.clustering_columns.get(prefix.len()) {
                    ligados.push(in_binding(columna, CLUSTERING_IN_MARKER, values));
                }
            }
        }

        if kind == StatementKind::Select {
            if let Some(limit) = self.limit {
                ligados.push(Binding {
                    condition: String::new(),
                    values: vec![(LIMIT_MARKER.to_string(), Value::Int(limit as i32))],
                });
            }
        }

        ligados
    }
}

fn equalities(columns: &[String], values: &[Value]) -> Vec<Binding> {
    columns
        .iter()
        .zip(values)
        .map(|(columna, valor)| Binding {
            condition: format!("{}{}:{}", columna, Operator::Equal, columna),
            values: vec![(columna.clone(), valor.clone())],
        })
        .collect()
}

fn in_binding(column: &str, marker: &str, values: &[Value]) -> Binding {
    Binding {
        condition: format!("{} IN :{}", column, marker),
        values: vec![(marker.to_string(), Value::List(values.to_vec()))],
    }
}

// Los nulos intermedios de la tupla se ligan como null. El motor no los
// rechaza: CQL falla al ejecutar una comparación de tupla con un null.
fn tuple_binding(columns: &[String], operator: Operator, values: &[Value], suffix: &str) -> Binding {
    let columnas = &columns[..values.len().min(columns.len())];
    let marcadores: Vec<String> = columnas
        .iter()
        .map(|columna| format!("{}{}", columna, suffix))
        .collect();
    Binding {
        condition: format!(
            "({}){}({})",
            columnas.join(","),
            operator,
            marcadores
                .iter()
                .map(|m| format!(":{}", m))
                .collect::<Vec<_>>()
                .join(",")
        ),
        values: marcadores.into_iter().zip(values.iter().cloned()).collect(),
    }
}
