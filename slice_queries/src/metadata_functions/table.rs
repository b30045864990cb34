use crate::metadata_functions::primary_key::PrimaryKey;
use crate::slice_functions::ordering_mode::OrderingMode;
use serde::Deserialize;

// Columna de la tabla con su tipo CQL
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub cql_type: String,
}

// Estructura que representa una tabla
#[derive(Debug, Clone, Deserialize)]
pub struct TableMeta {
    #[serde(default)]
    pub keyspace: String,
    pub name: String,                    // Nombre de la tabla
    pub primary_key: PrimaryKey,         // PrimaryKey de la tabla
    #[serde(default)]
    pub clustering_order: OrderingMode, // Orden declarado de las columnas de clustering
    #[serde(default)]
    pub columnas: Vec<ColumnMeta>,       // Columnas de la tabla con tipo de datos
}

impl TableMeta {
    pub fn new(keyspace: &str, name: &str, partition_key: &[&str], clustering_key: &[&str]) -> Self {
        TableMeta {
            keyspace: keyspace.to_string(),
            name: name.to_string(),
            primary_key: PrimaryKey {
                partition_key: partition_key.iter().map(|s| s.to_string()).collect(),
                clustering_key: clustering_key.iter().map(|s| s.to_string()).collect(),
            },
            clustering_order: OrderingMode::Asc,
            columnas: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, cql_type: &str) -> Self {
        self.columnas.push(ColumnMeta {
            name: name.to_string(),
            cql_type: cql_type.to_string(),
        });
        self
    }

    pub fn with_clustering_order(mut self, ordering: OrderingMode) -> Self {
        self.clustering_order = ordering;
        self
    }

    /// `keyspace.tabla`, o sólo la tabla si no hay keyspace.
    pub fn qualified_name(&self) -> String {
        if self.keyspace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.keyspace, self.name)
        }
    }

    pub fn partition_columns(&self) -> &[String] {
        &self.primary_key.partition_key
    }

    pub fn clustering_columns(&self) -> &[String] {
        &self.primary_key.clustering_key
    }

    pub fn column_type(&self, column: &str) -> Option<&str> {
        self.columnas
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.cql_type.as_str())
    }
}
