use crate::error::ErrorType;
use crate::metadata_functions::table::TableMeta;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Fuente de metadata de las tablas. El motor sólo la lee.
pub trait MetadataProvider {
    fn table_meta(&self, table: &str) -> Result<&TableMeta, ErrorType>;
}

#[derive(Debug, Deserialize)]
struct KeyspaceFile {
    name: String,
    tables: Vec<TableMeta>,
}

// Estructura que representa un keyspace
#[derive(Debug, Clone)]
pub struct KeyspaceMeta {
    pub name: String,                       // Nombre del keyspace
    pub tables: HashMap<String, TableMeta>, // Tablas dentro del keyspace
}

impl KeyspaceMeta {
    pub fn new(name: &str) -> Self {
        KeyspaceMeta {
            name: name.to_string(),
            tables: HashMap::new(),
        }
    }

    /// Agrega una tabla; si no declara keyspace toma el de este registro.
    pub fn add_table(&mut self, mut table: TableMeta) {
        if table.keyspace.is_empty() {
            table.keyspace = self.name.clone();
        }
        self.tables.insert(table.name.clone(), table);
    }

    pub fn from_json(contenido: &str) -> Result<Self, ErrorType> {
        let archivo: KeyspaceFile = serde_json::from_str(contenido)
            .map_err(|e| ErrorType::Config(format!("keyspace metadata: {}", e)))?;
        let mut keyspace = KeyspaceMeta::new(&archivo.name);
        for tabla in archivo.tables {
            keyspace.add_table(tabla);
        }
        Ok(keyspace)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ErrorType> {
        let contenido = fs::read_to_string(path.as_ref()).map_err(|e| {
            ErrorType::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&contenido)
    }
}

impl MetadataProvider for KeyspaceMeta {
    fn table_meta(&self, table: &str) -> Result<&TableMeta, ErrorType> {
        // Acepta tanto "tabla" como "keyspace.tabla"
        let nombre = match table.split_once('.') {
            Some((keyspace, nombre)) if keyspace == self.name => nombre,
            Some((keyspace, _)) => {
                return Err(ErrorType::InvalidArgument(format!(
                    "table: keyspace '{}' is not '{}'",
                    keyspace, self.name
                )))
            }
            None => table,
        };
        self.tables.get(nombre).ok_or_else(|| {
            ErrorType::InvalidArgument(format!(
                "table: '{}' not found in keyspace '{}'",
                nombre, self.name
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice_functions::ordering_mode::OrderingMode;

    const METADATA: &str = r#"{
        "name": "vuelos",
        "tables": [
            {
                "name": "eventos",
                "primary_key": { "partition_key": ["bucket"], "clustering_key": ["col1", "col2"] },
                "clustering_order": "DESC",
                "columnas": [
                    { "name": "bucket", "type": "text" },
                    { "name": "col1", "type": "int" },
                    { "name": "col2", "type": "text" }
                ]
            }
        ]
    }"#;

    #[test]
    fn loads_tables_from_json() {
        let keyspace = KeyspaceMeta::from_json(METADATA).unwrap();
        let tabla = keyspace.table_meta("eventos").unwrap();

        assert_eq!(tabla.qualified_name(), "vuelos.eventos");
        assert_eq!(tabla.clustering_columns(), &["col1", "col2"]);
        assert_eq!(tabla.clustering_order, OrderingMode::Desc);
        assert_eq!(tabla.column_type("col1"), Some("int"));
    }

    #[test]
    fn qualified_lookups_check_the_keyspace() {
        let keyspace = KeyspaceMeta::from_json(METADATA).unwrap();
        assert!(keyspace.table_meta("vuelos.eventos").is_ok());
        assert!(keyspace.table_meta("otro.eventos").is_err());
        assert!(keyspace.table_meta("pasajeros").is_err());
    }

    #[test]
    fn malformed_metadata_is_a_config_error() {
        let error = KeyspaceMeta::from_json("{ \"name\": 3 }").unwrap_err();
        assert!(matches!(error, ErrorType::Config(_)));
    }
}
