use serde::Deserialize;

// Estructura de clave primaria
#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryKey {
    pub partition_key: Vec<String>,  // Clave de partición
    #[serde(default)]
    pub clustering_key: Vec<String>, // Clave de agrupamiento
}
