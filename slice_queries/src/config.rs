use crate::error::ErrorType;
use crate::slice_functions::consistency::Consistency;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuración del logger.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String, // "info", "debug", "trace"...
    #[serde(default = "default_directory")]
    pub directory: String, // Carpeta de los archivos de log
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            directory: default_directory(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_directory() -> String {
    "logs".to_string()
}

/// Valores por defecto que se aplican a cada consulta. Las llamadas explícitas
/// del builder los pisan.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SliceConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub default_consistency: Option<Consistency>,
    #[serde(default)]
    pub default_fetch_size: Option<u32>,
}

impl SliceConfig {
    pub fn from_json(contenido: &str) -> Result<Self, ErrorType> {
        let config: SliceConfig = serde_json::from_str(contenido)
            .map_err(|e| ErrorType::Config(format!("slice config: {}", e)))?;
        if config.default_fetch_size == Some(0) {
            return Err(ErrorType::Config(
                "slice config: default_fetch_size must be strictly positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Lee la configuración de un archivo JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ErrorType> {
        let contenido = fs::read_to_string(path.as_ref())
            .map_err(|e| ErrorType::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&contenido)
    }
}
