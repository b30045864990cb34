// error.rs

use log::error;
use thiserror::Error;

// Define los tipos de errores
#[derive(Debug, Error)]
pub enum ErrorType {
    /// El par de tuplas de clustering no describe un rango válido.
    #[error("Invalid clustering range: {0}")]
    InvalidRange(String),
    /// Argumento faltante, no positivo o con cantidad de componentes incorrecta.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Error del ejecutor, se propaga sin modificar.
    #[error(transparent)]
    Execution(Box<dyn std::error::Error + Send + Sync>),
    /// No se pudo leer o parsear un archivo de configuración o metadata.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ErrorType {
    /// Envuelve un error del ejecutor tal cual llegó.
    pub fn execution<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ErrorType::Execution(Box::new(error))
    }
}

// Función para loguear errores, la dejo para el main
pub fn print_error(error_type: &ErrorType, description: &str) {
    error!("[{:?}]: {}", error_type, description);
}
