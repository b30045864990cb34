use crate::config::LoggingConfig;
use crate::error::ErrorType;
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle, WriteMode};

/// Inicia el logger a archivo con copia a stdout. Hay que guardar el handle
/// devuelto mientras dure el programa, si no el buffer no se vacía.
pub fn init_logger(config: &LoggingConfig) -> Result<LoggerHandle, ErrorType> {
    // Los logs quedan en la carpeta configurada ("logs" por defecto)
    let file_spec = FileSpec::default().directory(&config.directory);

    Logger::try_with_str(&config.level)
        .map_err(|e| ErrorType::Config(format!("logging level '{}': {}", config.level, e)))?
        .log_to_file(file_spec)
        .write_mode(WriteMode::BufferAndFlush)
        .duplicate_to_stdout(Duplicate::Info)
        .format(|write, _now, record| {
            write!(
                write,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d: %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .start()
        .map_err(|e| ErrorType::Config(format!("logger: {}", e)))
}
