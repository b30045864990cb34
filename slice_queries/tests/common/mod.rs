#![allow(dead_code)]

use slice_queries::error::ErrorType;
use slice_queries::executor::SliceExecutor;
use slice_queries::executor_functions::bound_statement::BoundStatement;
use slice_queries::metadata_functions::table::TableMeta;
use slice_queries::Value;
use std::cell::RefCell;
use std::io;

/// Ejecutor de prueba: guarda cada sentencia y devuelve las filas cargadas.
#[derive(Default)]
pub struct RecordingExecutor {
    rows: Vec<Vec<Value>>,
    failure: Option<String>,
    statements: RefCell<Vec<BoundStatement>>,
    deletes: RefCell<usize>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        RecordingExecutor::default()
    }

    pub fn with_rows(rows: Vec<Vec<Value>>) -> Self {
        RecordingExecutor {
            rows,
            ..RecordingExecutor::default()
        }
    }

    pub fn failing(mensaje: &str) -> Self {
        RecordingExecutor {
            failure: Some(mensaje.to_string()),
            ..RecordingExecutor::default()
        }
    }

    pub fn statements(&self) -> Vec<BoundStatement> {
        self.statements.borrow().clone()
    }

    pub fn last(&self) -> BoundStatement {
        self.statements
            .borrow()
            .last()
            .cloned()
            .expect("no statement was executed")
    }

    pub fn deletes(&self) -> usize {
        *self.deletes.borrow()
    }

    fn record(&self, statement: &BoundStatement) -> Result<(), ErrorType> {
        self.statements.borrow_mut().push(statement.clone());
        match &self.failure {
            Some(mensaje) => Err(ErrorType::execution(io::Error::new(
                io::ErrorKind::ConnectionReset,
                mensaje.clone(),
            ))),
            None => Ok(()),
        }
    }
}

impl SliceExecutor for RecordingExecutor {
    type Row = Vec<Value>;
    type Cursor = std::vec::IntoIter<Result<Vec<Value>, ErrorType>>;

    fn execute(&self, statement: &BoundStatement) -> Result<Vec<Self::Row>, ErrorType> {
        self.record(statement)?;
        Ok(self.rows.clone())
    }

    fn execute_iterator(&self, statement: &BoundStatement) -> Result<Self::Cursor, ErrorType> {
        self.record(statement)?;
        let filas: Vec<_> = self.rows.iter().cloned().map(Ok).collect();
        Ok(filas.into_iter())
    }

    fn execute_delete(&self, statement: &BoundStatement) -> Result<(), ErrorType> {
        self.record(statement)?;
        *self.deletes.borrow_mut() += 1;
        Ok(())
    }
}

/// `vuelos.eventos`: partición (vuelo), clustering (fecha, hora).
pub fn eventos() -> TableMeta {
    TableMeta::new("vuelos", "eventos", &["vuelo"], &["fecha", "hora"])
        .with_column("vuelo", "text")
        .with_column("fecha", "int")
        .with_column("hora", "int")
}

/// `vuelos.por_bucket`: partición (bucket), clustering (col1, col2).
pub fn por_bucket() -> TableMeta {
    TableMeta::new("vuelos", "por_bucket", &["bucket"], &["col1", "col2"])
}

/// `vuelos.tracking`: partición compuesta (aerolinea, dia).
pub fn tracking() -> TableMeta {
    TableMeta::new("vuelos", "tracking", &["aerolinea", "dia"], &["hora"])
        .with_column("dia", "int")
        .with_column("hora", "int")
}

/// `vuelos.pasajeros`: sólo partición (id).
pub fn pasajeros() -> TableMeta {
    TableMeta::new("vuelos", "pasajeros", &["id"], &[])
}

/// `vuelos.auditoria`: partición (bucket), clustering (id, campo, version).
pub fn auditoria() -> TableMeta {
    TableMeta::new("vuelos", "auditoria", &["bucket"], &["id", "campo", "version"])
}

/// `vuelos.bitacora`: partición (vuelo), clustering (minuto) declarado DESC.
pub fn bitacora() -> TableMeta {
    TableMeta::new("vuelos", "bitacora", &["vuelo"], &["minuto"])
        .with_clustering_order(slice_queries::OrderingMode::Desc)
}
