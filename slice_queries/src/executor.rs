use crate::error::ErrorType;
use crate::executor_functions::bound_statement::BoundStatement;
use crate::slice_functions::value::{render_tuple, Value};
use log::info;
use std::cell::RefCell;

/// Ejecuta las sentencias ya renderizadas. La red, los reintentos y el estado
/// de paginación quedan de este lado; el motor sólo arma la sentencia.
pub trait SliceExecutor {
    type Row;
    /// Cursor de paginación. Un `Err` corta la iteración.
    type Cursor: Iterator<Item = Result<Self::Row, ErrorType>>;

    fn execute(&self, statement: &BoundStatement) -> Result<Vec<Self::Row>, ErrorType>;

    fn execute_iterator(&self, statement: &BoundStatement) -> Result<Self::Cursor, ErrorType>;

    fn execute_delete(&self, statement: &BoundStatement) -> Result<(), ErrorType>;
}

/// Ejecutor sin I/O: loguea cada sentencia, la guarda y devuelve resultados
/// vacíos. Lo usa el planner de línea de comandos.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    statements: RefCell<Vec<BoundStatement>>,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        DryRunExecutor::default()
    }

    /// Sentencias recibidas, en orden de llegada.
    pub fn statements(&self) -> Vec<BoundStatement> {
        self.statements.borrow().clone()
    }

    pub fn last_statement(&self) -> Option<BoundStatement> {
        self.statements.borrow().last().cloned()
    }

    fn record(&self, operacion: &str, statement: &BoundStatement) {
        info!(
            "[dry-run] {} {} valores={}",
            operacion,
            statement.query_string,
            render_tuple(&statement.values)
        );
        self.statements.borrow_mut().push(statement.clone());
    }
}

impl SliceExecutor for DryRunExecutor {
    type Row = Vec<Value>;
    type Cursor = std::vec::IntoIter<Result<Vec<Value>, ErrorType>>;

    fn execute(&self, statement: &BoundStatement) -> Result<Vec<Self::Row>, ErrorType> {
        self.record("execute", statement);
        Ok(Vec::new())
    }

    fn execute_iterator(&self, statement: &BoundStatement) -> Result<Self::Cursor, ErrorType> {
        self.record("iterate", statement);
        Ok(Vec::new().into_iter())
    }

    fn execute_delete(&self, statement: &BoundStatement) -> Result<(), ErrorType> {
        self.record("delete", statement);
        Ok(())
    }
}
