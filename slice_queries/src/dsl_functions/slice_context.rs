use crate::dsl_functions::{slice_iterator::SliceIterator, statement_skeleton::StatementSkeleton};
use crate::error::ErrorType;
use crate::executor::SliceExecutor;
use crate::executor_functions::bound_statement::BoundStatement;
use crate::metadata_functions::table::TableMeta;
use crate::slice_query_properties::{SliceQueryProperties, StatementKind};
use crate::transcoder::ValueTranscoder;
use log::{info, warn};

/// Acumulador que comparten todas las etapas del DSL de una consulta.
///
/// Los errores de declaración no cortan la cadena de llamadas: se guarda el
/// primero y lo devuelve la llamada terminal, antes de tocar el ejecutor.
pub struct SliceContext<'a, E> {
    meta: &'a TableMeta,
    executor: &'a E,
    transcoder: &'a dyn ValueTranscoder,
    projection: Vec<String>,
    properties: SliceQueryProperties,
    pending_error: Option<ErrorType>,
}

impl<'a, E> SliceContext<'a, E> {
    pub fn new(
        meta: &'a TableMeta,
        executor: &'a E,
        transcoder: &'a dyn ValueTranscoder,
        projection: Vec<String>,
    ) -> Self {
        SliceContext {
            meta,
            executor,
            transcoder,
            projection,
            properties: SliceQueryProperties::for_table(meta),
            pending_error: None,
        }
    }

    pub fn properties(&self) -> &SliceQueryProperties {
        &self.properties
    }

    pub fn pending_error(&self) -> Option<&ErrorType> {
        self.pending_error.as_ref()
    }

    /// Aplica una declaración. Si ya hubo un error, se ignora.
    pub fn record<F>(&mut self, declaracion: F)
    where
        F: FnOnce(&mut SliceQueryProperties) -> Result<(), ErrorType>,
    {
        if self.pending_error.is_some() {
            return;
        }
        if let Err(e) = declaracion(&mut self.properties) {
            warn!("Declaración inválida sobre {}: {}", self.meta.qualified_name(), e);
            self.pending_error = Some(e);
        }
    }

    /// Codifica, valida y renderiza la sentencia.
    pub fn bound_statement(self, kind: StatementKind) -> Result<BoundStatement, ErrorType> {
        if let Some(e) = self.pending_error {
            return Err(e);
        }
        let skeleton = match kind {
            StatementKind::Select => StatementSkeleton::select(self.meta, &self.projection),
            StatementKind::Delete => StatementSkeleton::delete(self.meta),
        };
        self.properties
            .transcode(self.meta, self.transcoder)?
            .to_bound_statement(kind, &skeleton.to_string())
    }
}

impl<'a, E: SliceExecutor> SliceContext<'a, E> {
    pub fn select(self) -> Result<Vec<E::Row>, ErrorType> {
        let executor = self.executor;
        let statement = self.bound_statement(StatementKind::Select)?;
        info!("Ejecutando: {}", statement.query_string);
        executor.execute(&statement)
    }

    pub fn iterate(self) -> Result<SliceIterator<E::Cursor>, ErrorType> {
        let executor = self.executor;
        let statement = self.bound_statement(StatementKind::Select)?;
        info!(
            "Iterando: {} (fetch size {:?})",
            statement.query_string, statement.fetch_size
        );
        executor.execute_iterator(&statement).map(SliceIterator::new)
    }

    pub fn delete(self) -> Result<(), ErrorType> {
        let executor = self.executor;
        let statement = self.bound_statement(StatementKind::Delete)?;
        info!("Ejecutando: {}", statement.query_string);
        executor.execute_delete(&statement)
    }
}
