use crate::config::SliceConfig;
use crate::dsl_functions::{
    slice_context::SliceContext,
    slice_stage::{ForDelete, ForIteration, ForSelect, NoPartition, SliceStage},
};
use crate::error::ErrorType;
use crate::metadata_functions::{keyspace::MetadataProvider, table::TableMeta};
use crate::slice_functions::consistency::Consistency;
use crate::transcoder::{IdentityTranscoder, ValueTranscoder};

static IDENTIDAD: IdentityTranscoder = IdentityTranscoder;

/// Punto de entrada del DSL de consultas por rango sobre una tabla.
///
/// ```ignore
/// let filas = SliceQueryBuilder::new(&tabla, &executor)
///     .for_select()
///     .with_partition_components(["vuelo-1"])
///     .from_clusterings([10])
///     .to_clusterings([20])
///     .limit(50)
///     .get()?;
/// ```
pub struct SliceQueryBuilder<'a, E> {
    meta: &'a TableMeta,
    executor: &'a E,
    transcoder: &'a dyn ValueTranscoder,
    projection: Vec<String>,
    default_consistency: Option<Consistency>,
    default_fetch_size: Option<u32>,
}

impl<'a, E> SliceQueryBuilder<'a, E> {
    pub fn new(meta: &'a TableMeta, executor: &'a E) -> Self {
        SliceQueryBuilder {
            meta,
            executor,
            transcoder: &IDENTIDAD,
            projection: Vec::new(),
            default_consistency: None,
            default_fetch_size: None,
        }
    }

    /// Busca la tabla en el proveedor de metadata.
    pub fn for_table<M: MetadataProvider>(
        provider: &'a M,
        table: &str,
        executor: &'a E,
    ) -> Result<Self, ErrorType> {
        Ok(Self::new(provider.table_meta(table)?, executor))
    }

    pub fn with_transcoder(mut self, transcoder: &'a dyn ValueTranscoder) -> Self {
        self.transcoder = transcoder;
        self
    }

    /// Toma la consistencia y el fetch size por defecto de la configuración.
    pub fn with_config(mut self, config: &SliceConfig) -> Self {
        self.default_consistency = config.default_consistency;
        self.default_fetch_size = config.default_fetch_size;
        self
    }

    /// Columnas del SELECT; sin columnas se usa `*`.
    pub fn with_projection<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.projection = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn for_select(self) -> SliceStage<'a, E, ForSelect, NoPartition> {
        SliceStage::new(self.context(true))
    }

    pub fn for_iteration(self) -> SliceStage<'a, E, ForIteration, NoPartition> {
        SliceStage::new(self.context(true))
    }

    pub fn for_delete(self) -> SliceStage<'a, E, ForDelete, NoPartition> {
        SliceStage::new(self.context(false))
    }

    fn context(self, lectura: bool) -> SliceContext<'a, E> {
        let mut context = SliceContext::new(self.meta, self.executor, self.transcoder, self.projection);
        if let Some(consistency) = self.default_consistency {
            context.record(|p| {
                p.consistency(consistency);
                Ok(())
            });
        }
        // Un DELETE no pagina
        if let (true, Some(fetch_size)) = (lectura, self.default_fetch_size) {
            context.record(|p| p.fetch_size(fetch_size).map(|_| ()));
        }
        context
    }
}
