use crate::bounding_mode::BoundingMode;
use crate::dsl_functions::{slice_context::SliceContext, slice_iterator::SliceIterator};
use crate::error::ErrorType;
use crate::executor::SliceExecutor;
use crate::slice_query_properties::SliceQueryProperties;
use crate::slice_functions::{
    consistency::Consistency,
    ordering_mode::OrderingMode,
    value::{collect_values, Value},
};
use std::marker::PhantomData;

// ---------------------------------------------------------------
// Propósito de la consulta
// ---------------------------------------------------------------

/// SELECT que devuelve una lista o una fila.
pub struct ForSelect;
/// SELECT paginado que devuelve un `SliceIterator`.
pub struct ForIteration;
/// DELETE.
pub struct ForDelete;

/// Propósitos que leen filas: admiten orden, límite y fetch size.
pub trait ReadPurpose {}
impl ReadPurpose for ForSelect {}
impl ReadPurpose for ForIteration {}

// ---------------------------------------------------------------
// Etapas
// ---------------------------------------------------------------

/// Todavía no se declaró la partición.
pub struct NoPartition;
/// Partición declarada con `=`.
pub struct Partition;
/// Partición con IN sobre el último componente.
pub struct PartitionIn;
/// Clustering con `=`.
pub struct Clusterings;
/// Clustering con IN sobre la última columna.
pub struct ClusteringsIn;
/// Rango de clustering.
pub struct Range;

/// Etapas con la partición completa: ya se puede ejecutar.
pub trait Restricted {}
impl Restricted for Partition {}
impl Restricted for PartitionIn {}
impl Restricted for Clusterings {}
impl Restricted for ClusteringsIn {}
impl Restricted for Range {}

/// Etapas que todavía no restringieron el clustering.
pub trait AcceptsClusterings: Restricted {}
impl AcceptsClusterings for Partition {}
impl AcceptsClusterings for PartitionIn {}

/// Etapas donde se puede declarar un extremo del rango.
pub trait AcceptsRange: Restricted {}
impl AcceptsRange for Partition {}
impl AcceptsRange for PartitionIn {}
impl AcceptsRange for Range {}

/// Una etapa del DSL. `P` es el propósito y `S` la etapa; cada combinación
/// ofrece sólo las llamadas válidas en ese punto.
pub struct SliceStage<'a, E, P, S> {
    context: SliceContext<'a, E>,
    _marker: PhantomData<(P, S)>,
}

impl<'a, E, P, S> SliceStage<'a, E, P, S> {
    pub(crate) fn new(context: SliceContext<'a, E>) -> Self {
        SliceStage {
            context,
            _marker: PhantomData,
        }
    }

    fn advance<T>(self) -> SliceStage<'a, E, P, T> {
        SliceStage::new(self.context)
    }

    fn declare<F>(mut self, declaracion: F) -> Self
    where
        F: FnOnce(&mut SliceQueryProperties) -> Result<(), ErrorType>,
    {
        self.context.record(declaracion);
        self
    }

    /// Primer error de declaración, si hubo.
    pub fn pending_error(&self) -> Option<&ErrorType> {
        self.context.pending_error()
    }

    pub fn with_consistency(self, consistency: Consistency) -> Self {
        self.declare(|p| {
            p.consistency(consistency);
            Ok(())
        })
    }

    pub fn with_async(self) -> Self {
        self.declare(|p| {
            p.with_async(true);
            Ok(())
        })
    }
}

// ---------------------------------------------------------------
// Opciones de lectura
// ---------------------------------------------------------------

impl<'a, E, P: ReadPurpose, S> SliceStage<'a, E, P, S> {
    pub fn order_by_ascending(self) -> Self {
        self.declare(|p| {
            p.ordering(OrderingMode::Asc);
            Ok(())
        })
    }

    pub fn order_by_descending(self) -> Self {
        self.declare(|p| {
            p.ordering(OrderingMode::Desc);
            Ok(())
        })
    }

    pub fn limit(self, limit: u32) -> Self {
        self.declare(|p| p.limit(limit).map(|_| ()))
    }

    pub fn with_fetch_size(self, fetch_size: u32) -> Self {
        self.declare(|p| p.fetch_size(fetch_size).map(|_| ()))
    }
}

// ---------------------------------------------------------------
// Partición
// ---------------------------------------------------------------

impl<'a, E, P> SliceStage<'a, E, P, NoPartition> {
    pub fn with_partition_components<I, V>(self, values: I) -> SliceStage<'a, E, P, Partition>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let valores = collect_values(values);
        self.declare(|p| p.with_partition_components(valores).map(|_| ()))
            .advance()
    }

    /// IN directo, para claves de partición de un solo componente.
    pub fn with_partition_components_in<I, V>(self, values: I) -> SliceStage<'a, E, P, PartitionIn>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let valores = collect_values(values);
        self.declare(|p| p.with_partition_components_in(valores).map(|_| ()))
            .advance()
    }
}

impl<'a, E, P> SliceStage<'a, E, P, Partition> {
    /// IN sobre el último componente de partición.
    pub fn and_partition_components_in<I, V>(self, values: I) -> SliceStage<'a, E, P, PartitionIn>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let valores = collect_values(values);
        self.declare(|p| p.and_partition_components_in(valores).map(|_| ()))
            .advance()
    }
}

// ---------------------------------------------------------------
// Clustering
// ---------------------------------------------------------------

impl<'a, E, P, S: AcceptsClusterings> SliceStage<'a, E, P, S> {
    pub fn with_clusterings<I, V>(self, values: I) -> SliceStage<'a, E, P, Clusterings>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let valores = collect_values(values);
        self.declare(|p| p.with_clusterings(valores).map(|_| ()))
            .advance()
    }

    /// IN directo, para tablas con una sola columna de clustering.
    pub fn with_clusterings_in<I, V>(self, values: I) -> SliceStage<'a, E, P, ClusteringsIn>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let valores = collect_values(values);
        self.declare(|p| p.and_clusterings_in(valores).map(|_| ()))
            .advance()
    }
}

impl<'a, E, P> SliceStage<'a, E, P, Clusterings> {
    /// IN sobre la columna de clustering que sigue a las declaradas con `=`.
    pub fn and_clusterings_in<I, V>(self, values: I) -> SliceStage<'a, E, P, ClusteringsIn>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let valores = collect_values(values);
        self.declare(|p| p.and_clusterings_in(valores).map(|_| ()))
            .advance()
    }
}

impl<'a, E, P, S: AcceptsRange> SliceStage<'a, E, P, S> {
    pub fn from_clusterings<I, V>(self, values: I) -> SliceStage<'a, E, P, Range>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let valores = collect_values(values);
        self.declare(|p| p.from_clusterings(valores).map(|_| ()))
            .advance()
    }

    pub fn to_clusterings<I, V>(self, values: I) -> SliceStage<'a, E, P, Range>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let valores = collect_values(values);
        self.declare(|p| p.to_clusterings(valores).map(|_| ()))
            .advance()
    }
}

impl<'a, E, P> SliceStage<'a, E, P, Range> {
    pub fn with_inclusive_bounds(self) -> Self {
        self.bounding(BoundingMode::Inclusive)
    }

    pub fn with_exclusive_bounds(self) -> Self {
        self.bounding(BoundingMode::Exclusive)
    }

    pub fn bounding(self, bounding: BoundingMode) -> Self {
        self.declare(|p| {
            p.bounding(bounding);
            Ok(())
        })
    }
}

// ---------------------------------------------------------------
// Terminales
// ---------------------------------------------------------------

impl<'a, E: SliceExecutor, S: Restricted> SliceStage<'a, E, ForSelect, S> {
    /// Todas las filas del rango.
    pub fn get(self) -> Result<Vec<E::Row>, ErrorType> {
        self.context.select()
    }

    /// La primera fila, si existe.
    pub fn get_one(self) -> Result<Option<E::Row>, ErrorType> {
        let filas = self.declare(|p| p.limit(1).map(|_| ())).context.select()?;
        Ok(filas.into_iter().next())
    }

    /// Las primeras `n` filas en el orden declarado.
    pub fn get_first(self, n: u32) -> Result<Vec<E::Row>, ErrorType> {
        self.limit(n).get()
    }

    /// Las últimas `n` filas: se lee el rango al revés.
    pub fn get_last(self, n: u32) -> Result<Vec<E::Row>, ErrorType> {
        self.declare(|p| {
            p.reverse_ordering();
            Ok(())
        })
        .limit(n)
        .get()
    }
}

impl<'a, E: SliceExecutor, S: AcceptsClusterings> SliceStage<'a, E, ForSelect, S> {
    pub fn get_matching<I, V>(self, clusterings: I) -> Result<Vec<E::Row>, ErrorType>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_clusterings(clusterings).get()
    }

    pub fn get_first_matching<I, V>(self, n: u32, clusterings: I) -> Result<Vec<E::Row>, ErrorType>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_clusterings(clusterings).get_first(n)
    }

    pub fn get_last_matching<I, V>(self, n: u32, clusterings: I) -> Result<Vec<E::Row>, ErrorType>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_clusterings(clusterings).get_last(n)
    }
}

impl<'a, E: SliceExecutor, S: Restricted> SliceStage<'a, E, ForIteration, S> {
    pub fn iterator(self) -> Result<SliceIterator<E::Cursor>, ErrorType> {
        self.context.iterate()
    }

    /// Igual que `iterator` pero con el tamaño de página indicado.
    pub fn iterator_with_batch_size(self, batch_size: u32) -> Result<SliceIterator<E::Cursor>, ErrorType> {
        self.with_fetch_size(batch_size).iterator()
    }
}

impl<'a, E: SliceExecutor, S: AcceptsClusterings> SliceStage<'a, E, ForIteration, S> {
    pub fn iterator_with_matching<I, V>(self, clusterings: I) -> Result<SliceIterator<E::Cursor>, ErrorType>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_clusterings(clusterings).iterator()
    }
}

impl<'a, E: SliceExecutor, S: Restricted> SliceStage<'a, E, ForDelete, S> {
    pub fn delete(self) -> Result<(), ErrorType> {
        self.context.delete()
    }
}

impl<'a, E: SliceExecutor, S: AcceptsClusterings> SliceStage<'a, E, ForDelete, S> {
    pub fn delete_matching<I, V>(self, clusterings: I) -> Result<(), ErrorType>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with_clusterings(clusterings).delete()
    }
}
