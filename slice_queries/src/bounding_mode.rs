use crate::slice_functions::{operator::Operator, ordering_mode::OrderingMode};
use serde::Deserialize;

/// Indica si los extremos del rango se incluyen o no en el resultado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoundingMode {
    #[default]
    Inclusive,
    Exclusive,
}

impl BoundingMode {
    /// Operador aplicado a la tupla "from".
    ///
    /// En orden descendente el lado físicamente "menor" se invierte, por eso la
    /// misma intención da el operador opuesto.
    pub fn from_operator(&self, ordering: OrderingMode) -> Operator {
        match (self, ordering) {
            (BoundingMode::Inclusive, OrderingMode::Asc) => Operator::GreaterThanOrEqual,
            (BoundingMode::Inclusive, OrderingMode::Desc) => Operator::LessThanOrEqual,
            (BoundingMode::Exclusive, OrderingMode::Asc) => Operator::GreaterThan,
            (BoundingMode::Exclusive, OrderingMode::Desc) => Operator::LessThan,
        }
    }

    /// Operador aplicado a la tupla "to".
    pub fn to_operator(&self, ordering: OrderingMode) -> Operator {
        match (self, ordering) {
            (BoundingMode::Inclusive, OrderingMode::Asc) => Operator::LessThanOrEqual,
            (BoundingMode::Inclusive, OrderingMode::Desc) => Operator::GreaterThanOrEqual,
            (BoundingMode::Exclusive, OrderingMode::Asc) => Operator::LessThan,
            (BoundingMode::Exclusive, OrderingMode::Desc) => Operator::GreaterThan,
        }
    }
}
