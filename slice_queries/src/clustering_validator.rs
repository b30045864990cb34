use crate::error::ErrorType;
use crate::slice_functions::{
    ordering_mode::OrderingMode,
    value::{render_tuple, Value},
};
use std::cmp::Ordering;

/// Valida el par (from, to) de una consulta por rango de clustering.
///
/// Un rango sobre columnas de clustering sólo puede variar una dimensión: el
/// prefijo compartido tiene que ser igual en ambas tuplas y a lo sumo el último
/// componente no nulo compartido puede diferir, respetando el sentido del
/// ordering.
pub struct ClusteringKeyValidator;

impl ClusteringKeyValidator {
    /// Índice más alto con un valor no nulo, `None` si todos son nulos.
    pub fn last_non_null_index(values: &[Value]) -> Option<usize> {
        values.iter().rposition(|v| !v.is_null())
    }

    /// Recorta la tupla hasta su último componente no nulo.
    pub fn trim_trailing_nulls(values: &[Value]) -> &[Value] {
        match Self::last_non_null_index(values) {
            Some(ultimo) => &values[..=ultimo],
            None => &[],
        }
    }

    pub fn validate(from: &[Value], to: &[Value], ordering: OrderingMode) -> Result<(), ErrorType> {
        // Si alguno de los lados está abierto el rango es de un solo lado
        let (a, b) = match (
            Self::last_non_null_index(from),
            Self::last_non_null_index(to),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => return Ok(()),
        };
        let m = a.min(b);

        for i in 0..m {
            let (desde, hasta) = (component(from, i), component(to, i));
            if !desde.is_null() && !hasta.is_null() && !same_component(desde, hasta) {
                return Err(ErrorType::InvalidRange(format!(
                    "For clustering range query, the {} component should be equal for from={} and to={}",
                    ordinal(i + 1),
                    render_tuple(from),
                    render_tuple(to)
                )));
            }
        }

        let largo = from.len().max(to.len());
        let diferencias = (m..largo)
            .filter(|&i| !same_component(component(from, i), component(to, i)))
            .count();
        if diferencias > 1 {
            return Err(ErrorType::InvalidRange(format!(
                "There should be no more than 1 component difference between clustering keys: from={} and to={}",
                render_tuple(from),
                render_tuple(to)
            )));
        }

        let (desde, hasta) = (component(from, m), component(to, m));
        if desde.is_null() || hasta.is_null() {
            return Ok(());
        }
        let comparacion = desde.compare(hasta).map_err(|e| {
            ErrorType::InvalidArgument(format!("{} clustering component: {}", ordinal(m + 1), e))
        })?;
        match ordering {
            OrderingMode::Asc if comparacion == Ordering::Greater => {
                Err(ErrorType::InvalidRange(format!(
                    "For ascending order, the from clustering keys {} should be lesser or equal to the to clustering keys {}",
                    render_tuple(from),
                    render_tuple(to)
                )))
            }
            OrderingMode::Desc if comparacion == Ordering::Less => {
                Err(ErrorType::InvalidRange(format!(
                    "For descending order, the from clustering keys {} should be greater or equal to the to clustering keys {}",
                    render_tuple(from),
                    render_tuple(to)
                )))
            }
            _ => Ok(()),
        }
    }
}

static NULO: Value = Value::Null;

// Las posiciones que faltan en una tupla corta cuentan como nulas
fn component(values: &[Value], index: usize) -> &Value {
    values.get(index).unwrap_or(&NULO)
}

// Igualdad con la misma regla que `Value::compare`: Int(1) y BigInt(1) son iguales
fn same_component(a: &Value, b: &Value) -> bool {
    match (a.is_null(), b.is_null()) {
        (true, true) => true,
        (false, false) => matches!(a.compare(b), Ok(Ordering::Equal)),
        _ => false,
    }
}

fn ordinal(n: usize) -> String {
    let sufijo = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", n, sufijo)
}
