use crate::metadata_functions::table::TableMeta;
use std::fmt;

/// Comienzo de la sentencia, antes del WHERE. El motor sólo le agrega
/// predicados, orden y límite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementSkeleton {
    Select { table: String, projection: Vec<String> },
    Delete { table: String },
}

impl StatementSkeleton {
    /// `SELECT <proyección> FROM ks.tabla`; sin columnas se usa `*`.
    pub fn select(table: &TableMeta, projection: &[String]) -> Self {
        StatementSkeleton::Select {
            table: table.qualified_name(),
            projection: projection.to_vec(),
        }
    }

    pub fn delete(table: &TableMeta) -> Self {
        StatementSkeleton::Delete {
            table: table.qualified_name(),
        }
    }
}

impl fmt::Display for StatementSkeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementSkeleton::Select { table, projection } if projection.is_empty() => {
                write!(f, "SELECT * FROM {}", table)
            }
            StatementSkeleton::Select { table, projection } => {
                write!(f, "SELECT {} FROM {}", projection.join(","), table)
            }
            StatementSkeleton::Delete { table } => write!(f, "DELETE FROM {}", table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeletons_use_the_qualified_table_name() {
        let tabla = TableMeta::new("vuelos", "eventos", &["id"], &[]);
        assert_eq!(
            StatementSkeleton::select(&tabla, &[]).to_string(),
            "SELECT * FROM vuelos.eventos"
        );
        assert_eq!(
            StatementSkeleton::select(&tabla, &["id".to_string(), "estado".to_string()])
                .to_string(),
            "SELECT id,estado FROM vuelos.eventos"
        );
        assert_eq!(
            StatementSkeleton::delete(&tabla).to_string(),
            "DELETE FROM vuelos.eventos"
        );
    }
}
