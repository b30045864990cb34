use std::fmt;

// Operadores de comparación posibles en un rango de clustering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,              // "="
    GreaterThan,        // ">"
    LessThan,           // "<"
    GreaterThanOrEqual, // ">="
    LessThanOrEqual,    // "<="
}

impl Operator {
    /// Texto CQL del operador.
    pub fn as_cql(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cql())
    }
}
