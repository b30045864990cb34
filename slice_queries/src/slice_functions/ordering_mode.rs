use serde::Deserialize;
use std::fmt;

/// Sentido de lectura de las columnas de clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderingMode {
    #[default]
    #[serde(alias = "ASCENDING")]
    Asc,
    #[serde(alias = "DESCENDING")]
    Desc,
}

impl OrderingMode {
    pub fn reverse(&self) -> OrderingMode {
        match self {
            OrderingMode::Asc => OrderingMode::Desc,
            OrderingMode::Desc => OrderingMode::Asc,
        }
    }

    pub fn as_cql(&self) -> &'static str {
        match self {
            OrderingMode::Asc => "ASC",
            OrderingMode::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cql())
    }
}
