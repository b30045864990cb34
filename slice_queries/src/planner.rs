use crate::bounding_mode::BoundingMode;
use crate::config::SliceConfig;
use crate::dsl_functions::statement_skeleton::StatementSkeleton;
use crate::error::ErrorType;
use crate::executor::SliceExecutor;
use crate::executor_functions::bound_statement::BoundStatement;
use crate::metadata_functions::keyspace::MetadataProvider;
use crate::slice_functions::{consistency::Consistency, ordering_mode::OrderingMode, value::Value};
use crate::slice_query_properties::{SliceQueryProperties, StatementKind};
use crate::transcoder::CqlTypeTranscoder;
use log::{info, warn};

/// Pedido armado desde la línea de comandos:
/// `<tabla> <select|delete> [clave=valor ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub table: String,
    pub kind: StatementKind,
    pub options: Vec<(String, String)>,
}

impl PlanRequest {
    pub fn from_args(args: &[String]) -> Result<Self, ErrorType> {
        let (table, kind, resto) = match args {
            [table, kind, resto @ ..] => (table, kind, resto),
            _ => {
                return Err(ErrorType::InvalidArgument(
                    "expected <table> <select|delete> [key=value ...]".to_string(),
                ))
            }
        };
        let kind = match kind.to_lowercase().as_str() {
            "select" => StatementKind::Select,
            "delete" => StatementKind::Delete,
            otro => {
                return Err(ErrorType::InvalidArgument(format!(
                    "statement: '{}' is not select or delete",
                    otro
                )))
            }
        };
        let options = resto
            .iter()
            .map(|arg| match arg.split_once('=') {
                Some((clave, valor)) => Ok((clave.trim().to_string(), valor.to_string())),
                None => Err(ErrorType::InvalidArgument(format!(
                    "option '{}': expected key=value",
                    arg
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PlanRequest {
            table: table.to_string(),
            kind,
            options,
        })
    }
}

/// Arma la sentencia del pedido y se la pasa al ejecutor.
pub fn plan<M, E>(
    request: &PlanRequest,
    metadata: &M,
    config: &SliceConfig,
    executor: &E,
) -> Result<BoundStatement, ErrorType>
where
    M: MetadataProvider,
    E: SliceExecutor,
{
    let tabla = metadata.table_meta(&request.table)?;
    let mut props = SliceQueryProperties::for_table(tabla);
    if let Some(consistency) = config.default_consistency {
        props.consistency(consistency);
    }
    if let (StatementKind::Select, Some(fetch_size)) = (request.kind, config.default_fetch_size) {
        props.fetch_size(fetch_size)?;
    }

    for (clave, valor) in &request.options {
        match clave.as_str() {
            "partition" => {
                props.with_partition_components(parse_list(valor))?;
            }
            "partition_in" => {
                props.and_partition_components_in(parse_list(valor))?;
            }
            "clusterings" => {
                props.with_clusterings(parse_list(valor))?;
            }
            "clusterings_in" => {
                props.and_clusterings_in(parse_list(valor))?;
            }
            "from" => {
                props.from_clusterings(parse_list(valor))?;
            }
            "to" => {
                props.to_clusterings(parse_list(valor))?;
            }
            "limit" => {
                props.limit(parse_u32(clave, valor)?)?;
            }
            "fetch" => {
                props.fetch_size(parse_u32(clave, valor)?)?;
            }
            "order" => {
                props.ordering(parse_ordering(valor)?);
            }
            "bounds" => {
                props.bounding(parse_bounding(valor)?);
            }
            "consistency" => {
                props.consistency(valor.parse::<Consistency>()?);
            }
            "async" => {
                props.with_async(valor.trim().eq_ignore_ascii_case("true"));
            }
            otro => {
                return Err(ErrorType::InvalidArgument(format!(
                    "option '{}' is not supported",
                    otro
                )))
            }
        }
    }
    if request.kind == StatementKind::Delete && props.get_limit().is_some() {
        warn!("El LIMIT no se aplica a un DELETE, se ignora");
    }

    let props = props.transcode(tabla, &CqlTypeTranscoder)?;
    let skeleton = match request.kind {
        StatementKind::Select => StatementSkeleton::select(tabla, &[]),
        StatementKind::Delete => StatementSkeleton::delete(tabla),
    };
    let statement = props.to_bound_statement(request.kind, &skeleton.to_string())?;
    info!("Sentencia planificada: {}", statement.query_string);

    match request.kind {
        StatementKind::Select => {
            executor.execute(&statement)?;
        }
        StatementKind::Delete => executor.execute_delete(&statement)?,
    }
    Ok(statement)
}

// Valores separados por coma; vacío o "null" es un componente nulo
fn parse_list(valor: &str) -> Vec<Value> {
    valor
        .split(',')
        .map(str::trim)
        .map(|v| {
            if v.is_empty() || v.eq_ignore_ascii_case("null") {
                Value::Null
            } else {
                Value::from(v)
            }
        })
        .collect()
}

fn parse_u32(clave: &str, valor: &str) -> Result<u32, ErrorType> {
    valor.trim().parse::<u32>().map_err(|e| {
        ErrorType::InvalidArgument(format!("{}: '{}' is not a number ({})", clave, valor, e))
    })
}

fn parse_ordering(valor: &str) -> Result<OrderingMode, ErrorType> {
    match valor.trim().to_lowercase().as_str() {
        "asc" | "ascending" => Ok(OrderingMode::Asc),
        "desc" | "descending" => Ok(OrderingMode::Desc),
        otro => Err(ErrorType::InvalidArgument(format!(
            "order: '{}' is not asc or desc",
            otro
        ))),
    }
}

fn parse_bounding(valor: &str) -> Result<BoundingMode, ErrorType> {
    match valor.trim().to_lowercase().as_str() {
        "inclusive" => Ok(BoundingMode::Inclusive),
        "exclusive" => Ok(BoundingMode::Exclusive),
        otro => Err(ErrorType::InvalidArgument(format!(
            "bounds: '{}' is not inclusive or exclusive",
            otro
        ))),
    }
}
