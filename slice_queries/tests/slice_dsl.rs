mod common;

use common::{auditoria, bitacora, eventos, pasajeros, por_bucket, tracking, RecordingExecutor};
use slice_queries::config::SliceConfig;
use slice_queries::transcoder::CqlTypeTranscoder;
use slice_queries::{Consistency, ErrorType, SliceQueryBuilder, Value};

#[test]
fn partition_only_select() {
    let tabla = pasajeros();
    let executor = RecordingExecutor::with_rows(vec![vec![Value::from("a")]]);

    let filas = SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["a"])
        .limit(10)
        .get()
        .unwrap();

    assert_eq!(filas.len(), 1);
    let sentencia = executor.last();
    assert_eq!(
        sentencia.query_string,
        "SELECT * FROM vuelos.pasajeros WHERE id=:id LIMIT :limitSize;"
    );
    assert_eq!(sentencia.values, vec![Value::from("a"), Value::Int(10)]);
    assert_eq!(sentencia.bind_names, vec!["id", "limitSize"]);
}

#[test]
fn partition_in_with_open_upper_bound() {
    let tabla = por_bucket();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components_in(["a", "b"])
        .from_clusterings(["A", "B"])
        .limit(10)
        .get()
        .unwrap();

    let sentencia = executor.last();
    assert_eq!(
        sentencia.query_string,
        "SELECT * FROM vuelos.por_bucket WHERE bucket IN :partitionComponentsIn AND (col1,col2)>=(:col1,:col2) LIMIT :limitSize;"
    );
    assert_eq!(
        sentencia.values,
        vec![
            Value::from(vec!["a", "b"]),
            Value::from("A"),
            Value::from("B"),
            Value::Int(10)
        ]
    );
}

#[test]
fn descending_exclusive_range_with_transcoding() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .with_transcoder(&CqlTypeTranscoder)
        .for_select()
        .with_partition_components(["AR1140"])
        .from_clusterings(["20240302", "18"])
        .to_clusterings(["20240302", "6"])
        .with_exclusive_bounds()
        .order_by_descending()
        .get()
        .unwrap();

    let sentencia = executor.last();
    assert_eq!(
        sentencia.query_string,
        "SELECT * FROM vuelos.eventos WHERE vuelo=:vuelo AND (fecha,hora)<(:fecha,:hora) AND (fecha,hora)>(:fecha_to,:hora_to) ORDER BY fecha DESC;"
    );
    assert_eq!(
        sentencia.values,
        vec![
            Value::from("AR1140"),
            Value::Int(20240302),
            Value::Int(18),
            Value::Int(20240302),
            Value::Int(6)
        ]
    );
}

#[test]
fn invalid_range_never_reaches_the_executor() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();

    let error = SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .from_clusterings([11])
        .to_clusterings([10])
        .get()
        .unwrap_err();

    assert!(matches!(error, ErrorType::InvalidRange(_)));
    assert!(error.to_string().contains("lesser or equal"));
    assert!(executor.statements().is_empty());
}

#[test]
fn more_than_one_differing_component_is_rejected() {
    let tabla = auditoria();
    let executor = RecordingExecutor::new();
    let id = uuid::Uuid::new_v4();

    let error = SliceQueryBuilder::new(&tabla, &executor)
        .for_iteration()
        .with_partition_components(["x"])
        .from_clusterings(vec![Value::Uuid(id), Value::from("a"), Value::Int(1)])
        .to_clusterings(vec![Value::Uuid(id), Value::Null, Value::Null])
        .iterator()
        .err()
        .expect("the range must be rejected");

    assert!(error
        .to_string()
        .contains("no more than 1 component difference"));

    let filas = SliceQueryBuilder::new(&tabla, &executor)
        .for_iteration()
        .with_partition_components(["x"])
        .from_clusterings(vec![Value::Uuid(id), Value::from("a"), Value::Null])
        .to_clusterings(vec![Value::Uuid(id), Value::from("a"), Value::Int(3)])
        .iterator();
    assert!(filas.is_ok());
}

#[test]
fn first_declaration_error_is_returned_by_the_terminal() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();

    let etapa = SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .limit(0)
        .with_fetch_size(0);
    assert!(etapa
        .pending_error()
        .map(|e| e.to_string().contains("limit"))
        .unwrap_or(false));

    let error = etapa.get().unwrap_err();
    assert!(matches!(error, ErrorType::InvalidArgument(_)));
    assert!(error.to_string().contains("limit"));
    assert!(executor.statements().is_empty());
}

#[test]
fn get_one_reads_a_single_row() {
    let tabla = eventos();
    let executor = RecordingExecutor::with_rows(vec![
        vec![Value::Int(1)],
        vec![Value::Int(2)],
    ]);

    let fila = SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .limit(50)
        .get_one()
        .unwrap();

    assert_eq!(fila, Some(vec![Value::Int(1)]));
    assert_eq!(executor.last().values.last(), Some(&Value::Int(1)));
}

#[test]
fn get_last_walks_the_range_backwards() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .from_clusterings([1])
        .to_clusterings([5])
        .get_last(3)
        .unwrap();

    let sentencia = executor.last();
    assert_eq!(
        sentencia.query_string,
        "SELECT * FROM vuelos.eventos WHERE vuelo=:vuelo AND (fecha)<=(:fecha) AND (fecha)>=(:fecha_to) ORDER BY fecha DESC LIMIT :limitSize;"
    );
    assert_eq!(
        sentencia.values,
        vec![Value::from("AR1140"), Value::Int(5), Value::Int(1), Value::Int(3)]
    );
}

#[test]
fn first_and_last_read_opposite_ends_of_a_descending_table() {
    let tabla = bitacora();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .get_first(2)
        .unwrap();
    assert_eq!(
        executor.last().query_string,
        "SELECT * FROM vuelos.bitacora WHERE vuelo=:vuelo LIMIT :limitSize;"
    );

    SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .get_last(2)
        .unwrap();
    assert_eq!(
        executor.last().query_string,
        "SELECT * FROM vuelos.bitacora WHERE vuelo=:vuelo ORDER BY minuto ASC LIMIT :limitSize;"
    );

    // El rango se declara en el orden de la tabla
    SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .from_clusterings([50])
        .to_clusterings([10])
        .get_last(5)
        .unwrap();
    let sentencia = executor.last();
    assert_eq!(
        sentencia.query_string,
        "SELECT * FROM vuelos.bitacora WHERE vuelo=:vuelo AND (minuto)>=(:minuto) AND (minuto)<=(:minuto_to) ORDER BY minuto ASC LIMIT :limitSize;"
    );
    assert_eq!(
        sentencia.values,
        vec![Value::from("AR1140"), Value::Int(10), Value::Int(50), Value::Int(5)]
    );
}

#[test]
fn matching_terminals_add_the_exact_clusterings() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .get_first_matching(2, [20240302])
        .unwrap();

    assert_eq!(
        executor.last().query_string,
        "SELECT * FROM vuelos.eventos WHERE vuelo=:vuelo AND fecha=:fecha LIMIT :limitSize;"
    );

    SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .get_last_matching(2, [20240302])
        .unwrap();

    assert_eq!(
        executor.last().query_string,
        "SELECT * FROM vuelos.eventos WHERE vuelo=:vuelo AND fecha=:fecha ORDER BY fecha DESC LIMIT :limitSize;"
    );
}

#[test]
fn clustering_in_after_exact_prefix() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .with_clusterings([20240302])
        .and_clusterings_in([6, 12, 18])
        .get()
        .unwrap();

    let sentencia = executor.last();
    assert_eq!(
        sentencia.query_string,
        "SELECT * FROM vuelos.eventos WHERE vuelo=:vuelo AND fecha=:fecha AND hora IN :clusteringComponentsIn;"
    );
    assert_eq!(
        sentencia.values,
        vec![
            Value::from("AR1140"),
            Value::Int(20240302),
            Value::from(vec![6, 12, 18])
        ]
    );
}

#[test]
fn composite_partition_with_in_on_the_last_component() {
    let tabla = tracking();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .with_transcoder(&CqlTypeTranscoder)
        .for_select()
        .with_partition_components(["AR"])
        .and_partition_components_in(["1", "2"])
        .get()
        .unwrap();

    let sentencia = executor.last();
    assert_eq!(
        sentencia.query_string,
        "SELECT * FROM vuelos.tracking WHERE aerolinea=:aerolinea AND dia IN :partitionComponentsIn;"
    );
    assert_eq!(
        sentencia.values,
        vec![Value::from("AR"), Value::List(vec![Value::Int(1), Value::Int(2)])]
    );
}

#[test]
fn delete_renders_no_order_or_limit() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .for_delete()
        .with_partition_components(["AR1140"])
        .from_clusterings([1])
        .to_clusterings([5])
        .with_consistency(Consistency::All)
        .delete()
        .unwrap();

    let sentencia = executor.last();
    assert_eq!(
        sentencia.query_string,
        "DELETE FROM vuelos.eventos WHERE vuelo=:vuelo AND (fecha)>=(:fecha) AND (fecha)<=(:fecha_to);"
    );
    assert_eq!(sentencia.consistency, Some(Consistency::All));
    assert_eq!(executor.deletes(), 1);

    SliceQueryBuilder::new(&tabla, &executor)
        .for_delete()
        .with_partition_components(["AR1140"])
        .delete_matching([20240302, 6])
        .unwrap();
    assert_eq!(
        executor.last().query_string,
        "DELETE FROM vuelos.eventos WHERE vuelo=:vuelo AND fecha=:fecha AND hora=:hora;"
    );
    assert_eq!(executor.deletes(), 2);
}

#[test]
fn iteration_is_lazy_and_single_pass() {
    let tabla = eventos();
    let executor = RecordingExecutor::with_rows(vec![
        vec![Value::Int(1)],
        vec![Value::Int(2)],
        vec![Value::Int(3)],
    ]);

    let mut filas = SliceQueryBuilder::new(&tabla, &executor)
        .for_iteration()
        .with_partition_components(["AR1140"])
        .iterator_with_batch_size(2)
        .unwrap();

    assert!(matches!(filas.next(), Some(Ok(_))));
    let resto: Vec<_> = filas.by_ref().collect();
    assert_eq!(resto.len(), 2);
    assert!(filas.next().is_none());
    assert_eq!(executor.last().fetch_size, Some(2));

    let coincidencias = SliceQueryBuilder::new(&tabla, &executor)
        .for_iteration()
        .with_partition_components(["AR1140"])
        .iterator_with_matching([20240302])
        .unwrap();
    assert_eq!(coincidencias.count(), 3);
}

#[test]
fn config_defaults_are_overridden_by_explicit_calls() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();
    let config = SliceConfig::from_json(
        r#"{ "default_consistency": "LOCAL_ONE", "default_fetch_size": 250 }"#,
    )
    .unwrap();

    SliceQueryBuilder::new(&tabla, &executor)
        .with_config(&config)
        .for_select()
        .with_partition_components(["AR1140"])
        .get()
        .unwrap();
    let sentencia = executor.last();
    assert_eq!(sentencia.consistency, Some(Consistency::LocalOne));
    assert_eq!(sentencia.fetch_size, Some(250));

    SliceQueryBuilder::new(&tabla, &executor)
        .with_config(&config)
        .for_select()
        .with_partition_components(["AR1140"])
        .with_consistency(Consistency::Quorum)
        .with_fetch_size(10)
        .with_async()
        .get()
        .unwrap();
    let sentencia = executor.last();
    assert_eq!(sentencia.consistency, Some(Consistency::Quorum));
    assert_eq!(sentencia.fetch_size, Some(10));
    assert!(sentencia.is_async);
}

#[test]
fn projection_is_rendered_in_the_select() {
    let tabla = eventos();
    let executor = RecordingExecutor::new();

    SliceQueryBuilder::new(&tabla, &executor)
        .with_projection(["fecha", "hora", "estado"])
        .for_select()
        .with_partition_components(["AR1140"])
        .get()
        .unwrap();

    assert_eq!(
        executor.last().query_string,
        "SELECT fecha,hora,estado FROM vuelos.eventos WHERE vuelo=:vuelo;"
    );
}

#[test]
fn executor_errors_are_propagated_unchanged() {
    let tabla = eventos();
    let executor = RecordingExecutor::failing("conexión cerrada por el nodo");

    let error = SliceQueryBuilder::new(&tabla, &executor)
        .for_select()
        .with_partition_components(["AR1140"])
        .get()
        .unwrap_err();

    assert!(matches!(error, ErrorType::Execution(_)));
    assert_eq!(error.to_string(), "conexión cerrada por el nodo");
}

#[test]
fn rendering_is_repeatable() {
    let tabla = por_bucket();
    let executor = RecordingExecutor::new();

    for _ in 0..2 {
        SliceQueryBuilder::new(&tabla, &executor)
            .for_select()
            .with_partition_components(["a"])
            .from_clusterings(["A"])
            .to_clusterings(["A", "Z"])
            .limit(5)
            .get()
            .unwrap();
    }
    let sentencias = executor.statements();
    assert_eq!(sentencias[0], sentencias[1]);
}
