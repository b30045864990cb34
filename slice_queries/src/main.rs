use slice_queries::config::SliceConfig;
use slice_queries::error::{print_error, ErrorType};
use slice_queries::executor::DryRunExecutor;
use slice_queries::logger::init_logger;
use slice_queries::metadata_functions::keyspace::KeyspaceMeta;
use slice_queries::planner::{plan, PlanRequest};
use std::env;
use std::process;

const USO: &str =
    "Uso: slice_planner <config.json> <keyspace.json> <tabla> <select|delete> [clave=valor ...]";

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        eprintln!("{}", USO);
        process::exit(2);
    }

    let config = match SliceConfig::from_file(&args[1]) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error al leer la configuración: {}", e);
            process::exit(1);
        }
    };
    // El handle tiene que vivir hasta el final para que se vacíe el buffer
    let _logger = match init_logger(&config.logging) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error al iniciar el logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&args[2..], &config) {
        print_error(&e, "no se pudo planificar la consulta");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &[String], config: &SliceConfig) -> Result<(), ErrorType> {
    let keyspace = KeyspaceMeta::from_json_file(&args[0])?;
    let pedido = PlanRequest::from_args(&args[1..])?;
    let executor = DryRunExecutor::new();
    let sentencia = plan(&pedido, &keyspace, config, &executor)?;

    println!("{}", sentencia.query_string);
    for (nombre, valor) in sentencia.bind_names.iter().zip(&sentencia.values) {
        println!("  :{} = {}", nombre, valor);
    }
    let parametros = sentencia
        .to_query_parameters()?
        .serialize()
        .map_err(ErrorType::execution)?;
    let hex: Vec<String> = parametros.iter().map(|b| format!("{:02x}", b)).collect();
    println!("parámetros: {}", hex.join(""));
    Ok(())
}
