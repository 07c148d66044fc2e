//! Command-line front end for the collection store.
//!
//! # Responsibility
//! - Map commands onto `CollectionStore` operations.
//! - Translate store outcomes into exit codes: 0 ok, 1 failure, 2 usage.
//!
//! # Invariants
//! - `add`/`create` write the store only after an `OK` result.

mod args;

use args::{parse_args, Command, USAGE};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use trackstore_core::{
    core_version, default_log_level, init_logging, ping, CollectionStore, CreateResult,
    StoreConfig,
};

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let raw_refs: Vec<&str> = raw.iter().map(String::as_str).collect();

    let invocation = match parse_args(&raw_refs) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("trackstore: {err}\n\n{USAGE}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if let Some(log_dir) = invocation.log_dir.as_deref() {
        let level = invocation
            .log_level
            .as_deref()
            .unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("trackstore: {err}");
            return ExitCode::from(EXIT_USAGE);
        }
    }

    let config = store_config(invocation.data_dir, invocation.output_dir);
    ExitCode::from(execute(invocation.command, config))
}

fn store_config(data_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> StoreConfig {
    let mut config = StoreConfig::from_env();
    if let Some(data_dir) = data_dir {
        config = config.with_data_dir(data_dir);
    }
    if let Some(output_dir) = output_dir {
        config = config.with_output_dir(output_dir);
    }
    config
}

/// Runs `command` against a store opened from `config`; returns the exit code.
fn execute(command: Command, config: StoreConfig) -> u8 {
    match run(command, config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("trackstore: {err}");
            EXIT_FAILURE
        }
    }
}

fn run(command: Command, config: StoreConfig) -> Result<u8, String> {
    match command {
        Command::Ping => {
            println!("trackstore_core ping={}", ping());
            return Ok(EXIT_OK);
        }
        Command::Version => {
            println!("trackstore_core version={}", core_version());
            return Ok(EXIT_OK);
        }
        _ => {}
    }

    let mut store = CollectionStore::open(config).map_err(|err| err.to_string())?;

    match command {
        Command::Collections => {
            for name in store.collection_names() {
                println!("{name}");
            }
            Ok(EXIT_OK)
        }
        Command::Find { collection } => {
            let records = store.find(&collection).map_err(|err| err.to_string())?;
            let body = serde_json::to_string_pretty(&records).map_err(|err| err.to_string())?;
            println!("{body}");
            Ok(EXIT_OK)
        }
        Command::Add {
            collection,
            id,
            title,
        } => {
            let result = store.add(&collection, &id, &title);
            finish_mutation(&store, result)
        }
        Command::Create {
            collection,
            record_json,
        } => {
            let candidate: serde_json::Value = serde_json::from_str(&record_json)
                .map_err(|err| format!("record is not valid JSON: {err}"))?;
            let result = store.create(&collection, &candidate);
            finish_mutation(&store, result)
        }
        Command::Ping | Command::Version => Ok(EXIT_OK),
    }
}

fn finish_mutation(store: &CollectionStore, result: CreateResult) -> Result<u8, String> {
    println!("{} {}", result.status, result.message);
    if !result.is_ok() {
        return Ok(EXIT_FAILURE);
    }

    store.write().map_err(|err| err.to_string())?;
    info!(
        "event=cli_write module=cli status=ok output_dir={}",
        store.config().output_dir.display()
    );
    Ok(EXIT_OK)
}
