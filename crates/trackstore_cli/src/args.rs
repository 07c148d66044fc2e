//! Command-line argument parsing.
//!
//! # Responsibility
//! - Turn raw arguments into a typed `Invocation`.
//! - Keep usage errors separate from store errors.

use std::path::PathBuf;

pub const USAGE: &str = "Usage: trackstore [--data-dir <path>] [--output-dir <path>] \
[--log-dir <abs path>] [--log-level <level>] <command>

Commands:
  ping                              health check
  version                           print core version
  collections                       list loaded collection names
  find <collection>                 print records as JSON
  add <collection> <id> <title>     add a single-title record and write
  create <collection> <json>        create a record from JSON and write";

/// Store operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Version,
    Collections,
    Find {
        collection: String,
    },
    Add {
        collection: String,
        id: String,
        title: String,
    },
    Create {
        collection: String,
        record_json: String,
    },
}

/// Parsed global options plus the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub log_dir: Option<String>,
    pub log_level: Option<String>,
    pub command: Command,
}

/// Parses arguments given WITHOUT the program name.
pub fn parse_args(args: &[&str]) -> Result<Invocation, String> {
    let mut data_dir = None;
    let mut output_dir = None;
    let mut log_dir = None;
    let mut log_level = None;

    let mut rest = args;
    while let Some((&flag, tail)) = rest.split_first() {
        if !flag.starts_with("--") {
            break;
        }
        let (&value, tail) = tail
            .split_first()
            .ok_or_else(|| format!("Missing value for '{flag}'"))?;
        match flag {
            "--data-dir" => data_dir = Some(PathBuf::from(value)),
            "--output-dir" => output_dir = Some(PathBuf::from(value)),
            "--log-dir" => log_dir = Some(value.to_string()),
            "--log-level" => log_level = Some(value.to_string()),
            _ => return Err(format!("Unknown option: '{flag}'")),
        }
        rest = tail;
    }

    Ok(Invocation {
        data_dir,
        output_dir,
        log_dir,
        log_level,
        command: parse_command(rest)?,
    })
}

fn parse_command(args: &[&str]) -> Result<Command, String> {
    let Some((&name, operands)) = args.split_first() else {
        return Err("No command specified.".into());
    };

    match (name, operands) {
        ("ping", []) => Ok(Command::Ping),
        ("version", []) => Ok(Command::Version),
        ("collections", []) => Ok(Command::Collections),
        ("find", [collection]) => Ok(Command::Find {
            collection: collection.to_string(),
        }),
        ("add", [collection, id, title]) => Ok(Command::Add {
            collection: collection.to_string(),
            id: id.to_string(),
            title: title.to_string(),
        }),
        ("create", [collection, record_json]) => Ok(Command::Create {
            collection: collection.to_string(),
            record_json: record_json.to_string(),
        }),
        ("ping" | "version" | "collections" | "find" | "add" | "create", _) => {
            Err(format!("Wrong number of arguments for '{name}'"))
        }
        _ => Err(format!("Unknown command: '{name}'")),
    }
}
