//! `rekit`: replay a JSON-lines action log through a TOML reducer tree.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use rekit_core::{Action, Handlers, Reducer, ReducerConfig};
use serde_json::Value;

const USAGE: &str = "usage: rekit --config <tree.toml> --actions <actions.jsonl> [--trace] [--verbose]";

#[derive(Debug, PartialEq)]
struct Args {
    config: PathBuf,
    actions: PathBuf,
    trace: bool,
    verbose: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let value_of = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .filter(|v| !v.starts_with("--"))
            .map(PathBuf::from)
            .ok_or_else(|| format!("missing {}\n{}", flag, USAGE))
    };
    Ok(Args {
        config: value_of("--config")?,
        actions: value_of("--actions")?,
        trace: args.iter().any(|a| a == "--trace"),
        verbose: args.iter().any(|a| a == "--verbose" || a == "-v"),
    })
}

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = WriteLogger::init(log_level, Config::default(), std::io::stderr()) {
        eprintln!("rekit: logging disabled: {}", e);
    }
    log::info!("rekit starting (log level: {:?})", log_level);
}

fn replay(args: &Args) -> Result<Value, String> {
    let config = ReducerConfig::load(&args.config)
        .map_err(|e| format!("{}: {}", args.config.display(), e))?;
    let reducer = config
        .build(&Handlers::new())
        .map_err(|e| format!("{}: {}", args.config.display(), e))?;

    let file = File::open(&args.actions).map_err(|e| format!("{}: {}", args.actions.display(), e))?;
    let mut state = reducer.init().map_err(|e| e.to_string())?;
    let mut count = 0usize;
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let at = |e: &dyn std::fmt::Display| format!("{}:{}: {}", args.actions.display(), i + 1, e);
        let line = line.map_err(|e| at(&e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: Value = serde_json::from_str(line).map_err(|e| at(&e))?;
        let action = Action::from_json(record).map_err(|e| at(&e))?;
        state = reducer.reduce(Some(state), &action).map_err(|e| at(&e))?;
        count += 1;
        if args.trace {
            println!("{} => {}", action.kind, state);
        }
    }
    log::debug!("replayed {} actions from {}", count, args.actions.display());
    Ok(state)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };
    init_logging(args.verbose);

    match replay(&args).and_then(|state| serde_json::to_string_pretty(&state).map_err(|e| e.to_string())) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(msg) => {
            eprintln!("rekit: {}", msg);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags() {
        let args = parse_args(&strings(&["--actions", "a.jsonl", "--config", "t.toml", "--trace"])).unwrap();
        assert_eq!(
            args,
            Args {
                config: PathBuf::from("t.toml"),
                actions: PathBuf::from("a.jsonl"),
                trace: true,
                verbose: false,
            }
        );
    }

    #[test]
    fn missing_flag_is_reported() {
        let err = parse_args(&strings(&["--config", "t.toml"])).unwrap_err();
        assert!(err.starts_with("missing --actions"));
    }

    #[test]
    fn flag_value_cannot_be_another_flag() {
        let err = parse_args(&strings(&["--config", "--actions", "a.jsonl"])).unwrap_err();
        assert!(err.starts_with("missing --config"), "{}", err);
    }

    #[test]
    fn replays_actions_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("tree.toml");
        let actions = dir.path().join("actions.jsonl");
        std::fs::write(
            &config,
            "shape = \"object\"\n[fields.pets]\nshape = \"array\"\nactions = { PUSH = \"push\", POP = \"pop\" }\n",
        )
        .unwrap();
        let mut file = File::create(&actions).unwrap();
        writeln!(file, r#"{{"type": "PUSH", "payload": "dog"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"type": "PUSH", "payload": "cat"}}"#).unwrap();
        writeln!(file, r#"{{"type": "POP"}}"#).unwrap();

        let state = replay(&Args {
            config,
            actions,
            trace: false,
            verbose: false,
        })
        .unwrap();
        assert_eq!(state, serde_json::json!({"pets": ["dog"]}));
    }

    #[test]
    fn replays_bundled_demo() {
        let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");
        let state = replay(&Args {
            config: demos.join("settings.toml"),
            actions: demos.join("settings.jsonl"),
            trace: false,
            verbose: false,
        })
        .unwrap();
        assert_eq!(
            state,
            serde_json::json!({
                "value": 42,
                "owner": "ops",
                "bool": true,
                "tags": ["blue", "red"],
            })
        );
    }

    #[test]
    fn reports_line_of_bad_action() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("tree.toml");
        let actions = dir.path().join("actions.jsonl");
        std::fs::write(&config, "shape = \"bool\"\nactions = { ON = \"true\" }\n").unwrap();
        std::fs::write(&actions, "{\"type\": \"ON\"}\n{\"payload\": 1}\n").unwrap();

        let err = replay(&Args {
            config,
            actions,
            trace: false,
            verbose: false,
        })
        .unwrap_err();
        assert!(err.contains("actions.jsonl:2:"), "{}", err);
    }
}
