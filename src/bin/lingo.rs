//! Command-line interface for lingo
//! Parses, translates and inspects source files written in a registered dialect.
//!
//! Usage:
//!   lingo `<path>` [--config `<config>`] [--dialect `<dialect>`] [--settings `<file>`]
//!   lingo --list-configs                                    - List processing configurations
//!   lingo --list-dialects                                   - List registered dialects

use clap::{Arg, ArgAction, Command};
use lingo::lingo::dialects::Registry;
use lingo::lingo::pipeline::PipelineExecutor;
use lingo::lingo::settings::Loader;
use std::fs;
use std::process;

fn main() {
    let matches = Command::new("lingo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and translating dialect source files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the source file")
                .required_unless_present_any(["list-configs", "list-dialects"])
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Processing configuration (e.g., 'translate', 'ast-json', 'tokens')")
                .default_value("translate"),
        )
        .arg(
            Arg::new("dialect")
                .long("dialect")
                .short('d')
                .help("Dialect the source is written in")
                .default_value("sugar"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('s')
                .help("TOML settings file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log grammar construction at debug level")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-configs")
                .long("list-configs")
                .help("List available processing configurations")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-dialects")
                .long("list-dialects")
                .help("List registered dialects")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let default_filter = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let registry = build_registry(matches.get_one::<String>("settings"));

    if matches.get_flag("list-configs") {
        handle_list_configs_command();
        return;
    }
    if matches.get_flag("list-dialects") {
        handle_list_dialects_command(&registry);
        return;
    }

    let (Some(path), Some(config), Some(dialect)) = (
        matches.get_one::<String>("path"),
        matches.get_one::<String>("config"),
        matches.get_one::<String>("dialect"),
    ) else {
        eprintln!("A source path is required unless listing configs or dialects");
        process::exit(2);
    };
    handle_execute_command(&registry, path, config, dialect);
}

/// Built-in dialects, with settings layered from `settings` if given
fn build_registry(settings: Option<&String>) -> Registry {
    let loader = match settings {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    let config = loader.build().unwrap_or_else(|e| {
        eprintln!("Settings error: {}", e);
        process::exit(1);
    });
    let mut registry = Registry::with_config(config);
    lingo::lingo::base::register_base(&mut registry);
    registry
}

/// Handle the execute command
fn handle_execute_command(registry: &Registry, path: &str, config: &str, dialect: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let executor = PipelineExecutor::new();
    match executor.execute(config, registry, dialect, &source, Some(path)) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Handle the list-configs command
fn handle_list_configs_command() {
    let executor = PipelineExecutor::new();
    println!("Available configurations:\n");
    for config in executor.list_configs() {
        println!("  {:<12} {}", config.name, config.description);
    }
}

/// Handle the list-dialects command
fn handle_list_dialects_command(registry: &Registry) {
    println!("Available dialects:\n");
    for name in registry.dialect_names() {
        let Some(dialect) = registry.dialect(name) else {
            continue;
        };
        match dialect.parent() {
            Some(parent) => println!(
                "  {:<12} extends {} with {}",
                name,
                parent,
                dialect.fragments().join(", ")
            ),
            None => println!("  {:<12} {}", name, dialect.fragments().join(", ")),
        }
    }
}
