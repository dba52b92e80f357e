//! Command-line interface for content-index
//! Runs the string helpers over a file or stdin and prints what the indexer would store, as JSON.
//!
//! Usage:
//!   content-index prefixes `<path>`                                  - All prefixes of a node path
//!   content-index html [`<file>`] [--plain] [--config `<file>`]        - Heading buckets of an HTML fragment
//!   content-index into `<bucket>` [`<file>`] [--plain] [--config `<file>`] - Single-bucket injection
//!   content-index methods                                          - Methods callable from expressions

use clap::{Arg, ArgAction, ArgMatches, Command};
use content_index::indexing::{HelperMethod, IndexingHelper};
use content_index_config::{Loader, ENV_PREFIX};
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("content-index")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect how content is split into search index fields")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("prefixes")
                .about("List all prefixes of a node path")
                .arg(
                    Arg::new("path")
                        .help("Slash-delimited node path")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("html")
                .about("Split an HTML fragment into text and heading buckets")
                .arg(
                    Arg::new("file")
                        .help("HTML file to read (stdin when omitted)")
                        .index(1),
                )
                .args(config_args()),
        )
        .subcommand(
            Command::new("into")
                .about("Put a cleaned value into a single bucket")
                .arg(
                    Arg::new("bucket")
                        .help("Bucket name, e.g. 'h1'")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .help("File to read (stdin when omitted)")
                        .index(2),
                )
                .args(config_args()),
        )
        .subcommand(Command::new("methods").about("List methods callable from expressions"))
        .get_matches();

    match matches.subcommand() {
        Some(("prefixes", prefixes_matches)) => {
            let path = prefixes_matches.get_one::<String>("path").unwrap();
            handle_prefixes_command(path);
        }
        Some(("html", html_matches)) => {
            let helper = load_helper(html_matches);
            let input = read_input(html_matches.get_one::<String>("file"));
            print_json(&helper.extract_html_tags(&input));
        }
        Some(("into", into_matches)) => {
            let helper = load_helper(into_matches);
            let bucket = into_matches.get_one::<String>("bucket").unwrap();
            let input = read_input(into_matches.get_one::<String>("file"));
            print_json(&helper.extract_into(bucket, &input));
        }
        Some(("methods", _)) => {
            handle_methods_command();
        }
        _ => unreachable!(),
    }
}

fn config_args() -> [Arg; 2] {
    [
        Arg::new("plain")
            .long("plain")
            .help("Enable plain-text mode regardless of configuration")
            .action(ArgAction::SetTrue),
        Arg::new("config")
            .long("config")
            .short('c')
            .help("TOML file layered over the built-in defaults"),
    ]
}

/// Handle the prefixes command
fn handle_prefixes_command(path: &str) {
    print_json(&content_index::indexing::build_all_path_prefixes(path));
}

/// Handle the methods command
fn handle_methods_command() {
    for method in HelperMethod::ALL {
        println!("{}", method.name());
    }
}

fn load_helper(matches: &ArgMatches) -> IndexingHelper {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader = loader.with_environment(ENV_PREFIX);
    if matches.get_flag("plain") {
        loader = loader
            .set_override("fulltext.plain", true)
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            });
    }
    let config = loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    tracing::debug!(plain = config.fulltext.plain, "Configuration loaded");
    IndexingHelper::from_config(&config)
}

fn read_input(file: Option<&String>) -> String {
    let result = match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
        }
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading input: {}", e);
        std::process::exit(1);
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    let output = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error formatting output: {}", e);
        std::process::exit(1);
    });
    println!("{}", output);
}
