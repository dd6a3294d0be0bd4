//! Command-line interface for chatmark
//!
//! This binary splits chat messages into code blocks, text runs and special
//! items, and prints the result for inspection or for other tools to consume.
//!
//! Usage:
//!   chatmark split [`<path>`] [--format `<format>`] [--strict] [--unescape]   - Split a message (stdin when no path)
//!   chatmark item `<raw>`                                                     - Show kind, value and label of one item
//!   chatmark correct `<old>` `<new>`                                          - Print the s/old/new/ correction for an edit

mod transforms;

use std::io::Read;

use chatmark_config::{ChatmarkConfig, ConfigError, Loader};
use chatmark_parser::chatmark::correction::sed_correction;
use chatmark_parser::chatmark::{parse_message, SpecialItem};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use transforms::{render_blocks, render_item, RenderOptions};

fn build_cli() -> Command {
    Command::new("chatmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for splitting chat message markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .value_parser(["json", "simple"])
                .help("Output format (default from configuration: json)"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print JSON on a single line"),
        )
        .arg(
            Arg::new("unescape")
                .long("unescape")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Decode &amp; &lt; &gt; in text and labels"),
        )
        .subcommand(
            Command::new("split")
                .about("Split a message into code blocks, text and special items")
                .arg(
                    Arg::new("path")
                        .help("File holding the message ('-' or absent for stdin)")
                        .index(1),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Reject messages with an unterminated ``` fence"),
                ),
        )
        .subcommand(
            Command::new("item")
                .about("Show kind, value and label of a single <...> item")
                .arg(Arg::new("raw").help("The item, brackets included").required(true)),
        )
        .subcommand(
            Command::new("correct")
                .about("Print the s/old/new/ correction between two versions of a message")
                .arg(Arg::new("old").required(true).index(1))
                .arg(Arg::new("new").required(true).index(2)),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    init_logging(&config.logging.level);

    let options = RenderOptions {
        format: config.output.format,
        pretty: config.output.pretty,
        unescape: config.parsing.unescape_entities,
    };

    let result = match matches.subcommand() {
        Some(("split", sub)) => handle_split_command(sub, &config, &options),
        Some(("item", sub)) => handle_item_command(sub, &options),
        Some(("correct", sub)) => Ok(handle_correct_command(sub)),
        _ => Err("Unknown command".to_string()),
    };

    match result {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Defaults, then the --config file, then flags
fn load_config(matches: &ArgMatches) -> Result<ChatmarkConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("compact") {
        loader = loader.set_override("output.pretty", false)?;
    }
    if matches.get_flag("unescape") {
        loader = loader.set_override("parsing.unescape_entities", true)?;
    }
    if let Some(("split", sub)) = matches.subcommand() {
        if sub.get_flag("strict") {
            loader = loader.set_override("parsing.strict_fences", true)?;
        }
    }
    loader.build()
}

/// RUST_LOG wins over the configured level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the split command
fn handle_split_command(
    matches: &ArgMatches,
    config: &ChatmarkConfig,
    options: &RenderOptions,
) -> Result<String, String> {
    let path = matches.get_one::<String>("path").map(String::as_str);
    let message = read_message(path)?;
    debug!(bytes = message.len(), "read message");

    let blocks = parse_message(&message, &config.parsing.to_options())
        .map_err(|e| format!("Parse error: {}", e))?;
    render_blocks(&blocks, options)
}

/// Handle the item command
fn handle_item_command(matches: &ArgMatches, options: &RenderOptions) -> Result<String, String> {
    let raw = matches
        .get_one::<String>("raw")
        .ok_or_else(|| "Missing item".to_string())?;
    let item = SpecialItem::new(raw).map_err(|e| format!("Parse error: {}", e))?;
    render_item(&item, options)
}

/// Handle the correct command; identical texts print nothing
fn handle_correct_command(matches: &ArgMatches) -> String {
    let old = matches.get_one::<String>("old").map(String::as_str).unwrap_or_default();
    let new = matches.get_one::<String>("new").map(String::as_str).unwrap_or_default();
    sed_correction(old, new).unwrap_or_default()
}

/// Read the message from a file or stdin, dropping the final line break
fn read_message(path: Option<&str>) -> Result<String, String> {
    let mut message = match path {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buffer
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path, e))?,
    };

    if message.ends_with('\n') {
        message.pop();
        if message.ends_with('\r') {
            message.pop();
        }
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_config::OutputFormat;

    #[test]
    fn cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn flags_override_configuration() {
        let matches = build_cli()
            .try_get_matches_from(["chatmark", "--format", "simple", "split", "--strict"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!(config.output.format, OutputFormat::Simple);
        assert!(config.parsing.strict_fences);
        assert!(!config.parsing.unescape_entities);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["chatmark", "item", "<@U1>", "--compact", "--unescape"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert!(!config.output.pretty);
        assert!(config.parsing.unescape_entities);
    }
}
