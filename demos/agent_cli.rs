// Minimal agent-facing CLI built on serde_afd.
//
// Run:  cargo run --example agent_cli -- echo --output json
//       API_KEY_SECRET=sk-example cargo run --example agent_cli -- echo --output yaml --log startup

#![allow(clippy::print_stdout)]

use clap::Parser;
use serde_afd::{
    afd, build_cli_error, build_ok, build_startup, output_json, parse_log_filters, parse_output,
};

#[derive(Parser)]
#[command(name = "agent-cli", version, about = "Minimal agent-facing CLI example")]
struct Cli {
    /// Action to perform
    action: String,

    /// Output format: json (default), yaml, plain
    #[arg(long, default_value = "json")]
    output: String,

    /// Log categories (comma-separated): startup, request, ...
    #[arg(long, value_delimiter = ',')]
    log: Vec<String>,
}

fn main() {
    // Clap errors become single-line JSON to stdout, not stderr prose.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if matches!(
            e.kind(),
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
        ) {
            e.exit();
        }
        println!("{}", output_json(&build_cli_error(&e.to_string())));
        std::process::exit(2);
    });

    let format = parse_output(&cli.output).unwrap_or_else(|e| {
        println!("{}", output_json(&build_cli_error(&e.to_string())));
        std::process::exit(2);
    });

    let log_refs: Vec<&str> = cli.log.iter().map(String::as_str).collect();
    let log = parse_log_filters(&log_refs);

    if startup_log_enabled(&log) {
        let startup = build_startup(
            afd!({"output": (cli.output.clone())}),
            afd!({
                "action": (cli.action.clone()),
                "log": (log.clone()),
            }),
            afd!({
                "API_KEY_SECRET": (std::env::var("API_KEY_SECRET").ok()),
                "RUST_LOG": (std::env::var("RUST_LOG").ok()),
            }),
        );
        println!("{}", format.render(&startup));
    }

    let result = build_ok(
        afd!({
            "action": (cli.action),
            "log": (log),
        }),
        None,
    );
    println!("{}", format.render(&result));
}

fn startup_log_enabled(filters: &[String]) -> bool {
    filters
        .iter()
        .any(|f| matches!(f.as_str(), "startup" | "all" | "*"))
}
