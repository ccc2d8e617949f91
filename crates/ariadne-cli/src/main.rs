//! Ariadne CLI — run an agent endpoint and poke at wire messages.

mod cli;
mod cmd;
mod ui;

use crate::cli::*;
use clap::Parser;

fn init_tracing_stderr(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // The log level lives in the config, so report the load after init.
    let loaded = ariadne_kernel::config::read_config(cli.config.as_deref());
    init_tracing_stderr(&loaded.config.log_level);
    loaded.log();
    let config = loaded.config;

    match cli.command {
        Commands::Start => cmd::start::cmd_start(config),
        Commands::Inspect { file } => cmd::inspect::cmd_inspect(&file),
        Commands::Ping { respond, comment } => cmd::ping::cmd_ping(config, respond, comment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_cli_parse() {
        let cli = Cli::try_parse_from(["ariadne", "ping", "--respond", "--comment", "hello"])
            .expect("ping syntax should parse");
        assert!(matches!(
            cli.command,
            Commands::Ping { respond: true, ref comment } if comment.as_deref() == Some("hello")
        ));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["ariadne", "inspect", "msg.json", "--config", "agent.toml"])
            .expect("inspect syntax should parse");
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("agent.toml"))
        );
        assert!(matches!(cli.command, Commands::Inspect { ref file } if file.ends_with("msg.json")));
    }
}
