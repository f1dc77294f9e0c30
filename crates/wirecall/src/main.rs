mod cmd;
mod convert;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "wirecall", version, about = "MessagePack-RPC client CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    format: OutputFormat,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let result = cmd::run(cli.command, cli.format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_call_subcommand() {
        let cli = Cli::try_parse_from([
            "wirecall",
            "call",
            "tcp://127.0.0.1:9000",
            "add",
            "3",
            "8",
            "--timeout",
            "5s",
        ])
        .expect("call args should parse");

        assert!(matches!(cli.command, Command::Call(_)));
    }

    #[test]
    fn parses_notify_subcommand() {
        let cli = Cli::try_parse_from([
            "wirecall",
            "notify",
            "unix:///tmp/rpc.sock",
            "log",
            "\"a line\"",
        ])
        .expect("notify args should parse");

        assert!(matches!(cli.command, Command::Notify(_)));
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wirecall",
            "call",
            "tcp://h:1",
            "m",
            "--format",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("global flags should parse anywhere");

        assert!(matches!(cli.command, Command::Call(_)));
    }
}
