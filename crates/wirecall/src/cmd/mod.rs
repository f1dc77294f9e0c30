use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod call;
pub mod notify;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Invoke a remote method and print the result.
    Call(CallArgs),
    /// Fire a one-way notification (no reply is read).
    Notify(NotifyArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Call(args) => call::run(args, format),
        Command::Notify(args) => notify::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Endpoint to dial (tcp://host:port, unix:///path, or host:port).
    pub endpoint: String,
    /// Remote method name.
    pub method: String,
    /// Positional arguments as JSON literals; non-JSON input is sent as a
    /// plain string. Use `--` before arguments that start with a hyphen.
    pub args: Vec<String>,
    /// Overall deadline for the call's write and read (e.g. 5s, 500ms).
    #[arg(long)]
    pub timeout: Option<String>,
    /// Bound on the dial itself (e.g. 5s, 500ms).
    #[arg(long)]
    pub connect_timeout: Option<String>,
}

#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Endpoint to dial (tcp://host:port, unix:///path, or host:port).
    pub endpoint: String,
    /// Remote method name.
    pub method: String,
    /// Positional arguments as JSON literals; non-JSON input is sent as a
    /// plain string. Use `--` before arguments that start with a hyphen.
    pub args: Vec<String>,
    /// Bound on the write (e.g. 5s, 500ms).
    #[arg(long)]
    pub timeout: Option<String>,
    /// Bound on the dial itself (e.g. 5s, 500ms).
    #[arg(long)]
    pub connect_timeout: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show the versions of every workspace crate.
    #[arg(long)]
    pub extended: bool,
}
