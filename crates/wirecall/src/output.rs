use clap::ValueEnum;
use wirecall_proto::Value;

use crate::convert::value_to_json;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Bare strings print raw; everything else prints as JSON.
    Text,
    /// Always print the result as pretty JSON.
    Json,
}

/// Render a call result to stdout.
pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            if let Some(s) = value.as_str() {
                println!("{s}");
            } else {
                println!("{}", render_json(value));
            }
        }
        OutputFormat::Json => println!("{}", render_json(value)),
    }
}

fn render_json(value: &Value) -> String {
    let json = value_to_json(value);
    serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
}
