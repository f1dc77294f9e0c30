use std::time::Duration;

use wirecall_client::{Client, ClientConfig};
use wirecall_transport::Endpoint;

use crate::cmd::CallArgs;
use crate::convert::parse_arg;
use crate::exit::{client_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_value, OutputFormat};

pub fn run(args: CallArgs, format: OutputFormat) -> CliResult<i32> {
    let endpoint: Endpoint = args
        .endpoint
        .parse()
        .map_err(|err| transport_error("invalid endpoint", err))?;
    let config = ClientConfig {
        connect_timeout: parse_optional_duration(args.connect_timeout.as_deref())?,
        ..ClientConfig::default()
    };

    let mut client = Client::dial_with_config(endpoint, config)
        .map_err(|err| client_error("connect failed", err))?;
    if let Some(deadline) = parse_optional_duration(args.timeout.as_deref())? {
        client
            .set_deadline(deadline)
            .map_err(|err| client_error("failed to set deadline", err))?;
    }

    let params: Vec<_> = args.args.iter().map(|arg| parse_arg(arg)).collect();
    let result = client
        .call(&args.method, &params)
        .map_err(|err| client_error("call failed", err))?;
    client.close();

    print_value(&result, format);
    Ok(SUCCESS)
}

pub fn parse_optional_duration(input: Option<&str>) -> CliResult<Option<Duration>> {
    input.map(parse_duration).transpose()
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}
