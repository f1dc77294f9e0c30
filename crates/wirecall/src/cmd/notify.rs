use wirecall_client::{Client, ClientConfig};
use wirecall_transport::Endpoint;

use crate::cmd::call::parse_optional_duration;
use crate::cmd::NotifyArgs;
use crate::convert::parse_arg;
use crate::exit::{client_error, transport_error, CliResult, SUCCESS};

pub fn run(args: NotifyArgs) -> CliResult<i32> {
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
            .set_write_deadline(deadline)
            .map_err(|err| client_error("failed to set deadline", err))?;
    }

    let params: Vec<_> = args.args.iter().map(|arg| parse_arg(arg)).collect();
    client
        .notify(&args.method, &params)
        .map_err(|err| client_error("notify failed", err))?;
    client.close();

    Ok(SUCCESS)
}
