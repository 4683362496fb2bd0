use clap::Args;
use libs::{clients::SensorClient, utils::read_json_arg};
use x::rpc::RpcRequest;

use crate::Error;

#[derive(Args)]
pub struct CallCmd {
    /// method name, sent as is even if the device doesn't know it
    method: String,

    /// json params. If . read from stdin.
    #[arg(short, long)]
    params: Option<String>,

    /// request id, 0 makes an invalid request
    #[arg(long, allow_negative_numbers = true)]
    id: Option<i64>,
}

impl CallCmd {
    fn request(&self) -> Result<RpcRequest, Error> {
        let mut request = RpcRequest::named(&self.method);
        if let Some(params) = &self.params {
            request = request.with_params(read_json_arg(params)?);
        }
        if let Some(id) = self.id {
            request = request.with_id(id);
        }
        Ok(request)
    }
}

// The envelope is printed untouched, error member included.
pub async fn run_call_cmd(cmd: &CallCmd, client: &SensorClient) -> Result<(), Error> {
    let envelope = client.post_json(&cmd.request()?).await?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
