use std::time::Duration;

use log::{debug, trace};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error as ThisError;
use x::{
    rpc::{EnvelopeError, RpcError, RpcRequest, RpcResponse},
    sensor::{SensorInfo, SensorInfoError, SensorMethod, INTERVAL_PARAM, NAME_PARAM},
};

const RPC_PATH: &str = "/rpc";

#[derive(ThisError, Debug)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed envelope: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("{0}")]
    Rpc(#[from] RpcError),
    #[error("invalid sensor info: {0}")]
    Info(#[from] SensorInfoError),
    #[error("unexpected result for <{method}>: {result}")]
    UnexpectedResult { method: SensorMethod, result: Value },
}

/// JSON-RPC client bound to one sensor for the whole session.
#[derive(Debug, Clone)]
pub struct SensorClient {
    http: Client,
    url: String,
    pin: String,
}

impl SensorClient {
    pub fn new(host: &str, port: u16, pin: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: format!("{}:{}{}", host.trim_end_matches('/'), port, RPC_PATH),
            pin: pin.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts any json body and returns whatever json comes back, whatever the status.
    pub async fn post_json<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, ClientError> {
        let resp = self
            .http
            .post(&self.url)
            .header(AUTHORIZATION, self.pin.as_str())
            .json(body)
            .send()
            .await?;
        let value = resp.json::<Value>().await?;
        trace!("<-- {}", value);
        Ok(value)
    }

    /// Posts a body verbatim, so it does not even have to be json.
    pub async fn post_raw(&self, body: impl Into<String>) -> Result<Value, ClientError> {
        let body = body.into();
        debug!("--> {}", body);
        let resp = self
            .http
            .post(&self.url)
            .header(AUTHORIZATION, self.pin.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let value = resp.json::<Value>().await?;
        trace!("<-- {}", value);
        Ok(value)
    }

    pub async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, ClientError> {
        debug!("--> {}", serde_json::to_string(request).unwrap_or_default());
        let raw = self.post_json(request).await?;
        Ok(RpcResponse::from_value(raw)?)
    }

    pub async fn call(
        &self,
        method: SensorMethod,
        params: Option<Value>,
    ) -> Result<RpcResponse, ClientError> {
        let mut request = RpcRequest::new(method);
        if let Some(params) = params {
            request = request.with_params(params);
        }
        self.send(&request).await
    }

    /// Calls `method` and unwraps the envelope, turning an error member into `ClientError::Rpc`.
    pub async fn request(
        &self,
        method: SensorMethod,
        params: Option<Value>,
    ) -> Result<Value, ClientError> {
        Ok(self.call(method, params).await?.into_result()?)
    }

    pub async fn get_info(&self) -> Result<SensorInfo, ClientError> {
        let result = self.request(SensorMethod::GetInfo, None).await?;
        Ok(SensorInfo::from_value(result)?)
    }

    pub async fn get_reading(&self) -> Result<f64, ClientError> {
        let result = self.request(SensorMethod::GetReading, None).await?;
        result.as_f64().ok_or(ClientError::UnexpectedResult {
            method: SensorMethod::GetReading,
            result,
        })
    }

    pub async fn get_methods(&self) -> Result<Value, ClientError> {
        self.request(SensorMethod::GetMethods, None).await
    }

    pub async fn set_name(&self, name: &str) -> Result<Value, ClientError> {
        self.request(SensorMethod::SetName, Some(json!({ NAME_PARAM: name })))
            .await
    }

    pub async fn set_reading_interval(&self, interval: i64) -> Result<Value, ClientError> {
        self.request(
            SensorMethod::SetReadingInterval,
            Some(json!({ INTERVAL_PARAM: interval })),
        )
        .await
    }

    pub async fn reset_to_factory(&self) -> Result<Value, ClientError> {
        self.request(SensorMethod::ResetToFactory, None).await
    }

    pub async fn update_firmware(&self) -> Result<Value, ClientError> {
        self.request(SensorMethod::UpdateFirmware, None).await
    }

    pub async fn reboot(&self) -> Result<Value, ClientError> {
        self.request(SensorMethod::Reboot, None).await
    }
}
