//! In-process stand-in for the sensor, served by axum on an ephemeral port.
//!
//! It follows the documented device contract by default; `Quirks` switch on
//! specific misbehaviors so the checks can be shown to catch them.
#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use conformance::{SuiteSettings, Waits};
use libs::{clients::SensorClient, utils::WaitPolicy};
use serde_json::{json, Value};
use x::{
    rpc::RpcErrorKind,
    sensor::{SensorMethod, LATEST_FIRMWARE_REPLY, MAX_FIRMWARE_VERSION, REBOOT_REPLY},
};

pub const PIN: &str = "4242";
pub const FACTORY_NAME: &str = "sensor-01";
pub const FACTORY_FIRMWARE: u8 = 10;
pub const FACTORY_INTERVAL: i64 = 5;

#[derive(Debug, Clone, Copy)]
pub struct Quirks {
    pub firmware_step: u8,
    pub accept_empty_name: bool,
    pub accept_zero_interval: bool,
    pub applies_refused_changes: bool,
    pub refusal_restores_factory: bool,
    pub latest_reply: &'static str,
    pub relapse_at_latest: bool,
    pub reboot_forgets_name: bool,
    pub lowercase_errors: bool,
    pub frozen_reading: bool,
    pub downtime: Duration,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            firmware_step: 1,
            accept_empty_name: false,
            accept_zero_interval: false,
            applies_refused_changes: false,
            refusal_restores_factory: false,
            latest_reply: LATEST_FIRMWARE_REPLY,
            relapse_at_latest: false,
            reboot_forgets_name: false,
            lowercase_errors: false,
            frozen_reading: false,
            downtime: Duration::from_millis(100),
        }
    }
}

#[derive(Debug)]
pub struct Device {
    pub name: String,
    pub firmware_version: u8,
    pub reading_interval: i64,
    pub readings: u64,
    pub calls: Vec<String>,
    offline_until: Option<Instant>,
    quirks: Quirks,
}

impl Device {
    fn factory(quirks: Quirks) -> Self {
        Self {
            name: FACTORY_NAME.to_string(),
            firmware_version: FACTORY_FIRMWARE,
            reading_interval: FACTORY_INTERVAL,
            readings: 0,
            calls: Vec::new(),
            offline_until: None,
            quirks,
        }
    }

    fn is_offline(&self) -> bool {
        self.offline_until.is_some_and(|t| Instant::now() < t)
    }

    fn go_offline(&mut self) {
        self.offline_until = Some(Instant::now() + self.quirks.downtime);
    }

    fn error(&self, id: Value, kind: RpcErrorKind) -> Value {
        let message = if self.quirks.lowercase_errors {
            kind.message().to_lowercase()
        } else {
            kind.message().to_string()
        };
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": kind.code(), "message": message}
        })
    }

    // Replies -32000 but may still touch the settings, depending on quirks.
    fn refuse(&mut self) -> RpcErrorKind {
        if self.quirks.refusal_restores_factory {
            self.name = FACTORY_NAME.to_string();
            self.reading_interval = FACTORY_INTERVAL;
        }
        RpcErrorKind::MethodExecution
    }

    fn handle(&mut self, body: &str) -> Value {
        let Ok(req) = serde_json::from_str::<Value>(body) else {
            return self.error(Value::Null, RpcErrorKind::Parse);
        };
        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let valid_id = id.as_i64().is_some_and(|i| i != 0);
        if req.get("jsonrpc") != Some(&json!("2.0")) || !valid_id {
            return self.error(id, RpcErrorKind::InvalidRequest);
        }
        let Some(method) = req.get("method").and_then(Value::as_str) else {
            return self.error(id, RpcErrorKind::InvalidRequest);
        };
        let Ok(method) = method.parse::<SensorMethod>() else {
            return self.error(id, RpcErrorKind::MethodNotFound);
        };
        self.calls.push(method.to_string());

        let params = req.get("params").cloned().unwrap_or_else(|| json!({}));
        match self.execute(method, &params) {
            Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
            Err(kind) => self.error(id, kind),
        }
    }

    fn execute(&mut self, method: SensorMethod, params: &Value) -> Result<Value, RpcErrorKind> {
        let params = params.as_object().ok_or(RpcErrorKind::InvalidParams)?;
        let allowed: &[&str] = match method {
            SensorMethod::SetName => &["name"],
            SensorMethod::SetReadingInterval => &["interval"],
            _ => &[],
        };
        if params.keys().any(|k| !allowed.contains(&k.as_str())) {
            return Err(RpcErrorKind::InvalidParams);
        }

        match method {
            SensorMethod::GetInfo => Ok(json!({
                "name": self.name,
                "hid": "f0e1d2c3",
                "model": "T-1000",
                "firmware_version": self.firmware_version,
                "reading_interval": self.reading_interval,
            })),
            SensorMethod::GetReading => {
                if !self.quirks.frozen_reading {
                    self.readings += 1;
                }
                Ok(json!(21.0 + self.readings as f64 * 0.25))
            }
            SensorMethod::SetName => {
                let name = params
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or(RpcErrorKind::InvalidParams)?;
                if name.is_empty() && !self.quirks.accept_empty_name {
                    if self.quirks.applies_refused_changes {
                        self.name = name.to_string();
                    }
                    return Err(self.refuse());
                }
                self.name = name.to_string();
                Ok(json!("ok"))
            }
            SensorMethod::GetMethods => Ok(json!(SensorMethod::ALL.map(|m| m.as_str()))),
            SensorMethod::SetReadingInterval => {
                let interval = params
                    .get("interval")
                    .and_then(Value::as_i64)
                    .ok_or(RpcErrorKind::InvalidParams)?;
                if interval < 1 && !self.quirks.accept_zero_interval {
                    if self.quirks.applies_refused_changes {
                        self.reading_interval = interval;
                    }
                    return Err(self.refuse());
                }
                self.reading_interval = interval;
                Ok(json!("ok"))
            }
            SensorMethod::ResetToFactory => {
                let calls = std::mem::take(&mut self.calls);
                *self = Device::factory(self.quirks);
                self.calls = calls;
                self.go_offline();
                Ok(json!("resetting"))
            }
            SensorMethod::UpdateFirmware => {
                if self.firmware_version >= MAX_FIRMWARE_VERSION {
                    if self.quirks.relapse_at_latest {
                        self.firmware_version = MAX_FIRMWARE_VERSION - 1;
                    }
                    return Ok(json!(self.quirks.latest_reply));
                }
                self.firmware_version =
                    (self.firmware_version + self.quirks.firmware_step).min(MAX_FIRMWARE_VERSION);
                self.go_offline();
                Ok(json!("updating"))
            }
            SensorMethod::Reboot => {
                if self.quirks.reboot_forgets_name {
                    self.name = FACTORY_NAME.to_string();
                }
                self.go_offline();
                Ok(json!(REBOOT_REPLY))
            }
        }
    }
}

#[derive(Clone)]
pub struct FakeSensor {
    pub device: Arc<Mutex<Device>>,
    pub port: u16,
}

impl FakeSensor {
    pub async fn start(quirks: Quirks) -> Self {
        let device = Arc::new(Mutex::new(Device::factory(quirks)));
        let app = Router::new()
            .route("/rpc", post(rpc))
            .with_state(device.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        Self { device, port }
    }

    pub fn client(&self, pin: &str) -> SensorClient {
        SensorClient::new("http://127.0.0.1", self.port, pin, Duration::from_secs(5)).unwrap()
    }

    pub fn with_device<T>(&self, f: impl FnOnce(&mut Device) -> T) -> T {
        f(&mut self.device.lock().unwrap())
    }
}

async fn rpc(
    State(device): State<Arc<Mutex<Device>>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    respond(&device, &headers, &body)
}

fn respond(device: &Mutex<Device>, headers: &HeaderMap, body: &str) -> Response {
    let mut device = device.lock().unwrap();
    if device.is_offline() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let pin = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    if pin != Some(PIN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(device.handle(body)).into_response()
}

/// Short waits so a full session stays fast against the fake.
pub fn fast_settings() -> SuiteSettings {
    let policy = WaitPolicy::new(40, Duration::from_millis(25));
    SuiteSettings {
        waits: Waits {
            reset: policy,
            reboot: policy,
            firmware: policy,
            reading: WaitPolicy::new(2, Duration::from_millis(25)),
        },
        ..SuiteSettings::default()
    }
}
