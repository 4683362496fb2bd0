use std::path::PathBuf;

use call::CallCmd;
use check::CheckCmd;
use clap::{Parser, Subcommand};
use conformance::SuiteError;
use device::{SetIntervalCmd, SetNameCmd};
use libs::{
    clients::{ClientError, SensorClient},
    utils::{cli::CliError, config::FileFormat, setup_config, setup_logger},
};
use log::debug;
use settings::Settings;
use thiserror::Error as ThisError;

pub mod call;
pub mod check;
pub mod device;
pub mod settings;

const APP_NAME: &str = "sensorctl";

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config_sys::ConfigError),
    #[error("logger error: {0}")]
    Logger(#[from] fern::InitError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error(transparent)]
    Suite(#[from] SuiteError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} check(s) failed")]
    ChecksFailed(usize),
    #[error("interrupted")]
    Interrupted,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sensor host, scheme included [default: http://127.0.0.1]
    #[arg(long, value_name = "HOST")]
    sensor_host: Option<String>,

    /// Sensor port [default: 9898]
    #[arg(long, value_name = "PORT")]
    sensor_port: Option<u16>,

    /// Sensor pin sent as the Authorization header [default: 0000]
    #[arg(long, value_name = "PIN")]
    sensor_pin: Option<String>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: SensorCmds,
}

#[derive(Subcommand)]
enum SensorCmds {
    /// print device info
    Info,
    /// print the current reading
    Reading,
    /// list the methods the device exposes
    Methods,
    /// rename the device
    SetName(SetNameCmd),
    /// change the reading interval
    SetInterval(SetIntervalCmd),
    /// reset the device to factory settings
    Reset,
    /// request a firmware update
    UpdateFirmware,
    /// reboot the device
    Reboot,
    /// send a raw json-rpc request and print the envelope
    Call(CallCmd),
    /// run the conformance checks
    Check(CheckCmd),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    // Init config & logger
    let mut settings: Settings = setup_config(APP_NAME, FileFormat::YAML, cli.config.as_deref())?;
    settings.override_sensor(
        cli.sensor_host.as_deref(),
        cli.sensor_port,
        cli.sensor_pin.as_deref(),
    );
    setup_logger(settings.log_level(cli.debug))?;
    debug!("{:?}", settings);

    let client = SensorClient::new(
        &settings.sensor.host,
        settings.sensor.port,
        &settings.sensor.pin,
        settings.sensor.timeout,
    )?;
    debug!("sensor endpoint {}", client.url());

    match &cli.command {
        SensorCmds::Info => device::run_info_cmd(&client).await,
        SensorCmds::Reading => device::run_reading_cmd(&client).await,
        SensorCmds::Methods => device::run_methods_cmd(&client).await,
        SensorCmds::SetName(cmd) => device::run_set_name_cmd(cmd, &client).await,
        SensorCmds::SetInterval(cmd) => device::run_set_interval_cmd(cmd, &client).await,
        SensorCmds::Reset => device::run_reset_cmd(&client).await,
        SensorCmds::UpdateFirmware => device::run_update_firmware_cmd(&client).await,
        SensorCmds::Reboot => device::run_reboot_cmd(&client).await,
        SensorCmds::Call(cmd) => call::run_call_cmd(cmd, &client).await,
        SensorCmds::Check(cmd) => check::run_check_cmd(cmd, client, settings.suite).await,
    }
}
