use std::time::Instant;

use libs::{clients::SensorClient, utils::WaitPolicy};
use log::{error, info};
use x::sensor::SensorInfo;

use crate::{
    check::Check,
    checks,
    error::{CheckError, SuiteError},
    report::{format_elapsed, Outcome, Report},
    settings::SuiteSettings,
};

/// Runs checks one after another against a single sensor.
#[derive(Debug, Clone)]
pub struct Suite {
    pub(crate) client: SensorClient,
    pub(crate) settings: SuiteSettings,
}

impl Suite {
    pub fn new(client: SensorClient, settings: SuiteSettings) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &SensorClient {
        &self.client
    }

    pub fn settings(&self) -> &SuiteSettings {
        &self.settings
    }

    /// Puts the sensor back to factory settings and waits until it answers again.
    pub async fn setup(&self) -> Result<SensorInfo, SuiteError> {
        info!("Resetting sensor to factory settings before test session");
        self.client
            .reset_to_factory()
            .await
            .map_err(|e| SuiteError::Setup(e.into()))?;
        self.wait_for_info(self.settings.waits.reset, "factory reset")
            .await
            .map_err(SuiteError::Setup)
    }

    /// Optional factory reset, then every selected check in run order.
    pub async fn run_session(&self, selection: &[Check], reset: bool) -> Result<Report, SuiteError> {
        if reset {
            let info = self.setup().await?;
            info!("sensor back online: {:?}", info);
        }
        Ok(self.run_all(&Check::ordered(selection)).await)
    }

    pub async fn run_all(&self, checks: &[Check]) -> Report {
        let mut report = Report::default();
        for check in checks {
            report.push(self.run(*check).await);
        }
        info!("{}/{} checks passed", report.passed(), report.outcomes.len());
        report
    }

    pub async fn run(&self, check: Check) -> Outcome {
        info!("running <{}>", check);
        let start = Instant::now();
        let result = match check {
            Check::Sanity => checks::device::sanity(self).await,
            Check::SetName => checks::device::set_name(self).await,
            Check::EmptyName => checks::device::empty_name(self).await,
            Check::SetReadingInterval => checks::device::set_reading_interval(self).await,
            Check::InvalidReadingInterval => checks::device::invalid_reading_interval(self).await,
            Check::GetMethods => checks::device::get_methods(self).await,
            Check::Reboot => checks::device::reboot(self).await,
            Check::UpdateFirmware => checks::firmware::update_firmware(self).await,
            Check::ParseError => checks::protocol::parse_error(self).await,
            Check::InvalidRequest => checks::protocol::invalid_request(self).await,
            Check::MethodNotFound => checks::protocol::method_not_found(self).await,
            Check::InvalidParams => checks::protocol::invalid_params(self).await,
        };
        let elapsed = start.elapsed();
        match &result {
            Ok(()) => info!("<{}> passed in {}", check, format_elapsed(elapsed)),
            Err(e) => error!("<{}> failed: {}", check, e),
        }
        Outcome {
            check,
            result,
            elapsed,
        }
    }

    pub(crate) async fn wait_for_info(
        &self,
        policy: WaitPolicy,
        what: &'static str,
    ) -> Result<SensorInfo, CheckError> {
        policy
            .wait(|| self.client.get_info(), |_| true)
            .await
            .ok_or(CheckError::Timeout {
                what,
                tries: policy.tries,
            })
    }
}
