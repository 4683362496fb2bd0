use clap::Args;
use conformance::{report::format_elapsed, Check, Report, Suite, SuiteSettings};
use libs::clients::SensorClient;
use log::warn;
use string_builder::Builder;

use crate::Error;

#[derive(Args)]
pub struct CheckCmd {
    /// checks to run, comma separated. If empty, run all of them.
    #[arg(long, value_enum, value_delimiter = ',')]
    only: Vec<Check>,

    /// don't reset the sensor to factory settings first
    #[arg(long)]
    skip_reset: bool,
}

impl CheckCmd {
    fn selection(&self) -> Vec<Check> {
        if self.only.is_empty() {
            return Check::ALL.to_vec();
        }
        Check::ordered(&self.only)
    }
}

pub async fn run_check_cmd(
    cmd: &CheckCmd,
    client: SensorClient,
    settings: SuiteSettings,
) -> Result<(), Error> {
    let suite = Suite::new(client, settings);
    let selection = cmd.selection();

    let report = tokio::select! {
        report = suite.run_session(&selection, !cmd.skip_reset) => report?,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, sensor may be left mid-check");
            return Err(Error::Interrupted);
        }
    };

    print!("{}", stringify_report(&report));

    let failed = report.failed().count();
    if failed > 0 {
        return Err(Error::ChecksFailed(failed));
    }
    Ok(())
}

fn stringify_report(report: &Report) -> String {
    let mut builder = Builder::default();
    for outcome in &report.outcomes {
        builder.append(format!(
            "{}  {:<26} {}\n",
            outcome.status(),
            outcome.check.name(),
            format_elapsed(outcome.elapsed)
        ));
        if let Err(e) = &outcome.result {
            builder.append(format!("      {}\n", e));
        }
    }
    builder.append(format!(
        "{}/{} passed in {}\n",
        report.passed(),
        report.outcomes.len(),
        format_elapsed(report.elapsed())
    ));

    builder.string().unwrap_or_default()
}
