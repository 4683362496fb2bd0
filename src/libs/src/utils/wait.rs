use std::{fmt::Display, future::Future, time::Duration};

use log::{debug, trace};
use serde::Deserialize;
use tokio::time::sleep;

use super::config::humantime_duration;

/// Fixed attempt budget and fixed delay between attempts.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub tries: u32,
    #[serde(deserialize_with = "humantime_duration")]
    pub delay: Duration,
}

impl WaitPolicy {
    pub const fn new(tries: u32, delay: Duration) -> Self {
        Self { tries, delay }
    }

    pub const fn secs(tries: u32, delay_secs: u64) -> Self {
        Self::new(tries, Duration::from_secs(delay_secs))
    }

    pub async fn wait<T, E, F, Fut, P>(&self, operation: F, condition: P) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnMut(&T) -> bool,
        E: Display,
    {
        wait_until(operation, condition, self.tries, self.delay).await
    }
}

/// Calls `operation` until `condition` holds on its output, at most `tries` times.
///
/// An `Err` from the operation counts as a failed attempt, same as a result
/// rejected by `condition`. `delay` is slept between attempts, not after the
/// last one. Returns `None` once the budget is spent.
pub async fn wait_until<T, E, F, Fut, P>(
    mut operation: F,
    mut condition: P,
    tries: u32,
    delay: Duration,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
    E: Display,
{
    for attempt in 1..=tries {
        match operation().await {
            Ok(result) if condition(&result) => {
                trace!("ready after {}/{} attempts", attempt, tries);
                return Some(result);
            }
            Ok(_) => debug!("attempt {}/{}: condition not met", attempt, tries),
            Err(error) => debug!("attempt {}/{}: not ready: {}", attempt, tries, error),
        }
        if attempt < tries {
            sleep(delay).await;
        }
    }
    None
}
