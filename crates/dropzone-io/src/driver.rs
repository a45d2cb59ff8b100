//! Browser timer loop for one simulated upload.
//!
//! Each accepted file gets its own Dioxus task running [`drive_upload`].
//! The task sleeps one tick interval, applies one progress reading to
//! the session signal, and repeats until the transfer finishes or the
//! file is deleted. Cancelling the task (on delete) stops the timer.

use std::time::Duration;

use dioxus::prelude::*;
use dropzone_core::{Completion, PreviewStore, ProgressSource, Session, TickOutcome, UploadTask};
use gloo_timers::future::TimeoutFuture;
use tracing::debug;

/// Tick `task` against `session` every `interval` until it completes.
///
/// Once the transfer reports 100% the driver yields to the event loop
/// before running the completion step, so the full progress bar can
/// render before the preview appears.
#[allow(clippy::future_not_send)]
pub async fn drive_upload<P, S>(
    mut session: Signal<Session<S>>,
    mut task: UploadTask<P>,
    interval: Duration,
) -> Completion
where
    P: ProgressSource,
    S: PreviewStore + 'static,
{
    let millis = interval_millis(interval);
    loop {
        TimeoutFuture::new(millis).await;
        let outcome = task.tick(&mut *session.write());
        match outcome {
            TickOutcome::InFlight(progress) => {
                debug!(id = %task.id(), %progress, "tick");
            }
            TickOutcome::Finished => break,
            TickOutcome::Orphaned => {
                debug!(id = %task.id(), "upload abandoned");
                return Completion::Orphaned;
            }
        }
    }

    TimeoutFuture::new(0).await;
    let id = task.id();
    let completion = task.complete(&mut *session.write());
    debug!(%id, ?completion, "upload finished");
    completion
}

/// Timer delay in whole milliseconds, saturating at `u32::MAX`.
fn interval_millis(interval: Duration) -> u32 {
    u32::try_from(interval.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_in_millis() {
        assert_eq!(interval_millis(Duration::from_millis(200)), 200);
    }

    #[test]
    fn huge_interval_saturates() {
        assert_eq!(interval_millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }
}
