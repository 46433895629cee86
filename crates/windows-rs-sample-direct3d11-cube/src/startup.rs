use crate::error::DuringStartup;
use crate::error::MyResult;
use crate::error::StartupFailure;
use crate::error::StartupStage;
use tracing::error;

/// Creates the window, starts everything that depends on it and hands both
/// to `run`. Returns the process exit code.
///
/// The window stays alive until the failure alert has been dismissed.
/// Destroying it first would post the quit message, and the alert's modal
/// loop would close the moment it saw it.
pub fn launch<W, R>(
    create_window: impl FnOnce() -> MyResult<W>,
    start: impl FnOnce(&W) -> Result<R, StartupFailure>,
    alert: impl FnOnce(&str),
    run: impl FnOnce(&W, R) -> i32,
) -> i32 {
    let window = match create_window().during(StartupStage::Window) {
        Ok(window) => window,
        Err(failure) => return report(failure, alert),
    };

    match start(&window) {
        Ok(started) => run(&window, started),
        Err(failure) => report(failure, alert),
    }
}

fn report(failure: StartupFailure, alert: impl FnOnce(&str)) -> i32 {
    error!("Startup failed: {:?}", failure);
    alert(failure.stage().alert_text());
    failure.exit_code()
}
