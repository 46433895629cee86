pub type MyResult<T, E = eyre::Report> = core::result::Result<T, E>;

/// Process exit code for any failure before the frame loop starts.
pub const STARTUP_FAILURE_EXIT_CODE: i32 = -1;

/// The initialization step that failed. Each one gets its own alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupStage {
    Window,
    Graphics,
    Content,
}

impl StartupStage {
    pub fn alert_text(self) -> &'static str {
        match self {
            StartupStage::Window => "Failed to create application window.",
            StartupStage::Graphics => "Failed to create DirectX device and swap chain.",
            StartupStage::Content => "Failed to load content.",
        }
    }
}

pub struct StartupFailure {
    stage: StartupStage,
    inner: eyre::Report,
}

impl StartupFailure {
    pub fn stage(&self) -> StartupStage {
        self.stage
    }

    pub fn exit_code(&self) -> i32 {
        STARTUP_FAILURE_EXIT_CODE
    }
}

impl std::fmt::Display for StartupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.stage.alert_text(), self.inner)
    }
}

impl std::fmt::Debug for StartupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} stage: {:?}", self.stage, self.inner)
    }
}

/// Tags an initialization result with the stage it belongs to.
pub trait DuringStartup<T> {
    fn during(self, stage: StartupStage) -> Result<T, StartupFailure>;
}

impl<T> DuringStartup<T> for MyResult<T> {
    fn during(self, stage: StartupStage) -> Result<T, StartupFailure> {
        self.map_err(|inner| StartupFailure { stage, inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_keep_their_stage_and_exit_with_minus_one() {
        let result: MyResult<()> = Err(eyre::eyre!("no shader blob"));
        let failure = result.during(StartupStage::Content).unwrap_err();
        assert_eq!(failure.stage(), StartupStage::Content);
        assert_eq!(failure.exit_code(), -1);
        assert!(failure.to_string().starts_with("Failed to load content."));
        assert!(failure.to_string().contains("no shader blob"));
    }

    #[test]
    fn successes_pass_through() {
        let result: MyResult<u32> = Ok(7);
        assert_eq!(result.during(StartupStage::Window).ok(), Some(7));
    }
}
