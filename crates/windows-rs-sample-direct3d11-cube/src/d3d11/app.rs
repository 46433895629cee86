use super::device::DeviceContext;
use super::message_pump::Win32MessagePump;
use super::pipeline::PipelineResources;
use super::renderer::Renderer;
use super::targets::FrameTargets;
use super::window::show_alert;
use super::window::TemplateWindow;
use super::window::WindowHost;
use crate::clock::SystemClock;
use crate::config::TemplateConfig;
use crate::error::DuringStartup;
use crate::error::StartupFailure;
use crate::error::StartupStage;
use crate::frame_loop::FrameLoop;
use crate::startup::launch;
use tracing::info;

/// Opens the window, brings up Direct3D, loads the cube and runs the frame
/// loop until the window is closed. Returns the process exit code.
pub fn run_template(config: &TemplateConfig) -> i32 {
    launch(
        || WindowHost::create::<TemplateWindow>(config),
        |window| start(window, config),
        |text| show_alert(text, "Error"),
        |_window, mut renderer| {
            let exit_code = FrameLoop::new(Win32MessagePump, SystemClock).run(&mut renderer);
            renderer.shutdown();
            info!("Exiting with code {}", exit_code);
            exit_code
        },
    )
}

fn start(window: &WindowHost, config: &TemplateConfig) -> Result<Renderer, StartupFailure> {
    let graphics = DeviceContext::create(window, config.vsync).during(StartupStage::Graphics)?;
    let targets = FrameTargets::create(&graphics).during(StartupStage::Graphics)?;

    let mut pipeline = PipelineResources::new();
    pipeline
        .load(&graphics, config.shader_source)
        .inspect_err(|_| pipeline.unload())
        .during(StartupStage::Content)?;

    Ok(Renderer::new(graphics, targets, pipeline, config.clear_color))
}
