#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use sample_direct3d11_cube::config::TemplateConfig;
use sample_direct3d11_cube::error::MyResult;
use tracing::info;
use tracing::Level;

/// Only installing the report handler can fail here. The template's own exit
/// code, including -1 for a failed startup, leaves through `process::exit`.
fn main() -> MyResult<()> {
    color_eyre::install()?;
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_max_level(max_level)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .init();

    let config = TemplateConfig::default();
    info!("Starting {}", config.title);
    std::process::exit(run(&config))
}

#[cfg(windows)]
fn run(config: &TemplateConfig) -> i32 {
    sample_direct3d11_cube::d3d11::app::run_template(config)
}

#[cfg(not(windows))]
fn run(_config: &TemplateConfig) -> i32 {
    tracing::error!("Direct3D 11 is only available on Windows");
    sample_direct3d11_cube::error::STARTUP_FAILURE_EXIT_CODE
}
