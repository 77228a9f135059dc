//! Hypercube - N-dimensional wireframe viewer
//!
//! Headless driver: loads the configuration, runs the configured script
//! through a session and reports what would have been drawn.

use std::process::ExitCode;

use hypercube::config::AppConfig;
use hypercube::systems::{HeadlessRenderer, ScriptRunner};
use hypercube_core::Session;

fn main() -> ExitCode {
    // Logging comes up before config so a bad file can be reported
    let loaded = AppConfig::load();
    let level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Starting hypercube");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let (width, height) = match config.settings.view_size() {
        Ok(size) => size,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut session = match Session::new(config.settings.clone()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut renderer = HeadlessRenderer::new(width, height).with_frame_logging(config.debug.log_frames);

    log::info!(
        "{}-D wireframe: {} nodes, {} edges, {} faces",
        config.settings.dims,
        session.viewer().wireframe().nodes().len(),
        session.viewer().wireframe().edges().len(),
        session.viewer().wireframe().faces().len()
    );

    let runner = ScriptRunner::new(&config.demo);
    match runner.run(&mut session, &mut renderer) {
        Ok(summary) => {
            let stats = renderer.stats();
            log::info!(
                "Executed {} actions, replayed {}, {} in the log",
                summary.executed,
                summary.replayed,
                summary.logged
            );
            log::info!(
                "{} frames: {} lines, {} polygons, {} circles, {} labels, {} points off screen",
                stats.frames,
                stats.lines,
                stats.polygons,
                stats.circles,
                stats.labels,
                stats.off_screen
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Script failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
