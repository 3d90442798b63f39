use std::process::ExitCode;

use anyhow::{Context, Result};
use fbgl_engine::core::install_interrupt_handler;
use fbgl_engine::device::ContextInit;
use fbgl_engine::logging::{init_logging, LoggingConfig};
use fbgl_engine::{FailureClass, RunSummary};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(summary) => {
            log::info!(
                "stopped after {} frames ({}x{}, EGL {}.{})",
                summary.frames,
                summary.geometry.width,
                summary.geometry.height,
                summary.egl_version.0,
                summary.egl_version.1,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let class = err
                .downcast_ref::<fbgl_engine::Error>()
                .map_or(FailureClass::Platform, fbgl_engine::Error::class);

            if class == FailureClass::DeviceUnavailable {
                log::warn!("{err:#}");
            } else {
                log::error!("{err:#}");
            }
            ExitCode::from(class.exit_status())
        }
    }
}

fn run() -> Result<RunSummary> {
    let keep_running = install_interrupt_handler()?;
    let init = ContextInit::default();

    fbgl_engine::run(&init, keep_running)
        .with_context(|| format!("fullscreen quad on {}", init.device_path.display()))
}
