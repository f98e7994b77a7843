//! Echoes desktop entry point.
//!
//! Opens a single window showing the Echoes web app with a hideable
//! refresh toolbar at the bottom. `RUST_LOG` controls log output.

use anyhow::Result;

use echoes_app::shell;
use echoes_types::config::HostConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = HostConfig::default();
    log::info!(
        "Starting Echoes ({}x{}) at {}",
        config.window_width,
        config.window_height,
        config.origin,
    );

    shell::run(config)
}
