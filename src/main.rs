use gpui::*;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod alert;
mod app;
mod config;
mod input;
mod notifications;
mod resources;
mod state;
mod theme;
mod timer;
mod topmost;
mod ui;

use alert::{AlertPlayer, RodioPlayer};
use app::{QuitApp, SmokeAlertApp};
use config::Config;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smoke_alert=info")),
        )
        .init();

    // Load configuration
    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Failed to load configuration: {:#}", e);
            warn!("Using default configuration...");
            Config::default()
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        error!("Please check your config file at: ~/.config/smoke-alert/config.toml");
        std::process::exit(1);
    }

    let sound_path = resources::alarm_sound_path(config.sound_file.as_deref());
    info!("Alarm sound: {}", sound_path.display());
    let player: Arc<dyn AlertPlayer> = Arc::new(RodioPlayer::new(sound_path, config.volume));

    Application::new().run(move |cx| {
        cx.bind_keys([
            KeyBinding::new("cmd-q", QuitApp, None),
        ]);

        // Pinning swaps windows, so only quit once none are left
        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();

        let options = app::window_options(None, config.start_pinned, cx);
        cx.open_window(options, |window, cx| {
            cx.new(|cx| SmokeAlertApp::new(config.clone(), player.clone(), window, cx))
        })
        .expect("Failed to open window");
    });
}
