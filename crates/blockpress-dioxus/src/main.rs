use blockpress_config::Config;
use dioxus::prelude::*;
use std::env;

mod ui;

use ui::App;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("blockpress starting up");

    let api_url = resolve_api_url();
    log::info!("using API at {api_url}");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .launch(app_root);
}

/// API base URL: CLI argument wins, then the config file, then the
/// built-in localhost default.
fn resolve_api_url() -> String {
    let args: Vec<String> = env::args().collect();
    if args.len() == 2 {
        return args[1].trim_end_matches('/').to_string();
    }

    match Config::load() {
        Ok(Some(config)) => config.api_url,
        Ok(None) => Config::default().api_url,
        Err(e) => {
            log::warn!(
                "Failed to load config from {}: {e}; using default API URL",
                Config::config_path().display()
            );
            Config::default().api_url
        }
    }
}

fn app_root() -> Element {
    // Launch takes a plain fn, so the URL is re-resolved here with the
    // same precedence as in main.
    let api_url = resolve_api_url();
    rsx! {
        App { api_url }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("blockpress")
        .with_always_on_top(false);

    Config::default().with_window(window)
}
