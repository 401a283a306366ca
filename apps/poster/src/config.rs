use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "dwitter.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub user: Option<String>,
    pub page_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000/".into(),
            user: None,
            page_url: None,
        }
    }
}

pub fn load_settings(config_path: &Path) -> Settings {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

fn load_settings_with(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("server_url") {
                settings.server_url = v.clone();
            }
            if let Some(v) = file_cfg.get("user") {
                settings.user = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("page_url") {
                settings.page_url = Some(v.clone());
            }
        }
    }

    if let Some(v) = env("DWITTER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("DWITTER_USER") {
        settings.user = Some(v);
    }
    if let Some(v) = env("APP__USER") {
        settings.user = Some(v);
    }

    if let Some(v) = env("DWITTER_PAGE_URL") {
        settings.page_url = Some(v);
    }
    if let Some(v) = env("APP__PAGE_URL") {
        settings.page_url = Some(v);
    }

    settings
}

/// Parses the server URL and the page to reload, which defaults to the
/// server root.
pub fn resolve_urls(settings: &Settings) -> anyhow::Result<(Url, Url)> {
    let server_url = Url::parse(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    let page_url = match &settings.page_url {
        Some(raw) => server_url
            .join(raw)
            .with_context(|| format!("invalid page url '{raw}'"))?,
        None => server_url.join("/")?,
    };
    Ok((server_url, page_url))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
