use super::{load_settings_with, resolve_urls, Settings, DEFAULT_CONFIG_FILE};

use std::{
    env, fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_yields_defaults() {
    let settings = load_settings_with(Path::new("./does-not-exist/dwitter.toml"), no_env);
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_are_overridden_by_environment() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("dwitter_poster_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let config_path = temp_root.join(DEFAULT_CONFIG_FILE);
    fs::write(
        &config_path,
        "server_url = \"http://file.test/\"\nuser = \"alice\"\npage_url = \"/tweets/alice\"\n",
    )
    .expect("write config");

    let settings = load_settings_with(&config_path, |key| match key {
        "APP__USER" => Some("bob".to_string()),
        _ => None,
    });

    assert_eq!(settings.server_url, "http://file.test/");
    assert_eq!(settings.user.as_deref(), Some("bob"));
    assert_eq!(settings.page_url.as_deref(), Some("/tweets/alice"));

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn app_prefixed_variable_wins_over_dwitter_prefix() {
    let settings = load_settings_with(Path::new("./does-not-exist/dwitter.toml"), |key| {
        match key {
            "DWITTER_SERVER_URL" => Some("http://one.test/".to_string()),
            "APP__SERVER_URL" => Some("http://two.test/".to_string()),
            _ => None,
        }
    });
    assert_eq!(settings.server_url, "http://two.test/");
}

#[test]
fn page_url_defaults_to_server_root() {
    let settings = Settings {
        server_url: "http://dwitter.test/app/".into(),
        ..Settings::default()
    };
    let (server_url, page_url) = resolve_urls(&settings).expect("urls");
    assert_eq!(server_url.as_str(), "http://dwitter.test/app/");
    assert_eq!(page_url.as_str(), "http://dwitter.test/");
}

#[test]
fn relative_page_url_resolves_against_server() {
    let settings = Settings {
        page_url: Some("/tweets/alice".into()),
        ..Settings::default()
    };
    let (_, page_url) = resolve_urls(&settings).expect("urls");
    assert_eq!(page_url.as_str(), "http://127.0.0.1:8000/tweets/alice");
}

#[test]
fn invalid_server_url_is_reported() {
    let settings = Settings {
        server_url: "not a url".into(),
        ..Settings::default()
    };
    let err = resolve_urls(&settings).expect_err("should fail");
    assert!(err.to_string().contains("invalid server url"));
}
