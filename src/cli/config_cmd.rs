//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{LauncherConfig, WindowConfig};
use crate::domain::error::ConfigError;
use crate::domain::launcher::SurfaceBackend;
use crate::domain::schedule::PollInterval;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value.to_string());

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    presenter.output(get_value(&config, key).unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, get_value(&config, key).unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn set_value(config: &mut LauncherConfig, key: &str, value: String) {
    match key {
        "marker" => config.marker = Some(value),
        "poll_interval" => config.poll_interval = Some(value),
        "backend" => config.backend = Some(value),
        _ => {
            let window = config.window.get_or_insert_with(WindowConfig::default);
            match key {
                "window.title" => window.title = Some(value),
                "window.caption" => window.caption = Some(value),
                "window.font" => window.font = Some(value),
                _ => unreachable!(), // Already validated
            }
        }
    }
}

fn get_value<'a>(config: &'a LauncherConfig, key: &str) -> Option<&'a str> {
    let window = config.window.as_ref();
    match key {
        "marker" => config.marker.as_deref(),
        "poll_interval" => config.poll_interval.as_deref(),
        "backend" => config.backend.as_deref(),
        "window.title" => window.and_then(|w| w.title.as_deref()),
        "window.caption" => window.and_then(|w| w.caption.as_deref()),
        "window.font" => window.and_then(|w| w.font.as_deref()),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "poll_interval" => {
            value
                .parse::<PollInterval>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "backend" => {
            value
                .parse::<SurfaceBackend>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "marker" | "window.font" => {
            if value.trim().is_empty() {
                return Err(invalid("Path must not be empty".to_string()));
            }
        }
        _ => {} // window text accepts any string
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, XdgConfigStore) {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        (dir, store)
    }

    #[test]
    fn validate_poll_interval_valid() {
        assert!(validate_config_value("poll_interval", "100ms").is_ok());
        assert!(validate_config_value("poll_interval", "1s500ms").is_ok());
    }

    #[test]
    fn validate_poll_interval_invalid() {
        assert!(validate_config_value("poll_interval", "fast").is_err());
        assert!(validate_config_value("poll_interval", "0ms").is_err());
    }

    #[test]
    fn validate_backend() {
        assert!(validate_config_value("backend", "terminal").is_ok());
        assert!(validate_config_value("backend", "layer-shell").is_ok());
        assert!(validate_config_value("backend", "window").is_ok());
        assert!(validate_config_value("backend", "x11").is_err());
    }

    #[test]
    fn validate_marker_rejects_blank() {
        assert!(validate_config_value("marker", "  ").is_err());
        assert!(validate_config_value("marker", "/opt/game/.ready").is_ok());
    }

    #[test]
    fn set_then_get_window_key() {
        let mut config = LauncherConfig::empty();
        set_value(&mut config, "window.caption", "Almost there".to_string());
        assert_eq!(get_value(&config, "window.caption"), Some("Almost there"));
        assert_eq!(get_value(&config, "window.title"), None);
    }

    #[tokio::test]
    async fn set_persists_value() {
        let (_dir, store) = temp_store();
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "poll_interval".to_string(),
                value: "250ms".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.poll_interval.as_deref(), Some("250ms"));
    }

    #[tokio::test]
    async fn set_rejects_unknown_key() {
        let (_dir, store) = temp_store();
        let result = handle_config_command(
            ConfigAction::Set {
                key: "window.width".to_string(),
                value: "300".to_string(),
            },
            &store,
            &Presenter::new(),
        )
        .await;

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
        assert!(!store.exists());
    }
}
