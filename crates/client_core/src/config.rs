use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use shared::protocol::PREDICT_PATH;
use url::Url;

/// Hosted backend used when neither the build nor the deployment names one.
pub const HOSTED_BACKEND_URL: &str = "https://ml-genre-predictor-backend.onrender.com";

pub const SETTINGS_FILE: &str = "predictor.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: option_env!("GENRE_PREDICTOR_BACKEND_URL")
                .unwrap_or(HOSTED_BACKEND_URL)
                .to_string(),
        }
    }
}

impl Settings {
    pub fn predict_endpoint(&self) -> anyhow::Result<Url> {
        predict_endpoint(&self.backend_url)
    }
}

/// Compiled default, then `predictor.toml` in the working directory, then
/// the environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    settings_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(settings_file) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("backend_url") {
                    settings.backend_url = v.clone();
                }
            }
            Err(error) => tracing::warn!(
                path = %settings_file.display(),
                %error,
                "ignoring unreadable settings file"
            ),
        }
    }

    if let Some(v) = env("PREDICTOR_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    settings
}

/// Joins the backend base URL with the prediction path.
pub fn predict_endpoint(base_url: &str) -> anyhow::Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    if base.is_empty() {
        anyhow::bail!("backend url is empty");
    }

    let endpoint = format!("{base}{PREDICT_PATH}");
    let url = Url::parse(&endpoint)
        .with_context(|| format!("invalid backend url '{base_url}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("backend url '{base_url}' must use http or https");
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
