use std::fmt;
use std::str::FromStr;

use dioxus::prelude::*;
use serde::Deserialize;

/// Which judge backend the problem pages talk to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeMode {
    /// Real REST endpoints under `judge_api_base_url`.
    Http,
    /// In-memory judge with an artificial delay.
    #[default]
    Simulated,
}

impl FromStr for JudgeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "simulated" | "mock" => Ok(Self::Simulated),
            other => Err(format!("unknown judge mode: {other}")),
        }
    }
}

impl fmt::Display for JudgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Simulated => f.write_str("simulated"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub judge_api_base_url: String,
    pub judge_mode: JudgeMode,
    pub simulated_delay_ms: u32,
    /// Identity used for judge requests while nobody is logged in.
    pub user_id: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            judge_api_base_url: "/api".to_string(),
            judge_mode: JudgeMode::Simulated,
            simulated_delay_ms: 800,
            user_id: "user123".to_string(),
        }
    }
}

pub fn use_runtime_config() -> Resource<Result<RuntimeConfig, String>> {
    use_resource(|| async move { fetch_runtime_config().await })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::debug!("config: {err}, trying bundled asset");
            fetch_config_from("/assets/config.json").await
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<RuntimeConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<RuntimeConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Builds the config from `JUDGE_*` variables, falling back to defaults for
/// anything unset.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn config_from_lookup<F>(lookup: F) -> Result<RuntimeConfig, String>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = RuntimeConfig::default();
    let judge_api_base_url = lookup("JUDGE_API_BASE_URL").unwrap_or(defaults.judge_api_base_url);
    let judge_mode = match lookup("JUDGE_MODE") {
        Some(value) => value.parse::<JudgeMode>()?,
        None => defaults.judge_mode,
    };
    let simulated_delay_ms = match lookup("JUDGE_SIMULATED_DELAY_MS") {
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|err| format!("invalid JUDGE_SIMULATED_DELAY_MS: {err}"))?,
        None => defaults.simulated_delay_ms,
    };
    let user_id = lookup("JUDGE_USER_ID").unwrap_or(defaults.user_id);
    Ok(RuntimeConfig {
        judge_api_base_url,
        judge_mode,
        simulated_delay_ms,
        user_id,
    })
}
