use std::env;
use std::fs;
use std::path::Path;

use fitfinder_core::config::{resolve_config_path, AppConfig, LoadOptions};
use secrecy::ExposeSecret;
use toml::Value;

pub fn run(options: &LoadOptions) -> String {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let overrides = &options.overrides;
    let source = |key_path: &str, flag: Option<&str>, env_keys: &[&str]| {
        field_source(
            key_path,
            flag,
            env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        )
    };

    let api_key = config
        .llm
        .api_key
        .as_ref()
        .map(|key| redact_key(key.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());
    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<embedded>".to_string());

    let provider_flag = overrides.llm_provider.is_some().then_some("--provider");
    let model_flag = overrides.llm_model.is_some().then_some("--model");
    let catalog_flag = overrides.catalog_path.is_some().then_some("--catalog");
    let precedence_flag = overrides.precedence.is_some().then_some("--precedence");
    let log_level_flag = overrides.log_level.is_some().then_some("--log-level");

    let entries = [
        (
            "llm.provider",
            config.llm.provider.as_str().to_string(),
            source("llm.provider", provider_flag, &["FITFINDER_LLM_PROVIDER"]),
        ),
        (
            "llm.api_key",
            api_key,
            source("llm.api_key", None, &["FITFINDER_LLM_API_KEY", "OPENAI_API_KEY"]),
        ),
        (
            "llm.base_url",
            config.llm.endpoint().to_string(),
            source("llm.base_url", None, &["FITFINDER_LLM_BASE_URL"]),
        ),
        (
            "llm.model",
            config.llm.model.clone(),
            source("llm.model", model_flag, &["FITFINDER_LLM_MODEL"]),
        ),
        (
            "llm.temperature",
            config.llm.temperature.to_string(),
            source("llm.temperature", None, &["FITFINDER_LLM_TEMPERATURE"]),
        ),
        (
            "llm.timeout_secs",
            config.llm.timeout_secs.to_string(),
            source("llm.timeout_secs", None, &["FITFINDER_LLM_TIMEOUT_SECS"]),
        ),
        (
            "catalog.path",
            catalog_path,
            source("catalog.path", catalog_flag, &["FITFINDER_CATALOG_PATH"]),
        ),
        (
            "recommendation.precedence",
            config.recommendation.precedence.as_str().to_string(),
            source(
                "recommendation.precedence",
                precedence_flag,
                &["FITFINDER_RECOMMENDATION_PRECEDENCE"],
            ),
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            source(
                "logging.level",
                log_level_flag,
                &["FITFINDER_LOGGING_LEVEL", "FITFINDER_LOG_LEVEL"],
            ),
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format).to_ascii_lowercase(),
            source("logging.format", None, &["FITFINDER_LOGGING_FORMAT", "FITFINDER_LOG_FORMAT"]),
        ),
    ];

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];
    lines.extend(entries.iter().map(|(key, value, source)| render_line(key, value, source)));
    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    flag: Option<&str>,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(flag) = flag {
        return format!("flag ({flag})");
    }

    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if config_file_doc.is_some_and(|doc| contains_path(doc, key_path)) {
        let file_path = config_file_path
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "config file".to_string());
        return format!("file ({file_path})");
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: &str) -> String {
    format!("- {key} = {value} (source: {source})")
}

/// Keeps the `sk-` style prefix so the key kind stays recognizable.
fn redact_key(key: &str) -> String {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Some((prefix, _)) = trimmed.split_once('-') {
        return format!("{prefix}-***");
    }

    "<redacted>".to_string()
}
