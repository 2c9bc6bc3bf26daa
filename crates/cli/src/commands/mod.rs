pub mod catalog;
pub mod config;
pub mod doctor;
pub mod profiles;
pub mod recommend;

use fitfinder_core::config::{AppConfig, LoadOptions};
use fitfinder_core::{ApplicationError, Dataset, DatasetSource};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn json(command: &str, payload: &impl Serialize) -> Self {
        match serde_json::to_string_pretty(payload) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failure(command, "serialization", error.to_string(), 1),
        }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        Self::failure(command, error.error_class(), error.to_string(), error.exit_code())
    }
}

/// Config plus the dataset it points at; the common preamble of every
/// data-reading command.
pub(crate) fn load_context(
    command: &str,
    options: &LoadOptions,
) -> Result<(AppConfig, Dataset), CommandResult> {
    let config = AppConfig::load(options.clone()).map_err(|error| {
        CommandResult::from_error(command, &ApplicationError::Configuration(error.to_string()))
    })?;

    let source = DatasetSource::from_path(config.catalog.path.as_deref());
    let dataset = Dataset::load(&source)
        .map_err(|error| CommandResult::from_error(command, &ApplicationError::from(error)))?;

    Ok((config, dataset))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
