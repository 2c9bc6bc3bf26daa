pub mod commands;

use clap::{Args, Parser, Subcommand};
use fitfinder_core::config::{AppConfig, ConfigOverrides, LlmProvider, LoadOptions, LogFormat};
use fitfinder_core::SizePrecedence;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "fitfinder",
    about = "FitFinder size advisor CLI",
    long_about = "Recommend a clothing size from a customer profile, brand sizing bias, and an AI stylist's explanation.",
    after_help = "Examples:\n  fitfinder profiles\n  fitfinder catalog --brand \"Old Navy\"\n  fitfinder recommend --profile Jason --brand \"Banana Republic\" --product \"Heritage Oxford Shirt\"\n  fitfinder doctor --json"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Flags that sit above env vars and the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, value_name = "PATH", help = "Config file to load (must exist)")]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Dataset TOML to use instead of the embedded one"
    )]
    pub catalog: Option<PathBuf>,
    #[arg(long, global = true, help = "Size precedence policy (model|resolver_fallback)")]
    pub precedence: Option<SizePrecedence>,
    #[arg(long, global = true, help = "LLM provider (openai|ollama)")]
    pub provider: Option<LlmProvider>,
    #[arg(long, global = true, help = "LLM model name")]
    pub model: Option<String>,
    #[arg(long, global = true, help = "Log level (trace|debug|info|warn|error)")]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                log_level: self.log_level.clone(),
                llm_provider: self.provider,
                llm_model: self.model.clone(),
                catalog_path: self.catalog.clone(),
                precedence: self.precedence,
            },
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Recommend a size for one product and explain it")]
    Recommend(commands::recommend::RecommendArgs),
    #[command(about = "List catalog products, optionally for a single brand")]
    Catalog {
        #[arg(long, help = "Only list products sold by this brand")]
        brand: Option<String>,
    },
    #[command(about = "List customer profiles and the form values they pre-populate")]
    Profiles,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, dataset loading, and LLM credential readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.global.load_options();
    init_logging(&options);

    let result = match cli.command {
        Command::Recommend(args) => commands::recommend::run(&args, &options),
        Command::Catalog { brand } => commands::catalog::run(brand.as_deref(), &options),
        Command::Profiles => commands::profiles::run(&options),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(&options) }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(&options, json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so command output on stdout stays parseable. Config
/// errors are reported by the commands themselves, so a bad config only means
/// default logging here.
fn init_logging(options: &LoadOptions) {
    use tracing::Level;

    let config = AppConfig::load(options.clone()).unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
