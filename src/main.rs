//! Command-line front end: loads `.l10n.json`, switches language and prints
//! translations.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use l10n_service::LocalizationService;
use l10n_service::config::ConfigManager;
use l10n_service::translation::Args;
use l10n_service::types::{
    LanguageTag,
    Locale,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// How long to wait for providers before giving up.
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(name = "l10n")]
#[command(version)]
#[command(about = "Translate keys with the providers configured in .l10n.json")]
struct Cli {
    /// Keys to translate
    #[arg(value_name = "KEY")]
    keys: Vec<String>,

    /// Language to load (defaults to the configured default locale)
    #[arg(short, long)]
    language: Option<String>,

    /// Directory containing .l10n.json
    #[arg(short, long, value_name = "DIR")]
    config_root: Option<PathBuf>,

    /// Interpolation argument, repeatable
    #[arg(short, long = "arg", value_name = "NAME=VALUE")]
    args: Vec<String>,

    /// List every key of the loaded language
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_root = match cli.config_root.clone().map_or_else(std::env::current_dir, Ok) {
        Ok(root) => root,
        Err(error) => {
            tracing::error!("Failed to resolve the working directory: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut config_manager = ConfigManager::new();
    if let Err(error) = config_manager.load_settings(Some(config_root)) {
        tracing::error!("Configuration error: {}", error);
        return ExitCode::FAILURE;
    }
    let settings = config_manager.get_settings();

    let service = LocalizationService::from_settings(settings);
    let mut changes = service.subscribe();

    let requested = match &cli.language {
        Some(language) => service.request_language(language.as_str()),
        None => service.set_default_locale(settings.default_locale.clone()),
    };
    if let Err(error) = requested {
        tracing::error!("{}", error);
        return ExitCode::FAILURE;
    }

    let language = match tokio::time::timeout(LOAD_TIMEOUT, changes.recv()).await {
        Ok(Ok(language)) => language,
        Ok(Err(error)) => {
            tracing::error!("Language change channel failed: {}", error);
            return ExitCode::FAILURE;
        }
        Err(_) => {
            tracing::error!("Timed out waiting for translations");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(language = %language, "Translations ready");

    print_output(&service, &cli, &language);
    ExitCode::SUCCESS
}

#[allow(clippy::print_stdout)]
fn print_output(service: &LocalizationService, cli: &Cli, language: &LanguageTag) {
    if cli.list {
        for key in service.keys(Some(language)) {
            println!("{key}");
        }
        return;
    }

    let args = parse_args(&cli.args);
    for key in &cli.keys {
        println!("{}", service.translate(key, Some(&args), Some(language)));
    }

    if cli.keys.is_empty() {
        let locale: Locale = service.default_locale();
        println!("{language} ({locale})");
    }
}

/// Parses `name=value` pairs; values that are valid JSON keep their type.
fn parse_args(pairs: &[String]) -> Args {
    pairs
        .iter()
        .filter_map(|pair| {
            let Some((name, value)) = pair.split_once('=') else {
                tracing::warn!("Ignoring argument without '=': {}", pair);
                return None;
            };
            let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
            Some((name.to_string(), value))
        })
        .collect()
}
