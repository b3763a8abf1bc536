use std::{env, process::ExitCode, str::FromStr as _};

use clap::Parser as _;
use config_rs::{Config as ConfigRs, ConfigError};
use tracing::{debug, error, trace};

use crate::{
    cli::{Cli, Commands},
    commands::{serve, version},
    config::Config,
    environment::Environment,
    setup_tracing::setup_tracing_for_command,
};

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";
const CONFIG_ENV_PREFIX: &str = "APP";

pub async fn boot() -> ExitCode {
    let cli = Cli::parse();

    let environment = set_environment();

    let config = match read_config(&environment) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    setup_tracing_for_command(&cli.command, &config.tracing.log_level);

    debug!("Environment set to: {:?}", environment);
    trace!("Configuration loaded: {:?}", config);

    handle_command(environment, config, cli).await
}

#[must_use]
pub fn set_environment() -> Environment {
    env::var(ENVIRONMENT_VARIABLE)
        .ok()
        .and_then(|s| Environment::from_str(&s).ok())
        .unwrap_or_default()
}

/// Layers the optional `config/{environment}` file and `APP_*` variables
/// (`__` separates sections, e.g. `APP_UPSTREAM__BASE_URL`) over the
/// built-in defaults.
pub fn read_config(environment: &Environment) -> Result<Config, ConfigError> {
    let config_file_name = environment.config_file();

    trace!("Reading configuration from: {}", config_file_name);

    ConfigRs::builder()
        .add_source(config_rs::File::with_name(&config_file_name).required(false))
        .add_source(
            config_rs::Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

pub async fn handle_command(environment: Environment, config: Config, cli: Cli) -> ExitCode {
    match cli.command {
        Some(Commands::Version) => {
            version::print_version_info();
            ExitCode::SUCCESS
        }
        Some(Commands::Serve(args)) => run_server(environment, config, args).await,
        None => run_server(environment, config, Default::default()).await,
    }
}

async fn run_server(
    environment: Environment,
    config: Config,
    args: crate::cli::ServeArgs,
) -> ExitCode {
    match serve::handle_serve_command(environment, config, args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    const OVERRIDES: [(&str, &str); 3] = [
        ("APP_SERVER__PORT", "9100"),
        ("APP_UPSTREAM__BASE_URL", "http://dkron:9999"),
        ("APP_UPSTREAM__TIMEOUT_SECONDS", "7"),
    ];

    // No other test may set APP_* variables.
    #[test]
    fn test_environment_variables_override_config_file() {
        let from_file = read_config(&Environment::Test).expect("Failed to read test config");

        assert_eq!(from_file.tracing.log_level, "warn");
        assert_eq!(from_file.server.port, 8000);
        assert_eq!(from_file.upstream.base_url, "http://localhost:8080");
        assert_eq!(from_file.upstream.timeout_seconds, None);

        for (key, value) in OVERRIDES {
            env::set_var(key, value);
        }
        let overridden = read_config(&Environment::Test);
        for (key, _) in OVERRIDES {
            env::remove_var(key);
        }

        let overridden = overridden.expect("Failed to read overridden config");
        assert_eq!(overridden.tracing.log_level, "warn");
        assert_eq!(overridden.server.port, 9100);
        assert_eq!(overridden.upstream.base_url, "http://dkron:9999");
        assert_eq!(overridden.upstream.timeout_seconds, Some(7));
    }

    #[test]
    fn test_missing_config_file_falls_back_to_defaults() {
        let config: Config = ConfigRs::builder()
            .add_source(config_rs::File::with_name("config/missing").required(false))
            .build()
            .expect("Failed to build empty config")
            .try_deserialize()
            .expect("Failed to deserialize empty config");

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.upstream.base_url, "http://localhost:8080");
        assert_eq!(config.upstream.timeout_seconds, None);
    }
}
