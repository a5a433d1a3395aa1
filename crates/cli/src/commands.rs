//! Command implementations, one module per resource.

pub mod addresses;
pub mod orders;
pub mod restaurants;
pub mod schedules;

use platter_client::store::MutateError;
use platter_client::{ApiError, ClientConfig, ConfigError, OwnerClient, SessionToken};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A direct API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A lifecycle-managed mutation failed.
    #[error(transparent)]
    Mutate(#[from] MutateError),
}

/// Build the client and session from the environment.
///
/// The session token is read here and injected into every operation; the
/// CLI never stores it anywhere else.
pub(crate) fn connect() -> Result<(OwnerClient, SessionToken), CliError> {
    let config = ClientConfig::from_env()?;
    let token = std::env::var("PLATTER_SESSION_TOKEN")
        .map_err(|_| ConfigError::MissingEnvVar("PLATTER_SESSION_TOKEN".to_owned()))?;
    let client = OwnerClient::new(&config)?;
    Ok((client, SessionToken::new(token)))
}

/// Print one `{param, msg}` pair per line, the way a form would show them
/// next to their fields.
#[allow(clippy::print_stderr)]
pub(crate) fn report_field_errors(err: &CliError) {
    let errors = match err {
        CliError::Api(api) => api.validation_errors(),
        CliError::Mutate(mutate) => mutate.validation_errors(),
        CliError::Config(_) => None,
    };
    if let Some(errors) = errors {
        for error in errors {
            eprintln!("{error}");
        }
    }
}
