use thiserror::Error;

/// Failures that only make sense at the command-line layer.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("'{0}' is not implemented")]
    NotImplemented(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}
