use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON config file. Original error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML config file. Original error: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    #[error("No configuration file found in '{config_dir}'. Tried: {config_files}.")]
    ConfigNotFound { config_dir: String, config_files: String },

    #[error("Invalid template glob. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    /// Raised while compiling a template source, before anything is rendered.
    #[error("Failed to compile template. Original error: {0}")]
    TemplateError(#[from] Box<handlebars::TemplateError>),

    /// Template not found, bad syntax discovered at render time or a failing helper.
    #[error("Failed to render. Original error: {0}")]
    RenderError(#[from] Box<handlebars::RenderError>),

    #[error("Cannot proceed: views directory '{views_dir}' does not exist.")]
    ViewsDoesNotExistError { views_dir: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Error::TemplateError(Box::new(err))
    }
}

impl From<handlebars::RenderError> for Error {
    fn from(err: handlebars::RenderError) -> Self {
        Error::RenderError(Box::new(err))
    }
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
