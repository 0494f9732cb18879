use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Check the documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed into the expected type.
    #[error("Invalid value '{value}' for environment variable {name}")]
    InvalidEnvVar {
        /// Name of the environment variable
        name: String,
        /// The value that failed to parse
        value: String,
    },
}
