use crate::error::{config::ConfigError, RepoError};

const DATABASE_URL: &str = "DATABASE_URL";
const DATABASE_SQL_LOGGING: &str = "DATABASE_SQL_LOGGING";
const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";

/// Database settings used to open the connection a context works on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,

    /// Whether sqlx logs every statement
    pub sql_logging: bool,
    /// Upper bound of the connection pool, `None` for the driver default
    pub max_connections: Option<u32>,
}

impl Config {
    /// Creates a config for `database_url` with logging off and the default pool size.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            sql_logging: false,
            max_connections: None,
        }
    }

    /// Reads the config from environment variables.
    ///
    /// - `DATABASE_URL` - required
    /// - `DATABASE_SQL_LOGGING` - optional, `true`/`false`, defaults to `false`
    /// - `DATABASE_MAX_CONNECTIONS` - optional, positive integer
    ///
    /// # Returns
    /// - `Ok(Config)` - All variables present and valid
    /// - `Err(RepoError::ConfigErr)` - Missing `DATABASE_URL` or an unparsable value
    pub fn from_env() -> Result<Self, RepoError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads a `.env` file if one exists, then reads the config from the environment.
    pub fn from_dotenv() -> Result<Self, RepoError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RepoError> {
        let database_url = lookup(DATABASE_URL)
            .ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_URL.to_string()))?;

        let sql_logging = match lookup(DATABASE_SQL_LOGGING) {
            Some(value) => parse_var(DATABASE_SQL_LOGGING, value)?,
            None => false,
        };

        let max_connections = lookup(DATABASE_MAX_CONNECTIONS)
            .map(|value| parse_var(DATABASE_MAX_CONNECTIONS, value))
            .transpose()?;

        Ok(Self {
            database_url,
            sql_logging,
            max_connections,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}
