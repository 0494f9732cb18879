use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{config::Config, error::RepoError};

/// Connects to the database described by `config`.
///
/// Builds a connection pool from the configured URL, toggling sqlx statement logging and
/// capping the pool size when configured. Schema management is left to the application.
///
/// # Arguments
/// - `config` - Database configuration
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected pool
/// - `Err(RepoError::DbErr)` - Failed to connect to the database
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, RepoError> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(config.sql_logging);

    if let Some(max_connections) = config.max_connections {
        opt.max_connections(max_connections);
    }

    let db = Database::connect(opt).await?;

    tracing::info!("Connected to database");

    Ok(db)
}
