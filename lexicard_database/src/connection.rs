use std::time::Duration;

use lexicard_configuration::DatabaseConfiguration;
use sqlx::{
    migrate::MigrateError,
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tracing::info;


fn connection_options(database_configuration: &DatabaseConfiguration) -> PgConnectOptions {
    let mut connection_options = PgConnectOptions::new_without_pgpass()
        .application_name(&format!("lexicard_v{}", env!("CARGO_PKG_VERSION")))
        .statement_cache_capacity(
            database_configuration
                .statement_cache_capacity
                .unwrap_or(200),
        )
        .host(&database_configuration.host)
        .port(database_configuration.port)
        .username(&database_configuration.username)
        .database(&database_configuration.database_name);

    if let Some(password) = &database_configuration.password {
        connection_options = connection_options.password(password.as_str());
    }

    connection_options
}


pub async fn establish_database_connection_pool(
    database_configuration: &DatabaseConfiguration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .idle_timeout(Some(Duration::from_secs(60 * 20)))
        .max_lifetime(Some(Duration::from_secs(60 * 60)))
        .min_connections(1)
        .max_connections(10)
        .test_before_acquire(true)
        .connect_with(connection_options(database_configuration))
        .await
}


/// Applies all embedded migrations that have not been applied yet.
pub async fn apply_pending_migrations(database_pool: &PgPool) -> Result<(), MigrateError> {
    info!("Applying pending database migrations.");

    sqlx::migrate!("./migrations").run(database_pool).await?;

    info!("Database schema is up to date.");
    Ok(())
}
