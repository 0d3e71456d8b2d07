use lexicard_database::apply_pending_migrations;
use miette::{miette, Context, IntoDiagnostic, Result};

use crate::state::ApplicationState;


pub(super) async fn apply_migrations(state: &ApplicationState) -> Result<()> {
    let database_pool = state.database_pool.as_ref().ok_or_else(|| {
        miette!("The remote database is not configured or not reachable, nothing to migrate.")
    })?;

    apply_pending_migrations(database_pool)
        .await
        .into_diagnostic()
        .wrap_err("Failed to apply database migrations.")?;

    println!("Database schema is up to date.");

    Ok(())
}
