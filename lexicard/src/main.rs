use clap::Parser;
use lexicard::{
    cli::CLIArgs,
    commands::run_command,
    logging::initialize_tracing,
    state::ApplicationState,
};
use lexicard_configuration::Configuration;
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;



#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments.
    let arguments = CLIArgs::parse();

    // Load configuration.
    let configuration = match arguments.configuration_file_path.as_ref() {
        Some(path) => Configuration::load_from_path(path),
        None => Configuration::load_from_default_path(),
    }
    .into_diagnostic()
    .wrap_err("Failed to load configuration file.")?;

    configuration
        .base_paths
        .create_base_data_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to create base data directory.")?;

    configuration
        .logging
        .create_log_file_output_directory_if_missing()
        .into_diagnostic()
        .wrap_err("Failed to create log file output directory.")?;


    let guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration.logging.log_file_output_level_filter(),
        &configuration.logging.log_file_output_directory,
        "lexicard.log",
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        file_path = %configuration.configuration_file_path.display(),
        "Configuration loaded."
    );


    let state = ApplicationState::initialize(configuration).await?;

    run_command(&state, arguments.id_token.as_deref(), arguments.command).await?;


    drop(guard);
    Ok(())
}
