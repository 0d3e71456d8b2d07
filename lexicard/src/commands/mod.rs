//! Implementations of the command-line subcommands.

mod admin;
mod lookup;
mod migrate;
mod review;
mod topics;
mod watch;
mod word_types;
mod words;

use miette::{Context, IntoDiagnostic, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::{
    cli::{Command, DeleteConfirmation},
    session::{SessionContext, SessionError},
    state::{ApplicationState, SignIn},
};


/// Line-based reader for interactive prompts.
pub(crate) struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub(crate) fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `question` and reads one line of input. Returns `None` at end of input.
    pub(crate) async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(question.as_bytes())
            .await
            .into_diagnostic()?;
        stdout.flush().await.into_diagnostic()?;

        let line = self
            .lines
            .next_line()
            .await
            .into_diagnostic()
            .wrap_err("Failed to read from standard input.")?;

        Ok(line.map(|line| line.trim().to_string()))
    }
}


/// Asks before deleting something, unless `--yes` was given.
pub(crate) async fn confirm_deletion(
    what: &str,
    confirmation: &DeleteConfirmation,
) -> Result<bool> {
    if confirmation.yes {
        return Ok(true);
    }

    let answer = Prompt::new()
        .ask(&format!("Really delete {}? [y/N] ", what))
        .await?;

    let confirmed = matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("y") | Some("yes")
    );

    if !confirmed {
        println!("Nothing was deleted.");
    }

    Ok(confirmed)
}


/// Reports a failed session action without failing the command.
///
/// Store failures were already logged by the session context,
/// the data is simply left as it was.
pub(crate) fn report_failure(error: SessionError) {
    match error {
        SessionError::DuplicateWord { .. } => println!("{}", error),
        SessionError::StoreError { .. } => {
            println!("The change could not be saved, your data was left unchanged.")
        }
    }
}


/// Signs in (if an identity token was given) and starts the resulting session.
///
/// Returns `None` if the account may not use the application.
async fn start_session(
    state: &ApplicationState,
    id_token: Option<&str>,
) -> Result<Option<SessionContext>> {
    let sign_in = state.sign_in(id_token).await;

    match &sign_in {
        SignIn::Guest {
            notice: Some(notice),
        } => println!("{}", notice),
        SignIn::Blocked { message, .. } => {
            println!("{}", message);
            return Ok(None);
        }
        _ => {}
    }

    let Some(session) = sign_in.session() else {
        return Ok(None);
    };

    let context = state
        .start_session(session)
        .await
        .into_diagnostic()
        .wrap_err("Failed to start the session.")?;

    Ok(Some(context))
}


pub async fn run_command(
    state: &ApplicationState,
    id_token: Option<&str>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Lookup { words } => lookup::look_up_words(state, &words).await,
        Command::Migrate => migrate::apply_migrations(state).await,
        Command::Admin(admin_command) => {
            admin::run_admin_command(state, id_token, admin_command).await
        }
        session_command => {
            let Some(mut context) = start_session(state, id_token).await? else {
                return Ok(());
            };

            match session_command {
                Command::Topics(topic_command) => {
                    topics::run_topic_command(&context, topic_command).await
                }
                Command::Words(word_command) => {
                    words::run_word_command(&context, word_command).await
                }
                Command::WordTypes(word_type_command) => {
                    word_types::run_word_type_command(&context, word_type_command).await
                }
                Command::Review { topic, limit } => {
                    review::run_review(&context, topic, limit).await
                }
                Command::Watch => watch::watch_vocabulary(&mut context).await,
                Command::Lookup { .. } | Command::Migrate | Command::Admin(_) => Ok(()),
            }
        }
    }
}
