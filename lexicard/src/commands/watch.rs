use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::{session::SessionContext, vocabulary::describe_item};


fn print_vocabulary(context: &SessionContext) {
    println!("--- {} words ---", context.vocabulary().len());

    for item in context.visible_vocabulary(None) {
        println!("{}", describe_item(item));
    }
}


/// Prints the vocabulary, then again after every change, until interrupted with Ctrl+C.
pub(super) async fn watch_vocabulary(context: &mut SessionContext) -> Result<()> {
    print_vocabulary(context);

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        let changed = tokio::select! {
            result = &mut interrupt => {
                result.into_diagnostic()?;
                info!("Stopped watching.");
                break;
            }
            snapshot = context.next_vocabulary_change() => snapshot.is_some(),
        };

        if !changed {
            println!("The live view ended.");
            break;
        }

        print_vocabulary(context);
    }

    Ok(())
}
