//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lexicard_core::{
    id::{TopicId, UserId, VocabularyItemId, WordTypeId},
    roles::ApprovalStatus,
};


/// Lexicard command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "lexicard",
    author,
    about = "Vocabulary flashcards with dictionary lookups, usable as a guest or with an account.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `./data/configuration.toml`.
    #[arg(
        short = 'c',
        long = "configurationFilePath",
        global = true,
        help = "Path to the configuration file to use. Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    /// Identity token issued by the identity provider. Without one, Lexicard runs in guest mode.
    #[arg(long = "id-token", env = "LEXICARD_ID_TOKEN", global = true)]
    pub id_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}


#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage topics.
    #[command(subcommand)]
    Topics(TopicCommand),

    /// Manage vocabulary words.
    #[command(subcommand)]
    Words(WordCommand),

    /// Manage word types.
    #[command(subcommand, name = "word-types")]
    WordTypes(WordTypeCommand),

    /// Look words up in the dictionary without storing them.
    Lookup {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Review unlearned words as flashcards.
    Review {
        /// Only review words of this topic.
        #[arg(long)]
        topic: Option<TopicId>,

        /// Maximum number of cards in this session.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the vocabulary every time it changes, until interrupted.
    Watch,

    /// Review accounts (administrators only).
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Apply pending database migrations.
    Migrate,
}


#[derive(Args, Debug)]
pub struct DeleteConfirmation {
    /// Skip the interactive confirmation.
    #[arg(long, short = 'y')]
    pub yes: bool,
}


#[derive(Subcommand, Debug)]
pub enum TopicCommand {
    List,

    Add {
        label: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Partially update a topic. Only the given values are changed.
    Update {
        id: TopicId,

        #[arg(long)]
        label: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a topic. Its words are kept, but no longer belong to it.
    Delete {
        id: TopicId,

        #[command(flatten)]
        confirmation: DeleteConfirmation,
    },
}


#[derive(Subcommand, Debug)]
pub enum WordCommand {
    List {
        /// Only list words of this topic.
        #[arg(long)]
        topic: Option<TopicId>,

        /// Case-insensitive search on word and meaning.
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a word, enriching it with dictionary data.
    Add {
        word: String,

        meaning: String,

        #[arg(long)]
        example: Option<String>,

        #[arg(long)]
        topic: Option<TopicId>,

        /// Do not look the word up in the dictionary.
        #[arg(long)]
        no_lookup: bool,
    },

    /// Partially update a word from a JSON object, e.g. `{"meaning": "..."}`.
    Update {
        id: VocabularyItemId,

        patch: String,
    },

    Learned {
        id: VocabularyItemId,

        #[arg(long)]
        undo: bool,
    },

    Pin {
        id: VocabularyItemId,

        #[arg(long)]
        undo: bool,
    },

    Delete {
        id: VocabularyItemId,

        #[command(flatten)]
        confirmation: DeleteConfirmation,
    },
}


#[derive(Subcommand, Debug)]
pub enum WordTypeCommand {
    List,

    Add {
        name: String,

        #[arg(long)]
        color: Option<String>,
    },

    Update {
        id: WordTypeId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    Delete {
        id: WordTypeId,

        #[command(flatten)]
        confirmation: DeleteConfirmation,
    },
}


#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StatusFilter {
    Pending,
    Approved,
    Rejected,
    All,
}

impl StatusFilter {
    pub fn into_approval_status(self) -> Option<ApprovalStatus> {
        match self {
            StatusFilter::Pending => Some(ApprovalStatus::Pending),
            StatusFilter::Approved => Some(ApprovalStatus::Approved),
            StatusFilter::Rejected => Some(ApprovalStatus::Rejected),
            StatusFilter::All => None,
        }
    }
}


#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List accounts, pending ones by default.
    List {
        #[arg(long, value_enum, default_value_t = StatusFilter::Pending)]
        status: StatusFilter,
    },

    Approve { user_id: UserId },

    Reject { user_id: UserId },
}
