//! Lexicard: vocabulary flashcards with dictionary lookups.
//!
//! Guests keep their data in local storage, approved accounts in the remote database.
//! [`session::SessionContext`] hides the difference from everything above it.

pub mod cli;
pub mod commands;
pub mod debounce;
pub mod logging;
pub mod review;
pub mod session;
pub mod state;
pub mod vocabulary;
