//! Authentication for Lexicard: verification of identity tokens issued by the
//! third-party identity provider, and the approval-status access gate.

mod access;
mod identity_token;

pub use access::*;
pub use identity_token::*;
