mod model;
mod mutation;
mod query;

pub(crate) use model::*;
pub use mutation::*;
pub use query::*;
