mod storage;
mod store;

pub use storage::*;
pub use store::*;
