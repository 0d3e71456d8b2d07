mod entity;
mod store;

pub use entity::*;
pub use store::*;
