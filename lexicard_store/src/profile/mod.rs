mod memory;
mod repository;
mod service;

pub use memory::*;
pub use repository::*;
pub use service::*;
