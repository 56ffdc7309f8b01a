#[allow(clippy::module_inception)]
mod models;

pub use models::*;
