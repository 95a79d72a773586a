mod health;
mod root;

pub use health::{Health, health};
pub use root::{RootResponse, root};
