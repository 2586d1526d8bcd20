mod catalog;
mod config;
mod identity;

pub use self::catalog::*;
pub use self::config::*;
pub use self::identity::*;
