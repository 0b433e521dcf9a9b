//! Request handlers.

pub mod files;
pub mod health;
pub mod languages;
pub mod process;

pub use files::*;
pub use health::*;
pub use languages::*;
pub use process::*;
