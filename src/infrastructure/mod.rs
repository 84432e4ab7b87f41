pub mod config;
pub mod config_repository;
pub mod shell;

pub use config::*;
pub use config_repository::*;
pub use shell::*;
