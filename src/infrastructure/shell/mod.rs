pub mod platform;
pub mod script_builder;

pub use platform::*;
pub use script_builder::*;
