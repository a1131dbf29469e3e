//! Configuration for the extraction commands.
//!
//! Values are merged with the precedence `CLI flags > -S overrides > config
//! file > built-in defaults`.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
