pub mod input;
pub mod parser;
pub mod progress;
