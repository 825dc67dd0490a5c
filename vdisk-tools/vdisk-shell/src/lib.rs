#[macro_use]
mod macros;
mod application;
mod cli;
mod error;
mod tokenizer;

pub use application::{Application, Outcome};
pub use cli::build_app;
pub use error::ShellError;
pub use tokenizer::{normalize_argument, tokenize};
