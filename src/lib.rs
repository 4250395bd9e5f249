//! A two-line shell prompt that fills the terminal width exactly.
//!
//! ```text
//! -[user@host]------------------------------------------{~/src/project}-
//! --09:41<> :1:   main                                            M:2 --
//! ```

pub mod colors;
pub mod config;
pub mod exec;
pub mod init;
pub mod layout;
pub mod prompt;
pub mod providers;
pub mod segment;
pub mod width;

pub use config::{Args, RenderContext};
pub use prompt::{render, write_prompt, Fields};
