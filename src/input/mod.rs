mod policy;
mod prompt;

pub use policy::OverflowPolicy;
pub use prompt::{
    read_prompted_line, read_prompted_line_with, ConsoleReader, LineReader, UserInput,
};

use crate::error::Result;

/// Anything that can show a prompt and hand back one line of input
pub trait InputHandler {
    /// Show `prompt` and get one line from the user
    fn get_user_input(&mut self, prompt: &str) -> Result<UserInput>;
}
