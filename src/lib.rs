pub mod cli;
pub mod error;
pub mod input;

// Re-export commonly used items
pub use cli::config::ReaderConfig;
pub use error::{ReadError, Result};
pub use input::{
    read_prompted_line, read_prompted_line_with, ConsoleReader, InputHandler, LineReader,
    OverflowPolicy, UserInput,
};
