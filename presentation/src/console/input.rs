//! Line-oriented console input shared by menus and the session.

use colored::Colorize;
use mock_exam_application::InteractionError;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Run a blocking read, telling a multi-threaded runtime to move other
/// tasks off this worker first. Current-thread runtimes and plain threads
/// run it directly.
fn blocking<T>(read: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(read)
        }
        _ => read(),
    }
}

/// Reads trimmed lines after printing a prompt.
///
/// End of input is reported as [`InteractionError::Closed`].
pub struct ConsoleInput {
    reader: Mutex<Box<dyn BufRead + Send>>,
}

impl ConsoleInput {
    /// Read from standard input.
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(io::stdin()))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Mutex::new(Box::new(reader)),
        }
    }

    /// Print `prompt` and read one line.
    pub fn read_line(&self, prompt: &str) -> Result<String, InteractionError> {
        print!("{} ", prompt.magenta().bold());
        io::stdout()
            .flush()
            .map_err(|e| InteractionError::Io(format!("Failed to flush stdout: {}", e)))?;

        let mut line = String::new();
        let read = blocking(|| {
            self.reader
                .lock()
                .map_err(|_| InteractionError::Io("input lock poisoned".to_string()))?
                .read_line(&mut line)
                .map_err(|e| InteractionError::Io(format!("Failed to read input: {}", e)))
        })?;
        if read == 0 {
            return Err(InteractionError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Keep asking until `parse` accepts the input.
    pub fn read_until<T>(
        &self,
        prompt: &str,
        retry_hint: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T, InteractionError> {
        loop {
            let line = self.read_line(prompt)?;
            if let Some(value) = parse(&line) {
                return Ok(value);
            }
            println!("{}", retry_hint.yellow());
        }
    }

    /// Wait for Enter.
    pub fn pause(&self) -> Result<(), InteractionError> {
        self.read_line("Press Enter to continue...").map(|_| ())
    }
}
