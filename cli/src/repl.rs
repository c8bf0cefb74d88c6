use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line reader for the interactive prompt.
///
/// Reads asynchronously so chat announcements keep printing while the
/// prompt waits for input.
pub struct Repl {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prompt and read one line. `None` at end of input.
    pub async fn readline(&mut self) -> Result<Option<String>, String> {
        write!(std::io::stdout(), "$ ").map_err(|e| e.to_string())?;
        std::io::stdout().flush().map_err(|e| e.to_string())?;
        self.lines.next_line().await.map_err(|e| e.to_string())
    }
}
