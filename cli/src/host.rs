//! Terminal implementation of the host capabilities.
//!
//! Prompts and pickers go to stderr and read stdin line by line, so stdout
//! stays clean for command output. The "current file" has no editor to come
//! from here; it resolves from the `--file` flag or `$CMDSLOT_FILE`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use cmdslot_core::host::{Host, NotifyLevel};

pub struct TerminalHost {
    file: Option<PathBuf>,
}

impl TerminalHost {
    /// `file_override` (from `--file`) wins over `$CMDSLOT_FILE`.
    pub fn new(file_override: Option<String>) -> TerminalHost {
        let file = file_override
            .or_else(|| std::env::var("CMDSLOT_FILE").ok())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        TerminalHost { file }
    }

    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None, // EOF or read failure = cancelled
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }
}

impl Host for TerminalHost {
    fn cwd(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    fn current_file(&self) -> Option<PathBuf> {
        self.file.clone()
    }

    fn prompt(&self, message: &str) -> Option<String> {
        eprint!("{}", message);
        let _ = std::io::stderr().flush();
        self.read_line()
    }

    fn select(&self, message: &str, options: &[String]) -> Option<usize> {
        for (i, option) in options.iter().enumerate() {
            eprintln!("  {}) {}", i + 1, option);
        }
        eprint!("{}", message);
        let _ = std::io::stderr().flush();
        let reply = self.read_line()?;
        match reply.trim().parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Some(n - 1),
            _ => None,
        }
    }

    fn notify(&self, level: NotifyLevel, text: &str) {
        eprintln!("cmdslot [{}] {}", level.label(), text);
    }
}
