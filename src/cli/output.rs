//! Colored output helpers for the CLI.
//!
//! Provides consistent, colored terminal output for the hera-server
//! binary via owo-colors.

use owo_colors::OwoColorize;

use crate::types::RetrievedChunk;

/// Output style configuration.
pub struct Output {
    /// Whether to use colored output.
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled.
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled.
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the H.E.R.A banner.
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
"#,
                " _   _ _____ ____      _    ".bright_cyan().bold(),
                "| | | | ____|  _ \\    / \\   ".bright_cyan().bold(),
                "| |_| |  _| | |_) |  / _ \\  ".cyan().bold(),
                "|_| |_|_____|_| \\_\\ /_/ \\_\\ ".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "HIPAA Evidence Retrieval Assistant".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 _   _ _____ ____      _
| | | | ____|  _ \    / \
| |_| |  _| | |_) |  / _ \
|_| |_|_____|_| \_\ /_/ \_\

   HIPAA Evidence Retrieval Assistant v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark.
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message.
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "→".cyan(), message);
        } else {
            println!("  [..] {}", message);
        }
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "!".yellow().bold(), message.yellow());
        } else {
            println!("  [!!] {}", message);
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERR] {}", message);
        }
    }

    /// Print the generated answer.
    pub fn answer(&self, answer: &str) {
        if self.colored {
            println!("\n{}\n", "Answer".bright_white().bold().underline());
        } else {
            println!("\nAnswer\n------");
        }
        println!("{answer}\n");
    }

    /// Print the retrieved context chunks, best match first.
    pub fn retrieved(&self, chunks: &[RetrievedChunk]) {
        if chunks.is_empty() {
            self.warn("No context retrieved");
            return;
        }

        if self.colored {
            println!("\n{}\n", "Retrieved Context".bright_white().bold().underline());
        } else {
            println!("\nRetrieved Context\n-----------------");
        }

        for (i, chunk) in chunks.iter().enumerate() {
            let section = chunk
                .section_hint
                .as_deref()
                .map(|s| format!(" § {s}"))
                .unwrap_or_default();
            if self.colored {
                println!(
                    "{} {} {}",
                    format!("Chunk {}:", i + 1).bold(),
                    format!("[{}{}]", chunk.source, section).dimmed(),
                    format!("(score {:.3})", chunk.score).dimmed()
                );
            } else {
                println!(
                    "Chunk {}: [{}{}] (score {:.3})",
                    i + 1,
                    chunk.source,
                    section,
                    chunk.score
                );
            }
            println!("{}\n", chunk.text);
        }
    }
}
