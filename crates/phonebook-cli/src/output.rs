//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! `Output` is also the notifier handed to the phonebook in command mode.

use phonebook_core::{Contact, ImportSummary, Notifier};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a list of contacts
    pub fn print_contacts(&self, contacts: &[&Contact]) {
        match self.format {
            OutputFormat::Human => {
                if contacts.is_empty() {
                    println!("No contacts found.");
                    return;
                }
                for contact in contacts {
                    println!("{}", format_row(contact));
                }
                println!("\n{} contact(s)", contacts.len());
            }
            OutputFormat::Json => match serde_json::to_string_pretty(contacts) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to encode contacts: {}", e),
            },
            OutputFormat::Quiet => {
                for contact in contacts {
                    println!("{}", contact.id);
                }
            }
        }
    }

    /// Print the outcome of a batch import
    pub fn print_import_summary(&self, summary: &ImportSummary) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "\n{} added, {} rejected",
                    summary.added, summary.rejected
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"summary": summary}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a failure message to stderr
    ///
    /// Failures are shown even in quiet mode. In JSON mode stdout keeps a
    /// single document (the command's result).
    pub fn failure(&self, message: &str) {
        eprintln!("{}", self.failure_line(message));
    }

    fn failure_line(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Human | OutputFormat::Quiet => format!("✗ {}", message),
            OutputFormat::Json => {
                serde_json::json!({"status": "failure", "message": message}).to_string()
            }
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

impl Notifier for Output {
    fn notify_success(&self, message: &str) {
        self.success(message);
    }

    fn notify_failure(&self, message: &str) {
        self.failure(message);
    }
}

/// One line per contact: short ID, name, number
fn format_row(contact: &Contact) -> String {
    format!(
        "{} | {:<30} | {}",
        short_id(contact),
        truncate(&contact.name, 30),
        contact.number
    )
}

/// First eight characters of the ID
pub fn short_id(contact: &Contact) -> &str {
    let id = contact.id.as_str();
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("Émile Zola-Dupont", 8), "Émile...");
    }

    #[test]
    fn test_short_id() {
        let contact = Contact::with_id("0123456789abcdef", "Ann", "1");
        assert_eq!(short_id(&contact), "01234567");

        let contact = Contact::with_id("abc", "Ann", "1");
        assert_eq!(short_id(&contact), "abc");
    }

    #[test]
    fn test_failure_line() {
        let output = Output::new(OutputFormat::Human);
        assert_eq!(
            output.failure_line("Ann is already in contacts"),
            "✗ Ann is already in contacts"
        );

        let output = Output::new(OutputFormat::Json);
        let value: serde_json::Value =
            serde_json::from_str(&output.failure_line("Can't read from local storage.")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": "failure", "message": "Can't read from local storage."})
        );
    }

    #[test]
    fn test_format_row() {
        let contact = Contact::with_id("0123456789", "Ann", "459-12-56");
        let row = format_row(&contact);
        assert!(row.starts_with("01234567 | Ann"));
        assert!(row.ends_with("| 459-12-56"));
    }
}
