// Output formatting for CLI

use crate::cli::OutputFormat;
use anyhow::Result;
use std::io::Write;

/// Format and output reports
pub struct OutputFormatter {
    format: OutputFormat,
    pub quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Output a report as JSON or as aligned key-value lines
    pub fn output_report(&self, report: &serde_json::Value, writer: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(report)?)?;
            }
            OutputFormat::Pretty => {
                self.output_table(report, writer, 0)?;
            }
        }
        Ok(())
    }

    fn output_table(&self, value: &serde_json::Value, writer: &mut impl Write, indent: usize) -> Result<()> {
        if let Some(obj) = value.as_object() {
            let max_key_len = obj.keys().map(|k| k.len()).max().unwrap_or(0);

            for (key, value) in obj {
                if value.is_object() {
                    writeln!(writer, "{:indent$}{}:", "", key, indent = indent)?;
                    self.output_table(value, writer, indent + 2)?;
                } else {
                    writeln!(
                        writer,
                        "{:indent$}{:<width$} {}",
                        "",
                        format!("{}:", key),
                        self.format_value(value),
                        indent = indent,
                        width = max_key_len + 1
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Format a JSON value for display
    fn format_value(&self, value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "-".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Array(arr) => {
                if arr.is_empty() {
                    "[]".to_string()
                } else {
                    format!("[{} items]", arr.len())
                }
            }
            serde_json::Value::Object(obj) => format!("{{{} items}}", obj.len()),
        }
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}

/// Progress indicator for batch operations
pub struct ProgressBar {
    total: usize,
    current: usize,
    show: bool,
}

impl ProgressBar {
    pub fn new(total: usize, show: bool) -> Self {
        Self {
            total,
            current: 0,
            show,
        }
    }

    pub fn increment(&mut self, label: &str) {
        self.current += 1;
        if self.show && self.total > 0 {
            let percent = (self.current * 100) / self.total;
            print!("\r[{}/{}] ({}%) {} ", self.current, self.total, percent, label);
            if self.current == self.total {
                println!();
            }
            std::io::stdout().flush().ok();
        }
    }
}
