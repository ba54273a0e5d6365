// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// wemkit - Wwise audio container tool
#[derive(Parser, Debug)]
#[command(name = "wemkit")]
#[command(about = "Validate and convert Wwise RIFF/RIFX audio containers", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// One JSON document per file
    Json,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the platform of container(s)
    Detect {
        /// Container path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Validate container header(s)
    Verify {
        /// Container path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Show file and header information
    Info {
        /// Container path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Include every decoded fmt field
        #[arg(short, long)]
        detailed: bool,
    },

    /// Remove the legacy vorb chunk header (fmt length 24 -> 66)
    Strip {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <name>_fixed.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Force the field at offset 40 to 3
    Downgrade {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <name>_downgraded.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert between PC (RIFF) and console (RIFX) byte order
    Swap {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <name>_console.<ext> or <name>_pc.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pick the conversion from the file extension (.ogg: strip, .wem: swap)
    Convert {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a playable ogg with ww2ogg and revorb
    Decode {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <name>.ogg, or <name>_decoded.ogg for .ogg input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding ww2ogg, revorb and the packed codebooks
        #[arg(short, long)]
        toolkit: PathBuf,
    },

    /// Apply one operation to every matching file
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: PathBuf,

        /// File pattern (e.g., "*.wem")
        #[arg(short, long, default_value = "*.wem")]
        pattern: String,

        /// Operation to apply
        #[arg(value_enum)]
        operation: BatchOperation,
    },
}

/// Batch operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BatchOperation {
    Verify,
    Strip,
    Downgrade,
    Swap,
}

impl std::fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchOperation::Verify => write!(f, "verify"),
            BatchOperation::Strip => write!(f, "strip"),
            BatchOperation::Downgrade => write!(f, "downgrade"),
            BatchOperation::Swap => write!(f, "swap"),
        }
    }
}

impl Config {
    /// Default tracing filter when RUST_LOG is unset
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "wemkit=debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
