// External audio tools
//
// The vorbis extractor (ww2ogg) and re-packager (revorb) are opaque
// binary-in/binary-out steps. They sit behind the AudioTool trait so the
// pipeline can run against fakes in tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, WemError};

/// Wwise authoring generation that produced a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WwiseVersion {
    None,
    Wwise2010,
    Wwise2013,
    Wwise2014,
    Wwise2015,
    Wwise2016,
    Wwise2017,
}

impl WwiseVersion {
    /// Legacy ".ogg" files were Wwise 2010 containers, ".wem" files are 2013+
    pub fn from_extension(extension: &str) -> Result<Self> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "ogg" => Ok(WwiseVersion::Wwise2010),
            "wem" => Ok(WwiseVersion::Wwise2013),
            _ => Err(WemError::UnsupportedVersion {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::from_extension(ext)
    }

    /// Packed codebook file ww2ogg needs for this version
    pub fn codebook_file(self) -> Option<&'static str> {
        match self {
            WwiseVersion::Wwise2010 => Some("packed_codebooks.bin"),
            WwiseVersion::Wwise2013 => Some("packed_codebooks_aoTuV_603.bin"),
            _ => None,
        }
    }
}

/// An external binary-in/binary-out conversion step
pub trait AudioTool {
    fn name(&self) -> &str;

    /// Convert `input` into `output`, passing any extra arguments through
    fn run(&self, input: &Path, output: &Path, args: &[String]) -> Result<()>;
}

/// Runs a tool as a child process and treats error text on stdout as failure
#[derive(Debug, Clone)]
pub struct ProcessTool {
    name: String,
    program: PathBuf,
    working_dir: Option<PathBuf>,
    /// Whether the program takes `<input> -o <output>` or just `<input>`
    explicit_output: bool,
}

impl ProcessTool {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>, explicit_output: bool) -> Self {
        ProcessTool {
            name: name.into(),
            program: program.into(),
            working_dir: None,
            explicit_output,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// ww2ogg from a toolkit directory
    pub fn ww2ogg(toolkit_root: &Path) -> Self {
        ProcessTool::new("ww2ogg", toolkit_root.join("ww2ogg"), true).with_working_dir(toolkit_root)
    }

    /// revorb from a toolkit directory; rewrites its input in place
    pub fn revorb(toolkit_root: &Path) -> Self {
        ProcessTool::new("revorb", toolkit_root.join("revorb"), false).with_working_dir(toolkit_root)
    }
}

fn reports_error(output: &str) -> bool {
    output.contains("Error ") || output.contains(" error:")
}

impl AudioTool for ProcessTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &Path, output: &Path, args: &[String]) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.arg(input);
        if self.explicit_output {
            command.arg("-o").arg(output);
        }
        command.args(args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        debug!(tool = %self.name, ?command, "running external tool");
        let result = command
            .output()
            .map_err(|e| WemError::tool(&self.name, format!("cannot start {}: {}", self.program.display(), e)))?;

        let stdout = String::from_utf8_lossy(&result.stdout);
        if !result.status.success() || reports_error(&stdout) {
            return Err(WemError::tool(
                &self.name,
                format!("{} ({})", stdout.trim(), result.status),
            ));
        }
        Ok(())
    }
}

/// Extract a playable ogg from a Wwise container: ww2ogg with the version's
/// codebooks, then revorb on the result.
///
/// If revorb fails the half-finished output is removed.
pub fn decode_to_ogg(
    input: &Path,
    output: &Path,
    version: WwiseVersion,
    codebook_dir: &Path,
    extractor: &dyn AudioTool,
    repackager: &dyn AudioTool,
) -> Result<()> {
    let codebooks = version.codebook_file().ok_or_else(|| {
        WemError::tool(
            extractor.name(),
            format!("Wwise version {:?} not supported or invalid input file", version),
        )
    })?;

    let args = vec!["--pcb".to_string(), codebook_dir.join(codebooks).display().to_string()];
    extractor.run(input, output, &args)?;

    if let Err(e) = repackager.run(output, output, &[]) {
        warn!(output = %output.display(), "removing output after failed repackaging");
        if output.exists() {
            fs::remove_file(output)?;
        }
        return Err(e);
    }
    Ok(())
}
