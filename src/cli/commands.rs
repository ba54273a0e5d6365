// CLI command implementations
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::{BatchOperation, OutputFormatter};
use wemkit::{Platform, WwiseVersion};

/// `<dir>/<stem>_<suffix>.<ext>` next to the input
pub fn default_output(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let ext = extension
        .map(str::to_string)
        .or_else(|| input.extension().and_then(|e| e.to_str()).map(str::to_string));
    let name = match ext {
        Some(ext) => format!("{}_{}.{}", stem, suffix, ext),
        None => format!("{}_{}", stem, suffix),
    };
    input.with_file_name(name)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Run `op` for every file, reporting failures without stopping.
/// Returns the number of failed files.
fn for_each_file<F>(files: &[PathBuf], formatter: &OutputFormatter, mut op: F) -> usize
where
    F: FnMut(&Path) -> Result<()>,
{
    let mut errors = 0;
    for file in files {
        if let Err(e) = op(file) {
            formatter.print_error(&format!("{}: {:#}", file.display(), e));
            errors += 1;
        }
    }
    errors
}

/// Detect file platform
pub fn command_detect(files: &[PathBuf], formatter: &OutputFormatter) -> Result<usize> {
    let mut stdout = io::stdout();
    Ok(for_each_file(files, formatter, |file| {
        let data = read(file)?;
        let platform = wemkit::detect_platform(&data);
        let report = json!({
            "file": file.display().to_string(),
            "platform": platform,
            "byte_order": platform.byte_order(),
            "legacy": wemkit::needs_legacy_strip(&data),
        });
        formatter.output_report(&report, &mut stdout)?;
        if platform == Platform::Unknown {
            bail!("not a Wwise container");
        }
        Ok(())
    }))
}

/// Validate container headers
pub fn command_verify(files: &[PathBuf], formatter: &OutputFormatter) -> Result<usize> {
    Ok(for_each_file(files, formatter, |file| {
        let data = read(file)?;
        wemkit::validate_container(&data)?;
        formatter.print_success(&format!("{}: {}", file.display(), wemkit::detect_platform(&data)));
        Ok(())
    }))
}

/// Show detailed file information
pub fn command_info(files: &[PathBuf], detailed: bool, formatter: &OutputFormatter) -> Result<usize> {
    let mut stdout = io::stdout();
    Ok(for_each_file(files, formatter, |file| {
        let metadata = std::fs::metadata(file).with_context(|| format!("cannot stat {}", file.display()))?;
        let modified = metadata
            .modified()
            .ok()
            .map(|mtime| chrono::DateTime::<chrono::Utc>::from(mtime).format("%Y-%m-%d %H:%M:%S UTC").to_string());

        let data = read(file)?;
        let info = wemkit::inspect(&data)?;
        let mut report = json!({
            "file": file.display().to_string(),
            "size": metadata.len(),
            "modified": modified,
            "container": info,
        });
        if !detailed {
            if let Some(container) = report["container"].as_object_mut() {
                container.remove("fields");
                container.insert("channels".to_string(), json!(info.fields.get("channels")));
                container.insert("sample_rate".to_string(), json!(info.fields.get("samples_per_sec")));
            }
        }
        formatter.output_report(&report, &mut stdout)?;
        Ok(())
    }))
}

fn write_with<F>(
    input: &Path,
    output: PathBuf,
    formatter: &OutputFormatter,
    transform: F,
) -> Result<()>
where
    F: FnOnce(&[u8]) -> wemkit::Result<Vec<u8>>,
{
    wemkit::transcode_file(input, &output, transform)
        .with_context(|| format!("converting {}", input.display()))?;
    formatter.print_success(&format!("{} -> {}", input.display(), output.display()));
    Ok(())
}

/// Strip the legacy vorb header
pub fn command_strip(file: &Path, output: Option<PathBuf>, formatter: &OutputFormatter) -> Result<()> {
    let data = read(file)?;
    if !wemkit::needs_legacy_strip(&data) {
        formatter.print_info(&format!("{}: no legacy vorb chunk, copying unchanged", file.display()));
    }
    let output = output.unwrap_or_else(|| default_output(file, "fixed", None));
    write_with(file, output, formatter, |data| {
        wemkit::convert_legacy_if_needed(data).map(|out| out.into_owned())
    })
}

/// Normalize the downgrade field
pub fn command_downgrade(file: &Path, output: Option<PathBuf>, formatter: &OutputFormatter) -> Result<()> {
    let output = output.unwrap_or_else(|| default_output(file, "downgraded", None));
    write_with(file, output, formatter, wemkit::downgrade_schema_field)
}

/// Swap PC/console byte order
pub fn command_swap(file: &Path, output: Option<PathBuf>, formatter: &OutputFormatter) -> Result<()> {
    let output = match output {
        Some(path) => path,
        None => {
            let data = read(file)?;
            let suffix = match wemkit::detect_platform(&data).opposite() {
                Platform::Console => "console",
                Platform::Pc => "pc",
                Platform::Unknown => bail!("{}: not a Wwise container", file.display()),
            };
            default_output(file, suffix, None)
        }
    };
    write_with(file, output, formatter, wemkit::swap_platform)
}

/// Convert according to the Wwise version implied by the extension
pub fn command_convert(file: &Path, output: Option<PathBuf>, formatter: &OutputFormatter) -> Result<()> {
    let version = WwiseVersion::from_path(file)?;
    debug!(?version, file = %file.display(), "selected conversion");
    match version {
        WwiseVersion::Wwise2010 => command_strip(file, output, formatter),
        _ => command_swap(file, output, formatter),
    }
}

/// Decode to ogg through the external tools
pub fn command_decode(
    file: &Path,
    output: Option<PathBuf>,
    toolkit: &Path,
    formatter: &OutputFormatter,
) -> Result<()> {
    let version = WwiseVersion::from_path(file)?;
    let output = output.unwrap_or_else(|| match version {
        WwiseVersion::Wwise2010 => default_output(file, "decoded", Some("ogg")),
        _ => file.with_extension("ogg"),
    });

    let ww2ogg = wemkit::ProcessTool::ww2ogg(toolkit);
    let revorb = wemkit::ProcessTool::revorb(toolkit);
    wemkit::decode_to_ogg(file, &output, version, toolkit, &ww2ogg, &revorb)
        .with_context(|| format!("decoding {}", file.display()))?;
    formatter.print_success(&format!("{} -> {}", file.display(), output.display()));
    Ok(())
}

/// Batch process directory
pub fn command_batch(
    directory: &Path,
    pattern: &str,
    operation: BatchOperation,
    formatter: &OutputFormatter,
) -> Result<usize> {
    use glob::glob;

    let show_progress = !formatter.quiet;

    // Build glob pattern
    let glob_pattern = if pattern.contains('/') {
        format!("{}/{}", directory.display(), pattern)
    } else {
        format!("{}/**/{}", directory.display(), pattern)
    };

    // Find matching files
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in glob(&glob_pattern).context("invalid glob pattern")? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("Error reading path: {}", e)),
        }
    }

    let total = files.len();
    if total == 0 {
        formatter.print_info("No files found matching pattern");
        return Ok(0);
    }
    if show_progress {
        formatter.print_info(&format!("Running {} on {} files...", operation, total));
    }

    let quiet = OutputFormatter::new(formatter.format(), true);
    let mut progress = super::output::ProgressBar::new(total, show_progress);
    let mut error_count = 0;

    for file in &files {
        let result = match operation {
            BatchOperation::Verify => read(file).and_then(|data| Ok(wemkit::validate_container(&data)?)),
            BatchOperation::Strip => command_strip(file, None, &quiet),
            BatchOperation::Downgrade => command_downgrade(file, None, &quiet),
            BatchOperation::Swap => command_swap(file, None, &quiet),
        };
        progress.increment(&file.display().to_string());
        if let Err(e) = result {
            formatter.print_error(&format!("{}: {:#}", file.display(), e));
            error_count += 1;
        }
    }

    if show_progress {
        formatter.print_info(&format!(
            "Completed: {} successful, {} errors",
            total - error_count,
            error_count
        ));
    }

    Ok(error_count)
}
