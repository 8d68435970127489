//! CLI Command Implementations
//!
//! Each command loads WAV files, runs the analyzer and prints to stdout.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::analysis::{check_all_platforms, check_compliance, diff, Analyzer, ComplianceReport, Platform};
use crate::audio::load_wav;
use crate::error::Result;

/// Analyze one file and print a summary or JSON.
pub fn analyze(analyzer: &Analyzer, input: &Path, json: bool) -> Result<()> {
    info!("Analyzing: {}", input.display());

    let result = analyzer.analyze(&load_wav(input)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", input.display());
        println!("{}", result.summary());
    }

    Ok(())
}

/// Compare two files.
pub fn compare(analyzer: &Analyzer, a: &Path, b: &Path) -> Result<()> {
    info!("Comparing: {} vs {}", a.display(), b.display());

    let result_a = analyzer.analyze(&load_wav(a)?)?;
    let result_b = analyzer.analyze(&load_wav(b)?)?;
    let d = diff(&result_a, &result_b);

    println!("A: {}", a.display());
    println!("B: {}", b.display());
    println!("{:-<60}", "");
    println!("Loudness difference:    {:.2} LU", d.loudness_diff);
    println!("Correlation difference: {:.3}", d.correlation_diff);
    println!("Width difference:       {:.3}", d.width_diff);

    Ok(())
}

/// Check one file against one or all platform targets.
pub fn compliance(analyzer: &Analyzer, input: &Path, platform: Option<&str>) -> Result<()> {
    info!("Checking compliance: {}", input.display());

    let result = analyzer.analyze(&load_wav(input)?)?;
    let integrated = result.loudness.integrated;

    let reports = match platform {
        Some(name) => vec![check_compliance(integrated, name.parse::<Platform>()?)],
        None => check_all_platforms(integrated),
    };

    println!("Integrated loudness: {:.1} LUFS", integrated);
    println!("{:-<60}", "");
    for report in &reports {
        println!("{}", format_report(report));
    }

    Ok(())
}

fn format_report(report: &ComplianceReport) -> String {
    let status = if report.compliant { "PASS" } else { "FAIL" };
    format!(
        "{:<12} target {:>6.1} LUFS  diff {:>+6.1} LU  gain {:>+6.1} dB  {}",
        report.platform.name(),
        report.target,
        report.difference,
        report.gain_db,
        status
    )
}

/// Analyze every `.wav` file below `dir`.
///
/// Files that fail to load or analyze are logged and skipped.
pub fn batch(analyzer: &Analyzer, dir: &Path, json: bool) -> Result<()> {
    info!("Scanning: {}", dir.display());

    let files = find_wav_files(dir);
    let mut analyzed = 0usize;

    for path in &files {
        let result = match load_wav(path).and_then(|set| analyzer.analyze(&set)) {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping {}: {} ({})", path.display(), e, e.error_code());
                continue;
            }
        };
        analyzed += 1;

        if json {
            let line = serde_json::json!({
                "path": path.display().to_string(),
                "result": result,
            });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!(
                "{:<50} {:>7.1} LUFS {:>7.1} dBTP {:>5.1} LU",
                path.display(),
                result.loudness.integrated,
                result.loudness.true_peak,
                result.loudness.loudness_range
            );
        }
    }

    info!("Analyzed {} of {} files", analyzed, files.len());
    Ok(())
}

/// All `.wav` files below `dir`, sorted by path.
pub fn find_wav_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Cannot read directory entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        })
        .collect();
    files.sort();
    files
}
