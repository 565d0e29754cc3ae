//! Report command implementation.
//!
//! Scans a directory of recorder WAV files, reconstructs recording groups,
//! and renders every cue point on its group's timeline.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use cuescan_session::{group_headers, ContinuationMatcher, RecordingGroup};
use cuescan_wav::WavHeader;

use crate::input;
use crate::render::{format_elapsed, format_timestamp};

/// Machine-readable report for one scanned directory.
#[derive(Debug, Serialize)]
pub struct DirectoryReport {
    /// Directory that was scanned.
    pub directory: String,
    /// WAV files found in the directory.
    pub files_found: usize,
    /// Files whose headers could not be parsed.
    pub files_skipped: usize,
    /// Reconstructed recording groups, in file order.
    pub groups: Vec<GroupReport>,
}

/// Machine-readable report for one recording group.
#[derive(Debug, Serialize)]
pub struct GroupReport {
    /// Longest common prefix title (starred for multi-file groups).
    pub title: String,
    /// Member file names in recording order.
    pub files: Vec<String>,
    /// Recording start, when the first file carried a bext timestamp.
    pub started: Option<String>,
    /// Recording end, when the last file carried a bext timestamp.
    pub stopped: Option<String>,
    /// Cue points on the group timeline.
    pub cues: Vec<CueReport>,
}

/// One cue point of a group.
#[derive(Debug, Serialize)]
pub struct CueReport {
    /// 1-based cue number across the group.
    pub number: usize,
    /// Cue id from the owning file.
    pub cue_id: u32,
    /// Seconds elapsed since the group start.
    pub seconds_from_start: f64,
    /// `seconds_from_start` rendered as `H:MM:SS.mmm`.
    pub elapsed: String,
}

/// Runs the report command over `dir`.
pub fn run(dir: &Path, max_gap_secs: f64, json: bool) -> Result<()> {
    let paths = input::wav_files(dir)?;

    let mut headers = Vec::with_capacity(paths.len());
    let mut skipped = 0usize;
    for path in &paths {
        match WavHeader::read_from(path) {
            Ok(header) => headers.push(header),
            // One unreadable file must not sink the whole directory.
            Err(err) => {
                skipped += 1;
                eprintln!("{} {}: {err}", "skipping".yellow().bold(), path.display());
            }
        }
    }

    let matcher = ContinuationMatcher::new(max_gap_secs);
    let groups = group_headers(&matcher, headers).context("grouping recordings")?;
    let report = build_report(dir, paths.len(), skipped, &groups)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn build_report(
    dir: &Path,
    files_found: usize,
    files_skipped: usize,
    groups: &[RecordingGroup],
) -> Result<DirectoryReport> {
    let mut group_reports = Vec::with_capacity(groups.len());
    for group in groups {
        let title = group.title();
        let cues = group
            .cue_timeline()
            .with_context(|| format!("computing the cue timeline of group {title}"))?;
        group_reports.push(GroupReport {
            files: group
                .members()
                .iter()
                .filter_map(|m| m.file_name().map(str::to_string))
                .collect(),
            started: group.start_time().map(format_timestamp),
            stopped: group
                .end_time()
                .with_context(|| format!("computing the end time of group {title}"))?
                .map(format_timestamp),
            cues: cues
                .iter()
                .map(|cue| CueReport {
                    number: cue.number,
                    cue_id: cue.cue_id,
                    seconds_from_start: cue.seconds_from_start,
                    elapsed: format_elapsed(cue.seconds_from_start),
                })
                .collect(),
            title,
        });
    }

    Ok(DirectoryReport {
        directory: dir.display().to_string(),
        files_found,
        files_skipped,
        groups: group_reports,
    })
}

fn print_report(report: &DirectoryReport) {
    println!();
    println!("Directory: {}", report.directory.bold());

    if report.groups.is_empty() {
        println!();
        println!("No parseable WAV files found.");
    }

    for group in &report.groups {
        println!();
        println!("  {} {}", "GROUP".cyan().bold(), group.title.bold());
        match &group.started {
            Some(ts) => println!("   - Recording started {ts}"),
            None => println!("   - Recording start time unknown"),
        }
        for cue in &group.cues {
            println!(
                "      Cue {:>3} found {} after start",
                cue.number,
                cue.elapsed.green(),
            );
        }
        match &group.stopped {
            Some(ts) => println!("   - Recording stopped {ts}"),
            None => println!("   - Recording stop time unknown"),
        }
    }

    if report.files_skipped > 0 {
        println!();
        println!(
            "{} {} file(s) could not be parsed",
            "warning:".yellow().bold(),
            report.files_skipped,
        );
    }
}
