//! Inspect command implementation.
//!
//! Dumps the decoded header of a single WAV file, mirroring what the
//! report command sees before grouping.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use cuescan_wav::{Encoding, WavHeader};

use crate::render::{format_elapsed, format_timestamp};

/// Machine-readable dump of one parsed header.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    /// Path of the inspected file.
    pub path: String,
    /// Sample encoding ("PCM" for every accepted file).
    pub encoding: String,
    /// Number of channels.
    pub channels: u16,
    /// Sample frames per second.
    pub sample_rate: u32,
    /// Bits per sample per channel.
    pub bits_per_sample: u16,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Average bytes per second.
    pub avg_bytes_per_second: u32,
    /// Absolute offset of the first sample byte.
    pub data_offset: u64,
    /// Size of the sample payload in bytes.
    pub data_size: u32,
    /// Number of sample frames (real division).
    pub sample_count: f64,
    /// Payload duration in seconds.
    pub length_seconds: f64,
    /// Recording start from the bext chunk, when present.
    pub started: Option<String>,
    /// Embedded cue points in chunk order.
    pub cues: Vec<InspectCue>,
}

/// One cue point of the inspected file.
#[derive(Debug, Serialize)]
pub struct InspectCue {
    /// Cue id as stored in the file.
    pub id: u32,
    /// Offset in sample frames.
    pub sample_offset: u32,
    /// Offset in seconds.
    pub seconds: f64,
}

/// Runs the inspect command on `input`.
pub fn run(input: &Path, json: bool) -> Result<()> {
    let header = WavHeader::read_from(input)
        .with_context(|| format!("parsing {}", input.display()))?;
    let report = build_report(&header)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn build_report(header: &WavHeader) -> Result<InspectReport> {
    let encoding = match header.format.encoding {
        Encoding::Pcm => "PCM".to_string(),
        Encoding::Other(tag) => format!("OTHER({tag})"),
    };
    Ok(InspectReport {
        path: header.path.display().to_string(),
        encoding,
        channels: header.format.channels,
        sample_rate: header.format.sample_rate,
        bits_per_sample: header.format.bits_per_sample,
        block_align: header.format.block_align,
        avg_bytes_per_second: header.format.avg_bytes_per_second,
        data_offset: header.data.byte_offset,
        data_size: header.data.byte_size,
        sample_count: header.sample_count().context("computing the sample count")?,
        length_seconds: header
            .length_seconds()
            .context("computing the payload duration")?,
        started: header.start_datetime.map(format_timestamp),
        cues: header
            .cue_points_with_seconds()
            .context("computing cue offsets")?
            .iter()
            .map(|cue| InspectCue {
                id: cue.id,
                sample_offset: cue.sample_offset,
                seconds: cue.seconds,
            })
            .collect(),
    })
}

fn print_report(report: &InspectReport) {
    println!();
    println!("File: {}", report.path.bold());
    println!("  Encoding:    {}", report.encoding);
    println!("  Channels:    {}", report.channels);
    println!("  Sample rate: {} Hz", report.sample_rate);
    println!("  Bits:        {} bits", report.bits_per_sample);
    println!(
        "  Data:        {} bytes at offset {} ({})",
        report.data_size,
        report.data_offset,
        format_elapsed(report.length_seconds),
    );
    match &report.started {
        Some(ts) => println!("  Started:     {ts}"),
        None => println!("  Started:     unknown (no usable bext timestamp)"),
    }

    if report.cues.is_empty() {
        println!("  No cue points.");
    } else {
        println!("  Cue points:");
        for cue in &report.cues {
            println!(
                "    {:>4}  frame {:>10}  {}",
                cue.id,
                cue.sample_offset,
                format_elapsed(cue.seconds).green(),
            );
        }
    }
}
