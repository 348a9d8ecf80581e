//! Final meeting summary
//!
//! Rendered to an output sink when the process is terminating, whether
//! the shutdown was orderly or interrupted.

use crate::transcript::TranscriptEntry;
use std::io::{self, Write};

const BANNER: &str = "======================================================================";

/// Renders the accumulated transcript as a human-readable summary.
///
/// Purely presentational; session state is never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReporter;

impl SummaryReporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the summary to `out`. Callers skip this when the transcript
    /// is empty.
    pub fn render(&self, entries: &[TranscriptEntry], out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out, "MEETING SUMMARY")?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out)?;
        writeln!(out, "Transcript ({} entries):", entries.len())?;
        writeln!(out, "----------------------------------------------------------------------")?;

        for entry in entries {
            writeln!(out, "[{}]: {}", entry.speaker, entry.text)?;
        }

        writeln!(out)?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out, "Summary Complete")?;
        writeln!(out, "{}", BANNER)?;
        writeln!(out)?;

        Ok(())
    }
}
