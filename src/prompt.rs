//! Prompt assembly for delegated Q&A
//!
//! The full transcript is forwarded verbatim on every question. No
//! truncation or summarization is applied before inclusion, which is a
//! known latency risk for long meetings.

use crate::transcript::TranscriptEntry;

const TRANSCRIPT_HEADER: &str = "MEETING TRANSCRIPT:";
const QUESTION_HEADER: &str = "USER QUESTION:";
const INSTRUCTIONS: &str =
    "Answer based ONLY on the meeting transcript above.\nBe concise and helpful.";

/// Builds the context block handed to the external response generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAssembler;

impl PromptAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Render the transcript snapshot and question into a single prompt:
    /// a fixed header, one `[speaker]: text` line per entry in insertion
    /// order, the literal question, and the answer instructions.
    pub fn assemble(&self, entries: &[TranscriptEntry], question: &str) -> String {
        let mut prompt = String::from(TRANSCRIPT_HEADER);
        prompt.push_str("\n\n");

        for entry in entries {
            prompt.push_str(&format!("[{}]: {}\n", entry.speaker, entry.text));
        }

        prompt.push_str(&format!("\n{} {}\n\n{}\n", QUESTION_HEADER, question, INSTRUCTIONS));
        prompt
    }
}
