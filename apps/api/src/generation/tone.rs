//! Tone calibration — maps a requested tone to the clause appended to the prompt.
//!
//! `Standard` adds nothing. Every other tone gets the adjustment header naming
//! the tone in upper case plus exactly one fixed elaboration sentence.

use crate::generation::prompts::TONE_ADJUSTMENT_PREFIX;
use crate::models::document::Tone;

/// The fixed elaboration sentence for a tone, `None` for `Standard`.
pub fn tone_elaboration(tone: Tone) -> Option<&'static str> {
    match tone {
        Tone::Standard => None,
        Tone::Formal => {
            Some("Use strict professional etiquette, precise terminology, and zero slang.")
        }
        Tone::Casual => {
            Some("Keep it relaxed, friendly, and conversational (like a Slack message).")
        }
        Tone::Urgent => Some("Emphasize speed, immediate availability, and critical timelines."),
        Tone::Persuasive => {
            Some("Focus on ROI, value proposition, and benefits. Use strong action verbs.")
        }
    }
}

/// The full clause appended to the prompt, including its leading blank line.
pub fn tone_clause(tone: Tone) -> Option<String> {
    let elaboration = tone_elaboration(tone)?;
    Some(format!(
        "\n\n{TONE_ADJUSTMENT_PREFIX} {}. {elaboration}",
        tone.as_str().to_uppercase()
    ))
}
