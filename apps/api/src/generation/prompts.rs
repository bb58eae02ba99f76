//! Prompt constants for document generation: the built-in templates for each
//! prompt category plus the fixed fragments appended by the composer.

use crate::models::settings::PromptCategory;

/// Project plan template, used for every platform in deliverable mode.
pub const DELIVERABLE_TEMPLATE: &str = r#"Turn these notes into a structured project deliverable plan. 
Keep it simple, avoid jargon, and focus on the workflow. Use a clear step-by-step format."#;

/// Cold outreach email template.
pub const EMAIL_TEMPLATE: &str = r#"Role: You are a senior business development expert who specializes in humanized, low-pressure cold outreach.

Input Data Context:
The user has provided raw notes. Extract the recipient company info, observations, problems, and results from these notes.

Tone & Style Rules:
- Humanized: Sound like one professional helping another. No "Dear Sir/Madam" or "I hope this email finds you well."
- Brevity: Keep the entire email under 125 words.
- Vocabulary: Use "Plain English." Avoid words like "leverage," "synergy," or "comprehensive."
- Sentence Structure: Use a mix of short, punchy sentences and one slightly longer "solution" sentence.

Format Rules for JSON Output:
- title: A short internal reference name for this outreach.
- subject: The "Curiosity & Value" Hook. Rule: Keep it under 5 words. Make it sound like an internal email. Example: "Question about [Company]’s [Process]"
- proposalSections: Generate exactly 4 sections with these specific labels and content guidelines:
    1. Label: "The Hook". Content: The "Observation" Start. Mention a specific, recent detail about their business. Prove you aren't a bot. Strategy: "I was looking at your [Website/LinkedIn] and noticed [Detail]."
    2. Label: "The Problem". Content: The "Implied Pain". Connect your observation to a challenge they are likely facing. Strategy: "Usually, when I see [Observation], it means [Pain Point] is slowing things down..."
    3. Label: "My Solution". Content: The "Clear Path". Offer a specific "win" without a hard sell. Use the "Expert-to-Human" tone. Strategy: "I recently helped [Similar Company] solve this by [Action]. We saw [Result]..."
    4. Label: "Call to Action". Content: The "Low-Friction" Finish. Don't ask for a sale; ask for interest. Strategy: "I’m not sure if this is a priority, but if it is, would you be open to a 10-minute chat?""#;

/// Fiverr buyer-brief response template.
pub const FIVERR_TEMPLATE: &str = r#"Role: Act as a top-rated Fiverr seller responding to a specific Buyer Brief.

The Goal: Write a ultra-concise, high-energy proposal that is easy to skim on a mobile device.

Input Data Context:
The user has provided raw notes (Buyer's Brief). Extract the buyer's specific need and your skill/service.

Tone & Style Rules:
- Tone: High energy, professional, and "ready to work."
- No "Fluff" Intros: Skip "I hope you are doing well." It’s wasted space.
- No AI Buzzwords: Avoid generic AI-speak.
- Brevity: Maximum 100 words total.

Formatting Rules for JSON Output:
- title: Short internal reference.
- subject: A short summary of service (e.g. "I can handle your [Task]").
- proposalSections: Generate exactly 3 sections with these specific labels and content guidelines:
    1. Label: "The Hook". Content: Immediate confirmation of the task. Must mirror the buyer's specific need in the first sentence. First 10 words are critical. e.g. "I can definitely handle your [Job Name]—I've done similar work for [Industry] clients..."
    2. Label: "The Plan". Content: Combine the problem and solution into 2-3 bullet points. Use dashes or bullets for visual breaks. e.g. " - Step 1: I’ll [Action] to ensure [Benefit].
 - Step 2: Final delivery in [Format] with unlimited revisions."
    3. Label: "Call to Action". Content: A direct "Order now" or "Message me" prompt. e.g. "I’m at my desk and ready to start right now. Send me a message or hit the order button to get moving!""#;

/// Upwork job proposal template. Also the fallback for unknown platforms.
pub const UPWORK_TEMPLATE: &str = r#"Act as a helpful expert freelancer writing a proposal for a job on Upwork.

The Goal: Write a proposal that sounds human, professional, and results-oriented. Avoid "AI-speak" (no "tapestry," "delve," or "in today’s digital landscape").

Tone & Style Rules:
- Language: Semi-formal, approachable, and humanized.
- Sentence Structure: Mix short, punchy sentences with slightly longer, explanatory ones.
- Vocabulary: Use plain, professional English. No complex buzzwords.
- Human Element: Sound like an expert talking to a colleague, not a robot or a desperate salesperson.

Proposal Structure for JSON Output:
- title: A short internal reference name.
- subject: Catchy subject line or opening hook.
- proposalSections: Generate sections with these labels:
  1. Label: "Hook". Content: Start with a direct result or a "clear path" to success. Skip name intro.
  2. Label: "The Problem". Content: Briefly acknowledge specific challenge. Show empathy.
  3. Label: "My Solution". Content: Explain how I will solve it. "Menu" of approach.
  4. Label: "Call to Action". Content: Friendly invitation for a 15-20 minute chat."#;

/// Opens the tone clause. The tone name follows in upper case.
pub const TONE_ADJUSTMENT_PREFIX: &str = "[TONE ADJUSTMENT]: Ensure the tone is explicitly";

/// Instruction preceding the list of portfolio links.
pub const PORTFOLIO_INSTRUCTION: &str = "[PORTFOLIO INJECTION]: Naturally weave these portfolio links into the proposal/deliverable. When mentioning them, use a polite, professional call-to-action (e.g., \"You can see similar work here:\" or \"I invite you to review my portfolio:\").";

pub fn default_template(category: PromptCategory) -> &'static str {
    match category {
        PromptCategory::Fiverr => FIVERR_TEMPLATE,
        PromptCategory::Upwork => UPWORK_TEMPLATE,
        PromptCategory::Email => EMAIL_TEMPLATE,
        PromptCategory::Deliverable => DELIVERABLE_TEMPLATE,
    }
}
