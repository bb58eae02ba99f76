// Prompt fragments shared by backends that cannot constrain output natively.

/// Precedes the rendered schema in the system message.
pub const JSON_STRUCTURE_INSTRUCTION: &str =
    "IMPORTANT: You must respond with valid JSON matching the following structure.";

/// Prefix for the user's raw notes in every request.
pub const RAW_NOTES_PREFIX: &str = "RAW NOTES: ";
