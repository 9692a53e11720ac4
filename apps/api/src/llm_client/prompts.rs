// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to prompts whose output is rendered line by line into documents.
/// The renderers treat every character literally, so markup would leak into the PDF.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond with plain text only. Do NOT use markdown syntax such as **, #, or ``` fences. \
    Put each section heading on its own line in UPPERCASE.";
