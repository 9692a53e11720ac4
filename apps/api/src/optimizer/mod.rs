// Resume Rewriter: one generation call that turns resume text plus a job
// description into tailored resume text. All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod rewriter;
