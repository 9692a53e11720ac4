//! Resume Rewriter: interpolates the fixed template and makes exactly one generation call.
//!
//! The output is not validated against the requested structure; whatever the
//! model returns (trimmed) is the rewritten resume.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::optimizer::prompts::REWRITE_PROMPT_TEMPLATE;

pub fn build_rewrite_prompt(resume_text: &str, job_description: &str) -> String {
    fill_placeholders(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description),
            ("resume_text", resume_text),
            ("output_instruction", PLAIN_TEXT_INSTRUCTION),
        ],
    )
}

/// Substitutes `{name}` placeholders in one pass over the template.
///
/// Substituted values are never rescanned, so user text that happens to contain
/// `{job_description}` stays literal. Unknown `{...}` sequences are kept as-is.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub async fn rewrite_resume(
    resume_text: &str,
    job_description: &str,
    llm: &LlmClient,
) -> Result<String, AppError> {
    let prompt = build_rewrite_prompt(resume_text, job_description);
    let rewritten = llm.generate_text(&prompt).await?;
    info!(
        "Rewrote resume: {} chars in, {} chars out",
        resume_text.len(),
        rewritten.len()
    );
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::tests::{spawn_fake_gemini, spawn_server};

    #[test]
    fn test_prompt_contains_both_inputs_and_no_placeholders() {
        let prompt = build_rewrite_prompt("Jane Doe\nRust", "Senior Rust Engineer");
        assert!(prompt.contains("Jane Doe\nRust"));
        assert!(prompt.contains("Senior Rust Engineer"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{output_instruction}"));
    }

    #[test]
    fn test_job_description_precedes_resume() {
        let prompt = build_rewrite_prompt("RESUME_MARKER", "JD_MARKER");
        let jd = prompt.find("JD_MARKER").unwrap();
        let resume = prompt.find("RESUME_MARKER").unwrap();
        assert!(jd < resume);
    }

    #[test]
    fn test_placeholder_text_inside_inputs_stays_literal() {
        let prompt = build_rewrite_prompt("Template field: {job_description}", "Rust role");
        assert!(prompt.contains("Template field: {job_description}"));
        assert_eq!(prompt.matches("Rust role").count(), 1);
    }

    #[test]
    fn test_unknown_braces_are_kept() {
        assert_eq!(
            fill_placeholders("{a} {b} {", &[("a", "1")]),
            "1 {b} {"
        );
    }

    #[tokio::test]
    async fn test_rewrite_returns_model_text() {
        let base = spawn_fake_gemini("JANE DOE\nPROFESSIONAL SUMMARY\nRust engineer.").await;
        let llm = LlmClient::with_base_url("k".to_string(), &base).unwrap();
        let out = rewrite_resume("Jane Doe", "Rust role", &llm).await.unwrap();
        assert_eq!(out, "JANE DOE\nPROFESSIONAL SUMMARY\nRust engineer.");
    }

    #[tokio::test]
    async fn test_rewrite_failure_is_llm_error() {
        // Nothing routes here, so the fake server answers 404.
        let base = spawn_server(axum::Router::new()).await;
        let llm = LlmClient::with_base_url("k".to_string(), &base).unwrap();
        let err = rewrite_resume("Jane Doe", "Rust role", &llm)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
