// LLM prompt constants for job extraction.

/// Extraction prompt template. Replace `{page_text}` before sending.
pub const JOB_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract job details from this job posting:

{page_text}

Return ONLY a valid JSON object:
{
    "company": "company name",
    "position": "job title",
    "notes": "2-3 sentence summary of key requirements"
}

ONLY return the JSON, nothing else."#;
