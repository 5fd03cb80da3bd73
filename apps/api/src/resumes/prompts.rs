// Prompt template for résumé extraction.

/// Upper bound on résumé characters embedded in the prompt.
pub const MAX_RESUME_CHARS: usize = 30_000;

/// Extraction prompt. Replace `{resume_text}` before sending.
pub const RESUME_EXTRACTION_PROMPT: &str = r#"You are an expert technical recruiter and career coach. Analyze the following resume text and extract the information into a valid JSON object. The JSON object must conform to the following structure, and all fields must be populated. Do not include any text or markdown formatting before or after the JSON object.

Resume Text:
"""
{resume_text}
"""

JSON Structure:
{
  "name": "string | null",
  "email": "string | null",
  "phone": "string | null",
  "linkedin_url": "string | null",
  "portfolio_url/github": "string | null",
  "summary": "string | null",
  "work_experience": [{ "role": "string", "company": "string", "duration": "string", "description": ["string"] }],
  "education": [{ "degree": "string", "institution": "string", "graduation_year": "string" }],
  "technical_skills": ["string"],
  "soft_skills": ["string"],
  "projects": [{"name":"string","description":"string"}],
  "certifications": ["string"],
  "resume_rating": "number (1-10)",
  "improvement_areas": "string",
  "upskill_suggestions": ["string"]
}
"#;

/// Renders the extraction prompt around the first `MAX_RESUME_CHARS`
/// characters of `resume_text`.
pub fn build_prompt(resume_text: &str) -> String {
    RESUME_EXTRACTION_PROMPT.replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS))
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
