//! Maps the model's decoded JSON object onto an insertable `NewResume`.
//!
//! The model is told the exact shape but routinely drifts, so every field is
//! read leniently: wrong types become `None`, list fields always end up as a
//! JSON array.

use serde_json::{Map, Value};

use crate::models::resume::NewResume;

/// Keys accepted for the portfolio link, in priority order.
const PORTFOLIO_KEYS: [&str; 3] = ["portfolio_url/github", "portfolio_url", "github"];

pub fn map_to_new_resume(file_name: &str, fields: &Map<String, Value>, raw: &str) -> NewResume {
    NewResume {
        file_name: file_name.to_string(),
        name: text_field(fields, "name"),
        email: text_field(fields, "email"),
        phone: text_field(fields, "phone"),
        linkedin_url: text_field(fields, "linkedin_url"),
        portfolio_url: PORTFOLIO_KEYS
            .iter()
            .filter_map(|key| text_field(fields, key))
            .find(|url| !url.is_empty()),
        summary: text_field(fields, "summary"),
        work_experience: list_field(fields, "work_experience"),
        education: list_field(fields, "education"),
        technical_skills: list_field(fields, "technical_skills"),
        soft_skills: list_field(fields, "soft_skills"),
        projects: list_field(fields, "projects"),
        certifications: list_field(fields, "certifications"),
        resume_rating: fields.get("resume_rating").and_then(rating),
        improvement_areas: text_field(fields, "improvement_areas"),
        upskill_suggestions: list_field(fields, "upskill_suggestions"),
        llm_raw: Some(raw.to_string()),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Arrays pass through. A lone object or non-empty string is wrapped so the
/// value is not lost; everything else becomes `[]`.
fn list_field(fields: &Map<String, Value>, key: &str) -> Value {
    match fields.get(key) {
        Some(Value::Array(items)) => Value::Array(items.clone()),
        Some(obj @ Value::Object(_)) => Value::Array(vec![obj.clone()]),
        Some(Value::String(s)) if !s.trim().is_empty() => Value::Array(vec![Value::String(s.clone())]),
        _ => Value::Array(Vec::new()),
    }
}

/// Integer as-is, floats rounded, numeric strings parsed. No range check,
/// but values outside `i32` and non-finite floats are dropped.
fn rating(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(v) => i32::try_from(v).ok(),
            None => n.as_f64().and_then(rounded),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(rounded))
        }
        _ => None,
    }
}

fn rounded(f: f64) -> Option<i32> {
    let f = f.round();
    if f.is_finite() && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_full_object_maps_every_field() {
        let parsed = fields(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 0000 0000",
            "linkedin_url": "https://linkedin.com/in/ada",
            "portfolio_url/github": "https://github.com/ada",
            "summary": "Mathematician.",
            "work_experience": [{"role": "Analyst", "company": "Babbage & Co", "duration": "1842-1843", "description": ["Wrote notes"]}],
            "education": [{"degree": "Private tutoring", "institution": "Home", "graduation_year": "1835"}],
            "technical_skills": ["Mathematics"],
            "soft_skills": ["Writing"],
            "projects": [{"name": "Note G", "description": "Bernoulli numbers"}],
            "certifications": [],
            "resume_rating": 9,
            "improvement_areas": "Add dates",
            "upskill_suggestions": ["Learn Rust"]
        }));

        let resume = map_to_new_resume("ada.pdf", &parsed, "raw text");

        assert_eq!(resume.file_name, "ada.pdf");
        assert_eq!(resume.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(resume.portfolio_url.as_deref(), Some("https://github.com/ada"));
        assert_eq!(resume.work_experience[0]["company"], "Babbage & Co");
        assert_eq!(resume.technical_skills, json!(["Mathematics"]));
        assert_eq!(resume.certifications, json!([]));
        assert_eq!(resume.resume_rating, Some(9));
        assert_eq!(resume.improvement_areas.as_deref(), Some("Add dates"));
        assert_eq!(resume.llm_raw.as_deref(), Some("raw text"));
    }

    #[test]
    fn test_missing_lists_default_to_empty_arrays() {
        let resume = map_to_new_resume("x.pdf", &fields(json!({"soft_skills": null})), "{}");
        for list in [
            &resume.work_experience,
            &resume.education,
            &resume.technical_skills,
            &resume.soft_skills,
            &resume.projects,
            &resume.certifications,
            &resume.upskill_suggestions,
        ] {
            assert_eq!(list, &json!([]));
        }
        assert!(resume.name.is_none());
        assert!(resume.resume_rating.is_none());
    }

    #[test]
    fn test_portfolio_alternate_keys() {
        let resume = map_to_new_resume(
            "x.pdf",
            &fields(json!({"portfolio_url/github": "", "github": "https://github.com/bob"})),
            "",
        );
        assert_eq!(resume.portfolio_url.as_deref(), Some("https://github.com/bob"));

        let resume = map_to_new_resume(
            "x.pdf",
            &fields(json!({"portfolio_url": "https://bob.dev", "github": "https://github.com/bob"})),
            "",
        );
        assert_eq!(resume.portfolio_url.as_deref(), Some("https://bob.dev"));
    }

    #[test]
    fn test_rating_coercion() {
        assert_eq!(rating(&json!(7)), Some(7));
        assert_eq!(rating(&json!(7.6)), Some(8));
        assert_eq!(rating(&json!(" 6 ")), Some(6));
        assert_eq!(rating(&json!("6.5")), Some(7));
        assert_eq!(rating(&json!("number (1-10)")), None);
        assert_eq!(rating(&json!(42)), Some(42));
        assert_eq!(rating(&json!(null)), None);
    }

    #[test]
    fn test_rating_rejects_non_finite_and_out_of_range() {
        assert_eq!(rating(&json!("inf")), None);
        assert_eq!(rating(&json!("-infinity")), None);
        assert_eq!(rating(&json!("NaN")), None);
        assert_eq!(rating(&json!("1e20")), None);
        assert_eq!(rating(&json!(1e20)), None);
        assert_eq!(rating(&json!(9_000_000_000i64)), None);
    }

    #[test]
    fn test_scalar_lists_are_wrapped() {
        let resume = map_to_new_resume(
            "x.pdf",
            &fields(json!({
                "technical_skills": "Rust, SQL",
                "education": {"degree": "BSc"},
                "soft_skills": "",
                "projects": 3
            })),
            "",
        );
        assert_eq!(resume.technical_skills, json!(["Rust, SQL"]));
        assert_eq!(resume.education, json!([{"degree": "BSc"}]));
        assert_eq!(resume.soft_skills, json!([]));
        assert_eq!(resume.projects, json!([]));
    }

    #[test]
    fn test_non_string_text_fields() {
        let resume = map_to_new_resume(
            "x.pdf",
            &fields(json!({"phone": 5550100, "email": ["a@b.c"]})),
            "",
        );
        assert_eq!(resume.phone.as_deref(), Some("5550100"));
        assert!(resume.email.is_none());
    }
}
