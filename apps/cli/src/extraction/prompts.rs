// Prompt and response schema for the LinkedIn-PDF extraction call.
// The five rewriting/extraction directives and the schema's required-field
// lists are part of the product contract — change them deliberately.

/// Fixed instruction sent alongside the encoded PDF.
pub const EXTRACTION_PROMPT: &str = "\
You are an expert career coach and ATS (Applicant Tracking System) specialist.
I am providing you with a PDF file of a LinkedIn profile.
Your task is to:
1. Extract all relevant professional information from this document.
2. Rewrite the professional summary to be high-impact, modern, and keyword-rich.
3. Rewrite experience bullet points using the STAR method (Situation, Task, Action, Result).
4. Focus on measurable achievements, quantification, and strong action verbs.
5. Organize skills into logical categories (e.g., Technical, Soft Skills, Tools).
6. Format the output strictly as a JSON object following the provided schema.

The input is a PDF version of a LinkedIn Profile. Please read it carefully.";

/// Structured-output schema constraining the extraction response.
/// Mirrors [`crate::models::resume::ResumeRecord`] field for field; the
/// top-level required subset is `fullName`, `experience`, `skills`.
pub fn resume_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "fullName": {"type": "STRING"},
            "email": {"type": "STRING"},
            "phone": {"type": "STRING"},
            "location": {"type": "STRING"},
            "linkedinUrl": {"type": "STRING"},
            "professionalSummary": {"type": "STRING"},
            "skills": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": {"type": "STRING"},
                        "items": {"type": "ARRAY", "items": {"type": "STRING"}}
                    },
                    "required": ["category", "items"]
                }
            },
            "experience": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "company": {"type": "STRING"},
                        "location": {"type": "STRING"},
                        "startDate": {"type": "STRING"},
                        "endDate": {"type": "STRING"},
                        "highlights": {"type": "ARRAY", "items": {"type": "STRING"}}
                    },
                    "required": ["title", "company", "highlights"]
                }
            },
            "education": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "degree": {"type": "STRING"},
                        "institution": {"type": "STRING"},
                        "location": {"type": "STRING"},
                        "graduationDate": {"type": "STRING"}
                    },
                    "required": ["degree", "institution"]
                }
            },
            "certifications": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["fullName", "experience", "skills"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names_required_subset() {
        let schema = resume_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["fullName", "experience", "skills"]);
    }

    #[test]
    fn test_schema_covers_every_record_field() {
        let schema = resume_response_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in [
            "fullName",
            "email",
            "phone",
            "location",
            "linkedinUrl",
            "professionalSummary",
            "skills",
            "experience",
            "education",
            "certifications",
        ] {
            assert!(properties.contains_key(field), "schema is missing {field}");
        }
    }

    #[test]
    fn test_prompt_keeps_rewriting_directives() {
        assert!(EXTRACTION_PROMPT.contains("STAR method"));
        assert!(EXTRACTION_PROMPT.contains("logical categories"));
        assert!(EXTRACTION_PROMPT.contains("strictly as a JSON object"));
    }
}
