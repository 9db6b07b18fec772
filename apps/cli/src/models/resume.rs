use serde::{Deserialize, Serialize};

/// The structured, schema-conforming representation of a candidate's resume
/// produced by extraction. An immutable snapshot — built once per successful
/// extraction, held by the shell for the lifetime of the result view, and
/// discarded on reset.
///
/// Field presence rules mirror the wire schema: `full_name`, `experience`
/// and `skills` must be present in the service response (no serde default),
/// everything else normalizes to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(default)]
    pub professional_summary: String,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// One skills category line: `category: item, item, ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub graduation_date: String,
}
