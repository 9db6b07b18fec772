//! Structured resume renderer — a pure mapping from a [`ResumeRecord`] to a
//! printable, single-column HTML document. No network, no mutation, no
//! re-validation: the record shape is guaranteed by the extraction contract.
//!
//! Section rules: Summary and Certifications are omitted entirely when
//! empty; Experience, Skills and Education render their headings even when
//! the record carries no entries.

use std::fmt::Write;

use crate::models::resume::ResumeRecord;

/// Structural stylesheet for the printed document. Scanner-safe serif-free
/// typography, single column, no icons or graphics.
const STYLESHEET: &str = "\
body { font-family: Arial, Helvetica, sans-serif; color: #111; margin: 0; }
main { max-width: 800px; margin: 0 auto; padding: 40px; }
header { text-align: center; border-bottom: 2px solid #111; padding-bottom: 12px; margin-bottom: 18px; }
h1 { font-size: 24px; letter-spacing: 3px; margin: 0; }
h2 { font-size: 15px; text-transform: uppercase; border-bottom: 1px solid #999; margin: 18px 0 8px; }
h3 { font-size: 13px; margin: 0; }
p, li, span { font-size: 12px; line-height: 1.5; }
ul { margin: 4px 0; padding-left: 20px; }
.contact { margin-top: 6px; color: #444; }
.contact span + span::before { content: ' \\2022  '; }
.row { display: flex; justify-content: space-between; align-items: baseline; }
.dates { font-style: italic; white-space: nowrap; }
.muted { color: #555; }
.entry { margin-bottom: 12px; }
@media print { main { padding: 0; } }";

/// Renders the record as a complete, self-contained HTML document.
/// Pure: identical input yields byte-identical output.
pub fn render_html(record: &ResumeRecord) -> String {
    let mut out = String::with_capacity(4096);

    // Infallible: `write!` into a String cannot fail.
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>\n{STYLESHEET}\n</style>\n</head>\n<body>\n<main>\n",
        escape(&record.full_name)
    );

    render_header(&mut out, record);
    render_summary(&mut out, record);
    render_experience(&mut out, record);
    render_skills(&mut out, record);
    render_education(&mut out, record);
    render_certifications(&mut out, record);

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn render_header(out: &mut String, record: &ResumeRecord) {
    let _ = write!(
        out,
        "<header>\n<h1>{}</h1>\n",
        escape(&record.full_name.to_uppercase())
    );

    out.push_str("<div class=\"contact\">");
    for field in [&record.email, &record.phone, &record.location] {
        if !field.is_empty() {
            let _ = write!(out, "<span>{}</span>", escape(field));
        }
    }
    if !record.linkedin_url.is_empty() {
        let _ = write!(
            out,
            "<span><a href=\"{}\">{}</a></span>",
            escape(&record.linkedin_url),
            escape(display_url(&record.linkedin_url))
        );
    }
    out.push_str("</div>\n</header>\n");
}

fn render_summary(out: &mut String, record: &ResumeRecord) {
    if record.professional_summary.is_empty() {
        return;
    }
    let _ = write!(
        out,
        "<section>\n<h2>Professional Summary</h2>\n<p>{}</p>\n</section>\n",
        escape(&record.professional_summary)
    );
}

fn render_experience(out: &mut String, record: &ResumeRecord) {
    out.push_str("<section>\n<h2>Work Experience</h2>\n");
    for exp in &record.experience {
        let _ = write!(
            out,
            "<div class=\"entry\">\n\
             <div class=\"row\"><h3>{}</h3><span class=\"dates\">{} \u{2013} {}</span></div>\n\
             <div class=\"row\"><span><strong>{}</strong></span><span class=\"muted\">{}</span></div>\n\
             <ul>\n",
            escape(&exp.title),
            escape(&exp.start_date),
            escape(&exp.end_date),
            escape(&exp.company),
            escape(&exp.location),
        );
        for highlight in &exp.highlights {
            let _ = write!(out, "<li>{}</li>\n", escape(highlight));
        }
        out.push_str("</ul>\n</div>\n");
    }
    out.push_str("</section>\n");
}

fn render_skills(out: &mut String, record: &ResumeRecord) {
    out.push_str("<section>\n<h2>Skills &amp; Competencies</h2>\n");
    for group in &record.skills {
        let items: Vec<String> = group.items.iter().map(|i| escape(i)).collect();
        let _ = write!(
            out,
            "<p><strong>{}:</strong> {}</p>\n",
            escape(&group.category),
            items.join(", ")
        );
    }
    out.push_str("</section>\n");
}

fn render_education(out: &mut String, record: &ResumeRecord) {
    out.push_str("<section>\n<h2>Education</h2>\n");
    for edu in &record.education {
        let _ = write!(
            out,
            "<div class=\"entry\">\n\
             <div class=\"row\"><h3>{}</h3><span class=\"dates\">{}</span></div>\n\
             <div class=\"row\"><span>{}</span><span class=\"muted\">{}</span></div>\n\
             </div>\n",
            escape(&edu.degree),
            escape(&edu.graduation_date),
            escape(&edu.institution),
            escape(&edu.location),
        );
    }
    out.push_str("</section>\n");
}

fn render_certifications(out: &mut String, record: &ResumeRecord) {
    if record.certifications.is_empty() {
        return;
    }
    out.push_str("<section>\n<h2>Certifications</h2>\n<ul>\n");
    for cert in &record.certifications {
        let _ = write!(out, "<li>{}</li>\n", escape(cert));
    }
    out.push_str("</ul>\n</section>\n");
}

/// Strips the scheme and a leading `www.` for display; the link target
/// keeps the original URL.
fn display_url(url: &str) -> &str {
    let trimmed = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    trimmed.strip_prefix("www.").unwrap_or(trimmed)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
