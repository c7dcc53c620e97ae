/// Export surfaces for a parsed outline: plain-text file, print document,
/// and summary statistics
use crate::notes_data::{NoteStats, Section};

/// Render the outline as the plain-text export layout.
///
/// The layout is the persisted download/copy format and is deterministic:
/// a "VIDEO NOTES" header, then per section an indexed title with an `=`
/// underline, content paragraphs, an optional numbered "Key Points:" block,
/// and indexed subsection headings with their bulleted points.
pub fn format_notes(sections: &[Section]) -> String {
    let mut out = String::from("VIDEO NOTES\n\n");

    for (i, section) in sections.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, section.title));
        out.push_str(&"=".repeat(section.title.chars().count() + 4));
        out.push('\n');

        for paragraph in &section.content {
            out.push_str(paragraph);
            out.push_str("\n\n");
        }

        if let Some(points) = &section.points {
            out.push_str("Key Points:\n");
            for (j, point) in points.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", j + 1, point));
            }
        }

        for (j, subsection) in section.subsections.iter().enumerate() {
            out.push_str(&format!("{}.{} {}\n", i + 1, j + 1, subsection.title));
            for point in &subsection.points {
                out.push_str(&format!("  - {}\n", point));
            }
        }

        out.push('\n');
    }

    out
}

/// Build a standalone HTML document embedding the rendered outline, suitable
/// for handing to a print window
pub fn print_document(sections: &[Section]) -> String {
    let mut body = String::new();

    for section in sections {
        body.push_str(&format!("<h2>{}</h2>\n", escape_html(&section.title)));

        for paragraph in &section.content {
            body.push_str(&format!("<p>{}</p>\n", escape_html(paragraph)));
        }

        if let Some(points) = &section.points {
            body.push_str("<ol>\n");
            for point in points {
                body.push_str(&format!("<li>{}</li>\n", escape_html(point)));
            }
            body.push_str("</ol>\n");
        }

        for subsection in &section.subsections {
            body.push_str(&format!("<h3>{}</h3>\n", escape_html(&subsection.title)));
            if !subsection.points.is_empty() {
                body.push_str("<ul>\n");
                for point in &subsection.points {
                    body.push_str(&format!("<li>{}</li>\n", escape_html(point)));
                }
                body.push_str("</ul>\n");
            }
        }
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Video Notes</title>\n\
         <style>body {{ font-family: sans-serif; margin: 40px; }} h2 {{ border-bottom: 1px solid #ccc; }}</style>\n\
         </head>\n<body>\n<h1>Video Notes</h1>\n{}</body>\n</html>\n",
        body
    )
}

/// Minimal HTML escaping for text interpolated into the print document
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Derive summary statistics for a parsed tree. The word count comes from
/// the backend when it reported one, else from whitespace-splitting the raw
/// note text.
pub fn compute_stats(sections: &[Section], raw: &str, backend_word_count: Option<u64>) -> NoteStats {
    let total_points = sections
        .iter()
        .map(|section| {
            let own = section.points.as_ref().map_or(0, |p| p.len());
            let nested: usize = section.subsections.iter().map(|s| s.points.len()).sum();
            own + nested
        })
        .sum();

    let word_count = match backend_word_count {
        Some(count) => count as usize,
        None => raw.split_whitespace().count(),
    };

    NoteStats {
        section_count: sections.len(),
        total_points,
        word_count,
    }
}
