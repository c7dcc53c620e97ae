/// Structured-notes parsing: raw note text -> Section/Subsection/point tree
use regex::Regex;

use crate::notes_data::{Section, Subsection};

/// Classification of a single trimmed input line
#[derive(Debug, Clone, PartialEq)]
enum LineTag {
    /// `# Title`
    SectionHeading(String),
    /// `## Title`
    SubsectionHeading(String),
    /// `1. item` — text with the numeral/period marker stripped
    NumberedItem(String),
    /// `- item` — text with the dash marker stripped
    BulletItem(String),
    /// Anything else
    Plain,
}

/// Regex-backed line classifier, compiled once per parse
struct LineClassifier {
    section: Regex,
    subsection: Regex,
    numbered: Regex,
    bullet: Regex,
}

impl LineClassifier {
    fn new() -> LineClassifier {
        // The patterns are fixed literals, so compilation cannot fail
        LineClassifier {
            section: Regex::new(r"^#\s+(.+)$").unwrap(),
            subsection: Regex::new(r"^##\s+(.+)$").unwrap(),
            numbered: Regex::new(r"^\d+\.\s+(.+)$").unwrap(),
            bullet: Regex::new(r"^-\s+(.+)$").unwrap(),
        }
    }

    fn classify(&self, line: &str) -> LineTag {
        if let Some(caps) = self.subsection.captures(line) {
            LineTag::SubsectionHeading(caps[1].to_string())
        } else if let Some(caps) = self.section.captures(line) {
            LineTag::SectionHeading(caps[1].to_string())
        } else if let Some(caps) = self.numbered.captures(line) {
            LineTag::NumberedItem(caps[1].to_string())
        } else if let Some(caps) = self.bullet.captures(line) {
            LineTag::BulletItem(caps[1].to_string())
        } else {
            LineTag::Plain
        }
    }
}

/// Content-quality filter: plain lines this short are dropped as noise
const MIN_CONTENT_LEN: usize = 6;

/// Title of the section synthesized from the key-points accumulator
const KEY_POINTS_TITLE: &str = "Key Points";

/// Title of the degenerate fallback section for unstructured input
const FALLBACK_TITLE: &str = "Content Notes";

/// Parse loosely-formatted note text into an outline tree.
///
/// Single forward pass over non-blank, trimmed lines:
/// 1. `# Title` opens a new section (pushing the previous one) and leaves
///    key-points mode.
/// 2. `## Title` opens a subsection under the open section; lost if no
///    section is open. A title containing "key points" (case-insensitive)
///    enters key-points mode and clears the accumulator; any other
///    subsection title leaves the mode.
/// 3. `1. item` inside key-points mode goes to the accumulator. Outside the
///    mode the whole line is ordinary content, subject to the length filter,
///    so numbered lists elsewhere flatten into prose. Known quirk, kept.
/// 4. `- item` goes to the open subsection's points, else (marker stripped)
///    to the open section's content, else is dropped.
/// 5. Any other line longer than 5 characters becomes section content;
///    shorter lines and lines outside any section are dropped.
///
/// Post-pass: a non-empty accumulator becomes a synthesized "Key Points"
/// section, spliced immediately after the first section whose title contains
/// "overview" (case-insensitive), or at index 1. If no sections were found
/// at all, the result is a single "Content Notes" section holding the
/// blank-filtered input as one paragraph.
///
/// Total: never fails, always returns at least one section.
pub fn parse(raw: &str) -> Vec<Section> {
    let classifier = LineClassifier::new();

    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;
    let mut in_key_points = false;
    let mut key_points: Vec<String> = Vec::new();

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match classifier.classify(line) {
            LineTag::SectionHeading(title) => {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                current = Some(Section::new(title));
                in_key_points = false;
            }
            LineTag::SubsectionHeading(title) => {
                if let Some(section) = current.as_mut() {
                    in_key_points = title.to_lowercase().contains("key points");
                    if in_key_points {
                        key_points.clear();
                    }
                    section.subsections.push(Subsection::new(title));
                }
            }
            LineTag::NumberedItem(text) => {
                if in_key_points {
                    key_points.push(text);
                } else if let Some(section) = current.as_mut() {
                    // Numbered lines outside key-points mode are plain
                    // content, full marker included, length filter applied
                    if line.chars().count() >= MIN_CONTENT_LEN {
                        section.content.push(line.to_string());
                    }
                }
            }
            LineTag::BulletItem(text) => {
                if let Some(section) = current.as_mut() {
                    if let Some(sub) = section.subsections.last_mut() {
                        sub.points.push(text);
                    } else {
                        section.content.push(text);
                    }
                }
            }
            LineTag::Plain => {
                if line.chars().count() >= MIN_CONTENT_LEN {
                    if let Some(section) = current.as_mut() {
                        section.content.push(line.to_string());
                    }
                }
            }
        }
    }

    if let Some(done) = current.take() {
        sections.push(done);
    }

    if !key_points.is_empty() && !sections.is_empty() {
        let position = splice_position(&sections);
        let mut synthesized = Section::new(KEY_POINTS_TITLE.to_string());
        synthesized.points = Some(key_points);
        sections.insert(position, synthesized);
    }

    if sections.is_empty() {
        sections.push(fallback_section(raw));
    }

    sections
}

/// Insertion index for the synthesized key-points section: right after the
/// first "overview" section, else index 1 (clamped for single-section trees)
fn splice_position(sections: &[Section]) -> usize {
    sections
        .iter()
        .position(|s| s.title.to_lowercase().contains("overview"))
        .map(|i| i + 1)
        .unwrap_or(1)
        .min(sections.len())
}

/// Degenerate single-section tree for input with no heading markers
fn fallback_section(raw: &str) -> Section {
    let body = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<&str>>()
        .join("\n");

    let mut section = Section::new(FALLBACK_TITLE.to_string());
    if !body.is_empty() {
        section.content.push(body);
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_headings_falls_back() {
        let sections = parse("just some unstructured prose\nwith two lines");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Content Notes");
        assert_eq!(
            sections[0].content,
            vec!["just some unstructured prose\nwith two lines".to_string()]
        );
        assert!(sections[0].subsections.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        let sections = parse("");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Content Notes");
        assert!(sections[0].content.is_empty());
    }

    #[test]
    fn test_parse_canonical_document() {
        let input = "# Overview\nSome intro\n## Key Points\n1. First\n2. Second\n# Details\n- a detail";
        let sections = parse(input);

        assert_eq!(sections.len(), 3);

        // Overview keeps its intro and an empty-pointed key-points subsection
        assert_eq!(sections[0].title, "Overview");
        assert_eq!(sections[0].content, vec!["Some intro".to_string()]);
        assert_eq!(sections[0].subsections.len(), 1);
        assert_eq!(sections[0].subsections[0].title, "Key Points");
        assert!(sections[0].subsections[0].points.is_empty());

        // Synthesized section spliced immediately after Overview
        assert_eq!(sections[1].title, "Key Points");
        assert_eq!(
            sections[1].points,
            Some(vec!["First".to_string(), "Second".to_string()])
        );

        // Bullet with no open subsection lands in section content
        assert_eq!(sections[2].title, "Details");
        assert_eq!(sections[2].content, vec!["a detail".to_string()]);
    }

    #[test]
    fn test_orphan_bullet_is_dropped() {
        let sections = parse("- orphan");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Content Notes");
    }

    #[test]
    fn test_short_plain_lines_are_dropped() {
        let sections = parse("# Title\nhello\nhi\na longer paragraph");

        assert_eq!(sections.len(), 1);
        // "hello" is 5 chars, "hi" is 2: both filtered out
        assert_eq!(sections[0].content, vec!["a longer paragraph".to_string()]);
    }

    #[test]
    fn test_length_filter_counts_characters_not_bytes() {
        // "héllo" is 5 characters (6 bytes): still noise. "héllos" is 6.
        let sections = parse("# Title\nhéllo\nhéllos");

        assert_eq!(sections[0].content, vec!["héllos".to_string()]);
    }

    #[test]
    fn test_bullets_attach_to_open_subsection() {
        let input = "# Setup\n## Requirements\n- rustc\n- wasm-pack";
        let sections = parse(input);

        assert_eq!(sections[0].subsections.len(), 1);
        assert_eq!(
            sections[0].subsections[0].points,
            vec!["rustc".to_string(), "wasm-pack".to_string()]
        );
        assert!(sections[0].content.is_empty());
    }

    #[test]
    fn test_numbered_lines_outside_key_points_flatten_to_content() {
        let input = "# Steps\n## Install\n1. Download the installer\n2. Run it";
        let sections = parse(input);

        // Not a key-points subsection: numbering is kept as prose, and the
        // subsection collects nothing
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].content,
            vec!["1. Download the installer".to_string(), "2. Run it".to_string()]
        );
        assert!(sections[0].subsections[0].points.is_empty());
    }

    #[test]
    fn test_short_numbered_line_outside_key_points_is_dropped() {
        let sections = parse("# Steps\n1. Hi");

        // "1. Hi" is 5 chars: falls to the content filter and is dropped
        assert!(sections[0].content.is_empty());
    }

    #[test]
    fn test_key_points_splice_without_overview_goes_to_index_1() {
        let input = "# Intro\ntext here\n## Key Points\n1. only point\n# More\nmore text";
        let sections = parse(input);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "Intro");
        assert_eq!(sections[1].title, "Key Points");
        assert_eq!(sections[1].points, Some(vec!["only point".to_string()]));
        assert_eq!(sections[2].title, "More");
    }

    #[test]
    fn test_key_points_splice_after_trailing_overview() {
        let input = "# Detail\nbody text\n# Course Overview\n## Key Points\n1. the point";
        let sections = parse(input);

        // Overview match is case-insensitive and substring-based; the
        // synthesized section may legally land at the end of the list
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].title, "Course Overview");
        assert_eq!(sections[2].title, "Key Points");
    }

    #[test]
    fn test_new_section_leaves_key_points_mode() {
        let input = "# Overview\n## Key Points\n# Next\n1. a numbered line";
        let sections = parse(input);

        // The numbered line follows a section heading, so it is content of
        // "Next", not an accumulated key point; nothing is synthesized
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].content, vec!["1. a numbered line".to_string()]);
        assert!(sections.iter().all(|s| s.points.is_none()));
    }

    #[test]
    fn test_other_subsection_leaves_key_points_mode() {
        let input = "# Overview\n## Key Points\n1. kept\n## Examples\n1. not a key point";
        let sections = parse(input);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].title, "Key Points");
        assert_eq!(sections[1].points, Some(vec!["kept".to_string()]));
        // "1. not a key point" fell through to plain content of Overview
        assert_eq!(sections[0].content, vec!["1. not a key point".to_string()]);
    }

    #[test]
    fn test_second_key_points_subsection_resets_accumulator() {
        let input = "# Overview\n## Key Points\n1. stale\n# Recap\n## Key Points\n1. fresh";
        let sections = parse(input);

        let synthesized = sections
            .iter()
            .find(|s| s.points.is_some())
            .expect("synthesized section");
        assert_eq!(synthesized.points, Some(vec!["fresh".to_string()]));
    }

    #[test]
    fn test_subsection_before_any_section_is_lost() {
        let input = "## Lost Heading\n# Real Section\nactual content";
        let sections = parse(input);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Real Section");
        assert!(sections[0].subsections.is_empty());
    }

    #[test]
    fn test_key_points_with_no_sections_are_discarded() {
        // Subsections need an open section, so the accumulator can never
        // fill without one; numbered lines alone are not key points
        let sections = parse("1. floating item one\n2. floating item two");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Content Notes");
        assert!(sections[0].points.is_none());
    }

    #[test]
    fn test_single_overview_section_splices_at_end() {
        let input = "# Overview\nintro text\n## Key Points\n1. the point";
        let sections = parse(input);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Overview");
        assert_eq!(sections[1].title, "Key Points");
    }

    #[test]
    fn test_heading_markers_require_trailing_text() {
        // Bare "#" or "##" lines are not headings; short ones filter out
        let sections = parse("# Title\n#\n##\n### deeper heading");

        assert_eq!(sections.len(), 1);
        // "### deeper heading" matches no pattern and survives the filter
        assert_eq!(sections[0].content, vec!["### deeper heading".to_string()]);
    }

    #[test]
    fn test_whitespace_and_blank_lines_ignored() {
        let input = "\n\n  # Padded Title  \n\n   padded content line   \n\n";
        let sections = parse(input);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Padded Title");
        assert_eq!(sections[0].content, vec!["padded content line".to_string()]);
    }
}
