/// Data structures for the notes outline tree
use serde::{Deserialize, Serialize};

/// A root-level unit of the outline, produced from a `# ` heading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub title: String,
    /// Free-text paragraphs belonging directly to the section
    pub content: Vec<String>,
    pub subsections: Vec<Subsection>,
    /// Only present on the synthesized "Key Points" section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<String>>,
}

impl Section {
    pub fn new(title: String) -> Section {
        Section {
            title,
            content: Vec::new(),
            subsections: Vec::new(),
            points: None,
        }
    }
}

/// A nested unit of the outline, produced from a `## ` heading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subsection {
    pub title: String,
    /// Bullet items collected under this subsection
    pub points: Vec<String>,
}

impl Subsection {
    pub fn new(title: String) -> Subsection {
        Subsection {
            title,
            points: Vec::new(),
        }
    }
}

/// Summary statistics derived from a parsed tree, recomputed on every parse
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NoteStats {
    pub section_count: usize,
    pub total_points: usize,
    pub word_count: usize,
}
