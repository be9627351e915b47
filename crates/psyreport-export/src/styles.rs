use serde::{Deserialize, Serialize};

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Times New Roman", "Calibri").
    pub body_font: String,

    /// Font for headings (e.g. "Arial", "Calibri").
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Heading 1 font size in points.
    pub heading1_size: usize,

    /// Heading 2 font size in points.
    pub heading2_size: usize,

    /// Heading 3 font size in points.
    pub heading3_size: usize,

    pub letterhead: Letterhead,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 11,
            heading1_size: 16,
            heading2_size: 12,
            heading3_size: 11,
            letterhead: Letterhead::default(),
        }
    }
}

/// Fixed institutional text printed on every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Letterhead {
    /// Centred heading at the top of the first page.
    pub organisation: String,

    /// Italic line under the heading.
    pub tagline: String,

    /// Right-aligned line closing the report.
    pub signature: String,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            organisation: "24/7 HOSPITAL PSYCHOLOGICAL SERVICES".to_string(),
            tagline: "Confidential Clinical Documentation".to_string(),
            signature: "Digitally signed by Department of Psychology".to_string(),
        }
    }
}
