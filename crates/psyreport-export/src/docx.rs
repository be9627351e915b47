use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Private-use character that blocks markup recognition at the point it is
/// inserted. Never appears in the packed document.
pub const LITERAL_MARK: char = '\u{E000}';

/// Characters that start a block construct when they open a line.
const BLOCK_MARKERS: [char; 6] = ['#', '-', '*', '_', '^', '>'];

/// Escape a value so that [`generate_docx`] reproduces it verbatim.
///
/// Lines that would open a heading, bullet, rule, alignment or italic line get
/// a leading [`LITERAL_MARK`], and every `*` and `_` is followed by one so no
/// bold or italic delimiter can form from the value's own characters.
pub fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, line) in value.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.trim_start().starts_with(BLOCK_MARKERS) {
            out.push(LITERAL_MARK);
        }
        for c in line.chars() {
            match c {
                LITERAL_MARK => {}
                '*' | '_' => {
                    out.push(c);
                    out.push(LITERAL_MARK);
                }
                _ => out.push(c),
            }
        }
    }
    out
}

fn strip_marks(text: &str) -> String {
    text.replace(LITERAL_MARK, "")
}

/// Generate a DOCX document from rendered Markdown-ish template output.
///
/// The `rendered` content uses a simple subset:
/// - `# Heading` → DOCX Heading 1
/// - `## Heading` → DOCX Heading 2
/// - `### Heading` → DOCX Heading 3
/// - `- item` → bullet list item (prefixed with bullet character)
/// - `**bold**` → bold run
/// - `_text_` spanning the whole line → italic
/// - `^ ` prefix → centred line, `> ` prefix → right-aligned line
/// - `---` or `***` → page break
/// - Everything else → normal paragraph
///
/// Text passed through [`escape_markup`] is never treated as markup; its
/// [`LITERAL_MARK`]s are dropped from the output.
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new();

    docx = docx
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    for line in rendered.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
            continue;
        }

        if trimmed == "---" || trimmed == "***" {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
            continue;
        }

        let (alignment, content) = split_alignment(trimmed);

        let para = if let Some(text) = content.strip_prefix("### ") {
            heading_paragraph(text, "Heading3", styles)
        } else if let Some(text) = content.strip_prefix("## ") {
            heading_paragraph(text, "Heading2", styles)
        } else if let Some(text) = content.strip_prefix("# ") {
            heading_paragraph(text, "Heading1", styles)
        } else if let Some(text) = content.strip_prefix("- ") {
            bullet_paragraph(text, styles)
        } else {
            body_paragraph(content, styles)
        };

        docx = docx.add_paragraph(para.align(alignment));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn split_alignment(line: &str) -> (AlignmentType, &str) {
    if let Some(rest) = line.strip_prefix("^ ") {
        (AlignmentType::Center, rest.trim_start())
    } else if let Some(rest) = line.strip_prefix("> ") {
        (AlignmentType::Right, rest.trim_start())
    } else {
        (AlignmentType::Left, line)
    }
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
}

fn heading_paragraph(text: &str, style_id: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(strip_marks(text))
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().add_run(body_run("\u{2022} ", styles));

    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }

    para
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new();
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(strip_marks(text))
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Parse simple inline formatting: **bold** segments, or a line wrapped in
/// `_underscores_` as a whole.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    if let Some(inner) = text
        .strip_prefix('_')
        .and_then(|t| t.strip_suffix('_'))
        .filter(|t| !t.is_empty())
    {
        return vec![body_run(inner, styles).italic()];
    }

    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(body_run(before, styles));
        }

        let after_start = &remaining[start + 2..];
        if let Some(end) = after_start.find("**") {
            runs.push(body_run(&after_start[..end], styles).bold());
            remaining = &after_start[end + 2..];
        } else {
            // No closing **, treat rest as normal text
            runs.push(body_run(remaining, styles));
            return runs;
        }
    }

    if !remaining.is_empty() {
        runs.push(body_run(remaining, styles));
    }

    runs
}
