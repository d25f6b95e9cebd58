//! PDF encoding of a document plan with printpdf.
//!
//! A4 pages, Helvetica, 20 mm left margin and a 170 mm text column. The cursor is
//! tracked in millimetres from the top edge; once it passes 270 mm a new page starts.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::render::style::{LineStyle, PlanItem, BLANK_LINE_ADVANCE};
use crate::render::RenderError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const TEXT_WIDTH: f32 = 170.0;
const PAGE_BREAK_AT: f32 = 270.0;
const PARAGRAPH_GAP: f32 = 5.0;
/// Line height as a fraction of the font size in points, giving millimetres.
const LINE_HEIGHT_FACTOR: f32 = 0.4;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width relative to the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// One wrapped line at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub page: usize,
    /// Baseline distance from the top edge, in millimetres.
    pub top: f32,
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
}

/// Positions every plan item on pages without encoding anything.
pub fn layout(plan: &[PlanItem]) -> Vec<PlacedLine> {
    let mut placed = Vec::new();
    let mut page = 0;
    let mut cursor = MARGIN;

    for item in plan {
        let (text, style) = match item {
            PlanItem::Blank => {
                cursor += BLANK_LINE_ADVANCE;
                continue;
            }
            PlanItem::Text { text, style } => (text, style),
        };

        cursor += style.space_before;
        let line_height = style.font_size * LINE_HEIGHT_FACTOR;
        let lines = wrap_text(text, max_chars(style));
        for (index, line) in lines.iter().enumerate() {
            placed.push(PlacedLine {
                page,
                top: cursor + index as f32 * line_height,
                text: line.clone(),
                font_size: style.font_size,
                bold: style.bold,
            });
        }
        cursor += lines.len() as f32 * line_height + PARAGRAPH_GAP;

        if cursor > PAGE_BREAK_AT {
            page += 1;
            cursor = MARGIN;
        }
        cursor += style.space_after;
    }

    placed
}

pub fn render_pdf(title: &str, plan: &[PlanItem]) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for line in layout(plan) {
        while layers.len() <= line.page {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layers.push(doc.get_page(page).get_layer(layer));
        }
        let font = if line.bold { &bold } else { &regular };
        layers[line.page].use_text(
            line.text,
            line.font_size,
            Mm(MARGIN),
            Mm(PAGE_HEIGHT - line.top),
            font,
        );
    }

    Ok(doc.save_to_bytes()?)
}

fn max_chars(style: &LineStyle) -> usize {
    let glyph_width = style.font_size * PT_TO_MM * AVG_GLYPH_WIDTH;
    ((TEXT_WIDTH / glyph_width) as usize).max(1)
}

/// Greedy word wrap by character count. Text without words yields one empty line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        if current_len > 0 && current_len + word.chars().count() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
