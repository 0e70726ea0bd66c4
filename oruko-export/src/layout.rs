//! Card layout as SVG
//!
//! Lays a [`CardView`] out as an SVG document sized to the capture region.
//! Lines are stacked top to bottom and the whole block is centered
//! vertically. Sizes are expressed in units of 1/500 of the region's shorter
//! side, so a 500x500 region is laid out in plain pixels.

use crate::export::CaptureRegion;
use oruko::CardView;
use quick_xml::escape::escape;

const DESIGN_SIZE: f32 = 500.0;
const LINE_HEIGHT: f32 = 1.3;
const DOTS: &str = "\u{2022} \u{2022} \u{2022} \u{2022} \u{2022} \u{2022} \u{2022} \u{2022} \u{2022} \u{2022} \u{2022}";

#[derive(Debug, Clone, PartialEq)]
struct Line {
    text: String,
    size: f32,
    gap_before: f32,
    bold: bool,
    italic: bool,
    serif: bool,
    opacity: f32,
    letter_spacing: f32,
}

impl Line {
    fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            gap_before: 0.0,
            bold: false,
            italic: false,
            serif: false,
            opacity: 1.0,
            letter_spacing: 0.0,
        }
    }

    fn gap(mut self, gap: f32) -> Self {
        self.gap_before = gap;
        self
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn serif(mut self) -> Self {
        self.serif = true;
        self
    }

    fn faded(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    fn spaced(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    fn height(&self) -> f32 {
        self.gap_before + self.size * LINE_HEIGHT
    }
}

/// Greedy word wrap to at most `max_chars` characters per line
///
/// A single word longer than the limit gets a line of its own.
pub(crate) fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Characters of a `size`-unit font that fit across the card's text column
fn column_chars(size: f32) -> usize {
    // Average glyph advance is a little over half the font size
    ((DESIGN_SIZE * 0.84) / (size * 0.55)).max(1.0) as usize
}

fn wrapped(text: &str, size: f32, first_gap: f32, style: impl Fn(Line) -> Line) -> Vec<Line> {
    wrap(text, column_chars(size))
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let line = Line::new(text, size).gap(if i == 0 { first_gap } else { 0.0 });
            style(line)
        })
        .collect()
}

fn card_lines(card: &CardView) -> Vec<Line> {
    let mut lines = vec![
        Line::new(&card.heritage, 14.0).spaced(3.0).faded(0.7),
        Line::new(DOTS, 16.0).gap(6.0).faded(0.5),
        Line::new(&card.name, 46.0).gap(8.0).bold().serif(),
    ];
    lines.extend(wrapped(&card.meaning, 24.0, 4.0, |l| l.serif()));
    lines.push(
        Line::new(format!("/ {} /", card.pronunciation), 18.0)
            .gap(6.0)
            .italic()
            .faded(0.8),
    );
    lines.extend(wrapped(&card.significance, 16.0, 12.0, |l| l.italic()));
    lines.push(Line::new(DOTS, 16.0).gap(14.0).faded(0.5));
    if let Some(variations) = &card.variations {
        lines.extend(wrapped(
            &format!("Variations: {}", variations),
            13.0,
            10.0,
            |l| l.faded(0.8),
        ));
    }
    lines.push(Line::new(&card.handle, 13.0).gap(12.0).faded(0.7));
    lines
}

/// SVG document for `card` at the region's size
pub fn card_svg(card: &CardView, region: CaptureRegion) -> String {
    let width = region.width as f32;
    let height = region.height as f32;
    let unit = width.min(height) / DESIGN_SIZE;
    let center_x = width / 2.0;

    let lines = card_lines(card);
    let total: f32 = lines.iter().map(Line::height).sum::<f32>() * unit;
    let mut cursor = ((height - total) / 2.0).max(0.0);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = region.width,
        h = region.height,
    );
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" rx="{r:.1}" fill="{bg}"/>"#,
        w = region.width,
        h = region.height,
        r = 12.0 * unit,
        bg = card.background,
    ));

    for line in &lines {
        cursor += line.gap_before * unit;
        let size = line.size * unit;
        // Baseline sits about 80% of the font size below the line top
        let baseline = cursor + size * (LINE_HEIGHT - 1.0) / 2.0 + size * 0.8;
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-size="{size:.1}" font-family="{family}" font-weight="{weight}" font-style="{style}" letter-spacing="{spacing:.1}" fill="{fill}" fill-opacity="{opacity:.2}" text-anchor="middle">{text}</text>"#,
            x = center_x,
            y = baseline,
            family = if line.serif { "serif" } else { "sans-serif" },
            weight = if line.bold { "bold" } else { "normal" },
            style = if line.italic { "italic" } else { "normal" },
            spacing = line.letter_spacing * unit,
            fill = card.text_color,
            opacity = line.opacity,
            text = escape(line.text.as_str()),
        ));
        cursor += size * LINE_HEIGHT;
    }

    svg.push_str("</svg>");
    svg
}
