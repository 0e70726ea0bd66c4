//! Provenance watermark stamped across exported cards

use oruko::SERVICE_HANDLE;
use quick_xml::escape::escape;

/// Rotation of the watermark text, counter-clockwise
pub const WATERMARK_ANGLE_DEGREES: f32 = -15.0;

pub const WATERMARK_OPACITY: f32 = 0.5;

/// Canvas width divided by this gives the font size
pub const WATERMARK_SIZE_DIVISOR: f32 = 15.0;

/// Placement of the watermark on a canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Watermark {
    pub text: String,
    pub font_size: f32,
    pub angle_degrees: f32,
    pub center: (f32, f32),
}

impl Watermark {
    /// The service handle, centered and rotated on a `width` x `height` canvas
    pub fn for_canvas(width: u32, height: u32) -> Self {
        Self {
            text: SERVICE_HANDLE.to_string(),
            font_size: width as f32 / WATERMARK_SIZE_DIVISOR,
            angle_degrees: WATERMARK_ANGLE_DEGREES,
            center: (width as f32 / 2.0, height as f32 / 2.0),
        }
    }

    /// Transparent SVG overlay holding only the watermark text
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        let (cx, cy) = self.center;
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                r#"<text x="{cx:.1}" y="{cy:.1}" font-size="{size:.1}" font-family="sans-serif" font-weight="bold" "#,
                r##"fill="#FFFFFF" fill-opacity="{opacity}" text-anchor="middle" dominant-baseline="central" "##,
                r#"transform="rotate({angle} {cx:.1} {cy:.1})">{text}</text></svg>"#,
            ),
            w = width,
            h = height,
            cx = cx,
            cy = cy,
            size = self.font_size,
            opacity = WATERMARK_OPACITY,
            angle = self.angle_degrees,
            text = escape(self.text.as_str()),
        )
    }
}
