//! Card export to PNG
//!
//! The exporter lays the card out as SVG, rasterizes exactly the capture
//! region at a pixel ratio of at least 2, optionally stamps the watermark,
//! and encodes the result as PNG.
//!
//! # Example
//!
//! ```ignore
//! use oruko_export::{CaptureRegion, CardExporter, ExportOptions};
//!
//! let exporter = CardExporter::new();
//! let image = exporter
//!     .export(card, CaptureRegion::default(), ExportOptions::default())
//!     .await?;
//! std::fs::write(&image.filename, &image.bytes)?;
//! ```

use crate::delivery::download_filename;
use crate::error::{ExportError, ExportResult};
use crate::layout::card_svg;
use crate::watermark::Watermark;
use image::{ImageFormat, Rgba, RgbaImage};
use oruko::CardView;
use resvg::tiny_skia::{Pixmap, PixmapPaint, Transform};
use resvg::usvg::{self, fontdb};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_PIXEL_RATIO: f32 = 2.0;
pub const MIN_PIXEL_RATIO: f32 = 2.0;
pub const MAX_PIXEL_RATIO: f32 = 4.0;

/// DejaVu Sans, always available to card text and the watermark
const FALLBACK_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

const SANS_SERIF_FAMILIES: &[&str] = &[
    "Arial",
    "Helvetica",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
];
const SERIF_FAMILIES: &[&str] = &[
    "Times New Roman",
    "DejaVu Serif",
    "Liberation Serif",
    "Noto Serif",
];

/// Logical size of the card box to capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRegion {
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CaptureRegion {
    /// The card's own 500x500 box
    fn default() -> Self {
        Self::new(500, 500)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub watermark: bool,
    /// Output pixels per logical pixel; clamped to 2..=4
    pub pixel_ratio: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            watermark: true,
            pixel_ratio: DEFAULT_PIXEL_RATIO,
        }
    }
}

impl ExportOptions {
    pub fn with_watermark(watermark: bool) -> Self {
        Self {
            watermark,
            ..Self::default()
        }
    }

    /// Pixel ratio actually used for rasterizing
    pub fn effective_pixel_ratio(&self) -> f32 {
        if self.pixel_ratio.is_finite() {
            self.pixel_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
        } else {
            DEFAULT_PIXEL_RATIO
        }
    }
}

/// An encoded card, ready to download or share
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

impl ExportedImage {
    pub const MIME_TYPE: &'static str = "image/png";
}

/// Rasterizes cards to PNG
///
/// Holds the font database used for card text. Cloning is cheap; clones
/// share the database.
#[derive(Debug, Clone)]
pub struct CardExporter {
    fontdb: Arc<fontdb::Database>,
}

impl Default for CardExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CardExporter {
    /// Exporter using the fonts installed on this system plus the bundled face
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        debug!(fonts = db.len(), "loaded system fonts");
        db.load_font_data(FALLBACK_FONT.to_vec());
        Self::with_fonts(db)
    }

    /// Exporter using only the bundled face, independent of the host
    pub fn bundled() -> Self {
        let mut db = fontdb::Database::new();
        db.load_font_data(FALLBACK_FONT.to_vec());
        Self::with_fonts(db)
    }

    pub fn with_fonts(mut db: fontdb::Database) -> Self {
        resolve_generic_families(&mut db);
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Add a font file, e.g. the brand typeface
    pub fn with_font_file(mut self, path: &Path) -> ExportResult<Self> {
        Arc::make_mut(&mut self.fontdb)
            .load_font_file(path)
            .map_err(|source| ExportError::Font {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self)
    }

    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render `card` to a PNG
    ///
    /// `card` is a finished view, so the style it was rendered with is
    /// fixed before rasterization starts. The pixel work runs on the
    /// blocking thread pool.
    ///
    /// # Returns
    ///
    /// * `Ok(ExportedImage)` - PNG bytes, pixel size and suggested filename
    /// * `Err(ExportError)` - Layout, fonts, allocation or encoding failed; nothing else is affected
    pub async fn export(
        &self,
        card: CardView,
        region: CaptureRegion,
        options: ExportOptions,
    ) -> ExportResult<ExportedImage> {
        let filename = download_filename(&card.name);
        let svg = card_svg(&card, region);
        let fontdb = Arc::clone(&self.fontdb);
        let ratio = options.effective_pixel_ratio();
        let watermark = options.watermark;

        let rendered = tokio::task::spawn_blocking(move || {
            let image = rasterize(&svg, fontdb, region, ratio, watermark)?;
            let bytes = encode_png(&image)?;
            Ok::<_, ExportError>((bytes, image.width(), image.height()))
        })
        .await
        .map_err(ExportError::from)
        .and_then(|result| result);

        match rendered {
            Ok((bytes, width, height)) => {
                info!(%filename, width, height, watermark, size = bytes.len(), "exported card");
                Ok(ExportedImage {
                    bytes,
                    filename,
                    width,
                    height,
                })
            }
            Err(e) => {
                warn!(%filename, error = %e, "card export failed");
                Err(e)
            }
        }
    }
}

fn has_family(db: &fontdb::Database, family: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(name, _)| name == family))
}

/// Point `serif` and `sans-serif` at installed faces
///
/// The database defaults to Arial and Times New Roman; without them card
/// text would silently render as nothing.
fn resolve_generic_families(db: &mut fontdb::Database) {
    let any_face = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone());

    let pick = |db: &fontdb::Database, candidates: &[&str]| {
        candidates
            .iter()
            .find(|family| has_family(db, family))
            .map(|family| family.to_string())
            .or_else(|| any_face.clone())
    };

    if let Some(family) = pick(&*db, SANS_SERIF_FAMILIES) {
        db.set_sans_serif_family(family);
    }
    if let Some(family) = pick(&*db, SERIF_FAMILIES) {
        db.set_serif_family(family);
    }
}

/// Rasterize a card SVG at `ratio`, optionally watermarked
///
/// Fails with [`ExportError::MissingText`] when no font in `fontdb` can draw
/// the card text or the watermark.
pub fn rasterize(
    svg: &str,
    fontdb: Arc<fontdb::Database>,
    region: CaptureRegion,
    ratio: f32,
    watermark: bool,
) -> ExportResult<RgbaImage> {
    let mut options = usvg::Options::default();
    options.fontdb = fontdb;

    let width = (region.width as f32 * ratio).round() as u32;
    let height = (region.height as f32 * ratio).round() as u32;

    let tree = usvg::Tree::from_str(svg, &options)?;
    if !tree.has_text_nodes() {
        return Err(ExportError::MissingText("card"));
    }
    let mut card = Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;
    resvg::render(&tree, Transform::from_scale(ratio, ratio), &mut card.as_mut());

    if !watermark {
        return Ok(to_image(&card));
    }

    let mut canvas = Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;
    canvas.draw_pixmap(
        0,
        0,
        card.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    stamp_watermark(&mut canvas, &options)?;

    Ok(to_image(&canvas))
}

/// Draw the watermark over the whole of `canvas`
fn stamp_watermark(canvas: &mut Pixmap, options: &usvg::Options<'_>) -> ExportResult<()> {
    let (width, height) = (canvas.width(), canvas.height());
    let svg = Watermark::for_canvas(width, height).to_svg(width, height);
    let overlay = usvg::Tree::from_str(&svg, options)?;
    // usvg drops text it has no font for
    if !overlay.has_text_nodes() {
        return Err(ExportError::MissingText("watermark"));
    }
    resvg::render(&overlay, Transform::identity(), &mut canvas.as_mut());
    Ok(())
}

/// Copy a premultiplied pixmap into a straight-alpha image
fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

pub fn encode_png(image: &RgbaImage) -> ExportResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oruko::{CardStyle, Heritage, TranslationResult, render_card, validate_name};

    fn card(background: &str) -> CardView {
        let name = validate_name("Chioma").unwrap();
        let result = TranslationResult {
            meaning: "God's own gift".to_string(),
            heritage: Heritage::Label("igbo".to_string()),
            pronunciation: "chee-OH-mah".to_string(),
            significance: "...".to_string(),
            variations: vec![],
            gender: None,
        };
        render_card(&name, &result, &CardStyle::new(background.parse().unwrap()))
    }

    // ========== Option Tests ==========

    #[test]
    fn test_pixel_ratio_is_at_least_two() {
        let mut options = ExportOptions::default();
        assert_eq!(options.effective_pixel_ratio(), 2.0);

        options.pixel_ratio = 1.0;
        assert_eq!(options.effective_pixel_ratio(), 2.0);

        options.pixel_ratio = 3.0;
        assert_eq!(options.effective_pixel_ratio(), 3.0);

        options.pixel_ratio = 10.0;
        assert_eq!(options.effective_pixel_ratio(), MAX_PIXEL_RATIO);

        options.pixel_ratio = f32::NAN;
        assert_eq!(options.effective_pixel_ratio(), DEFAULT_PIXEL_RATIO);
    }

    // ========== Rasterization Tests ==========

    fn bundled_fonts() -> Arc<fontdb::Database> {
        Arc::clone(&CardExporter::bundled().fontdb)
    }

    #[test]
    fn test_rasterize_scales_region() {
        let svg = card_svg(&card("#000000"), CaptureRegion::new(400, 300));
        let image = rasterize(&svg, bundled_fonts(), CaptureRegion::new(400, 300), 2.0, false).unwrap();
        assert_eq!(image.dimensions(), (800, 600));
    }

    #[test]
    fn test_rasterize_paints_background() {
        let svg = card_svg(&card("#5F554B"), CaptureRegion::default());
        let image = rasterize(&svg, bundled_fonts(), CaptureRegion::default(), 2.0, true).unwrap();

        // Middle of the left edge: inside the rounded rect, clear of text
        assert_eq!(image.get_pixel(6, 500), &Rgba([0x5f, 0x55, 0x4b, 255]));
    }

    #[test]
    fn test_rasterize_empty_region_fails() {
        let svg = card_svg(&card("#FFFFFF"), CaptureRegion::new(0, 0));
        let result = rasterize(&svg, bundled_fonts(), CaptureRegion::new(0, 0), 2.0, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_rasterize_without_fonts_fails() {
        let svg = card_svg(&card("#000000"), CaptureRegion::default());
        let result = rasterize(
            &svg,
            Arc::new(fontdb::Database::new()),
            CaptureRegion::default(),
            2.0,
            false,
        );
        assert!(matches!(result, Err(ExportError::MissingText("card"))));
    }

    #[test]
    fn test_watermark_without_fonts_fails() {
        let mut canvas = Pixmap::new(100, 100).unwrap();
        let options = usvg::Options::default();
        let result = stamp_watermark(&mut canvas, &options);

        assert!(matches!(result, Err(ExportError::MissingText("watermark"))));
        assert!(canvas.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn test_watermark_draws_with_bundled_font() {
        let mut canvas = Pixmap::new(300, 300).unwrap();
        let mut options = usvg::Options::default();
        options.fontdb = bundled_fonts();
        stamp_watermark(&mut canvas, &options).unwrap();

        assert!(canvas.pixels().iter().any(|p| p.alpha() > 0));
    }

    // ========== Export Tests ==========

    #[tokio::test]
    async fn test_export_watermarked_400_capture() {
        let exporter = CardExporter::bundled();
        let region = CaptureRegion::new(400, 400);
        let marked = exporter
            .export(card("#000000"), region, ExportOptions::with_watermark(true))
            .await
            .unwrap();
        let plain = exporter
            .export(card("#000000"), region, ExportOptions::with_watermark(false))
            .await
            .unwrap();

        assert_eq!((marked.width, marked.height), (800, 800));
        assert_eq!(marked.filename, "chioma-card.png");

        let marked = image::load_from_memory_with_format(&marked.bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        let plain = image::load_from_memory_with_format(&plain.bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(marked.dimensions(), (800, 800));

        // Translucent white only ever lightens what is under it
        let mut translucent = 0;
        for (x, y, after) in marked.enumerate_pixels() {
            let before = plain.get_pixel(x, y);
            assert!(after.0.iter().zip(before.0.iter()).all(|(a, b)| *a as u16 + 1 >= *b as u16));

            let near_center = (200..600).contains(&x) && (200..600).contains(&y);
            let over_background = before.0 == [0, 0, 0, 255];
            let half_white = after.0[..3].iter().all(|c| (100..=160).contains(c));
            if near_center && over_background && half_white {
                translucent += 1;
            }
        }
        assert!(translucent > 100, "only {} translucent white pixels", translucent);
    }

    #[tokio::test]
    async fn test_export_without_fonts_is_an_error() {
        let exporter = CardExporter::with_fonts(fontdb::Database::new());
        for watermark in [true, false] {
            let result = exporter
                .export(
                    card("#FFFFFF"),
                    CaptureRegion::new(400, 400),
                    ExportOptions::with_watermark(watermark),
                )
                .await;
            assert!(matches!(result, Err(ExportError::MissingText(_))));
        }
    }

    #[tokio::test]
    async fn test_export_failure_is_reported() {
        let exporter = CardExporter::bundled();
        let result = exporter
            .export(card("#FFFFFF"), CaptureRegion::new(0, 400), ExportOptions::default())
            .await;
        assert!(matches!(result, Err(ExportError::Canvas { .. }) | Err(ExportError::Layout(_))));
    }

    #[test]
    fn test_bundled_font_is_always_loaded() {
        assert_eq!(CardExporter::bundled().font_count(), 1);
        assert!(CardExporter::new().font_count() >= 1);
        assert_eq!(CardExporter::with_fonts(fontdb::Database::new()).font_count(), 0);
    }

    #[test]
    fn test_missing_font_file() {
        let result = CardExporter::bundled().with_font_file(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(result, Err(ExportError::Font { .. })));
    }
}
