//! PNG export for Oruko name cards
//!
//! Turns a rendered [`oruko::CardView`] into a high-resolution PNG and
//! packages it for sharing or download.
//!
//! # Pipeline
//!
//! 1. [`layout::card_svg`] lays the card out as SVG sized to the capture region
//! 2. [`export::rasterize`] renders it with resvg at a pixel ratio of at least 2
//! 3. [`watermark::Watermark`] is stamped over the center when requested
//! 4. [`delivery::deliver`] wraps the PNG as a share payload or a download

pub mod delivery;
pub mod error;
pub mod export;
pub mod layout;
pub mod watermark;

pub use delivery::{
    Delivery, DeliveryMode, Download, SHARE_TITLE, SharePayload, deliver, download_filename,
    sanitize_filename, share_text,
};
pub use error::{ExportError, ExportResult};
pub use export::{CaptureRegion, CardExporter, ExportOptions, ExportedImage};
pub use layout::card_svg;
pub use watermark::Watermark;
