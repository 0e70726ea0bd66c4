//! Handing an exported card to the user
//!
//! A card is either shared through the platform share facility or offered
//! as a file download. The choice is made by capability, not by the user.

use crate::export::ExportedImage;
use oruko::SERVICE_HANDLE;

pub const SHARE_TITLE: &str = "My Name Card";
pub const FILENAME_SUFFIX: &str = "-card.png";

/// Caption attached to a shared card
pub fn share_text() -> String {
    format!("Discover the meaning behind your name with {}", SERVICE_HANDLE)
}

/// Filesystem-safe stem for a name
///
/// Lowercases, turns runs of whitespace into a single `-` and drops
/// anything that is not an ASCII letter, digit or `-`. Falls back to
/// `name` when nothing is left.
pub fn sanitize_filename(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        let word: String = word
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if word.is_empty() {
            continue;
        }
        if !stem.is_empty() {
            stem.push('-');
        }
        stem.push_str(&word);
    }
    if stem.is_empty() {
        stem.push_str("name");
    }
    stem
}

/// `<sanitized-name>-card.png`
pub fn download_filename(name: &str) -> String {
    format!("{}{}", sanitize_filename(name), FILENAME_SUFFIX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    Share,
    Download,
}

impl DeliveryMode {
    /// Share when the platform can share files, download otherwise
    pub fn for_capability(can_share_files: bool) -> Self {
        if can_share_files {
            Self::Share
        } else {
            Self::Download
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub image: ExportedImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub image: ExportedImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Share(SharePayload),
    Download(Download),
}

impl Delivery {
    pub fn image(&self) -> &ExportedImage {
        match self {
            Delivery::Share(payload) => &payload.image,
            Delivery::Download(download) => &download.image,
        }
    }
}

/// Package `image` for the chosen delivery path
pub fn deliver(image: ExportedImage, mode: DeliveryMode) -> Delivery {
    match mode {
        DeliveryMode::Share => Delivery::Share(SharePayload {
            title: SHARE_TITLE.to_string(),
            text: share_text(),
            image,
        }),
        DeliveryMode::Download => Delivery::Download(Download {
            filename: image.filename.clone(),
            image,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(filename: &str) -> ExportedImage {
        ExportedImage {
            bytes: vec![0x89, b'P', b'N', b'G'],
            filename: filename.to_string(),
            width: 1000,
            height: 1000,
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Chioma"), "chioma");
        assert_eq!(sanitize_filename("Ada  Obi"), "ada-obi");
        assert_eq!(sanitize_filename("  Ngozi "), "ngozi");
        assert_eq!(sanitize_filename("O'Neil/../x"), "oneilx");
        assert_eq!(sanitize_filename("   "), "name");
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename("Adebayo"), "adebayo-card.png");
        assert_eq!(download_filename("Mary Jane"), "mary-jane-card.png");
    }

    #[test]
    fn test_mode_follows_capability() {
        assert_eq!(DeliveryMode::for_capability(true), DeliveryMode::Share);
        assert_eq!(DeliveryMode::for_capability(false), DeliveryMode::Download);
    }

    #[test]
    fn test_share_payload() {
        let delivery = deliver(image("chioma-card.png"), DeliveryMode::Share);
        let Delivery::Share(payload) = &delivery else {
            panic!("expected share, got {:?}", delivery);
        };
        assert_eq!(payload.title, "My Name Card");
        assert_eq!(payload.text, "Discover the meaning behind your name with @oruko.mi");
        assert_eq!(delivery.image().filename, "chioma-card.png");
    }

    #[test]
    fn test_download_uses_image_filename() {
        let delivery = deliver(image("chioma-card.png"), DeliveryMode::Download);
        match delivery {
            Delivery::Download(download) => {
                assert_eq!(download.filename, "chioma-card.png");
                assert_eq!(download.image.bytes.len(), 4);
            }
            other => panic!("expected download, got {:?}", other),
        }
    }
}
