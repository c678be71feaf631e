//! Image reference resolution.
//!
//! Every source kind is reduced to a byte buffer first, so a file read from disk
//! and the same file passed as raw bytes decode identically.

use std::borrow::Cow;
use std::io::Cursor;
use std::sync::Arc;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use log::debug;

use crate::error::LibraryError;
use crate::folder_paths::InputFolders;
use crate::model::reference::ImageReference;
use crate::model::tensor::{ImageTensor, MaskTensor};
use crate::resolve::fetch::ContentFetcher;

/// Decoded RGB pixels plus the inverted alpha plane.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub image: ImageTensor,
    /// `1 - alpha`, or [`MaskTensor::empty`] when the source has no alpha.
    pub mask: MaskTensor,
}

pub struct ImageResolver {
    folders: InputFolders,
    fetcher: Arc<dyn ContentFetcher>,
}

impl ImageResolver {
    pub fn new(folders: InputFolders, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { folders, fetcher }
    }

    pub fn resolve(&self, reference: ImageReference<'_>) -> Result<ResolvedImage, LibraryError> {
        let bytes: Cow<'_, [u8]> = match reference {
            ImageReference::RawBytes(bytes) => Cow::Borrowed(bytes),
            ImageReference::RemoteUrl(url) => Cow::Owned(self.fetcher.fetch_remote(url)?),
            ImageReference::AbsolutePath(path) => Cow::Owned(self.fetcher.read_local(path)?),
            ImageReference::RelativeName(name) => {
                let path = self.folders.annotated_filepath(name);
                Cow::Owned(self.fetcher.read_local(&path)?)
            }
        };
        debug!(
            "Resolving {} image reference ({} bytes)",
            reference.kind(),
            bytes.len()
        );

        let (image, orientation) = decode(&bytes)?;
        let resolved = orient_and_split(image, orientation)?;
        debug!(
            "Decoded image {}x{}",
            resolved.image.width(),
            resolved.image.height()
        );
        Ok(resolved)
    }
}

/// Decode a buffer, returning the pixels as stored plus the EXIF orientation.
pub fn decode(bytes: &[u8]) -> Result<(DynamicImage, Orientation), LibraryError> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation().unwrap_or_else(|e| {
        debug!("Ignoring unreadable orientation metadata: {}", e);
        Orientation::NoTransforms
    });
    let image = DynamicImage::from_decoder(decoder)?;
    Ok((image, orientation))
}

/// Apply orientation, then split into an RGB tensor and an inverted alpha mask.
///
/// Orientation runs first so the mask lines up with the color pixels.
pub fn orient_and_split(
    mut image: DynamicImage,
    orientation: Orientation,
) -> Result<ResolvedImage, LibraryError> {
    image.apply_orientation(orientation);

    let width = image.width() as usize;
    let height = image.height() as usize;

    let mask = if image.color().has_alpha() {
        let alpha: Vec<f32> = image
            .to_rgba32f()
            .pixels()
            .map(|pixel| 1.0 - pixel.0[3])
            .collect();
        MaskTensor::new(1, height, width, alpha)?
    } else {
        MaskTensor::empty()
    };

    let rgb = image.to_rgb32f().into_raw();
    let image = ImageTensor::new(1, height, width, rgb)?;

    Ok(ResolvedImage { image, mask })
}
