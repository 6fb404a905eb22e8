use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::error::RippleResult;

/// A decoded slide or distortion-map image, RGBA8.
///
/// Pixel data is shared so scene snapshots can hold the image without
/// copying it every frame.
#[derive(Clone, Debug)]
pub struct SlideImage {
    pub width: u32,
    pub height: u32,
    pub rgba8: Arc<Vec<u8>>,
}

impl SlideImage {
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> Self {
        debug_assert_eq!(rgba8.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        }
    }
}

/// Decode seam for slide sources.
///
/// A loader resolves a source ref into at most one image. Failure is
/// local to that slide: the engine leaves the slide pending forever and
/// never retries.
pub trait ImageLoader {
    fn load(&mut self, source: &str) -> RippleResult<SlideImage>;
}

/// Filesystem loader backed by the `image` crate.
#[derive(Debug, Default)]
pub struct FsLoader;

impl ImageLoader for FsLoader {
    fn load(&mut self, source: &str) -> RippleResult<SlideImage> {
        let path = Path::new(source);
        let dyn_img = image::open(path).with_context(|| format!("decode '{}'", path.display()))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(SlideImage::from_rgba8(width, height, rgba.into_raw()))
    }
}

pub fn decode_image(bytes: &[u8]) -> RippleResult<SlideImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(SlideImage::from_rgba8(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decode_image_reports_dimensions() {
        let img = image::RgbaImage::from_raw(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 255]).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&buf).unwrap();
        assert_eq!((decoded.width, decoded.height), (2, 1));
        assert_eq!(decoded.rgba8.len(), 8);
    }

    #[test]
    fn fs_loader_missing_file_is_an_error() {
        let mut loader = FsLoader;
        assert!(loader.load("definitely/not/here.png").is_err());
    }
}
