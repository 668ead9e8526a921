//! Loading source images from disk.

use crate::image::image_formats::Pixmap;
use crate::utils::error::Result;
use std::path::Path;

/// Opens any format the `image` crate understands and flattens it to RGB.
///
/// Alpha is dropped; only the red channel matters to the encoders anyway.
pub fn load_pixmap<P: AsRef<Path>>(path: P) -> Result<Pixmap> {
    let img = ::image::open(path.as_ref())?.into_rgb8();
    log::debug!(
        "loaded {} ({}x{})",
        path.as_ref().display(),
        img.width(),
        img.height()
    );
    Ok(Pixmap::from(&img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::image_formats::Pixel;
    use crate::utils::error::MbpError;
    use tempfile::tempdir;

    #[test]
    fn test_load_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.png");
        let img = ::image::RgbImage::from_fn(3, 2, |x, _| ::image::Rgb([x as u8 * 100, 0, 0]));
        img.save(&path).unwrap();

        let pm = load_pixmap(&path).unwrap();
        assert_eq!(pm.dimensions(), (3, 2));
        assert_eq!(pm.get_pixel(2, 1), Pixel::new(200, 0, 0));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_pixmap(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, MbpError::Image(_)));
    }
}
