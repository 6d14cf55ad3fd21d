//! Image comparison utilities for testing.
//!
//! This module provides helper functions for comparing and verifying
//! rendered map images in tests.

use image::{DynamicImage, GenericImageView, ImageError};
use std::path::Path;

/// Load an image from a file
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageError> {
    image::open(path)
}

/// Check that an image contains more than a single flat color, i.e. that
/// something was actually rendered into it.
pub fn assert_non_blank(image: &DynamicImage) {
    let (width, height) = image.dimensions();
    assert!(width > 0 && height > 0, "Image is empty");

    let first = image.get_pixel(0, 0);
    let varied = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .any(|(x, y)| image.get_pixel(x, y) != first);
    assert!(varied, "Image is a single flat color");
}

/// Compare two images for exact pixel equality
pub fn assert_images_identical(actual: &DynamicImage, expected: &DynamicImage) {
    let (aw, ah) = actual.dimensions();
    let (ew, eh) = expected.dimensions();
    assert_eq!(
        (aw, ah),
        (ew, eh),
        "Image dimensions differ: {}x{} vs {}x{}",
        aw,
        ah,
        ew,
        eh
    );

    for y in 0..ah {
        for x in 0..aw {
            let a = actual.get_pixel(x, y);
            let e = expected.get_pixel(x, y);
            assert_eq!(a, e, "Pixel ({}, {}) differs: {:?} vs {:?}", x, y, a, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn test_assert_non_blank_detects_flat_images() {
        let flat = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            4,
            4,
            Rgba([255u8, 255, 255, 255]),
        ));
        let result = std::panic::catch_unwind(|| assert_non_blank(&flat));
        assert!(result.is_err());

        let mut varied = ImageBuffer::from_pixel(4, 4, Rgba([255u8, 255, 255, 255]));
        varied.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
        assert_non_blank(&DynamicImage::ImageRgba8(varied));
    }
}
