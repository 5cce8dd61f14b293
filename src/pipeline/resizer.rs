//! Width-constrained resampling.

use image::imageops::FilterType;
use image::DynamicImage;

/// Resize `img` to exactly `new_width`, preserving aspect ratio to the
/// nearest pixel: `new_height = round(h0 * new_width / w0)`.
///
/// No bound is placed on the requested width; 1 and 100000 are both
/// attempted.
pub fn resize_to_width(img: &DynamicImage, new_width: u32) -> DynamicImage {
    let scale = new_width as f64 / img.width() as f64;
    let new_height = (img.height() as f64 * scale).round() as u32;
    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> DynamicImage {
        DynamicImage::new_rgba8(width, height)
    }

    #[test]
    fn test_downscale_halves_both_dimensions() {
        let resized = resize_to_width(&blank(100, 50), 50);
        assert_eq!((resized.width(), resized.height()), (50, 25));
    }

    #[test]
    fn test_height_rounds_to_nearest_pixel() {
        // 5 * 2 / 3 = 3.33 -> 3
        let resized = resize_to_width(&blank(3, 5), 2);
        assert_eq!((resized.width(), resized.height()), (2, 3));

        // 480 * 333 / 640 = 249.75 -> 250
        let resized = resize_to_width(&blank(640, 480), 333);
        assert_eq!((resized.width(), resized.height()), (333, 250));
    }

    #[test]
    fn test_upscale_is_attempted() {
        let resized = resize_to_width(&blank(10, 10), 25);
        assert_eq!((resized.width(), resized.height()), (25, 25));
    }

    #[test]
    fn test_same_width_is_identity_sized() {
        let resized = resize_to_width(&blank(64, 48), 64);
        assert_eq!((resized.width(), resized.height()), (64, 48));
    }
}
