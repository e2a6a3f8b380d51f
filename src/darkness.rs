use image::{GenericImageView, Rgba};

use crate::image_utils::grayscale;

/// Scores how much of a bubble is filled in, from 0 (blank) to 255 (solid).
///
/// Samples the `2 * radius` square whose top-left corner is
/// `(center_x - radius, center_y - radius)` and keeps the pixels inside the
/// inscribed circle, i.e. offsets `(dx, dy)` with `dx² + dy² <= radius²`.
/// A pixel is dark when its grayscale value is below `pixel_darkness`. The
/// score is the dark fraction of those pixels scaled to 255.
///
/// Coordinates are in the image's own coordinate system, so a cropped view
/// works as long as the caller translates the center into it. Pass a
/// `SubImage` by dereferencing it (`&*view`). Pixels that fall outside the
/// image are not counted at all.
pub fn score_bubble<I>(
    img: &I,
    center_x: u32,
    center_y: u32,
    radius: u32,
    pixel_darkness: u8,
) -> f32
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = img.dimensions();
    let radius = radius as i64;
    let threshold = pixel_darkness as f32;
    let mut dark_pixels = 0u32;
    let mut total_pixels = 0u32;

    for dy in -radius..radius {
        let y = center_y as i64 + dy;
        if y < 0 || y >= height as i64 {
            continue;
        }
        for dx in -radius..radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = center_x as i64 + dx;
            if x < 0 || x >= width as i64 {
                continue;
            }

            total_pixels += 1;
            if grayscale(&img.get_pixel(x as u32, y as u32)) < threshold {
                dark_pixels += 1;
            }
        }
    }

    if total_pixels == 0 {
        0.0
    } else {
        dark_pixels as f32 / total_pixels as f32 * 255.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::image_utils::{BLACK, WHITE};
    use image::RgbaImage;
    use imageproc::drawing::draw_filled_circle_mut;
    use proptest::prelude::*;

    /// Offsets inside the scored circle, in scan order.
    fn circle_offsets(radius: i64) -> Vec<(i64, i64)> {
        let mut offsets = vec![];
        for dy in -radius..radius {
            for dx in -radius..radius {
                if dx * dx + dy * dy <= radius * radius {
                    offsets.push((dx, dy));
                }
            }
        }
        offsets
    }

    #[test]
    fn test_blank_bubble() {
        let img = RgbaImage::from_pixel(100, 100, WHITE);
        assert_eq!(score_bubble(&img, 50, 50, 10, 120), 0.0);
    }

    #[test]
    fn test_filled_bubble() {
        let img = RgbaImage::from_pixel(100, 100, BLACK);
        assert_eq!(score_bubble(&img, 50, 50, 10, 120), 255.0);
    }

    #[test]
    fn test_degenerate_radius() {
        let img = RgbaImage::from_pixel(10, 10, BLACK);
        assert_eq!(score_bubble(&img, 5, 5, 0, 120), 0.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let img = RgbaImage::from_pixel(20, 20, Rgba([120, 120, 120, 255]));
        assert_eq!(score_bubble(&img, 10, 10, 5, 120), 0.0);
        assert_eq!(score_bubble(&img, 10, 10, 5, 121), 255.0);
    }

    #[test]
    fn test_corners_of_square_are_ignored() {
        let mut img = RgbaImage::from_pixel(40, 40, BLACK);
        // Whiten everything inside the circle; only the square's corners stay dark.
        for (dx, dy) in circle_offsets(10) {
            img.put_pixel((20 + dx) as u32, (20 + dy) as u32, WHITE);
        }
        assert_eq!(score_bubble(&img, 20, 20, 10, 120), 0.0);
    }

    #[test]
    fn test_half_filled_bubble() {
        let mut img = RgbaImage::from_pixel(60, 60, WHITE);
        draw_filled_circle_mut(&mut img, (30, 30), 12, BLACK);
        let score = score_bubble(&img, 30, 30, 24, 120);
        assert!(score > 40.0 && score < 90.0, "score was {}", score);
    }

    #[test]
    fn test_pixels_outside_image_are_skipped() {
        let img = RgbaImage::from_pixel(10, 10, BLACK);
        assert_eq!(score_bubble(&img, 0, 0, 5, 120), 255.0);
        assert_eq!(score_bubble(&img, 100, 100, 5, 120), 0.0);
    }

    #[test]
    fn test_cropped_view() {
        let mut img = RgbaImage::from_pixel(200, 200, WHITE);
        draw_filled_circle_mut(&mut img, (150, 150), 12, BLACK);
        let view = img.view(100, 100, 100, 100);
        assert_eq!(
            score_bubble(&*view, 50, 50, 10, 120),
            score_bubble(&img, 150, 150, 10, 120)
        );
    }

    #[test]
    fn test_does_not_mutate_image() {
        let mut img = RgbaImage::from_pixel(40, 40, WHITE);
        draw_filled_circle_mut(&mut img, (20, 20), 8, BLACK);
        let before = img.clone();
        score_bubble(&img, 20, 20, 10, 120);
        assert_eq!(img, before);
    }

    proptest! {
        #[test]
        fn prop_score_is_monotonic_in_dark_pixels(radius in 1i64..12, seed in 0usize..1000) {
            let offsets = circle_offsets(radius);
            let size = (radius * 2 + 2) as u32;
            let center = (radius + 1) as u32;
            let dark_count = seed % offsets.len();

            let mut img = RgbaImage::from_pixel(size, size, WHITE);
            for (dx, dy) in &offsets[..dark_count] {
                img.put_pixel((center as i64 + dx) as u32, (center as i64 + dy) as u32, BLACK);
            }
            let before = score_bubble(&img, center, center, radius as u32, 120);

            let (dx, dy) = offsets[dark_count];
            img.put_pixel((center as i64 + dx) as u32, (center as i64 + dy) as u32, BLACK);
            let after = score_bubble(&img, center, center, radius as u32, 120);

            prop_assert!(after > before);
            prop_assert!((0.0..=255.0).contains(&after));
        }
    }
}
