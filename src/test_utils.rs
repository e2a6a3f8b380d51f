//! Synthetic answer sheets for tests.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_circle_mut;

use crate::answer_sheet::SheetGeometry;
use crate::geometry::bubble_centers;
use crate::image_utils::{BLACK, WHITE};
use crate::types::Size;

/// Light enough to stay above the default pixel darkness threshold.
const OUTLINE: Rgba<u8> = Rgba([180, 180, 180, 255]);

/// A small two-column layout, cheap enough to encode and decode in tests.
pub(crate) fn small_geometry(num_questions: u32) -> SheetGeometry {
    let geometry = SheetGeometry {
        canvas_size: Size {
            width: 400,
            height: 300,
        },
        margin: 10,
        header_height: 20,
        num_options: 4,
        num_questions,
        questions_per_column: 5,
        columns: 2,
        max_questions: 10,
        bubble_radius: 10,
        bubble_spacing: 40,
        question_spacing: 30,
        question_number_offset: 10,
        bubble_offset: 40,
    };
    geometry.validate().expect("small test geometry is valid");
    geometry
}

/// A white page with every bubble outlined in light ink.
pub(crate) fn blank_sheet(geometry: &SheetGeometry) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(
        geometry.canvas_size.width,
        geometry.canvas_size.height,
        WHITE,
    );
    for question in 0..geometry.num_questions {
        for center in bubble_centers(geometry, question) {
            draw_hollow_circle_mut(
                &mut img,
                (center.x as i32, center.y as i32),
                geometry.bubble_radius as i32,
                OUTLINE,
            );
        }
    }
    img
}

/// Blackens the first `fraction` of a bubble's scored pixels, top rows first.
/// The same fraction always darkens the same pixels relative to the center.
pub(crate) fn fill_bubble_with(
    img: &mut RgbaImage,
    geometry: &SheetGeometry,
    question: u32,
    option: u32,
    fraction: f32,
) {
    let center = bubble_centers(geometry, question)[option as usize];
    let radius = geometry.bubble_radius as i64;
    let mut offsets = vec![];
    for dy in -radius..radius {
        for dx in -radius..radius {
            if dx * dx + dy * dy <= radius * radius {
                offsets.push((dx, dy));
            }
        }
    }

    let count = (offsets.len() as f32 * fraction).floor() as usize;
    for (dx, dy) in offsets.into_iter().take(count) {
        img.put_pixel(
            (center.x as i64 + dx) as u32,
            (center.y as i64 + dy) as u32,
            BLACK,
        );
    }
}

/// Fills a bubble completely.
pub(crate) fn fill_bubble(img: &mut RgbaImage, geometry: &SheetGeometry, question: u32, option: u32) {
    fill_bubble_with(img, geometry, question, option, 1.0);
}
