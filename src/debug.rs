use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbImage, RgbaImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut};
use log::{info, warn};

use crate::{
    answer_sheet::SheetGeometry,
    geometry::{bubble_centers, question_label_position},
    grading::{GradingReport, Outcome},
    image_utils::{BLUE, DARK_GREEN, GREEN, ORANGE, RED},
    interpret::ScoredQuestion,
};

/// Creates a path for a debug image.
pub fn debug_image_path(base: &Path, label: &str) -> PathBuf {
    let mut result = PathBuf::from(base);
    result.set_file_name(format!(
        "{}_debug_{}.png",
        base.file_stem().unwrap_or_default().to_string_lossy(),
        label
    ));
    result
}

/// Writes annotated copies of a scanned sheet next to the original, or does
/// nothing at all when disabled.
pub struct ImageDebugWriter {
    input_path: PathBuf,
    input_image: Option<RgbaImage>,
}

impl ImageDebugWriter {
    pub fn new(input_path: PathBuf, input_image: RgbaImage) -> Self {
        Self {
            input_path,
            input_image: Some(input_image),
        }
    }

    pub fn disabled() -> Self {
        Self {
            input_path: PathBuf::new(),
            input_image: None,
        }
    }

    /// Draws on a fresh RGB copy of the input and saves it under `label`.
    /// Failing to save is logged, never fatal.
    pub fn write<F>(&self, label: &str, draw: F) -> Option<PathBuf>
    where
        F: FnOnce(&mut RgbImage),
    {
        let input_image = self.input_image.as_ref()?;
        let mut canvas = DynamicImage::ImageRgba8(input_image.clone()).into_rgb8();
        draw(&mut canvas);

        let path = debug_image_path(&self.input_path, label);
        match canvas.save(&path) {
            Ok(()) => {
                info!("wrote debug image: {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("could not write debug image {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Outlines every bubble that was scored: green for a correct answer, red for
/// a wrong one, orange around every option of an unanswered question and
/// blue for the remaining options.
pub fn draw_scored_bubbles_debug_image_mut(
    canvas: &mut RgbImage,
    geometry: &SheetGeometry,
    scored_questions: &[ScoredQuestion],
    report: &GradingReport,
) {
    let radius = geometry.bubble_radius as i32;

    for (scored, graded) in scored_questions.iter().zip(&report.graded_answers) {
        let outcome = graded.outcome();
        let label = question_label_position(geometry, scored.question_index);
        draw_cross_mut(
            canvas,
            DARK_GREEN,
            label.x as i32 - radius,
            label.y as i32 - radius / 2,
        );

        for (option, center) in bubble_centers(geometry, scored.question_index)
            .iter()
            .enumerate()
        {
            let is_detected = scored.detected.map(|d| d.index()) == Some(option);
            let color = match outcome {
                Outcome::Unanswered => ORANGE,
                Outcome::Correct if is_detected => GREEN,
                Outcome::Wrong if is_detected => RED,
                _ => BLUE,
            };
            let center = (center.x as i32, center.y as i32);

            // Thicken the ring so it stays visible on a downscaled preview.
            for inset in 0..3 {
                draw_hollow_circle_mut(canvas, center, radius + 2 + inset, color);
            }
            if is_detected {
                draw_cross_mut(canvas, color, center.0, center.1);
            }
        }

        if graded.correct_answer.index() < geometry.num_options as usize {
            let center = bubble_centers(geometry, scored.question_index)
                [graded.correct_answer.index()];
            draw_cross_mut(
                canvas,
                DARK_GREEN,
                center.x as i32 + radius + 8,
                center.y as i32,
            );
        }
    }
}
