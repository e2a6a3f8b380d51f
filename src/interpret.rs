use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info};
use logging_timer::time;
use rayon::prelude::*;

use crate::answer_sheet::{ConfigurationError, SheetGeometry};
use crate::darkness::score_bubble;
use crate::debug::{draw_scored_bubbles_debug_image_mut, ImageDebugWriter};
use crate::decision::{detect_answer, MarkThresholds};
use crate::geometry::bubble_centers;
use crate::grading::{grade, AnswerKey, GradeError, GradingReport};
use crate::image_utils::size_image_to_fit;
use crate::types::AnswerOption;

#[derive(Debug, Clone)]
pub struct InterpretOptions {
    pub debug: bool,
    pub geometry: SheetGeometry,
    pub thresholds: MarkThresholds,
}

/// Per-option darkness scores for one question, in option order.
pub type DarknessVector = Vec<f32>;

#[derive(thiserror::Error, Debug)]
pub enum GradeSheetError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("could not load image {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("answer key is incomplete, no answer set for question(s) {missing:?}")]
    IncompleteAnswerKey { missing: Vec<u32> },
    #[error("could not read exam definition {path}: {reason}")]
    ExamDefinition { path: PathBuf, reason: String },
}

impl From<GradeError> for GradeSheetError {
    fn from(err: GradeError) -> Self {
        match err {
            GradeError::Configuration(err) => GradeSheetError::Configuration(err),
            GradeError::IncompleteAnswerKey { missing } => {
                GradeSheetError::IncompleteAnswerKey { missing }
            }
        }
    }
}

/// What was read from one question on the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredQuestion {
    pub question_index: u32,
    pub darkness: DarknessVector,
    pub detected: Option<AnswerOption>,
}

#[time]
/// Decodes a sheet image and scales it onto the canvas the geometry expects.
pub fn load_sheet_image(
    image_path: &Path,
    geometry: &SheetGeometry,
) -> Result<RgbaImage, GradeSheetError> {
    let img = image::open(image_path)
        .map_err(|source| GradeSheetError::InputUnavailable {
            path: image_path.to_path_buf(),
            source,
        })?
        .into_rgba8();

    if img.dimensions() != (geometry.canvas_size.width, geometry.canvas_size.height) {
        info!(
            "scaling {} from {:?} to {}x{}",
            image_path.display(),
            img.dimensions(),
            geometry.canvas_size.width,
            geometry.canvas_size.height
        );
    }

    Ok(size_image_to_fit(
        &img,
        geometry.canvas_size.width,
        geometry.canvas_size.height,
    ))
}

/// Darkness of every option bubble for a single question.
pub fn score_question(
    img: &RgbaImage,
    geometry: &SheetGeometry,
    question_index: u32,
    thresholds: &MarkThresholds,
) -> DarknessVector {
    bubble_centers(geometry, question_index)
        .iter()
        .map(|center| {
            score_bubble(
                img,
                center.x,
                center.y,
                geometry.bubble_radius,
                thresholds.pixel_darkness,
            )
        })
        .collect()
}

#[time]
/// Scores and decides every question on the sheet. Questions are processed
/// in parallel; the result is in question order.
pub fn read_sheet(
    img: &RgbaImage,
    geometry: &SheetGeometry,
    thresholds: &MarkThresholds,
) -> Vec<ScoredQuestion> {
    (0..geometry.num_questions)
        .into_par_iter()
        .map(|question_index| {
            let darkness = score_question(img, geometry, question_index, thresholds);
            let detected = detect_answer(&darkness, thresholds);
            debug!(
                "question {}: darkness={:?} detected={:?}",
                question_index + 1,
                darkness,
                detected
            );
            ScoredQuestion {
                question_index,
                darkness,
                detected,
            }
        })
        .collect()
}

/// Checks everything that can be checked before touching any pixels.
pub fn check_grading_inputs(
    geometry: &SheetGeometry,
    answer_key: &AnswerKey,
) -> Result<(), GradeSheetError> {
    geometry.validate()?;
    if answer_key.len() != geometry.num_questions as usize {
        return Err(ConfigurationError::AnswerKeyLengthMismatch {
            expected: geometry.num_questions as usize,
            actual: answer_key.len(),
        }
        .into());
    }
    if !answer_key.is_complete() {
        return Err(GradeSheetError::IncompleteAnswerKey {
            missing: answer_key.missing(),
        });
    }
    Ok(())
}

#[time]
/// Reads an already decoded sheet and grades it against the key.
pub fn grade_sheet_image(
    img: &RgbaImage,
    answer_key: &AnswerKey,
    options: &InterpretOptions,
) -> Result<(GradingReport, Vec<ScoredQuestion>), GradeSheetError> {
    check_grading_inputs(&options.geometry, answer_key)?;

    let scored_questions = read_sheet(img, &options.geometry, &options.thresholds);
    let detected = scored_questions
        .iter()
        .map(|question| question.detected)
        .collect::<Vec<Option<AnswerOption>>>();
    let report = grade(&detected, answer_key)?;

    info!(
        "graded {} questions: {} correct, {} wrong, {} unanswered",
        report.total_questions, report.correct, report.wrong, report.unanswered
    );

    Ok((report, scored_questions))
}

#[time]
/// Loads a sheet image from disk and grades it against the key.
pub fn grade_sheet(
    image_path: &Path,
    answer_key: &AnswerKey,
    options: &InterpretOptions,
) -> Result<GradingReport, GradeSheetError> {
    check_grading_inputs(&options.geometry, answer_key)?;

    let img = load_sheet_image(image_path, &options.geometry)?;
    let (report, scored_questions) = grade_sheet_image(&img, answer_key, options)?;

    let debug = if options.debug {
        ImageDebugWriter::new(image_path.to_path_buf(), img)
    } else {
        ImageDebugWriter::disabled()
    };
    debug.write("bubbles", |canvas| {
        draw_scored_bubbles_debug_image_mut(
            canvas,
            &options.geometry,
            &scored_questions,
            &report,
        );
    });

    Ok(report)
}
