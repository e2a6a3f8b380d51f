use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::AnswerOption;

/// Thresholds used to turn bubble darkness into a detected answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkThresholds {
    /// Grayscale value below which a pixel counts as dark.
    pub pixel_darkness: u8,
    /// Darkness score the darkest bubble must exceed.
    pub mark_score: f32,
    /// How many times darker than the average of the other bubbles the
    /// darkest one must be.
    pub dominance_multiplier: f32,
    /// Treat a maximum shared exactly by two bubbles as ambiguous.
    pub reject_tied_maximum: bool,
}

pub const DEFAULT_DARKNESS_THRESHOLD: u8 = 120;
pub const DEFAULT_DOMINANCE_MULTIPLIER: f32 = 2.5;

impl Default for MarkThresholds {
    fn default() -> Self {
        Self {
            pixel_darkness: DEFAULT_DARKNESS_THRESHOLD,
            mark_score: DEFAULT_DARKNESS_THRESHOLD as f32,
            dominance_multiplier: DEFAULT_DOMINANCE_MULTIPLIER,
            reject_tied_maximum: true,
        }
    }
}

/// Index and value of the darkest bubble. Ties go to the first one.
pub fn darkest_bubble(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((i, score)),
        })
}

/// Mean of every score except the one at `excluded`, or 0 if there is none.
pub fn average_excluding(scores: &[f32], excluded: usize) -> f32 {
    let others = scores
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != excluded)
        .map(|(_, score)| *score)
        .collect::<Vec<f32>>();
    if others.is_empty() {
        0.0
    } else {
        others.iter().sum::<f32>() / others.len() as f32
    }
}

/// Picks the bubble that was clearly marked, if any.
///
/// The darkest bubble wins only when it is darker than `mark_score` and more
/// than `dominance_multiplier` times the mean of the remaining bubbles. Only
/// the darkest index is excluded from that mean, even when other bubbles
/// share its score. Blank, faint and double-marked questions give `None`.
pub fn detect_mark(scores: &[f32], thresholds: &MarkThresholds) -> Option<usize> {
    let (max_index, max_score) = darkest_bubble(scores)?;
    let avg_others = average_excluding(scores, max_index);

    let is_clearly_marked = max_score > thresholds.mark_score
        && max_score > avg_others * thresholds.dominance_multiplier;
    if !is_clearly_marked {
        return None;
    }

    if thresholds.reject_tied_maximum
        && scores
            .iter()
            .enumerate()
            .any(|(i, score)| i != max_index && *score == max_score)
    {
        debug!("ambiguous mark: bubbles tied at {:.1}: {:?}", max_score, scores);
        return None;
    }

    Some(max_index)
}

/// Like [`detect_mark`], but maps the winning bubble to its label.
pub fn detect_answer(scores: &[f32], thresholds: &MarkThresholds) -> Option<AnswerOption> {
    detect_mark(scores, thresholds).and_then(AnswerOption::from_index)
}
