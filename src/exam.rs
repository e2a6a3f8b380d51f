use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::answer_sheet::SheetGeometry;
use crate::decision::MarkThresholds;
use crate::grading::AnswerKey;
use crate::interpret::GradeSheetError;

/// An exam as configured by whoever prints and grades the sheets.
///
/// ```json
/// {
///   "title": "Quiz 3",
///   "numQuestions": 3,
///   "answerKey": ["A", "B", null],
///   "markThresholds": { "dominanceMultiplier": 3.0 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDefinition {
    pub title: String,
    pub num_questions: u32,
    pub answer_key: AnswerKey,
    pub mark_thresholds: Option<MarkThresholds>,
    /// Layout overrides; anything left out uses the A4 defaults.
    pub sheet_geometry: Option<SheetGeometry>,
}

impl ExamDefinition {
    pub fn load(path: &Path) -> Result<Self, GradeSheetError> {
        let json = std::fs::read_to_string(path).map_err(|e| GradeSheetError::ExamDefinition {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&json).map_err(|e| GradeSheetError::ExamDefinition {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The sheet layout for this exam, checked for consistency.
    pub fn geometry(&self) -> Result<SheetGeometry, GradeSheetError> {
        let geometry = self
            .sheet_geometry
            .unwrap_or_default()
            .with_num_questions(self.num_questions)?;
        Ok(geometry)
    }

    pub fn thresholds(&self) -> MarkThresholds {
        self.mark_thresholds.unwrap_or_default()
    }
}
