use serde::{Deserialize, Serialize};

use crate::geometry::wide_bubble_center;
use crate::types::{Size, OPTION_LABELS};

/// Errors in the sheet layout or in how an answer key relates to it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("number of questions must be between 1 and {max}, got {count}")]
    InvalidQuestionCount { count: u32, max: u32 },
    #[error("number of options must be between 1 and {max}, got {count}")]
    InvalidOptionCount { count: u32, max: u32 },
    #[error("invalid sheet layout: {0}")]
    InvalidLayout(String),
    #[error("bubble {option} of question {question} does not fit on the page")]
    BubbleOutOfBounds { question: u32, option: u32 },
    #[error("answer key has {actual} entries but the sheet has {expected} questions")]
    AnswerKeyLengthMismatch { expected: usize, actual: usize },
}

/// Layout of a generated answer sheet, in canvas pixels.
///
/// The same value must be used to render a sheet and to read it back; every
/// bubble coordinate is derived from these fields by [`crate::geometry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetGeometry {
    pub canvas_size: Size<u32>,
    pub margin: u32,
    pub header_height: u32,
    pub num_options: u32,
    pub num_questions: u32,
    pub questions_per_column: u32,
    pub columns: u32,
    pub max_questions: u32,
    pub bubble_radius: u32,
    /// Horizontal distance between neighbouring bubble centers.
    pub bubble_spacing: u32,
    /// Vertical distance between neighbouring questions.
    pub question_spacing: u32,
    /// Offset of the question number from its column origin.
    pub question_number_offset: u32,
    /// Offset of the first bubble center from its column origin.
    pub bubble_offset: u32,
}

pub const DEFAULT_NUM_QUESTIONS: u32 = 20;

/// A4 sheet (210mm x 297mm) at 10 pixels per millimetre.
pub fn get_sheet_geometry_a4() -> SheetGeometry {
    SheetGeometry {
        canvas_size: Size {
            width: 2100,
            height: 2970,
        },
        margin: 100,
        header_height: 400,
        num_options: OPTION_LABELS.len() as u32,
        num_questions: DEFAULT_NUM_QUESTIONS,
        questions_per_column: 25,
        columns: 2,
        max_questions: 50,
        bubble_radius: 30,
        bubble_spacing: 120,
        question_spacing: 95,
        question_number_offset: 50,
        bubble_offset: 200,
    }
}

impl Default for SheetGeometry {
    fn default() -> Self {
        get_sheet_geometry_a4()
    }
}

impl SheetGeometry {
    /// Largest question count that fits on the page without crowding.
    pub fn question_limit(&self) -> u32 {
        self.max_questions
            .min(self.columns.saturating_mul(self.questions_per_column))
    }

    /// Returns a copy with the question count replaced, failing if the new
    /// layout is invalid.
    pub fn with_num_questions(&self, num_questions: u32) -> Result<Self, ConfigurationError> {
        let geometry = SheetGeometry {
            num_questions,
            ..*self
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Returns a copy with the question count clamped to `[1, question_limit]`.
    pub fn with_num_questions_clamped(&self, num_questions: u32) -> Self {
        SheetGeometry {
            num_questions: num_questions.clamp(1, self.question_limit().max(1)),
            ..*self
        }
    }

    /// Y coordinate of the first row of bubbles.
    pub fn start_y(&self) -> u32 {
        self.header_height.saturating_add(self.margin)
    }

    /// Width of the page minus both margins.
    pub fn content_width(&self) -> u32 {
        self.canvas_size.width.saturating_sub(self.margin.saturating_mul(2))
    }

    /// Checks the layout and that every bubble lies fully on the page.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.bubble_radius == 0 {
            return Err(ConfigurationError::InvalidLayout(
                "bubble radius must be positive".into(),
            ));
        }
        if self.bubble_spacing == 0 || self.question_spacing == 0 {
            return Err(ConfigurationError::InvalidLayout(
                "bubble and question spacing must be positive".into(),
            ));
        }
        if self.columns == 0 || self.questions_per_column == 0 {
            return Err(ConfigurationError::InvalidLayout(
                "sheet needs at least one column of questions".into(),
            ));
        }

        let max_options = OPTION_LABELS.len() as u32;
        if self.num_options == 0 || self.num_options > max_options {
            return Err(ConfigurationError::InvalidOptionCount {
                count: self.num_options,
                max: max_options,
            });
        }

        let max = self.question_limit();
        if self.num_questions == 0 || self.num_questions > max {
            return Err(ConfigurationError::InvalidQuestionCount {
                count: self.num_questions,
                max,
            });
        }

        let (width, height) = (self.canvas_size.width, self.canvas_size.height);
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(ConfigurationError::InvalidLayout(format!(
                "page of {}x{} pixels is too large",
                width, height
            )));
        }
        let longest_side = width.max(height);
        for (name, value) in [
            ("margin", self.margin),
            ("header height", self.header_height),
            ("bubble radius", self.bubble_radius),
            ("bubble spacing", self.bubble_spacing),
            ("question spacing", self.question_spacing),
            ("question number offset", self.question_number_offset),
            ("bubble offset", self.bubble_offset),
        ] {
            if value > longest_side {
                return Err(ConfigurationError::InvalidLayout(format!(
                    "{} of {} does not fit on a {}x{} page",
                    name, value, width, height
                )));
            }
        }

        let radius = self.bubble_radius as u64;
        for question in 0..self.num_questions {
            for option in 0..self.num_options {
                let (x, y) = wide_bubble_center(self, question, option);
                if x < radius
                    || y < radius
                    || x.saturating_add(radius) > width as u64
                    || y.saturating_add(radius) > height as u64
                {
                    return Err(ConfigurationError::BubbleOutOfBounds { question, option });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_geometry_is_valid() {
        let geometry = get_sheet_geometry_a4();
        assert_eq!(geometry.validate(), Ok(()));
        assert_eq!(geometry.start_y(), 500);
        assert_eq!(geometry.content_width(), 1900);
        assert_eq!(geometry.question_limit(), 50);
    }

    #[test]
    fn test_full_sheet_is_valid() {
        let geometry = get_sheet_geometry_a4().with_num_questions(50).unwrap();
        assert_eq!(geometry.num_questions, 50);
    }

    #[test]
    fn test_question_count_bounds() {
        let geometry = get_sheet_geometry_a4();
        assert_eq!(
            geometry.with_num_questions(0),
            Err(ConfigurationError::InvalidQuestionCount { count: 0, max: 50 })
        );
        assert_eq!(
            geometry.with_num_questions(51),
            Err(ConfigurationError::InvalidQuestionCount { count: 51, max: 50 })
        );
    }

    #[test]
    fn test_clamped_question_count() {
        let geometry = get_sheet_geometry_a4();
        assert_eq!(geometry.with_num_questions_clamped(0).num_questions, 1);
        assert_eq!(geometry.with_num_questions_clamped(500).num_questions, 50);
        assert_eq!(geometry.with_num_questions_clamped(7).num_questions, 7);
    }

    #[test]
    fn test_option_count_bounds() {
        let geometry = SheetGeometry {
            num_options: 5,
            ..get_sheet_geometry_a4()
        };
        assert_eq!(
            geometry.validate(),
            Err(ConfigurationError::InvalidOptionCount { count: 5, max: 4 })
        );
    }

    #[test]
    fn test_degenerate_layout() {
        let geometry = SheetGeometry {
            bubble_radius: 0,
            ..get_sheet_geometry_a4()
        };
        assert!(matches!(
            geometry.validate(),
            Err(ConfigurationError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_bubbles_off_the_page() {
        let geometry = SheetGeometry {
            canvas_size: Size {
                width: 2100,
                height: 1000,
            },
            ..get_sheet_geometry_a4()
        };
        assert!(matches!(
            geometry.validate(),
            Err(ConfigurationError::BubbleOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_extreme_layout_values_are_rejected() {
        let a4 = get_sheet_geometry_a4();
        for geometry in [
            SheetGeometry {
                bubble_offset: u32::MAX - 50,
                ..a4
            },
            SheetGeometry {
                bubble_radius: 1 << 31,
                ..a4
            },
            SheetGeometry {
                bubble_spacing: u32::MAX,
                ..a4
            },
            SheetGeometry {
                margin: u32::MAX,
                ..a4
            },
            SheetGeometry {
                canvas_size: Size {
                    width: u32::MAX,
                    height: 2970,
                },
                ..a4
            },
        ] {
            assert!(matches!(
                geometry.validate(),
                Err(ConfigurationError::InvalidLayout(_))
            ));
        }
    }

    #[test]
    fn test_rows_running_off_a_large_page_are_rejected() {
        // Every field fits on the page on its own, but the rows do not.
        let geometry = SheetGeometry {
            question_spacing: 2970,
            ..get_sheet_geometry_a4()
        };
        assert_eq!(
            geometry.validate(),
            Err(ConfigurationError::BubbleOutOfBounds {
                question: 1,
                option: 0
            })
        );
    }

    proptest! {
        #[test]
        fn prop_any_layout_validates_without_panicking(
            width in prop_oneof![0u32..5000, any::<u32>()],
            height in prop_oneof![0u32..5000, any::<u32>()],
            margin in prop_oneof![0u32..500, any::<u32>()],
            header_height in prop_oneof![0u32..1000, any::<u32>()],
            bubble_radius in prop_oneof![0u32..100, any::<u32>()],
            bubble_spacing in prop_oneof![0u32..300, any::<u32>()],
            question_spacing in prop_oneof![0u32..200, any::<u32>()],
            bubble_offset in prop_oneof![0u32..500, any::<u32>()],
            columns in prop_oneof![0u32..4, any::<u32>()],
            questions_per_column in prop_oneof![0u32..30, any::<u32>()],
            num_questions in 1u32..=50,
        ) {
            let geometry = SheetGeometry {
                canvas_size: Size { width, height },
                margin,
                header_height,
                bubble_radius,
                bubble_spacing,
                question_spacing,
                bubble_offset,
                columns,
                questions_per_column,
                num_questions,
                ..get_sheet_geometry_a4()
            };
            if geometry.validate().is_ok() {
                for question in 0..num_questions {
                    for center in crate::geometry::bubble_centers(&geometry, question) {
                        prop_assert!(center.x >= bubble_radius);
                        prop_assert!(center.y >= bubble_radius);
                        prop_assert!(center.x as u64 + bubble_radius as u64 <= width as u64);
                        prop_assert!(center.y as u64 + bubble_radius as u64 <= height as u64);
                    }
                }
            }
        }
    }
}
