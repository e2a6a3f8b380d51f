//! Reads filled-in optical mark recognition answer sheets and grades them.
//!
//! The pipeline is: [`answer_sheet::SheetGeometry`] →
//! [`geometry::bubble_centers`] → [`darkness::score_bubble`] per bubble →
//! [`decision::detect_answer`] per question → [`grading::grade`].
//! [`interpret`] wires these together for a decoded image or a file on disk.

pub mod answer_sheet;
pub mod darkness;
pub mod debug;
pub mod decision;
pub mod exam;
pub mod geometry;
pub mod grading;
pub mod image_utils;
pub mod interpret;
#[cfg(test)]
mod test_utils;
pub mod types;
