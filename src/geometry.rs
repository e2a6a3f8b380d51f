//! Pixel positions of everything printed in the answer area of a sheet.
//!
//! These functions are the single source of coordinates for both drawing a
//! sheet and reading one back. Questions fill a column top to bottom, then
//! continue in the next column; options run left to right within a row.

use imageproc::point::Point;
use imageproc::rect::Rect;
use serde::Serialize;

use crate::answer_sheet::SheetGeometry;

/// Location of a single answer bubble.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleCoordinate {
    pub question_index: u32,
    pub option_index: u32,
    pub x: u32,
    pub y: u32,
    pub radius: u32,
}

impl BubbleCoordinate {
    pub fn center(&self) -> Point<u32> {
        Point::new(self.x, self.y)
    }
}

/// Column and row of a question within the answer area.
pub fn question_cell(geometry: &SheetGeometry, question_index: u32) -> (u32, u32) {
    debug_assert!(
        question_index < geometry.num_questions,
        "question index {} out of range",
        question_index
    );
    (
        question_index / geometry.questions_per_column,
        question_index % geometry.questions_per_column,
    )
}

/// Left edge of a column. The first column starts at the page margin, the
/// others at an even division of the page width.
pub fn column_origin_x(geometry: &SheetGeometry, column: u32) -> u32 {
    if column == 0 {
        geometry.margin
    } else {
        (column as u64 * geometry.canvas_size.width as u64 / geometry.columns as u64) as u32
    }
}

/// Center of one bubble in 64-bit arithmetic. Extreme layouts saturate here
/// instead of wrapping, so validation can reject them.
pub(crate) fn wide_bubble_center(
    geometry: &SheetGeometry,
    question_index: u32,
    option_index: u32,
) -> (u64, u64) {
    let (column, row) = question_cell(geometry, question_index);
    let x = (column_origin_x(geometry, column) as u64)
        .saturating_add(geometry.bubble_offset as u64)
        .saturating_add(option_index as u64 * geometry.bubble_spacing as u64);
    let y = (geometry.header_height as u64 + geometry.margin as u64)
        .saturating_add(row as u64 * geometry.question_spacing as u64);
    (x, y)
}

/// Centers of every option bubble for a question, in option order.
///
/// The geometry must have passed [`SheetGeometry::validate`], which keeps
/// every center on the page.
pub fn bubble_centers(geometry: &SheetGeometry, question_index: u32) -> Vec<Point<u32>> {
    (0..geometry.num_options)
        .map(|option| {
            let (x, y) = wide_bubble_center(geometry, question_index, option);
            Point::new(x as u32, y as u32)
        })
        .collect()
}

/// Every bubble on the sheet, ordered by question then option.
pub fn bubble_coordinates(geometry: &SheetGeometry) -> Vec<BubbleCoordinate> {
    (0..geometry.num_questions)
        .flat_map(|question_index| {
            bubble_centers(geometry, question_index)
                .into_iter()
                .enumerate()
                .map(move |(option_index, center)| BubbleCoordinate {
                    question_index,
                    option_index: option_index as u32,
                    x: center.x,
                    y: center.y,
                    radius: geometry.bubble_radius,
                })
        })
        .collect()
}

/// Anchor of the printed question number (centered text baseline).
pub fn question_label_position(geometry: &SheetGeometry, question_index: u32) -> Point<u32> {
    let (column, _) = question_cell(geometry, question_index);
    let (_, y) = wide_bubble_center(geometry, question_index, 0);
    Point::new(
        column_origin_x(geometry, column) + geometry.question_number_offset,
        y as u32 + geometry.bubble_radius / 2,
    )
}

/// Anchor of the option letter printed underneath a bubble.
pub fn option_label_position(
    geometry: &SheetGeometry,
    question_index: u32,
    option_index: u32,
) -> Point<u32> {
    let center = bubble_centers(geometry, question_index)[option_index as usize];
    Point::new(center.x, center.y + geometry.bubble_radius + 40)
}

/// The square of side `2 * radius` that is sampled when scoring a bubble.
pub fn bubble_bounds(geometry: &SheetGeometry, question_index: u32, option_index: u32) -> Rect {
    let center = bubble_centers(geometry, question_index)[option_index as usize];
    let radius = geometry.bubble_radius as i32;
    Rect::at(center.x as i32 - radius, center.y as i32 - radius)
        .of_size(geometry.bubble_radius * 2, geometry.bubble_radius * 2)
}
