//! Corner annotation geometry: label text and leader lines.
//!
//! Computed once per track selection and reused every frame, since
//! corners do not move.

use crate::types::{CornerTransformed, Point};

/// Corner label font size in stroke units.
const CORNER_FONT_STROKES: f64 = 2.0;

/// Horizontal leader-line advance per label character, in font-size
/// units.
const LEADER_ADVANCE_PER_CHAR: f64 = 0.25;

/// Upward leader-line adjustment when the label sits below the corner,
/// in font-size units. Keeps the leader from crossing the label text.
const LEADER_ASCENT_FACTOR: f64 = 0.7;

/// A corner annotation ready for rendering: the label, its anchor, and
/// the leader line connecting it back to the corner.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerAnnotation {
    /// Label text: the corner number plus any suffix letter.
    pub text: String,
    /// Label anchor in screen space.
    pub label: Point,
    /// Leader line start: the corner point itself.
    pub leader_from: Point,
    /// Leader line end, beside the label text.
    pub leader_to: Point,
    /// Label font size.
    pub font_size: f64,
}

/// Compute annotations for all transformed corners.
#[must_use]
pub fn corner_annotations(corners: &[CornerTransformed], stroke: f64) -> Vec<CornerAnnotation> {
    corners
        .iter()
        .map(|corner| annotate_corner(corner, stroke))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn annotate_corner(corner: &CornerTransformed, stroke: f64) -> CornerAnnotation {
    let mut text = corner.number.to_string();
    if let Some(letter) = &corner.letter {
        text.push_str(letter);
    }

    let font_size = CORNER_FONT_STROKES * stroke;

    // The leader ends just past the label text, advancing a quarter of
    // the font size per character. When the label hangs below the
    // corner the end point is lifted so the line stays clear of the
    // glyphs.
    let advance = font_size * (text.chars().count() as f64 * LEADER_ADVANCE_PER_CHAR);
    let ascent = if corner.label.y > corner.corner.y {
        font_size * LEADER_ASCENT_FACTOR
    } else {
        0.0
    };

    CornerAnnotation {
        leader_from: corner.corner,
        leader_to: Point::new(corner.label.x + advance, corner.label.y - ascent),
        label: corner.label,
        font_size,
        text,
    }
}
