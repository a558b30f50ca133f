//! SVG serialization of a composed [`Scene`].
//!
//! Uses the [`svg`] crate for document construction, XML escaping, and
//! path data formatting. The centerline becomes a single `<path>` of
//! `M`/`L` commands, the start/finish marker a rotated `<rect>`, each
//! car a `<g>` holding a `<circle>` and its abbreviation `<text>`, and
//! each corner a `<g>` holding the label `<text>` and its leader
//! `<path>`.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Element, Group, Path, Rectangle};
use svg::node::{Node, Text, Value};

use crate::scene::Scene;
use trackmap_pipeline::types::Point;

/// Centerline colour.
const TRACK_COLOUR: &str = "black";
/// Colour for the start/finish marker and corner annotations.
const ACCENT_COLOUR: &str = "red";
/// Contrast outline colour behind markers and text, standing in for
/// the rendering surface's background.
const SURFACE_COLOUR: &str = "white";

/// Opacity of corner leader lines.
const LEADER_OPACITY: f64 = 0.25;

/// Build an SVG path `d` attribute string from a point sequence.
///
/// Uses `M` for the first point and `L` for subsequent points. Returns
/// an empty string for sequences with fewer than 2 points.
///
/// # Examples
///
/// ```
/// use trackmap_pipeline::types::Point;
/// use trackmap_scene::build_path_data;
///
/// let d = build_path_data(&[Point::new(10.0, 20.0), Point::new(30.0, -40.0)]);
/// assert_eq!(d, "M10,20 L30,-40");
/// ```
#[must_use]
pub fn build_path_data(points: &[Point]) -> String {
    if points.len() < 2 {
        return String::new();
    }

    let first = points[0];
    let mut data = Data::new().move_to((first.x, first.y));
    for p in &points[1..] {
        data = data.line_to((p.x, p.y));
    }
    String::from(Value::from(data))
}

/// Serialize a scene into an SVG document string.
///
/// The `viewBox` is the scene's viewport, so the coordinate space
/// matches the transformed survey geometry and the document scales to
/// any rendering size.
#[must_use]
pub fn to_svg(scene: &Scene) -> String {
    let stroke = scene.stroke;
    let vp = scene.viewport;

    let mut doc = Document::new().set(
        "viewBox",
        format!("{} {} {} {}", vp.min_x, vp.min_y, vp.width, vp.height),
    );

    // Centerline.
    let d = build_path_data(&scene.centerline);
    if !d.is_empty() {
        doc = doc.add(
            Path::new()
                .set("d", d)
                .set("fill", "none")
                .set("stroke", TRACK_COLOUR)
                .set("stroke-width", stroke)
                .set("stroke-linejoin", "round"),
        );
    }

    doc = doc.add(start_marker_rect(scene));

    for marker in &scene.cars {
        let mut group = Group::new().set("opacity", marker.opacity);

        group = group.add(
            Circle::new()
                .set("cx", marker.position.x)
                .set("cy", marker.position.y)
                .set("r", marker.radius)
                .set("fill", format!("#{}", marker.colour))
                .set("stroke", SURFACE_COLOUR)
                .set("stroke-width", marker.font_size / 10.0),
        );

        let mut label = text_element(
            Point::new(
                1.5f64.mul_add(stroke, marker.position.x),
                marker.position.y + stroke,
            ),
            marker.font_size,
            &format!("#{}", marker.colour),
        );
        label.assign("stroke-width", marker.font_size / 30.0);
        label.append(Text::new(marker.label.clone()));
        group = group.add(label);

        doc = doc.add(group);
    }

    for annotation in &scene.corners {
        let mut label = text_element(annotation.label, annotation.font_size, ACCENT_COLOUR);
        label.assign("stroke-width", annotation.font_size / 40.0);
        label.append(Text::new(annotation.text.clone()));

        let leader = Data::new()
            .move_to((annotation.leader_from.x, annotation.leader_from.y))
            .line_to((annotation.leader_to.x, annotation.leader_to.y));

        let group = Group::new().add(label).add(
            Path::new()
                .set("d", leader)
                .set("stroke", ACCENT_COLOUR)
                .set("stroke-width", stroke / 2.0)
                .set("opacity", LEADER_OPACITY),
        );

        doc = doc.add(group);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

/// The start/finish bar: a `4 × 1` stroke-unit rectangle anchored at
/// the first centerline point, re-centered onto it and rotated
/// perpendicular to the start/finish straight.
fn start_marker_rect(scene: &Scene) -> Rectangle {
    let stroke = scene.stroke;
    let position = scene.start_marker.position;

    Rectangle::new()
        .set("x", position.x)
        .set("y", position.y)
        .set("width", stroke * 4.0)
        .set("height", stroke)
        .set("fill", ACCENT_COLOUR)
        .set("stroke", SURFACE_COLOUR)
        .set("stroke-width", stroke / 2.0)
        .set(
            "transform",
            format!(
                "translate({} {}) rotate({}, {}, {})",
                stroke * -2.0,
                -stroke / 2.0,
                scene.start_marker.angle + 90.0,
                2.0f64.mul_add(stroke, position.x),
                position.y + stroke / 2.0,
            ),
        )
}

/// A bold `<text>` element with a contrast outline, content appended by
/// the caller.
fn text_element(at: Point, font_size: f64, fill: &str) -> Element {
    let mut element = Element::new("text");
    element.assign("x", at.x);
    element.assign("y", at.y);
    element.assign("fill", fill);
    element.assign("font-size", font_size);
    element.assign("font-weight", "bold");
    element.assign("stroke", SURFACE_COLOUR);
    element
}
