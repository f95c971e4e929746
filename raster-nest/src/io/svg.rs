use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Text, Title};

use crate::entities::{Entity, NestedPart, NestedPartOrigin};
use crate::geometry::primitives::Rect;
use crate::nest::NestingOutcome;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgTheme,
    ///Draw the nesting bounds of every part as a dashed rectangle
    #[serde(default)]
    pub nesting_bounds: bool,
    ///Draw the envelope occupied by all parts on the sheet
    #[serde(default)]
    pub envelope: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgTheme::default(),
            nesting_bounds: true,
            envelope: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgTheme {
    pub stroke_width_multiplier: f64,
    pub sheet_fill: Color,
    pub part_fill: Color,
    pub embedded_part_fill: Color,
    pub already_nested_fill: Color,
    pub boundary_fill: Color,
    pub hole_fill: Color,
}

impl Default for SvgTheme {
    fn default() -> Self {
        SvgTheme::EARTH_TONES
    }
}

impl SvgTheme {
    pub const EARTH_TONES: SvgTheme = SvgTheme {
        stroke_width_multiplier: 2.0,
        sheet_fill: Color(0xCC, 0x82, 0x4A),
        part_fill: Color(0xFF, 0xC8, 0x79),
        embedded_part_fill: Color(0x8F, 0xD1, 0x4F),
        already_nested_fill: Color(0xD9, 0xB0, 0x8C),
        boundary_fill: Color(0x7A, 0x7A, 0x7A),
        hole_fill: Color(0x2D, 0x2D, 0x2D),
    };
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Renders the sheet of a nesting outcome with all parts on it.
pub fn outcome_to_svg(outcome: &NestingOutcome, options: SvgDrawOptions, title: &str) -> Document {
    let state = &outcome.state;
    let sheet = state.sheet();
    let sheet_rect = Rect::new(0.0, 0.0, sheet.width, sheet.height);
    let theme = &options.theme;

    let margin = 0.05 * f64::max(sheet.width, sheet.height);
    let vbox = sheet_rect.offset(margin).unwrap_or(sheet_rect);
    let stroke_width =
        f64::min(vbox.width(), vbox.height()) * 0.001 * theme.stroke_width_multiplier;

    let label = {
        let label_content = format!(
            "sheet: {} | {:.3} x {:.3} | nested: {} | not nested: {} | utilization: {:.3}% | {}",
            sheet.id,
            sheet.width,
            sheet.height,
            outcome.newly_nested.len(),
            outcome.not_nested.len(),
            outcome.utilization() * 100.0,
            title,
        );
        let font_size = (f64::min(sheet.width, sheet.height) * 0.025) as f32;
        Text::new(label_content)
            .set("x", 0.0f32)
            .set("y", -0.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let dashed_style = [
        ("fill", "none".to_string()),
        ("stroke", "black".to_string()),
        ("stroke-width", format!("{}", 0.5 * stroke_width)),
        ("stroke-opacity", "0.5".to_string()),
        (
            "stroke-dasharray",
            format!("{} {}", 2.0 * stroke_width, 2.0 * stroke_width),
        ),
    ];

    //draw sheet
    let mut sheet_group = Group::new()
        .set("id", format!("sheet_{}", sheet.id))
        .add(data_to_path(
            rect_data(sheet_rect),
            &[
                ("fill", format!("{}", theme.sheet_fill)),
                ("stroke", "black".to_string()),
                ("stroke-width", format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!(
            "sheet, id: {}, width: {:.3}, height: {:.3}",
            sheet.id, sheet.width, sheet.height
        )));

    if let Some(envelope) = state.envelope().filter(|_| options.envelope) {
        sheet_group = sheet_group.add(
            data_to_path(rect_data(envelope), &dashed_style).add(Title::new("occupied envelope")),
        );
    }

    //draw parts
    let mut parts_group = Group::new().set("id", "parts");
    for (_, np) in state.nested_parts() {
        let fill = match np.origin {
            NestedPartOrigin::CutBoundary => theme.boundary_fill,
            NestedPartOrigin::AlreadyNested => theme.already_nested_fill,
            NestedPartOrigin::Newly if np.embedded_in.is_some() => theme.embedded_part_fill,
            NestedPartOrigin::Newly => theme.part_fill,
        };
        let mut part_group = Group::new()
            .set("id", format!("part_{}", np.part.nesting_id()))
            .add(data_to_path(
                loop_data(np.part.outside_loop()),
                &[
                    ("fill", format!("{fill}")),
                    ("stroke", "black".to_string()),
                    ("stroke-width", format!("{stroke_width}")),
                ],
            ))
            .add(Title::new(part_title(np)));
        for hole in np.part.inside_loops() {
            part_group = part_group.add(data_to_path(
                loop_data(hole),
                &[
                    ("fill", format!("{}", theme.hole_fill)),
                    ("stroke", "black".to_string()),
                    ("stroke-width", format!("{}", 0.5 * stroke_width)),
                ],
            ));
        }
        if options.nesting_bounds {
            part_group = part_group.add(data_to_path(rect_data(np.nesting_bounds), &dashed_style));
        }
        parts_group = parts_group.add(part_group);
    }

    let vbox_svg = (
        vbox.x_min as f32,
        vbox.y_min as f32,
        vbox.width() as f32,
        vbox.height() as f32,
    );

    Document::new()
        .set("viewBox", vbox_svg)
        .add(sheet_group)
        .add(parts_group)
        .add(label)
}

fn part_title(np: &NestedPart) -> String {
    let origin = match np.origin {
        NestedPartOrigin::AlreadyNested => "already nested",
        NestedPartOrigin::CutBoundary => "boundary",
        NestedPartOrigin::Newly => "newly nested",
    };
    format!(
        "part, id: {}, {origin}, rotation: {}, nesting bounds: [x_min: {:.3}, y_min: {:.3}, x_max: {:.3}, y_max: {:.3}]",
        np.part.nesting_id(),
        np.part
            .rotation()
            .map_or("-".to_string(), |r| format!("{r:.1}°")),
        np.nesting_bounds.x_min,
        np.nesting_bounds.y_min,
        np.nesting_bounds.x_max,
        np.nesting_bounds.y_max
    )
}

fn loop_data(entity: &Entity) -> Data {
    let mut points = entity.extents_points().iter();
    let Some(first) = points.next() else {
        return Data::new();
    };
    let data = points.fold(Data::new().move_to(svg_coords(first.0, first.1)), |data, p| {
        data.line_to(svg_coords(p.0, p.1))
    });
    data.close()
}

fn rect_data(rect: Rect) -> Data {
    Data::new()
        .move_to(svg_coords(rect.x_min, rect.y_min))
        .line_to(svg_coords(rect.x_max, rect.y_min))
        .line_to(svg_coords(rect.x_max, rect.y_max))
        .line_to(svg_coords(rect.x_min, rect.y_max))
        .close()
}

//svg path data is single precision
fn svg_coords(x: f64, y: f64) -> (f32, f32) {
    (x as f32, y as f32)
}

fn data_to_path(data: Data, params: &[(&str, String)]) -> Path {
    let mut path = Path::new();
    for (key, value) in params {
        path = path.set(*key, value.clone())
    }
    path.set("d", data)
}
