//! Page header: title band plus blank "Name:" and "Date:" fields.
//!
//! Identical on every page regardless of mode or variant.

use super::{PageGeometry, POINTS_PER_INCH};
use crate::render::{Align, FontSpec, Surface};

pub const TITLE: &str = "Math Worksheet Generator";

const TITLE_FONT: FontSpec = FontSpec::bold(16.0);
const FIELD_FONT: FontSpec = FontSpec::regular(12.0);

pub fn draw_header<S: Surface + ?Sized>(surface: &mut S, geometry: &PageGeometry) {
    surface.text(
        geometry.width / 2.0,
        geometry.height - 0.5 * POINTS_PER_INCH,
        TITLE,
        TITLE_FONT,
        Align::Center,
    );

    let fields_y = geometry.height - 1.2 * POINTS_PER_INCH;
    surface.text(
        geometry.margin,
        fields_y,
        &format!("Name: {}", "_".repeat(30)),
        FIELD_FONT,
        Align::Left,
    );

    // Date ends flush with the right margin
    let date = format!("Date: {}", "_".repeat(15));
    let date_x = geometry.width - geometry.margin - surface.text_width(&date, FIELD_FONT);
    surface.text(date_x, fields_y, &date, FIELD_FONT, Align::Left);
}
