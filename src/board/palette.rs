use egui::Color32;

/// Card colour for any line name outside the canonical eleven.
pub const DEFAULT_LINE_COLOR: Color32 = Color32::from_rgb(0x41, 0x45, 0x4b);

/// TfL brand colour for a line name.
///
/// Covers the eleven canonical Underground lines; everything else (new
/// lines, renames, non-tube modes leaking into the feed) gets the neutral
/// default card colour.
pub fn line_color(name: &str) -> Color32 {
    match name {
        "Bakerloo" => Color32::from_rgb(0xb3, 0x63, 0x05),
        "Central" => Color32::from_rgb(0xe3, 0x20, 0x17),
        "Circle" => Color32::from_rgb(0xff, 0xd3, 0x00),
        "District" => Color32::from_rgb(0x00, 0x78, 0x2a),
        "Hammersmith & City" => Color32::from_rgb(0xf3, 0xa9, 0xbb),
        "Jubilee" => Color32::from_rgb(0xa0, 0xa5, 0xa9),
        "Metropolitan" => Color32::from_rgb(0x9b, 0x00, 0x56),
        "Northern" => Color32::from_rgb(0x00, 0x00, 0x00),
        "Piccadilly" => Color32::from_rgb(0x00, 0x36, 0x88),
        "Victoria" => Color32::from_rgb(0x00, 0x98, 0xd4),
        "Waterloo & City" => Color32::from_rgb(0x95, 0xcd, 0xba),
        _ => DEFAULT_LINE_COLOR,
    }
}

/// Readable text colour on top of a card colour.
///
/// The pale roundel colours (Circle, Hammersmith & City, Waterloo & City)
/// need dark text; the rest take white.
pub fn header_text_color(background: Color32) -> Color32 {
    // Rec. 601 luma, good enough to split this palette
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 150. {
        Color32::from_rgb(0x1c, 0x1c, 0x1c)
    } else {
        Color32::WHITE
    }
}
