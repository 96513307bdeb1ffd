use egui::Color32;

/// Colors backing one scene background token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Gradient color at the top of the viewport.
    pub sky: Color32,
    /// Gradient color at the bottom of the viewport.
    pub ground: Color32,
    /// Text color readable over the gradient.
    pub ink: Color32,
    /// Accent for progress, dots and indicators.
    pub accent: Color32,
}

impl Palette {
    /// Resolve a deck background token; unknown tokens fall back to the
    /// neutral slate palette.
    pub fn for_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "dawn" => Self {
                sky: Color32::from_rgb(250, 176, 130),
                ground: Color32::from_rgb(233, 109, 114),
                ink: Color32::from_rgb(255, 252, 245),
                accent: Color32::from_rgb(255, 224, 166),
            },
            "meadow" => Self {
                sky: Color32::from_rgb(168, 219, 168),
                ground: Color32::from_rgb(59, 134, 99),
                ink: Color32::from_rgb(250, 255, 248),
                accent: Color32::from_rgb(220, 245, 180),
            },
            "sea" => Self {
                sky: Color32::from_rgb(126, 190, 228),
                ground: Color32::from_rgb(36, 86, 153),
                ink: Color32::from_rgb(245, 251, 255),
                accent: Color32::from_rgb(170, 220, 255),
            },
            "dusk" => Self {
                sky: Color32::from_rgb(148, 120, 190),
                ground: Color32::from_rgb(54, 39, 98),
                ink: Color32::from_rgb(248, 245, 255),
                accent: Color32::from_rgb(220, 190, 255),
            },
            "bloom" => Self {
                sky: Color32::from_rgb(244, 164, 208),
                ground: Color32::from_rgb(196, 74, 138),
                ink: Color32::from_rgb(255, 247, 252),
                accent: Color32::from_rgb(255, 200, 230),
            },
            _ => Self {
                sky: Color32::from_rgb(148, 163, 184),
                ground: Color32::from_rgb(71, 85, 105),
                ink: Color32::from_rgb(248, 250, 252),
                accent: Color32::from_rgb(203, 213, 225),
            },
        }
    }
}

/// Scale a color to `opacity` in `[0, 1]`.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let a = (opacity.clamp(0.0, 1.0) * color.a() as f32).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

/// Linear channel blend from `a` to `b` by `t` in `[0, 1]`.
pub fn mix(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_unmultiplied(
        ch(a.r(), b.r()),
        ch(a.g(), b.g()),
        ch(a.b(), b.b()),
        ch(a.a(), b.a()),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/ui/theme.rs"]
mod tests;
