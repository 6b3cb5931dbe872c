use ratatui::style::Color;

/// Colors used across the storefront preview
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub price: Color,
    pub vendor: Color,
    pub link: Color,
    pub paused: Color,
    pub running: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            price: Color::Rgb(0xa9, 0xb6, 0x65),
            vendor: Color::Rgb(0x7d, 0xae, 0xa3),
            link: Color::Rgb(0xd3, 0x86, 0x9b),
            paused: Color::Rgb(0xe7, 0x8a, 0x4e),
            running: Color::Rgb(0xa9, 0xb6, 0x65),
            error: Color::Rgb(0xea, 0x69, 0x62),
            accent: Color::Rgb(0xd8, 0xa6, 0x57),
        }
    }
}

impl Theme {
    /// Blend `to` over `from` by `t` in [0, 1]. Non-RGB colors switch at the midpoint.
    pub fn blend(from: Color, to: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        match (from, to) {
            (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
                let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
                Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
            }
            _ if t < 0.5 => from,
            _ => to,
        }
    }
}
