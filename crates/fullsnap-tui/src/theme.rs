use ratatui::style::Color;

/// Colors used by the page and status bar widgets
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey2: Color,

    /// Border colors, cycled per page
    pub page_accents: Vec<Color>,

    pub accent: Color,
    pub warning: Color,
}

impl Theme {
    /// Border color for page `index`
    pub fn page_accent(&self, index: usize) -> Color {
        if self.page_accents.is_empty() {
            self.accent
        } else {
            self.page_accents[index % self.page_accents.len()]
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            page_accents: vec![
                Color::Rgb(0xea, 0x69, 0x62),
                Color::Rgb(0xe7, 0x8a, 0x4e),
                Color::Rgb(0xd8, 0xa6, 0x57),
                Color::Rgb(0xa9, 0xb6, 0x65),
                Color::Rgb(0x89, 0xb4, 0x82),
                Color::Rgb(0x7d, 0xae, 0xa3),
                Color::Rgb(0xd3, 0x86, 0x9b),
            ],
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        }
    }
}
