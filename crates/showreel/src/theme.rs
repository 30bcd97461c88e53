use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    /// Panels, pills and the controls bar.
    pub surface: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub subdued: Color32,
    pub accent: Color32,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub body_size: f32,
    pub caption_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::showreel()
    }
}

impl Theme {
    /// Gold on near-black.
    pub fn showreel() -> Self {
        Self {
            background: Color32::from_rgb(0x0B, 0x0B, 0x0B),
            surface: Color32::from_rgb(0x1A, 0x17, 0x12),
            foreground: Color32::from_rgb(0xE8, 0xE2, 0xD6),
            heading_color: Color32::WHITE,
            subdued: Color32::from_rgb(0x8C, 0x86, 0x7A),
            accent: Color32::from_rgb(0xC5, 0x8B, 0x30),
            title_size: 96.0,
            subtitle_size: 44.0,
            body_size: 36.0,
            caption_size: 24.0,
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
