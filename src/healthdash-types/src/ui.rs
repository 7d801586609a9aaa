use serde::{Deserialize, Serialize};

/// ARGB color, `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const PRIMARY: Color = Color(0xFF3F51B5);
    pub const SURFACE: Color = Color(0xFF060705);
    pub const ON_SURFACE: Color = Color(0xFFFDFDFD);

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Same RGB with alpha replaced; `alpha` is clamped to `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Color {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u32;
        Color((a << 24) | (self.0 & 0x00FF_FFFF))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Walk,
    FireDepartment,
    Map,
    Chart,
}

/// A stat card ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUiModel {
    pub name: String,
    pub value: String,
    pub background: Color,
    pub foreground: Color,
    pub icon: Icon,
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn with_alpha_replaces_alpha_only() {
        let half = Color::PRIMARY.with_alpha(0.5);
        assert_eq!(half.alpha(), 128);
        assert_eq!(half.0 & 0x00FF_FFFF, Color::PRIMARY.0 & 0x00FF_FFFF);
        assert_eq!(Color::PRIMARY.with_alpha(3.0), Color::PRIMARY);
    }
}
