use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Emoji face yellow (#ffdd67).
pub const SKIN_TONE: Color = Color::rgb(0xff, 0xdd, 0x67);
/// Iris and mouth brown (#664e27).
pub const FEATURE_BROWN: Color = Color::rgb(0x66, 0x4e, 0x27);
pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_array() {
        assert_eq!(FEATURE_BROWN.to_array(), [0x66, 0x4e, 0x27, 0xff]);
        assert_eq!(Color::rgba(1, 2, 3, 4).to_array(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Color::rgb(1, 2, 3).a, 0xff);
    }
}
