use std::fmt;

/// A single cell color, stored as `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }

    pub fn is_opaque(&self) -> bool {
        self.a() == 255
    }

    /// Packs the color as `0xAARRGGBB`.
    pub fn to_argb32(&self) -> u32 {
        u32::from_be_bytes([self.a(), self.r(), self.g(), self.b()])
    }

    pub fn from_argb32(value: u32) -> Self {
        let [a, r, g, b] = value.to_be_bytes();
        Self([r, g, b, a])
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())?;
        if !self.is_opaque() {
            write!(f, "{:02X}", self.a())?;
        }
        Ok(())
    }
}
