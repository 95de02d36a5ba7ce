//! Pixel colour and wire ordering
//!
//! WS2812 receivers expect green first, then red, then blue. Callers think
//! in red/green/blue, so the reordering lives here, in one place, behind
//! named fields.

/// One LED's colour, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    /// All channels off
    pub const OFF: Pixel = Pixel::new(0, 0, 0);

    /// Create a pixel from conventional red, green, blue order
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a pixel from bytes in wire order (green, red, blue)
    pub const fn from_wire(green: u8, red: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channel bytes in the order they are clocked out: `[green, red, blue]`
    pub const fn wire_bytes(&self) -> [u8; 3] {
        [self.green, self.red, self.blue]
    }
}

/// Tuples are read as `(red, green, blue)`
impl From<(u8, u8, u8)> for Pixel {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Pixel::new(red, green, blue)
    }
}

/// Arrays are read as `[red, green, blue]`
impl From<[u8; 3]> for Pixel {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Pixel::new(red, green, blue)
    }
}
