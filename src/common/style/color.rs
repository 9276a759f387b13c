use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color representation.
///
/// Represents a color using red, green, blue and alpha components, each in
/// the range 0-255. Colors parsed from document markup are opaque unless the
/// source carries an explicit alpha channel.
///
/// # Examples
///
/// ```rust
/// use docnav::common::Color;
///
/// // Create a red color
/// let red = Color::new(255, 0, 0);
///
/// // Create from hex string
/// let blue = Color::from_hex("#0000FF").unwrap();
/// assert_eq!(blue.blue, 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-255)
    pub red: u8,
    /// Green component (0-255)
    pub green: u8,
    /// Blue component (0-255)
    pub blue: u8,
    /// Alpha component (0 = transparent, 255 = opaque)
    pub alpha: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Color {
    /// Create a new opaque color.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self::with_alpha(red, green, blue, 255)
    }

    /// Create a new color with an explicit alpha channel.
    #[inline]
    pub const fn with_alpha(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docnav::common::Color;
    ///
    /// let orange = Color::from_rgb(0xFF8000);
    /// assert_eq!(orange, Color::new(255, 128, 0));
    /// ```
    #[inline]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Create a color from a packed `0xAARRGGBB` value, as used by OOXML.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self::with_alpha((argb >> 16) as u8, (argb >> 8) as u8, argb as u8, (argb >> 24) as u8)
    }

    /// Packed `0xRRGGBB` value.
    #[inline]
    pub const fn rgb(&self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    /// Packed `0xAARRGGBB` value.
    #[inline]
    pub const fn argb(&self) -> u32 {
        ((self.alpha as u32) << 24) | self.rgb()
    }

    /// Create a color from a hex string.
    ///
    /// Accepts `RRGGBB` and `AARRGGBB`, with or without a leading `#`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docnav::common::Color;
    ///
    /// let red = Color::from_hex("FF0000").unwrap();
    /// let translucent = Color::from_hex("#80FF0000").unwrap();
    /// assert_eq!(translucent.alpha, 0x80);
    /// assert!(Color::from_hex("F00").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok().map(Self::from_rgb),
            8 => u32::from_str_radix(hex, 16).ok().map(Self::from_argb),
            _ => None,
        }
    }

    /// Convert to hex string (without # prefix, alpha omitted).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docnav::common::Color;
    ///
    /// let color = Color::new(255, 0, 0);
    /// assert_eq!(color.to_hex(), "FF0000");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
