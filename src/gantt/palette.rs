/*!
 * Task Palette
 * Fixed task id to colour mapping shared by bars and legend swatches
 */

use crate::trace::TaskId;
use plotters::style::RGBColor;
use serde::Serialize;
use std::fmt;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Tableau 10, in matplotlib's order
pub const TABLEAU_10: [Rgb; 10] = [
    Rgb::from_hex(0x1f77b4), // blue
    Rgb::from_hex(0xff7f0e), // orange
    Rgb::from_hex(0x2ca02c), // green
    Rgb::from_hex(0xd62728), // red
    Rgb::from_hex(0x9467bd), // purple
    Rgb::from_hex(0x8c564b), // brown
    Rgb::from_hex(0xe377c2), // pink
    Rgb::from_hex(0x7f7f7f), // gray
    Rgb::from_hex(0xbcbd22), // olive
    Rgb::from_hex(0x17becf), // cyan
];

/// Task id indexed colour list
///
/// Ids at or past the palette length wrap around, so tasks `n` apart share a
/// colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [Rgb],
}

impl Default for Palette {
    fn default() -> Self {
        Self::tableau()
    }
}

impl Palette {
    pub const fn tableau() -> Self {
        Self {
            colors: &TABLEAU_10,
        }
    }

    #[inline]
    pub fn color_for(&self, task: TaskId) -> Rgb {
        self.colors[task as usize % self.colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_index() {
        let palette = Palette::tableau();
        assert_eq!(palette.color_for(0), Rgb(0x1f, 0x77, 0xb4));
        assert_eq!(palette.color_for(3).to_string(), "#d62728");
    }

    #[test]
    fn test_wraps_past_end() {
        let palette = Palette::tableau();
        assert_eq!(TABLEAU_10.len(), 10);
        assert_eq!(palette.color_for(12), palette.color_for(2));
    }
}
