use coolor::{Hsl, Rgb};
use ratatui::style::Color;

pub struct ColorConverter;

impl ColorConverter {
    #[must_use]
    pub fn to_hsl(color: Color) -> Hsl {
        let (r, g, b) = to_rgb_triplet(color);
        Rgb::new(r, g, b).to_hsl()
    }

    #[must_use]
    pub fn to_ratatui(hsl: Hsl) -> Color {
        let rgb: Rgb = hsl.to_rgb();
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    /// `color` with its saturation and lightness replaced, hue kept.
    #[must_use]
    pub fn shade(color: Color, saturation: Option<f32>, lightness: f32) -> Color {
        let mut hsl = Self::to_hsl(color);
        if let Some(s) = saturation {
            hsl.s = s;
        }
        hsl.l = lightness;
        Self::to_ratatui(hsl)
    }

    /// Relative lightness in `0.0..=1.0`.
    #[must_use]
    pub fn lightness(color: Color) -> f32 {
        Self::to_hsl(color).l
    }
}

fn to_rgb_triplet(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (170, 0, 0),
        Color::Green => (0, 170, 0),
        Color::Yellow => (170, 85, 0),
        Color::Blue => (0, 0, 170),
        Color::Magenta => (170, 0, 170),
        Color::Cyan => (0, 170, 170),
        Color::Gray => (170, 170, 170),
        Color::DarkGray => (85, 85, 85),
        Color::LightRed => (255, 85, 85),
        Color::LightGreen => (85, 255, 85),
        Color::LightYellow => (255, 255, 85),
        Color::LightBlue => (85, 85, 255),
        Color::LightMagenta => (255, 85, 255),
        Color::LightCyan => (85, 255, 255),
        Color::Indexed(i) => ansi_to_rgb(i),
        _ => (255, 255, 255),
    }
}

fn ansi_to_rgb(i: u8) -> (u8, u8, u8) {
    match i {
        0..=15 => {
            const BASE: [(u8, u8, u8); 16] = [
                (0, 0, 0),
                (170, 0, 0),
                (0, 170, 0),
                (170, 85, 0),
                (0, 0, 170),
                (170, 0, 170),
                (0, 170, 170),
                (170, 170, 170),
                (85, 85, 85),
                (255, 85, 85),
                (85, 255, 85),
                (255, 255, 85),
                (85, 85, 255),
                (255, 85, 255),
                (85, 255, 255),
                (255, 255, 255),
            ];
            BASE[usize::from(i)]
        }
        16..=231 => {
            let i = i - 16;
            let map = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
            (map((i / 36) % 6), map((i / 6) % 6), map(i % 6))
        }
        232..=255 => {
            let v = (i - 232) * 10 + 8;
            (v, v, v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_round_trip_keeps_rgb() {
        let back = ColorConverter::to_ratatui(ColorConverter::to_hsl(Color::Rgb(100, 150, 200)));

        let Color::Rgb(r, g, b) = back else {
            panic!("expected RGB color");
        };
        assert!((i16::from(r) - 100).abs() <= 1);
        assert!((i16::from(g) - 150).abs() <= 1);
        assert!((i16::from(b) - 200).abs() <= 1);
    }

    #[test]
    fn test_shade_sets_lightness() {
        let dark = ColorConverter::shade(Color::Cyan, Some(0.3), 0.1);
        let light = ColorConverter::shade(Color::Cyan, None, 0.9);

        assert!(ColorConverter::lightness(dark) < 0.15);
        assert!(ColorConverter::lightness(light) > 0.85);
    }

    #[test]
    fn test_ansi_palette() {
        assert_eq!(ansi_to_rgb(1), (170, 0, 0));
        assert_eq!(ansi_to_rgb(208), (255, 135, 0));
        assert_eq!(ansi_to_rgb(16), (0, 0, 0));
        assert_eq!(ansi_to_rgb(231), (255, 255, 255));
        assert_eq!(ansi_to_rgb(232), (8, 8, 8));
    }
}
