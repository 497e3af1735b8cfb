//! Shared color model for the platform emitters and asset catalogs
//!
//! Accepts `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgba(r, g, b[, a])` and the
//! literal `transparent`. Components are normalized to 0..1.

use once_cell::sync::Lazy;
use regex::Regex;

static RGBA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\s*\(\s*([\d.]+)\s*,\s*([\d.]+)\s*,\s*([\d.]+)\s*(?:,\s*([\d.]+)\s*)?\)$")
        .unwrap()
});

/// A color with components in 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Parse a color string. `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Rgba> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Some(Rgba::TRANSPARENT);
        }
        if let Some(captures) = RGBA.captures(s) {
            let channel = |i: usize| captures[i].parse::<f64>().ok().map(|v| v / 255.0);
            return Some(Rgba {
                r: channel(1)?,
                g: channel(2)?,
                b: channel(3)?,
                a: captures
                    .get(4)
                    .and_then(|m| m.as_str().parse::<f64>().ok())
                    .unwrap_or(1.0),
            });
        }
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Rgba {
                r: nibble(0)? as f64 * 17.0 / 255.0,
                g: nibble(1)? as f64 * 17.0 / 255.0,
                b: nibble(2)? as f64 * 17.0 / 255.0,
                a: 1.0,
            }),
            6 | 8 => Some(Rgba {
                r: byte(0)? as f64 / 255.0,
                g: byte(2)? as f64 / 255.0,
                b: byte(4)? as f64 / 255.0,
                a: if hex.len() == 8 {
                    byte(6)? as f64 / 255.0
                } else {
                    1.0
                },
            }),
            _ => None,
        }
    }

    /// Parse with the opaque-black fallback the catalogs use for broken tokens.
    pub fn parse_or_black(s: &str) -> Rgba {
        Rgba::parse(s).unwrap_or(Rgba::BLACK)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }

    /// 0..255 integer channels for targets that want byte components.
    pub fn bytes(&self) -> (u8, u8, u8) {
        let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        (to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex6() {
        let c = Rgba::parse("#ED2124").unwrap();
        assert_eq!(c.bytes(), (0xED, 0x21, 0x24));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_parse_hex8_alpha() {
        let c = Rgba::parse("#FF000080").unwrap();
        assert_eq!(c.bytes(), (255, 0, 0));
        assert!((c.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hex3() {
        let c = Rgba::parse("#f00").unwrap();
        assert_eq!(c.bytes(), (255, 0, 0));
    }

    #[test]
    fn test_parse_rgba_function() {
        let c = Rgba::parse("rgba(237, 33, 36, 0.5)").unwrap();
        assert_eq!(c.bytes(), (237, 33, 36));
        assert_eq!(c.a, 0.5);

        let opaque = Rgba::parse("rgb(0, 0, 255)").unwrap();
        assert_eq!(opaque.bytes(), (0, 0, 255));
        assert_eq!(opaque.a, 1.0);
    }

    #[test]
    fn test_parse_transparent() {
        let c = Rgba::parse("transparent").unwrap();
        assert!(c.is_transparent());
        assert!(Rgba::parse("Transparent").unwrap().is_transparent());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Rgba::parse("{color.primary.500}").is_none());
        assert!(Rgba::parse("#GGHHII").is_none());
        assert!(Rgba::parse("").is_none());
        assert_eq!(Rgba::parse_or_black("nonsense"), Rgba::BLACK);
    }
}
