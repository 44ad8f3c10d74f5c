//! Color and dimension values for native platforms
//!
//! Web outputs pass token values through untouched. Android and Compose need concrete
//! numbers, so the values they understand are parsed here:
//!
//! - colors: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` in comma or space
//!   syntax, alpha as a 0–1 number or a percentage
//! - dimensions: `<n>px`, `<n>rem` and a bare `0`
//!
//! Anything else (`calc()`, `var()`, keywords) is not convertible and callers decide what
//! to do with it.

use once_cell::sync::Lazy;
use regex::Regex;

static RGB_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rgba?\(\s*([^()]*?)\s*\)$").expect("valid rgb regex"));

static DIMENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?(?:\d+\.?\d*|\.\d+))(px|rem)$").expect("valid dimension regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => parse_rgb_function(value),
        }
    }

    /// `#aarrggbb`, lowercase, as Android resources expect.
    pub fn to_android_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }

    /// `0xAARRGGBB`, the argument of Compose's `Color(...)`.
    pub fn to_argb_literal(&self) -> String {
        format!("0x{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba {
            r: nibble(0)?,
            g: nibble(1)?,
            b: nibble(2)?,
            a: 255,
        }),
        4 => Some(Rgba {
            r: nibble(0)?,
            g: nibble(1)?,
            b: nibble(2)?,
            a: nibble(3)?,
        }),
        6 => Some(Rgba {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: 255,
        }),
        8 => Some(Rgba {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: byte(6)?,
        }),
        _ => None,
    }
}

fn parse_rgb_function(value: &str) -> Option<Rgba> {
    let captures = RGB_FUNCTION.captures(value)?;
    let args = captures.get(1)?.as_str();

    let (channels, alpha): (Vec<&str>, Option<&str>) = if args.contains(',') {
        let mut parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let alpha = if parts.len() == 4 { parts.pop() } else { None };
        (parts, alpha)
    } else {
        let (channels, alpha) = match args.split_once('/') {
            Some((channels, alpha)) => (channels, Some(alpha.trim())),
            None => (args, None),
        };
        (channels.split_whitespace().collect(), alpha)
    };

    if channels.len() != 3 {
        return None;
    }
    Some(Rgba {
        r: parse_channel(channels[0])?,
        g: parse_channel(channels[1])?,
        b: parse_channel(channels[2])?,
        a: match alpha {
            Some(alpha) => parse_alpha(alpha)?,
            None => 255,
        },
    })
}

fn parse_channel(text: &str) -> Option<u8> {
    let value = match text.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok()? / 100.0 * 255.0,
        None => text.parse::<f64>().ok()?,
    };
    to_byte(value)
}

fn parse_alpha(text: &str) -> Option<u8> {
    let value = match text.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok()? / 100.0,
        None => text.parse::<f64>().ok()?,
    };
    to_byte(value * 255.0)
}

fn to_byte(value: f64) -> Option<u8> {
    value
        .is_finite()
        .then(|| value.round().clamp(0.0, 255.0) as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == "0" {
            return Some(Dimension {
                value: 0.0,
                unit: Unit::Px,
            });
        }
        let captures = DIMENSION.captures(text)?;
        let value = captures[1].parse::<f64>().ok()?;
        let unit = match &captures[2] {
            "px" => Unit::Px,
            _ => Unit::Rem,
        };
        Some(Dimension { value, unit })
    }

    /// Density-independent amount, 1px = 1dp/sp.
    pub fn to_points(&self, rem_base: f64) -> f64 {
        match self.unit {
            Unit::Px => self.value,
            Unit::Rem => self.value * rem_base,
        }
    }
}

/// Shortest decimal form, rounded to 4 places: `16`, `0.5`, `-1.44`.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}
