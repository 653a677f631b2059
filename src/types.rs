//! Strongly-typed numeric primitives and colors for qrpath.
//!
//! Design goals:
//! - Sizes, margins and radii are `Length`, never a bare `f64`
//! - Validation is opt-in (`try_*` constructors); arithmetic stays total
//! - Colors keep the caller's spelling unless it parses to something we can normalize

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in render-space units (pixels of the output canvas)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length (const-friendly, unchecked).
    #[inline]
    pub const fn new(val: f64) -> Length {
        Length(val)
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        match Length::try_non_negative(val)? {
            Length(v) if v == 0.0 => Err(NumericError::Zero),
            len => Ok(len),
        }
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// True for any value strictly above zero.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Split this length into `count` equal parts.
    ///
    /// Returns None for a zero count.
    #[inline]
    pub fn per(self, count: usize) -> Option<Length> {
        if count == 0 {
            None
        } else {
            Some(Length(self.0 / count as f64))
        }
    }

    /// Check if this length is finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl From<f64> for Length {
    fn from(val: f64) -> Self {
        Length(val)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A paint value for fills and strokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Color {
    /// Fully transparent (`transparent` / `none`)
    None,
    /// CSS color keyword, lowercased
    Named(String),
    Rgb(u8, u8, u8),
    /// Anything we don't understand, written back verbatim
    Raw(String),
}

impl Color {
    pub fn black() -> Self {
        Color::Named("black".to_string())
    }

    pub fn white() -> Self {
        Color::Named("white".to_string())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Color::None)
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // #abc -> #aabbcc
            Some((r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

fn parse_rgb_fn(s: &str) -> Option<(u8, u8, u8)> {
    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
    let (r, g, b) = (parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?);
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b))
}

impl FromStr for Color {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower == "none" || lower == "transparent" {
            return Ok(Color::None);
        }
        if let Some((r, g, b)) = lower.strip_prefix('#').and_then(parse_hex) {
            return Ok(Color::Rgb(r, g, b));
        }
        if let Some((r, g, b)) = parse_rgb_fn(&lower.replace(' ', "")) {
            return Ok(Color::Rgb(r, g, b));
        }
        if !lower.is_empty() && lower.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok(Color::Named(lower));
        }
        Ok(Color::Raw(trimmed.to_string()))
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(color) => color,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => write!(f, "none"),
            Color::Named(s) | Color::Raw(s) => write!(f, "{}", s),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
        }
    }
}
