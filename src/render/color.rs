// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `#rgb`. Anything else (named colors included) is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => Some(Self::new(
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            )),
            3 => {
                let digit = |idx: usize| u8::from_str_radix(&hex[idx..idx + 1], 16).ok().map(|d| d * 17);
                Some(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            _ => None,
        }
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(channel(self.r, other.r), channel(self.g, other.g), channel(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color shown `t` of the way from `from` to `to`.
///
/// Two parseable colors blend; otherwise the old value holds until the halfway point.
pub(crate) fn blend(from: Option<&str>, to: Option<&str>, t: f64) -> Option<String> {
    match (from.and_then(Rgb::parse), to.and_then(Rgb::parse)) {
        (Some(a), Some(b)) if from != to => Some(a.lerp(b, t).to_string()),
        _ if t < 0.5 => from.map(ToOwned::to_owned),
        _ => to.map(ToOwned::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{blend, Rgb};

    #[rstest]
    #[case::long("#ff8000", Some(Rgb::new(255, 128, 0)))]
    #[case::short("#f80", Some(Rgb::new(255, 136, 0)))]
    #[case::upper("#FFFFFF", Some(Rgb::new(255, 255, 255)))]
    #[case::padded("  #000000 ", Some(Rgb::new(0, 0, 0)))]
    #[case::named("red", None)]
    #[case::no_hash("ff0000", None)]
    #[case::bad_digit("#gg0000", None)]
    #[case::wrong_len("#ff00", None)]
    #[case::non_ascii("#ééé", None)]
    fn parse(#[case] input: &str, #[case] expected: Option<Rgb>) {
        assert_eq!(Rgb::parse(input), expected);
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Rgb::new(255, 0, 171).to_string(), "#ff00ab");
    }

    #[test]
    fn blend_mixes_parseable_colors() {
        assert_eq!(blend(Some("#000000"), Some("#ffffff"), 0.5).as_deref(), Some("#808080"));
        assert_eq!(blend(Some("#000000"), Some("#ffffff"), 1.0).as_deref(), Some("#ffffff"));
    }

    #[test]
    fn blend_switches_unparseable_colors_at_halfway() {
        assert_eq!(blend(None, Some("#ff0000"), 0.25), None);
        assert_eq!(blend(None, Some("#ff0000"), 0.75).as_deref(), Some("#ff0000"));
        assert_eq!(blend(Some("red"), Some("blue"), 0.4).as_deref(), Some("red"));
    }
}
