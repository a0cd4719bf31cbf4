//! Per-particle colour assignment: a static base colour with brightness jitter,
//! or a rainbow that drifts with time and height.

use crate::constants::*;
use crate::error::{CoreError, CoreResult};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorMode {
    #[default]
    Custom,
    Rainbow,
}

impl ColorMode {
    pub const ALL: [ColorMode; 2] = [ColorMode::Custom, ColorMode::Rainbow];

    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Custom => "custom",
            ColorMode::Rainbow => "rainbow",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Custom => "Fixed",
            ColorMode::Rainbow => "Rainbow",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        ColorMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownColorMode(s.to_string()))
    }
}

/// Linear RGB triple with channels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> CoreResult<Self> {
        let invalid = || CoreError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
        Ok(Self::new(channel(16), channel(8), channel(0)))
    }

    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// HSL to RGB with all inputs in [0, 1]; hue wraps.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        if s <= 0.0 {
            return Self::new(l, l, l);
        }
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Fill `colors` with `base` plus one brightness offset per particle.
pub fn assign_static<R: Rng + ?Sized>(colors: &mut [f32], base: Rgb, rng: &mut R) {
    for rgb in colors.chunks_exact_mut(3) {
        let variance = (rng.gen::<f32>() - 0.5) * STATIC_COLOR_VARIANCE;
        rgb[0] = (base.r + variance).clamp(0.0, 1.0);
        rgb[1] = (base.g + variance).clamp(0.0, 1.0);
        rgb[2] = (base.b + variance).clamp(0.0, 1.0);
    }
}

#[inline]
pub fn rainbow_hue(index: usize, time_sec: f32, gradient_speed: f32, height: f32) -> f32 {
    (index as f32 * RAINBOW_INDEX_WEIGHT
        + time_sec * gradient_speed * RAINBOW_TIME_WEIGHT
        + height * RAINBOW_HEIGHT_WEIGHT)
        .rem_euclid(1.0)
}

#[inline]
pub fn rainbow_color(index: usize, time_sec: f32, gradient_speed: f32, height: f32) -> Rgb {
    Rgb::from_hsl(
        rainbow_hue(index, time_sec, gradient_speed, height),
        RAINBOW_SATURATION,
        RAINBOW_LIGHTNESS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn parses_long_and_short_hex() {
        let c = Rgb::from_hex("#e60042").unwrap();
        assert!(close(c.r, 230.0 / 255.0));
        assert!(close(c.g, 0.0));
        assert!(close(c.b, 66.0 / 255.0));
        let short = Rgb::from_hex("fff").unwrap();
        assert_eq!(short, Rgb::WHITE);
        assert_eq!(c.to_hex(), "#e60042");
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#12", "#12345", "#gg0000", "#ééé"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(CoreError::InvalidColor(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn hsl_primaries() {
        let red = Rgb::from_hsl(0.0, 1.0, 0.5);
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));
        let green = Rgb::from_hsl(1.0 / 3.0, 1.0, 0.5);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));
        let wrapped = Rgb::from_hsl(1.0 + 2.0 / 3.0, 1.0, 0.5);
        assert!(close(wrapped.b, 1.0));
        let grey = Rgb::from_hsl(0.3, 0.0, 0.25);
        assert_eq!(grey, Rgb::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn rainbow_hue_wraps_for_negative_heights() {
        let h = rainbow_hue(0, 0.0, 1.0, -30.0);
        assert!((0.0..1.0).contains(&h));
        assert!(close(h, 0.4));
    }

    #[test]
    fn static_colors_stay_within_variance() {
        let base = Rgb::from_hex("#808080").unwrap();
        let mut colors = vec![0.0; 3 * 500];
        assign_static(&mut colors, base, &mut StdRng::seed_from_u64(9));
        for rgb in colors.chunks_exact(3) {
            assert!((rgb[0] - base.r).abs() <= 0.075 + 1e-6);
            // one offset per particle, so channels of a grey base stay equal
            assert_eq!(rgb[0], rgb[1]);
            assert_eq!(rgb[1], rgb[2]);
        }
    }
}
