//! Color effects.
//!
//! Effects are pure color sequence generators. Identical parameters always produce an identical
//! sequence; frame timing is left to whatever pushes the colors to a light.

use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

pub use crate::effects::blink::Blink;
pub use crate::effects::gradient::Gradient;
pub use crate::effects::spectrum::{Spectrum, SpectrumBuilder};
pub use crate::effects::steady::Steady;

mod blink;
mod gradient;
mod spectrum;
mod steady;

/// RGB color.
#[derive(Default, PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A single frame of an effect.
pub type ColorFrame = Rgb;

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0x00, g: 0x00, b: 0x00 };
    pub const WHITE: Rgb = Rgb { r: 0xff, g: 0xff, b: 0xff };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale all channels by `factor`, saturating at the channel bounds.
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |channel: u8| (f64::from(channel) * factor).round().max(0.).min(255.) as u8;
        Self { r: scale(self.r), g: scale(self.g), b: scale(self.b) }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = ();

    fn from_str(s: &str) -> Result<Rgb, ()> {
        let chars = match s.strip_prefix("0x") {
            Some(chars) if chars.len() == 6 && chars.chars().all(|c| c.is_ascii_hexdigit()) => {
                chars
            },
            _ => return Err(()),
        };

        match u32::from_str_radix(chars, 16) {
            Ok(mut color) => {
                let b = (color & 0xff) as u8;
                color >>= 8;
                let g = (color & 0xff) as u8;
                color >>= 8;
                let r = color as u8;
                Ok(Rgb { r, g, b })
            },
            Err(_) => Err(()),
        }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color sequence generator.
pub trait Effect: Debug + Display {
    /// Effect name used for diagnostics.
    fn name(&self) -> &'static str;

    /// Fraction of the sequence during which the light is on.
    fn duty_cycle(&self) -> f64;

    /// One full period of the effect.
    fn colors(&self) -> &[Rgb];

    /// Number of periods before the effect ends, `None` repeats forever.
    fn cycles(&self) -> Option<u32> {
        None
    }

    /// Cyclic iterator over the effect's colors.
    fn frames(&self) -> Frames<'_> {
        Frames::new(self.colors()).with_cycles(self.cycles())
    }
}

/// Restartable cyclic frame iterator.
///
/// Yields nothing if the effect has no colors.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    colors: &'a [Rgb],
    index: usize,
    cycles: Option<u32>,
    remaining: Option<u32>,
}

impl<'a> Frames<'a> {
    pub fn new(colors: &'a [Rgb]) -> Self {
        Self { colors, index: 0, cycles: None, remaining: None }
    }

    /// Stop after `cycles` full periods.
    pub fn with_cycles(mut self, cycles: Option<u32>) -> Self {
        self.cycles = cycles;
        self.remaining = cycles;
        self
    }

    /// Rewind to the first frame.
    pub fn restart(&mut self) {
        self.index = 0;
        self.remaining = self.cycles;
    }

    /// Number of frames in one period.
    pub fn period(&self) -> usize {
        self.colors.len()
    }
}

impl Iterator for Frames<'_> {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        if self.remaining == Some(0) {
            return None;
        }

        let color = *self.colors.get(self.index)?;
        self.index += 1;

        if self.index == self.colors.len() {
            self.index = 0;
            if let Some(remaining) = &mut self.remaining {
                *remaining -= 1;
            }
        }

        Some(color)
    }
}

/// Validate a duty cycle parameter.
fn check_duty_cycle(duty_cycle: f64) -> crate::Result<()> {
    if !(0. ..=1.).contains(&duty_cycle) {
        return Err(crate::Error::InvalidEffect(format!(
            "duty cycle {} outside of 0.0..=1.0",
            duty_cycle
        )));
    }
    Ok(())
}

/// Validate a step count parameter.
fn check_steps(steps: usize) -> crate::Result<()> {
    if steps == 0 {
        return Err(crate::Error::InvalidEffect("steps must be at least 1".into()));
    }
    Ok(())
}
