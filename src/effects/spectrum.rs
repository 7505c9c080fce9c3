//! Rainbow color sweep.

use std::f64::consts::PI;
use std::fmt::{self, Debug, Display, Formatter};

use tracing::trace;

use crate::effects::{check_duty_cycle, check_steps, Effect, Rgb};
use crate::{Error, Result};

/// Phase offset between the red, green and blue channels.
const CHANNEL_OFFSET: f64 = 2. * PI / 3.;

/// Smooth hue rotation.
///
/// Every channel follows a sine wave around `center` with amplitude `width`, the channels are
/// shifted by a third of a period against each other. With a duty cycle below `1.0` the trailing
/// part of the sequence is switched off.
#[derive(Clone)]
pub struct Spectrum {
    duty_cycle: f64,
    scale: f64,
    steps: usize,
    frequency: Option<f64>,
    phase: Option<f64>,
    center: u8,
    width: u8,
    colors: Vec<Rgb>,
}

impl Spectrum {
    pub fn builder() -> SpectrumBuilder {
        SpectrumBuilder::default()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Angular step between frames, derived from `steps` unless overridden.
    pub fn frequency(&self) -> f64 {
        self.frequency.unwrap_or(2. * PI / self.steps as f64)
    }

    /// Starting angle of the red channel.
    pub fn phase(&self) -> f64 {
        self.phase.unwrap_or(0.)
    }

    pub fn center(&self) -> u8 {
        self.center
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    fn generate(&self) -> Vec<Rgb> {
        let frequency = self.frequency();
        let phase = self.phase();
        // Absorb float noise so that e.g. 0.07 * 100 lights 7 frames, not 8.
        let on_steps = (self.duty_cycle * self.steps as f64 - 1e-9).ceil().max(0.) as usize;

        let colors: Vec<Rgb> = (0..self.steps)
            .map(|step| {
                if step >= on_steps {
                    return Rgb::BLACK;
                }

                let angle = frequency * step as f64 + phase;
                let channel = |offset: f64| {
                    let wave = (angle + offset).sin();
                    let value = f64::from(self.center) + f64::from(self.width) * wave;
                    (value * self.scale).round().max(0.).min(255.) as u8
                };

                Rgb::new(channel(0.), channel(CHANNEL_OFFSET), channel(2. * CHANNEL_OFFSET))
            })
            .collect();

        trace!("Generated {} spectrum frames", colors.len());

        colors
    }
}

impl Effect for Spectrum {
    fn name(&self) -> &'static str {
        "Spectrum"
    }

    fn duty_cycle(&self) -> f64 {
        self.duty_cycle
    }

    fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Debug for Spectrum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.name())
            .field("duty_cycle", &self.duty_cycle)
            .field("scale", &self.scale)
            .field("steps", &self.steps)
            .field("frequency", &self.frequency)
            .field("phase", &self.phase)
            .field("center", &self.center)
            .field("width", &self.width)
            .finish()
    }
}

impl Display for Spectrum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(steps={}, duty_cycle={})", self.name(), self.steps, self.duty_cycle)
    }
}

/// Parameters of a [`Spectrum`].
#[derive(Debug, Copy, Clone)]
pub struct SpectrumBuilder {
    duty_cycle: f64,
    scale: f64,
    steps: usize,
    frequency: Option<f64>,
    phase: Option<f64>,
    center: u8,
    width: u8,
}

impl Default for SpectrumBuilder {
    fn default() -> Self {
        Self {
            duty_cycle: 1.,
            scale: 1.,
            steps: 64,
            frequency: None,
            phase: None,
            center: 128,
            width: 127,
        }
    }
}

impl SpectrumBuilder {
    pub fn duty_cycle(mut self, duty_cycle: f64) -> Self {
        self.duty_cycle = duty_cycle;
        self
    }

    /// Amplitude multiplier applied to every channel.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn frequency(mut self, frequency: Option<f64>) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn phase(mut self, phase: Option<f64>) -> Self {
        self.phase = phase;
        self
    }

    /// Window of the channel waveform, `center - width..=center + width` must fit into a byte.
    pub fn window(mut self, center: u8, width: u8) -> Self {
        self.center = center;
        self.width = width;
        self
    }

    pub fn build(self) -> Result<Spectrum> {
        check_duty_cycle(self.duty_cycle)?;
        check_steps(self.steps)?;

        if !self.scale.is_finite() || self.scale < 0. {
            let reason = format!("scale {} is not a positive number", self.scale);
            return Err(Error::InvalidEffect(reason));
        }

        for (name, value) in &[("frequency", self.frequency), ("phase", self.phase)] {
            if value.map_or(false, |value| !value.is_finite()) {
                return Err(Error::InvalidEffect(format!("{} must be finite", name)));
            }
        }

        if self.width > self.center || u16::from(self.center) + u16::from(self.width) > 255 {
            return Err(Error::InvalidEffect(format!(
                "window {}±{} outside of 0..=255",
                self.center, self.width
            )));
        }

        let mut spectrum = Spectrum {
            duty_cycle: self.duty_cycle,
            scale: self.scale,
            steps: self.steps,
            frequency: self.frequency,
            phase: self.phase,
            center: self.center,
            width: self.width,
            colors: Vec::new(),
        };
        spectrum.colors = spectrum.generate();

        Ok(spectrum)
    }
}
