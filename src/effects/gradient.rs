//! Fade in and out.

use std::fmt::{self, Display, Formatter};

use crate::effects::{check_steps, Effect, Rgb};
use crate::Result;

/// Ramp from black up to a color and back down.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Gradient {
    color: Rgb,
    steps: usize,
    colors: Vec<Rgb>,
}

impl Gradient {
    /// Fade over `steps` frames in each direction.
    pub fn new(color: Rgb, steps: usize) -> Result<Self> {
        check_steps(steps)?;

        let ramp = (1..=steps).map(|step| color.scaled(step as f64 / steps as f64));
        let mut colors: Vec<Rgb> = ramp.collect();

        // The peak is not repeated on the way down, black closes the period.
        let down: Vec<Rgb> = colors.iter().rev().skip(1).copied().collect();
        colors.extend(down);
        colors.push(Rgb::BLACK);

        Ok(Self { color, steps, colors })
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Effect for Gradient {
    fn name(&self) -> &'static str {
        "Gradient"
    }

    fn duty_cycle(&self) -> f64 {
        1.
    }

    fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Display for Gradient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, steps={})", self.name(), self.color, self.steps)
    }
}
