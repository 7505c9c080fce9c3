//! Constant color.

use std::fmt::{self, Display, Formatter};

use crate::effects::{Effect, Rgb};

/// Single unchanging color.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Steady {
    colors: [Rgb; 1],
}

impl Steady {
    pub fn new(color: Rgb) -> Self {
        Self { colors: [color] }
    }

    pub fn color(&self) -> Rgb {
        self.colors[0]
    }
}

impl Effect for Steady {
    fn name(&self) -> &'static str {
        "Steady"
    }

    fn duty_cycle(&self) -> f64 {
        1.
    }

    fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Display for Steady {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.color())
    }
}
