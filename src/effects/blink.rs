//! On/off blinking.

use std::fmt::{self, Display, Formatter};

use crate::effects::{Effect, Rgb};

/// Alternate between an on and an off color.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Blink {
    on: Rgb,
    off: Rgb,
    count: u32,
    colors: Vec<Rgb>,
}

impl Blink {
    /// Blink `count` times, `0` blinks forever.
    ///
    /// The colors only contain a single on/off period, `frames` repeats it `count` times.
    pub fn new(on: Rgb, count: u32) -> Self {
        Self::with_off_color(on, Rgb::BLACK, count)
    }

    pub fn with_off_color(on: Rgb, off: Rgb, count: u32) -> Self {
        Self { on, off, count, colors: vec![on, off] }
    }

    pub fn on_color(&self) -> Rgb {
        self.on
    }

    pub fn off_color(&self) -> Rgb {
        self.off
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Effect for Blink {
    fn name(&self) -> &'static str {
        "Blink"
    }

    fn duty_cycle(&self) -> f64 {
        0.5
    }

    fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    fn cycles(&self) -> Option<u32> {
        Some(self.count).filter(|count| *count > 0)
    }
}

impl Display for Blink {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {}, count={})", self.name(), self.on, self.off, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_blinks() {
        let blink = Blink::new(Rgb::WHITE, 2);
        assert_eq!(blink.colors(), [Rgb::WHITE, Rgb::BLACK]);

        let frames: Vec<_> = blink.frames().collect();
        assert_eq!(frames, [Rgb::WHITE, Rgb::BLACK, Rgb::WHITE, Rgb::BLACK]);
    }

    #[test]
    fn huge_count_keeps_one_period() {
        let blink = Blink::new(Rgb::WHITE, u32::MAX);

        assert_eq!(blink.colors().len(), 2);
        assert_eq!(blink.cycles(), Some(u32::MAX));
        assert_eq!(blink.frames().nth(1_000_001), Some(Rgb::BLACK));
    }

    #[test]
    fn endless_blinks() {
        let blink = Blink::with_off_color(Rgb::WHITE, Rgb::new(0, 0, 0x10), 0);

        assert_eq!(blink.colors().len(), 2);
        let frames: Vec<_> = blink.frames().take(5).collect();
        assert_eq!(frames[4], Rgb::WHITE);
        assert_eq!(frames[3], Rgb::new(0, 0, 0x10));
        assert_eq!(blink.duty_cycle(), 0.5);
    }
}
