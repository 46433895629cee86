/// A display refresh rate as the numerator/denominator pair DXGI expects.
/// `0/1` lets the driver choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl Default for RefreshRate {
    fn default() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }
}

impl RefreshRate {
    pub fn hertz(&self) -> f32 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator as f32 / self.denominator as f32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: RefreshRate,
}

/// Refresh rate of the last mode whose resolution is exactly
/// `width` x `height`, or the driver default when none matches.
pub fn select_refresh_rate(
    modes: impl IntoIterator<Item = DisplayMode>,
    width: u32,
    height: u32,
) -> RefreshRate {
    modes
        .into_iter()
        .filter(|mode| mode.width == width && mode.height == height)
        .last()
        .map(|mode| mode.refresh_rate)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(width: u32, height: u32, numerator: u32, denominator: u32) -> DisplayMode {
        DisplayMode {
            width,
            height,
            refresh_rate: RefreshRate {
                numerator,
                denominator,
            },
        }
    }

    #[test]
    fn no_matching_mode_leaves_the_choice_to_the_driver() {
        let modes = [mode(1920, 1080, 60, 1), mode(800, 600, 75, 1)];
        assert_eq!(select_refresh_rate(modes, 640, 480), RefreshRate::default());
        assert_eq!(select_refresh_rate(Vec::new(), 640, 480).hertz(), 0.0);
    }

    #[test]
    fn the_last_matching_mode_wins() {
        let modes = [
            mode(640, 480, 60, 1),
            mode(1920, 1080, 144, 1),
            mode(640, 480, 59_940, 1_000),
        ];
        let rate = select_refresh_rate(modes, 640, 480);
        assert_eq!(rate, RefreshRate { numerator: 59_940, denominator: 1_000 });
        assert!((rate.hertz() - 59.94).abs() < 1e-4);
    }
}
