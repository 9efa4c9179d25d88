/// Linear stat-to-width mapping used for the stat bars.
///
/// Stats are clamped into `[min_stat, max_stat]` before being mapped onto
/// `[min_width, max_width]`. The default stat range is empirical: a handful of
/// outliers sit above 150 and nothing meaningful sits below 20.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarScale {
    pub min_width: u16,
    pub max_width: u16,
    pub min_stat: f64,
    pub max_stat: f64,
}

pub const MIN_BAR_WIDTH: u16 = 1;
pub const MAX_BAR_WIDTH: u16 = 250;
pub const MIN_STAT: f64 = 20.0;
pub const MAX_STAT: f64 = 150.0;

impl BarScale {
    pub const DEFAULT: BarScale = BarScale {
        min_width: MIN_BAR_WIDTH,
        max_width: MAX_BAR_WIDTH,
        min_stat: MIN_STAT,
        max_stat: MAX_STAT,
    };

    /// Same stat range, different output range (e.g. terminal columns).
    pub fn with_width(min_width: u16, max_width: u16) -> Self {
        Self {
            min_width,
            max_width: max_width.max(min_width),
            ..Self::DEFAULT
        }
    }

    pub fn scale(&self, value: f64) -> u16 {
        let x = if value.is_nan() {
            self.min_stat
        } else {
            value.clamp(self.min_stat, self.max_stat)
        };
        let span = f64::from(self.max_width.saturating_sub(self.min_width));
        let t = (x - self.min_stat) / (self.max_stat - self.min_stat);
        (span * t + f64::from(self.min_width)).round() as u16
    }
}

impl Default for BarScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bar width for `value` on the default 1..=250 scale.
pub fn scale_stat(value: f64) -> u16 {
    BarScale::DEFAULT.scale(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatTier {
    Low,
    Fair,
    Good,
    High,
}

pub fn stat_tier(value: f64) -> StatTier {
    if value <= 50.0 || value.is_nan() {
        StatTier::Low
    } else if value < 70.0 {
        StatTier::Fair
    } else if value < 90.0 {
        StatTier::Good
    } else {
        StatTier::High
    }
}

pub fn tier_label(tier: StatTier) -> &'static str {
    match tier {
        StatTier::Low => "LOW",
        StatTier::Fair => "FAIR",
        StatTier::Good => "GOOD",
        StatTier::High => "HIGH",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_floor_and_ceiling() {
        assert_eq!(scale_stat(20.0), 1);
        assert_eq!(scale_stat(150.0), 250);
        assert_eq!(scale_stat(10.0), scale_stat(20.0));
        assert_eq!(scale_stat(200.0), scale_stat(150.0));
        assert_eq!(scale_stat(-1.0e9), 1);
        assert_eq!(scale_stat(f64::INFINITY), 250);
        assert_eq!(scale_stat(f64::NAN), 1);
    }

    #[test]
    fn scale_is_monotone_and_bounded() {
        let mut prev = 0;
        for raw in 0..=300 {
            let w = scale_stat(raw as f64 * 0.9);
            assert!((1..=250).contains(&w), "width {w} out of range");
            assert!(w >= prev);
            prev = w;
        }
    }

    #[test]
    fn midpoint_rounds_to_nearest() {
        // 85 is the middle of 20..150: 249 * 0.5 + 1 = 125.5.
        assert_eq!(scale_stat(85.0), 126);
        assert_eq!(scale_stat(45.0), 49);
    }

    #[test]
    fn narrower_output_range_keeps_endpoints() {
        let scale = BarScale::with_width(1, 40);
        assert_eq!(scale.scale(0.0), 1);
        assert_eq!(scale.scale(255.0), 40);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(stat_tier(50.0), StatTier::Low);
        assert_eq!(stat_tier(51.0), StatTier::Fair);
        assert_eq!(stat_tier(69.0), StatTier::Fair);
        assert_eq!(stat_tier(70.0), StatTier::Good);
        assert_eq!(stat_tier(89.0), StatTier::Good);
        assert_eq!(stat_tier(90.0), StatTier::High);
        assert_eq!(stat_tier(255.0), StatTier::High);
    }
}
