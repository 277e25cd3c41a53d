use super::hsv::HUE_MAX;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Inclusive `[lower, upper]` bounds over (hue, saturation, value).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

const CHANNELS: [&str; 3] = ["hue", "saturation", "value"];

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// True when every channel of `hsv` lies within the bounds.
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }

    pub fn validate(&self, class: &str) -> Result<(), ConfigError> {
        for value in [self.lower[0], self.upper[0]] {
            if value > HUE_MAX {
                return Err(ConfigError::HueOutOfRange {
                    class: class.to_string(),
                    value,
                });
            }
        }
        for (c, channel) in CHANNELS.iter().enumerate() {
            if self.lower[c] > self.upper[c] {
                return Err(ConfigError::InvertedRange {
                    class: class.to_string(),
                    channel,
                    lower: self.lower[c],
                    upper: self.upper[c],
                });
            }
        }
        Ok(())
    }
}
