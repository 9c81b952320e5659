//! Qualitative rating of a total suite score

use serde::{Deserialize, Serialize};

/// Minimum total score for each rating, highest first
pub const EXCELLENT_THRESHOLD: u64 = 1000;
pub const GOOD_THRESHOLD: u64 = 700;
pub const AVERAGE_THRESHOLD: u64 = 400;
pub const LOW_THRESHOLD: u64 = 200;

/// Five-step rating derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Average,
    Low,
    VeryLow,
}

/// Tone used to colour the rating line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warn,
    Bad,
}

impl Rating {
    /// Pure step function over the total score
    pub fn from_total_score(total: u64) -> Self {
        match total {
            t if t >= EXCELLENT_THRESHOLD => Rating::Excellent,
            t if t >= GOOD_THRESHOLD => Rating::Good,
            t if t >= AVERAGE_THRESHOLD => Rating::Average,
            t if t >= LOW_THRESHOLD => Rating::Low,
            _ => Rating::VeryLow,
        }
    }

    /// Headline shown next to the final rating
    pub fn headline(&self) -> &'static str {
        match self {
            Rating::Excellent => "EXCELLENT! 🚀 Top-tier performance!",
            Rating::Good => "GOOD! 💪 High performance",
            Rating::Average => "AVERAGE ⚡ Normal performance",
            Rating::Low => "LOW ⚠️  Weak performance",
            Rating::VeryLow => "VERY LOW 🐌 Very weak performance",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Rating::Excellent | Rating::Good => Tone::Good,
            Rating::Average => Tone::Warn,
            Rating::Low | Rating::VeryLow => Tone::Bad,
        }
    }

    /// Recommendation block printed under the rating
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Rating::Low | Rating::VeryLow => &[
                "Consider upgrading the processor",
                "Add more RAM",
                "Check temperatures and the cooling system",
                "Close background applications",
            ],
            Rating::Average => &[
                "Your system handles everyday tasks",
                "An SSD would improve overall responsiveness",
                "Check the power management settings",
            ],
            Rating::Good | Rating::Excellent => &[
                "A great system for professional work!",
                "Suitable for software development and 3D modelling",
                "Can run demanding applications",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(Rating::from_total_score(1000), Rating::Excellent);
        assert_eq!(Rating::from_total_score(700), Rating::Good);
        assert_eq!(Rating::from_total_score(400), Rating::Average);
        assert_eq!(Rating::from_total_score(200), Rating::Low);
        assert_eq!(Rating::from_total_score(0), Rating::VeryLow);
    }

    #[test]
    fn test_just_below_each_threshold() {
        assert_eq!(Rating::from_total_score(999), Rating::Good);
        assert_eq!(Rating::from_total_score(699), Rating::Average);
        assert_eq!(Rating::from_total_score(399), Rating::Low);
        assert_eq!(Rating::from_total_score(199), Rating::VeryLow);
    }

    #[test]
    fn test_large_scores() {
        assert_eq!(Rating::from_total_score(u64::MAX), Rating::Excellent);
    }

    #[test]
    fn test_recommendation_blocks() {
        assert_eq!(Rating::Low.recommendations(), Rating::VeryLow.recommendations());
        assert_eq!(Rating::Good.recommendations(), Rating::Excellent.recommendations());
        assert_ne!(Rating::Average.recommendations(), Rating::Good.recommendations());
        assert_eq!(Rating::VeryLow.recommendations().len(), 4);
    }

    #[test]
    fn test_tones() {
        assert_eq!(Rating::Excellent.tone(), Tone::Good);
        assert_eq!(Rating::Average.tone(), Tone::Warn);
        assert_eq!(Rating::VeryLow.tone(), Tone::Bad);
    }
}
