use std::fmt;

/// Display tier for a 0–100 hopefulness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HopeTier {
    Encouraging,
    Promising,
    Uplifting,
    Inspiring,
    Radiant,
}

impl HopeTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => HopeTier::Radiant,
            80..=89 => HopeTier::Inspiring,
            70..=79 => HopeTier::Uplifting,
            60..=69 => HopeTier::Promising,
            _ => HopeTier::Encouraging,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HopeTier::Encouraging => "Encouraging",
            HopeTier::Promising => "Promising",
            HopeTier::Uplifting => "Uplifting",
            HopeTier::Inspiring => "Inspiring",
            HopeTier::Radiant => "Radiant",
        }
    }

    /// Filled segments out of five, for the score meter.
    pub fn level(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for HopeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(HopeTier::from_score(0), HopeTier::Encouraging);
        assert_eq!(HopeTier::from_score(59), HopeTier::Encouraging);
        assert_eq!(HopeTier::from_score(60), HopeTier::Promising);
        assert_eq!(HopeTier::from_score(70), HopeTier::Uplifting);
        assert_eq!(HopeTier::from_score(89), HopeTier::Inspiring);
        assert_eq!(HopeTier::from_score(90), HopeTier::Radiant);
        assert_eq!(HopeTier::from_score(100), HopeTier::Radiant);
    }

    #[test]
    fn test_tier_levels_are_ordered() {
        assert_eq!(HopeTier::Encouraging.level(), 1);
        assert_eq!(HopeTier::Radiant.level(), 5);
        assert!(HopeTier::Inspiring > HopeTier::Promising);
    }
}
