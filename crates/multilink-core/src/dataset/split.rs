//! Train/val/test assignment

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TRAIN_FRACTION;

/// Dataset partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];
}

/// How generated instances are distributed over the splits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Every instance goes to `test`
    AllTest,
    /// The first `round(total * train_fraction)` instances go to `train`,
    /// the rest to `val`
    Ratio { train_fraction: f64 },
}

impl Default for SplitPolicy {
    fn default() -> Self {
        SplitPolicy::Ratio {
            train_fraction: DEFAULT_TRAIN_FRACTION,
        }
    }
}

impl SplitPolicy {
    pub fn is_valid(&self) -> bool {
        match self {
            SplitPolicy::AllTest => true,
            SplitPolicy::Ratio { train_fraction } => *train_fraction > 0.0 && *train_fraction <= 1.0,
        }
    }

    /// Number of train instances out of `total`
    pub fn split_point(&self, total: usize) -> usize {
        match self {
            SplitPolicy::AllTest => 0,
            SplitPolicy::Ratio { train_fraction } => {
                ((total as f64 * train_fraction).round() as usize).min(total)
            }
        }
    }

    /// Split of the instance at `position` (0-based) among `total` instances
    pub fn assign(&self, position: usize, total: usize) -> Split {
        match self {
            SplitPolicy::AllTest => Split::Test,
            SplitPolicy::Ratio { .. } => {
                if position < self.split_point(total) {
                    Split::Train
                } else {
                    Split::Val
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignments(policy: SplitPolicy, total: usize) -> Vec<Split> {
        (0..total).map(|p| policy.assign(p, total)).collect()
    }

    // Membership follows each instance's own position, not a shared loop index
    #[test]
    fn split_uses_instance_position() {
        let splits = assignments(SplitPolicy::default(), 10);
        assert_eq!(&splits[..8], &[Split::Train; 8]);
        assert_eq!(&splits[8..], &[Split::Val; 2]);
    }

    #[test]
    fn test_five_instances() {
        let splits = assignments(SplitPolicy::default(), 5);
        assert_eq!(
            splits,
            [Split::Train, Split::Train, Split::Train, Split::Train, Split::Val]
        );
    }

    #[test]
    fn test_all_test() {
        assert!(assignments(SplitPolicy::AllTest, 7).iter().all(|s| *s == Split::Test));
    }

    #[test]
    fn test_split_point_rounding() {
        let policy = SplitPolicy::default();
        assert_eq!(policy.split_point(0), 0);
        assert_eq!(policy.split_point(1), 1);
        assert_eq!(policy.split_point(3), 2);
        assert_eq!(policy.split_point(40), 32);
        assert_eq!(SplitPolicy::Ratio { train_fraction: 1.0 }.split_point(6), 6);
    }

    #[test]
    fn test_policy_validity() {
        assert!(SplitPolicy::AllTest.is_valid());
        assert!(!SplitPolicy::Ratio { train_fraction: 0.0 }.is_valid());
        assert!(!SplitPolicy::Ratio { train_fraction: 1.5 }.is_valid());
    }
}
