use crate::storage_types::{ReleasePolicy, MAX_BPS};

/// Outcome of applying a [`ReleasePolicy`] to the held balance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    Insufficient,
    Release {
        beneficiary_share: i128,
        depositor_share: i128,
    },
}

impl ReleasePolicy {
    pub fn is_valid(&self) -> bool {
        self.threshold > 0
            && self.unit > 0
            && self.beneficiary_bps > 0
            && self.beneficiary_bps < MAX_BPS
    }

    /// Values `balance` at `price` per `unit` and splits it.
    ///
    /// A held value below `threshold` (or a non-positive price) resolves as
    /// [`Resolution::Insufficient`]. Otherwise the beneficiary receives
    /// `beneficiary_bps` of the balance, rounded down, and the depositor the
    /// rest, so both shares are positive once the balance covers one basis
    /// point.
    pub fn resolve(&self, balance: i128, price: i128) -> Resolution {
        if price <= 0 || balance <= 0 {
            return Resolution::Insufficient;
        }

        let sufficient = match balance.checked_mul(price) {
            Some(product) => product / self.unit >= self.threshold,
            None => true,
        };
        if !sufficient {
            return Resolution::Insufficient;
        }

        let beneficiary_share = match balance.checked_mul(self.beneficiary_bps) {
            Some(product) => product / MAX_BPS,
            None => balance / MAX_BPS * self.beneficiary_bps,
        };
        Resolution::Release {
            beneficiary_share,
            depositor_share: balance - beneficiary_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: i128 = 10_000_000;

    fn policy() -> ReleasePolicy {
        ReleasePolicy {
            threshold: 50_000,
            unit: ONE,
            beneficiary_bps: 8_000,
        }
    }

    #[test]
    fn test_below_threshold_is_insufficient() {
        assert_eq!(policy().resolve(ONE, 49_900), Resolution::Insufficient);
    }

    #[test]
    fn test_threshold_price_pays_both_parties() {
        assert_eq!(
            policy().resolve(ONE, 50_000),
            Resolution::Release {
                beneficiary_share: 8_000_000,
                depositor_share: 2_000_000,
            }
        );
    }

    #[test]
    fn test_above_threshold_splits() {
        let Resolution::Release {
            beneficiary_share,
            depositor_share,
        } = policy().resolve(ONE, 50_100)
        else {
            panic!("expected a release");
        };

        assert!(beneficiary_share > 0);
        assert!(depositor_share > 0);
        assert_eq!(beneficiary_share + depositor_share, ONE);
    }

    #[test]
    fn test_non_positive_price_is_insufficient() {
        assert_eq!(policy().resolve(ONE, 0), Resolution::Insufficient);
        assert_eq!(policy().resolve(ONE, -50_000), Resolution::Insufficient);
    }

    #[test]
    fn test_empty_balance_is_insufficient() {
        assert_eq!(policy().resolve(0, 50_100), Resolution::Insufficient);
    }

    #[test]
    fn test_overflowing_balance_still_splits() {
        let Resolution::Release {
            beneficiary_share,
            depositor_share,
        } = policy().resolve(i128::MAX, 2)
        else {
            panic!("expected a release");
        };

        assert_eq!(beneficiary_share, i128::MAX / MAX_BPS * 8_000);
        assert_eq!(depositor_share, i128::MAX - beneficiary_share);
        assert!(depositor_share > 0);
    }

    #[test]
    fn test_validation() {
        assert!(policy().is_valid());
        assert!(!ReleasePolicy {
            threshold: 0,
            ..policy()
        }
        .is_valid());
        assert!(!ReleasePolicy { unit: 0, ..policy() }.is_valid());
        assert!(!ReleasePolicy {
            beneficiary_bps: 0,
            ..policy()
        }
        .is_valid());
        assert!(!ReleasePolicy {
            beneficiary_bps: MAX_BPS,
            ..policy()
        }
        .is_valid());
    }
}
