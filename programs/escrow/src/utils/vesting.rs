//! Release computation over a mint's schedule.
//!
//! The releasable target is `floor(total_deposited * elapsed / denominator)`
//! recomputed from the full deposited total on every call, so repeated
//! partial vests never accumulate per-call rounding. Once the elapsed
//! numerators reach the denominator the target snaps to the exact deposited
//! total and no dust is left behind.

use crate::error::EscrowError;
use crate::state::{BalanceRecord, Period};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseResult {
    /// No period has started yet (or none exist).
    NothingVestable,
    /// Already released up to the current target.
    Unchanged,
    Released {
        amount: u64,
        new_total_released: u64,
    },
}

impl ReleaseResult {
    /// Amount handed out by this result, 0 unless `Released`.
    pub fn amount(&self) -> u64 {
        match self {
            ReleaseResult::Released { amount, .. } => *amount,
            _ => 0,
        }
    }
}

/// Sum of numerators of periods with `effective_time_ms <= now_ms`.
pub fn elapsed_numerator(periods: &[Period], now_ms: i64) -> u128 {
    periods
        .iter()
        .filter(|p| p.effective_time_ms <= now_ms)
        .map(|p| p.numerator as u128)
        .sum()
}

/// Amount of `total_deposited` authorised for release at `now_ms`.
/// `None` when nothing has started vesting.
pub fn vested_target(
    periods: &[Period],
    now_ms: i64,
    total_deposited: u64,
) -> Result<Option<u64>, EscrowError> {
    let elapsed = elapsed_numerator(periods, now_ms);
    if elapsed == 0 {
        return Ok(None);
    }
    let denominator = periods.first().map(|p| p.denominator).unwrap_or(0) as u128;

    if elapsed >= denominator {
        return Ok(Some(total_deposited));
    }

    let v = (total_deposited as u128)
        .checked_mul(elapsed)
        .ok_or(EscrowError::MathOverflow)?
        / denominator;
    Ok(Some(u64::try_from(v).map_err(|_| EscrowError::MathOverflow)?))
}

pub fn compute_release(
    periods: &[Period],
    now_ms: i64,
    record: &BalanceRecord,
) -> Result<ReleaseResult, EscrowError> {
    let target = match vested_target(periods, now_ms, record.total_deposited)? {
        Some(t) => t,
        None => return Ok(ReleaseResult::NothingVestable),
    };

    if target <= record.total_released {
        return Ok(ReleaseResult::Unchanged);
    }

    Ok(ReleaseResult::Released {
        amount: target - record.total_released,
        new_total_released: target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::prelude::Pubkey;
    use proptest::prelude::*;

    const NOW: i64 = 1_700_000_000_000;
    const WEEK_MS: i64 = 7 * 86_400_000;

    fn period(effective_time_ms: i64, numerator: u64, denominator: u64) -> Period {
        Period {
            effective_time_ms,
            numerator,
            denominator,
        }
    }

    fn record(total_deposited: u64, total_released: u64) -> BalanceRecord {
        BalanceRecord {
            user: Pubkey::new_from_array([4u8; 32]),
            total_deposited,
            total_released,
        }
    }

    #[test]
    fn no_periods_is_nothing_vestable() {
        let r = compute_release(&[], NOW, &record(100, 0)).unwrap();
        assert_eq!(r, ReleaseResult::NothingVestable);
    }

    #[test]
    fn future_periods_are_nothing_vestable() {
        let periods = [period(NOW + 1, 1, 2)];
        let r = compute_release(&periods, NOW, &record(100, 0)).unwrap();
        assert_eq!(r, ReleaseResult::NothingVestable);
    }

    #[test]
    fn boundary_is_inclusive() {
        let periods = [period(NOW, 1, 2)];
        let r = compute_release(&periods, NOW, &record(100, 0)).unwrap();
        assert_eq!(
            r,
            ReleaseResult::Released {
                amount: 50,
                new_total_released: 50
            }
        );
    }

    #[test]
    fn truncates_toward_zero() {
        // 10.51 at 3/4 -> 7.8825 -> 7.88
        let periods = [
            period(NOW - 4 * WEEK_MS, 2, 4),
            period(NOW - WEEK_MS, 1, 4),
            period(NOW + WEEK_MS, 1, 4),
        ];
        let r = compute_release(&periods, NOW, &record(10_51, 0)).unwrap();
        assert_eq!(r.amount(), 7_88);
    }

    #[test]
    fn target_uses_full_total_not_increments() {
        let periods = [period(NOW - 4 * WEEK_MS, 1, 3)];
        // 100.00 vested once at 1/3 released 33.33, then another 100.00 arrived.
        let r = compute_release(&periods, NOW, &record(200_00, 33_33)).unwrap();
        assert_eq!(
            r,
            ReleaseResult::Released {
                amount: 33_33,
                new_total_released: 66_66
            }
        );
    }

    #[test]
    fn completion_snaps_to_exact_total() {
        let periods = [period(NOW - 4 * WEEK_MS, 1, 3), period(NOW - WEEK_MS, 2, 3)];
        let r = compute_release(&periods, NOW, &record(200_00, 66_66)).unwrap();
        assert_eq!(
            r,
            ReleaseResult::Released {
                amount: 133_34,
                new_total_released: 200_00
            }
        );
    }

    #[test]
    fn over_unity_schedule_caps_at_total() {
        let periods = [period(0, 3, 4), period(0, 3, 4)];
        assert_eq!(vested_target(&periods, NOW, 1_000).unwrap(), Some(1_000));
    }

    #[test]
    fn caught_up_is_unchanged() {
        let periods = [period(0, 1, 3)];
        let r = compute_release(&periods, NOW, &record(100_00, 33_33)).unwrap();
        assert_eq!(r, ReleaseResult::Unchanged);
        assert_eq!(r.amount(), 0);
    }

    #[test]
    fn large_totals_do_not_overflow() {
        let periods = [period(0, 999_999, 1_000_000)];
        let target = vested_target(&periods, NOW, u64::MAX).unwrap().unwrap();
        assert_eq!(target, ((u64::MAX as u128) * 999_999 / 1_000_000) as u64);
    }

    fn arb_schedule() -> impl Strategy<Value = (u64, Vec<(i64, u64)>)> {
        (1u64..=1_000).prop_flat_map(|denominator| {
            (
                Just(denominator),
                prop::collection::vec((0i64..1_000, 1u64..=denominator), 1..8),
            )
        })
    }

    proptest! {
        /// Released totals never decrease and never exceed deposits as time
        /// moves forward and deposits grow.
        #[test]
        fn released_is_monotonic_and_bounded(
            (denominator, raw) in arb_schedule(),
            deposits in prop::collection::vec(1u64..1_000_000_000, 1..6),
            mut times in prop::collection::vec(0i64..1_200, 1..6),
        ) {
            let periods: Vec<Period> = raw
                .iter()
                .map(|(t, n)| period(*t, *n, denominator))
                .collect();
            times.sort_unstable();

            let mut rec = record(0, 0);
            let mut last_released = 0u64;
            for (i, now) in times.iter().enumerate() {
                if let Some(d) = deposits.get(i) {
                    rec.total_deposited += d;
                }
                if let ReleaseResult::Released { amount, new_total_released } =
                    compute_release(&periods, *now, &rec).unwrap()
                {
                    prop_assert_eq!(new_total_released, rec.total_released + amount);
                    rec.total_released = new_total_released;
                }
                prop_assert!(rec.total_released >= last_released);
                prop_assert!(rec.total_released <= rec.total_deposited);
                last_released = rec.total_released;
            }
        }

        /// A second call with unchanged inputs never releases anything.
        #[test]
        fn replay_is_unchanged(
            (denominator, raw) in arb_schedule(),
            deposited in 1u64..u64::MAX / 2,
            now in 0i64..1_200,
        ) {
            let periods: Vec<Period> = raw
                .iter()
                .map(|(t, n)| period(*t, *n, denominator))
                .collect();
            let mut rec = record(deposited, 0);
            let first = compute_release(&periods, now, &rec).unwrap();
            if let ReleaseResult::Released { new_total_released, .. } = first {
                rec.total_released = new_total_released;
            }
            let second = compute_release(&periods, now, &rec).unwrap();
            match first {
                ReleaseResult::NothingVestable => {
                    prop_assert_eq!(second, ReleaseResult::NothingVestable);
                }
                _ => {
                    prop_assert_eq!(second, ReleaseResult::Unchanged);
                }
            }
        }
    }
}
