//! Furlough-for-reduction and recall-from-furlough selection.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg64;

use crate::config::RecallMethod;

/// Furlough the lowest-seniority `count` members of `members` (already
/// seniority-ordered) that are not already furloughed, returning their
/// positions within `members`.
pub fn mark_for_furlough(members_not_furloughed: &[usize], count: usize) -> Vec<usize> {
    let start = members_not_furloughed.len().saturating_sub(count);
    members_not_furloughed[start..].to_vec()
}

/// Select `count` furloughed members (positions within `furloughed`,
/// itself seniority-ordered ascending) to recall, per `method`.
///
/// `SeniorityOrder` recalls the most senior first (head of the list).
/// `Stride(n)` recalls every `n`th member starting from the most senior,
/// wrapping to fill the remainder in seniority order. `Random(seed)`
/// draws `count` members uniformly without replacement using a
/// seeded, reproducible PRNG -- determinism requires the same seed to
/// reproduce the same recall set run over run.
pub fn mark_for_recall(furloughed: &[usize], count: usize, method: &RecallMethod) -> Vec<usize> {
    let count = count.min(furloughed.len());
    match method {
        RecallMethod::SeniorityOrder => furloughed[..count].to_vec(),
        RecallMethod::Stride(stride) => stride_recall(furloughed, count, *stride),
        RecallMethod::Random(seed) => {
            let mut rng = Pcg64::seed_from_u64(*seed);
            let mut pool: Vec<usize> = furloughed.to_vec();
            pool.shuffle(&mut rng);
            pool.truncate(count);
            pool.sort_unstable();
            pool
        }
    }
}

fn stride_recall(furloughed: &[usize], count: usize, stride: u32) -> Vec<usize> {
    let stride = stride.max(1) as usize;
    let mut selected = Vec::with_capacity(count);
    let mut taken = vec![false; furloughed.len()];
    let mut offset = 0;
    while selected.len() < count && offset < stride {
        let mut i = offset;
        while i < furloughed.len() && selected.len() < count {
            if !taken[i] {
                taken[i] = true;
                selected.push(furloughed[i]);
            }
            i += stride;
        }
        offset += 1;
    }
    selected.sort_unstable();
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn furlough_takes_lowest_seniority_tail() {
        let members = vec![0, 1, 2, 3, 4];
        let furloughed = mark_for_furlough(&members, 2);
        assert_eq!(furloughed, vec![3, 4]);
    }

    #[test]
    fn seniority_order_recall_takes_head() {
        let furloughed = vec![10, 11, 12, 13];
        let recalled = mark_for_recall(&furloughed, 2, &RecallMethod::SeniorityOrder);
        assert_eq!(recalled, vec![10, 11]);
    }

    #[test]
    fn stride_recall_spreads_selection() {
        let furloughed = vec![0, 1, 2, 3, 4, 5];
        let recalled = mark_for_recall(&furloughed, 3, &RecallMethod::Stride(2));
        assert_eq!(recalled, vec![0, 2, 4]);
    }

    #[test]
    fn random_recall_is_deterministic_for_seed() {
        let furloughed: Vec<usize> = (0..20).collect();
        let a = mark_for_recall(&furloughed, 5, &RecallMethod::Random(42));
        let b = mark_for_recall(&furloughed, 5, &RecallMethod::Random(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn random_recall_never_exceeds_pool() {
        let furloughed = vec![0, 1, 2];
        let recalled = mark_for_recall(&furloughed, 10, &RecallMethod::Random(1));
        assert_eq!(recalled.len(), 3);
    }
}
