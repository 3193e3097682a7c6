//! Algorithm D (`distribute`) and Algorithm V
//! (`distribute_vacancies_by_weights`) -- sequential largest-remainder
//! proportional distribution, kept standalone and independently tested
//! since the capped-ratio quota is not their only caller.

/// Proportionally distribute `available` across `weights`, returning
/// non-negative integers summing to `available`.
pub fn distribute(available: i64, weights: &[f64]) -> Vec<i64> {
    let mut bin_counts = Vec::with_capacity(weights.len());
    let mut total_weight: f64 = weights.iter().sum();
    let mut remaining = available as f64;

    for &weight in weights {
        let p = if total_weight > 0.0 {
            weight / total_weight
        } else {
            0.0
        };
        let this_bin = (p * remaining).round() as i64;
        bin_counts.push(this_bin);
        total_weight -= weight;
        remaining -= this_bin as f64;
    }
    bin_counts
}

/// Determine how `available` vacancies of a job level are assigned to
/// employee groups given their current counts and a target weighting.
/// Returns zeros if there are no vacancies. If any group already meets
/// or exceeds the weighted target, that group's additive is clamped to
/// zero and the true vacancies are redistributed only across the
/// still-short groups.
pub fn distribute_vacancies_by_weights(available: i64, counts: &[i64], weights: &[f64]) -> Vec<i64> {
    let vacancies = available - counts.iter().sum::<i64>();
    if vacancies <= 0 {
        return vec![0; counts.len()];
    }

    let bin_counts = distribute(available, weights);
    let mut additives: Vec<i64> = bin_counts
        .iter()
        .zip(counts)
        .map(|(&bin, &count)| bin - count)
        .collect();

    if additives.iter().any(|&a| a < 0) {
        let mut positive_slots = Vec::new();
        for (i, a) in additives.iter_mut().enumerate() {
            if *a > 0 {
                positive_slots.push(i);
            } else {
                *a = 0;
            }
        }
        let truncated_weights: Vec<f64> = positive_slots.iter().map(|&i| weights[i] as i64 as f64).collect();
        let redistributed = distribute(vacancies, &truncated_weights);
        for (slot, value) in positive_slots.into_iter().zip(redistributed) {
            additives[slot] = value;
        }
    }

    additives
}
