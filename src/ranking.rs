use crate::label::{Label, ProbabilityDistribution};
use std::cmp::Ordering;

/// Orders every label by probability, highest first.
///
/// The sort is stable, so exactly equal probabilities keep label universe
/// order. NaN probabilities are placed last.
pub fn rank(distribution: &ProbabilityDistribution) -> Vec<(Label, f32)> {
    let mut ranked = distribution.entries().to_vec();
    ranked.sort_by(|(_, a), (_, b)| descending(*a, *b));
    ranked
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
