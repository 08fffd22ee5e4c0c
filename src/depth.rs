//! Numeric helpers shared by every bridge builder: length-weighted
//! depth means and the depth agreement factor used to penalise bridge
//! quality.

use crate::graph::Segment;

/// Mean of `a` and `b` weighted by `weight_a` and `weight_b`. If both
/// weights are zero, the unweighted mean is returned.
#[inline]
pub fn weighted_average(a: f64, b: f64, weight_a: f64, weight_b: f64) -> f64 {
    let weight_sum = weight_a + weight_b;
    if weight_sum > 0.0 {
        (a * weight_a + b * weight_b) / weight_sum
    } else {
        (a + b) / 2.0
    }
}

/// Mean depth of two segments, weighted by their lengths with the
/// graph overlap trimmed off. Longer segments have more reliable
/// depths, so they dominate.
pub fn mean_depth(seg_a: &Segment, seg_b: &Segment, overlap: usize) -> f64 {
    weighted_average(
        seg_a.depth,
        seg_b.depth,
        seg_a.length_no_overlap(overlap) as f64,
        seg_b.length_no_overlap(overlap) as f64,
    )
}

/// How well two depths agree, from 0.0 to 1.0:
///
/// * equal depths give 1.0 and similar depths a value near 1.0
/// * a ratio of 1.35 gives about 0.5
/// * a ratio of 2.06 gives about 0.1
/// * very different depths give a value near 0.0
///
/// A zero depth on either side gives 0.0.
///
/// # Examples
///
/// ```
/// use unibridge::depth::depth_agreement_factor;
///
/// assert_eq!(depth_agreement_factor(12.0, 12.0), 1.0);
/// assert_eq!(depth_agreement_factor(12.0, 0.0), 0.0);
/// assert!((depth_agreement_factor(10.0, 13.5) - 0.5).abs() < 0.01);
/// ```
pub fn depth_agreement_factor(depth_1: f64, depth_2: f64) -> f64 {
    let larger = depth_1.max(depth_2);
    let smaller = depth_1.min(depth_2);
    if larger == 0.0 || smaller == 0.0 {
        0.0
    } else if larger == smaller {
        1.0
    } else {
        let ratio = larger / smaller;
        1.0 / (1.0 + 10.0_f64.powf(2.0 * ((ratio - 1.0).log10() + 0.45)))
    }
}
