use std::cmp::Ordering;

/// Compare two ascending line lists in lockstep.
///
/// Returns `(left_only, right_only)`. Equal lines consume one copy from
/// each side, so repeated lines are matched by count rather than
/// collapsed; three copies against one leaves two on the heavier side.
pub fn sorted_diff(left: &[String], right: &[String]) -> (Vec<String>, Vec<String>) {
    let mut left_only = Vec::new();
    let mut right_only = Vec::new();
    let mut l = 0usize;
    let mut r = 0usize;

    while l < left.len() && r < right.len() {
        match left[l].cmp(&right[r]) {
            Ordering::Less => {
                left_only.push(left[l].clone());
                l += 1;
            }
            Ordering::Greater => {
                right_only.push(right[r].clone());
                r += 1;
            }
            Ordering::Equal => {
                l += 1;
                r += 1;
            }
        }
    }
    left_only.extend_from_slice(&left[l..]);
    right_only.extend_from_slice(&right[r..]);
    (left_only, right_only)
}
