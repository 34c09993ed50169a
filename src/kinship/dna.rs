use super::*;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generation steps derived from the shape of a blood-only path that has no
/// recorded common ancestor: climb, optionally cross one sibling edge, then
/// descend. A sibling hop counts as one step up and one step down.
pub(super) fn virtual_steps(kinds: &[EdgeKind]) -> Option<(u32, u32)> {
    let ups = kinds.iter().take_while(|k| **k == EdgeKind::Parent).count();
    let rest = &kinds[ups..];
    let (turn, rest) = match rest.first() {
        Some(EdgeKind::Sibling) => (1, &rest[1..]),
        _ => (0, rest),
    };
    let downs = rest.iter().take_while(|k| **k == EdgeKind::Child).count();
    if downs != rest.len() || kinds.is_empty() {
        return None;
    }
    Some(((ups + turn) as u32, (downs + turn) as u32))
}

fn from_steps(steps_a: u32, steps_b: u32) -> f64 {
    if steps_a == 0 && steps_b == 0 {
        return 100.0;
    }
    if steps_a == 0 || steps_b == 0 {
        let generations = steps_a.max(steps_b) as i32;
        return round2((100.0 / 2f64.powi(generations)).max(0.01));
    }
    round2((100.0 / 2f64.powi((steps_a + steps_b) as i32 - 1)).max(0.01))
}

/// Estimated shared autosomal DNA in percent, rounded to two decimals.
///
/// A path crossing a spouse edge shares nothing. With a common ancestor the
/// estimate halves once per generation (direct line) or uses the collateral
/// `100 / 2^(a + b - 1)`. Without one it falls back to the path shape, and
/// finally to the blood-edge count with sibling hops weighted as two.
pub fn estimate_shared_dna(path: &[PathStep], common: Option<&CommonAncestor>) -> f64 {
    if path.len() <= 1 {
        return 100.0;
    }
    let kinds = path::edge_kinds(path);
    if kinds.contains(&EdgeKind::Spouse) {
        return 0.0;
    }
    if let Some(common) = common {
        return from_steps(common.steps_a, common.steps_b);
    }
    if let Some((a, b)) = virtual_steps(&kinds) {
        return from_steps(a, b);
    }
    let weighted: i32 = kinds
        .iter()
        .map(|k| if *k == EdgeKind::Sibling { 2 } else { 1 })
        .sum();
    round2((100.0 / 2f64.powi(weighted - 1)).max(0.01))
}
