use super::*;

/// Member offsets of a unit relative to its anchor (the pivot for
/// multi-couples, the couple midpoint or the person otherwise).
#[derive(Debug, Clone, Default)]
pub(super) struct UnitGeometry<'a> {
    pub persons: Vec<(&'a str, f32)>,
    pub midpoints: Vec<(usize, f32)>,
    pub left: f32,
    pub right: f32,
}

impl UnitGeometry<'_> {
    pub fn center(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

pub(super) fn unit_geometry<'a>(
    plan: &UnitPlan<'a>,
    widths: &Widths,
    config: &LayoutConfig,
    unit: usize,
) -> UnitGeometry<'a> {
    let half_node = config.node_width / 2.0;
    let mut geometry = UnitGeometry::default();
    match &plan.units[unit].shape {
        UnitShape::Single(id) => geometry.persons.push((*id, 0.0)),
        UnitShape::Couple(c) => {
            let offset = (config.node_width + config.spouse_gap) / 2.0;
            let couple = &plan.couples[*c];
            geometry.persons.push((couple.left, -offset));
            geometry.persons.push((couple.right, offset));
            geometry.midpoints.push((*c, 0.0));
        }
        UnitShape::Multi { pivot, marriages } => {
            geometry.persons.push((*pivot, 0.0));
            let mut right_edge = half_node;
            let mut left_edge = half_node;
            for (i, &c) in marriages.iter().enumerate() {
                let spouse = plan.couples[c].partner_of(pivot);
                let half = widths
                    .marriage_half
                    .get(&c)
                    .copied()
                    .unwrap_or(config.node_width + config.spouse_gap);
                if i % 2 == 0 {
                    geometry.midpoints.push((c, right_edge + config.spouse_gap / 2.0));
                    geometry.persons.push((spouse, right_edge + config.spouse_gap + half_node));
                    right_edge += half;
                } else {
                    geometry.midpoints.push((c, -(left_edge + config.spouse_gap / 2.0)));
                    geometry.persons.push((spouse, -(left_edge + config.spouse_gap + half_node)));
                    left_edge += half;
                }
            }
        }
    }
    geometry.left = geometry
        .persons
        .iter()
        .map(|(_, x)| x - half_node)
        .fold(f32::INFINITY, f32::min);
    geometry.right = geometry
        .persons
        .iter()
        .map(|(_, x)| x + half_node)
        .fold(f32::NEG_INFINITY, f32::max);
    geometry
}

struct Placer<'g, 'a> {
    plan: &'g UnitPlan<'a>,
    geometry: &'g [UnitGeometry<'a>],
    widths: &'g Widths,
    gap: f32,
    anchor: Vec<Option<f32>>,
}

impl Placer<'_, '_> {
    fn left(&self, unit: usize) -> f32 {
        self.anchor[unit].unwrap_or(0.0) + self.geometry[unit].left
    }

    fn right(&self, unit: usize) -> f32 {
        self.anchor[unit].unwrap_or(0.0) + self.geometry[unit].right
    }

    /// Right edge including the space reserved for the unit's subtree.
    fn reserved_right(&self, unit: usize) -> f32 {
        let center = self.anchor[unit].unwrap_or(0.0) + self.geometry[unit].center();
        self.right(unit).max(center + self.widths.unit[unit] / 2.0)
    }

    fn row_right(&self, row: &[usize]) -> Option<f32> {
        row.iter()
            .filter(|u| self.anchor[**u].is_some())
            .map(|u| self.reserved_right(*u))
            .reduce(f32::max)
    }

    /// Places `unit` with its left edge at `left`, then pushes row
    /// neighbours (with their subtrees) right until nothing overlaps.
    fn put(&mut self, unit: usize, left: f32, row: &[usize]) {
        self.anchor[unit] = Some(left - self.geometry[unit].left);
        self.settle(row);
    }

    fn settle(&mut self, row: &[usize]) {
        let mut placed: Vec<usize> = row.iter().copied().filter(|u| self.anchor[*u].is_some()).collect();
        placed.sort_by(|a, b| self.left(*a).total_cmp(&self.left(*b)));
        let mut edge: Option<f32> = None;
        for unit in placed {
            if let Some(edge) = edge {
                let deficit = edge + self.gap - self.left(unit);
                if deficit > 0.0 {
                    self.shift_subtree(unit, deficit);
                }
            }
            let right = self.right(unit);
            edge = Some(edge.map_or(right, |e| e.max(right)));
        }
    }

    fn shift_subtree(&mut self, root: usize, dx: f32) {
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(unit) = stack.pop() {
            if !seen.insert(unit) {
                continue;
            }
            if let Some(x) = self.anchor[unit].as_mut() {
                *x += dx;
                stack.extend(self.plan.units[unit].children.iter().copied());
            }
        }
    }
}

/// Bottom-up anchor assignment, deepest generation first.
///
/// Within a row: units with already placed children are centred over
/// them; childless units follow their placed siblings (or open a new group
/// at the row's right edge) in birth order; units without any parent unit
/// go last. Every insertion pushes later neighbours right as needed.
pub(super) fn place_units(
    plan: &UnitPlan<'_>,
    geometry: &[UnitGeometry<'_>],
    widths: &Widths,
    config: &LayoutConfig,
) -> Vec<f32> {
    let mut placer = Placer {
        plan,
        geometry,
        widths,
        gap: config.sibling_gap,
        anchor: vec![None; plan.units.len()],
    };

    for (_, row) in plan.rows().into_iter().rev() {
        for &unit in &row {
            let kids: Vec<usize> = plan.units[unit]
                .children
                .iter()
                .copied()
                .filter(|c| placer.anchor[*c].is_some())
                .collect();
            if kids.is_empty() {
                continue;
            }
            let lo = kids.iter().map(|k| placer.left(*k)).fold(f32::INFINITY, f32::min);
            let hi = kids.iter().map(|k| placer.right(*k)).fold(f32::NEG_INFINITY, f32::max);
            let center = (lo + hi) / 2.0;
            let left = center - geometry[unit].center() + geometry[unit].left;
            placer.put(unit, left, &row);
        }

        let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
        let mut orphans: Vec<usize> = Vec::new();
        for &unit in &row {
            if placer.anchor[unit].is_some() {
                continue;
            }
            match plan.units[unit].parent {
                Some(parent) => match groups.iter_mut().find(|(p, _)| *p == parent) {
                    Some((_, members)) => members.push(unit),
                    None => groups.push((parent, vec![unit])),
                },
                None => orphans.push(unit),
            }
        }

        for (parent, mut members) in groups {
            members.sort_by_key(|u| plan.units[*u].birth_key);
            for unit in members {
                let sibling_edge = row
                    .iter()
                    .filter(|u| **u != unit && placer.anchor[**u].is_some())
                    .filter(|u| plan.units[**u].parent == Some(parent))
                    .map(|u| placer.reserved_right(*u))
                    .reduce(f32::max);
                let left = match sibling_edge {
                    Some(edge) => edge + config.sibling_gap,
                    None => placer.row_right(&row).map_or(0.0, |r| r + config.sibling_gap * 2.0),
                };
                placer.put(unit, left, &row);
            }
        }

        for unit in orphans {
            let left = placer.row_right(&row).map_or(0.0, |r| r + config.sibling_gap * 2.0);
            placer.put(unit, left, &row);
        }
    }

    placer.anchor.into_iter().map(|x| x.unwrap_or(0.0)).collect()
}
