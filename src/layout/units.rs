use super::*;

/// A spouse pair. `left` is the partner with recorded parents when only one
/// of them has any; `stored` keeps the endpoints as the relationship had them.
#[derive(Debug, Clone)]
pub(super) struct Couple<'a> {
    pub id: String,
    pub left: &'a str,
    pub right: &'a str,
    pub stored: (&'a str, &'a str),
    pub children: Vec<&'a str>,
}

impl<'a> Couple<'a> {
    pub fn partner_of(&self, id: &str) -> &'a str {
        if self.left == id { self.right } else { self.left }
    }
}

#[derive(Debug, Clone)]
pub(super) enum UnitShape<'a> {
    Single(&'a str),
    Couple(usize),
    /// Pivot with two or more marriages, ordered by the spouses' birth dates.
    Multi { pivot: &'a str, marriages: Vec<usize> },
}

#[derive(Debug, Clone)]
pub(super) struct Unit<'a> {
    pub id: String,
    pub shape: UnitShape<'a>,
    pub generation: u32,
    pub children: Vec<usize>,
    pub parent: Option<usize>,
    pub birth_key: &'a str,
}

impl Unit<'_> {
    pub fn kind(&self) -> UnitKind {
        match self.shape {
            UnitShape::Single(_) => UnitKind::Single,
            UnitShape::Couple(_) => UnitKind::Couple,
            UnitShape::Multi { .. } => UnitKind::MultiCouple,
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct UnitPlan<'a> {
    pub units: Vec<Unit<'a>>,
    pub couples: Vec<Couple<'a>>,
    pub unit_of: HashMap<&'a str, usize>,
    /// Couples each person belongs to, in spouse-edge order.
    pub couples_of: HashMap<&'a str, Vec<usize>>,
}

impl<'a> UnitPlan<'a> {
    pub fn members(&self, unit: usize) -> Vec<&'a str> {
        match &self.units[unit].shape {
            UnitShape::Single(id) => vec![*id],
            UnitShape::Couple(c) => vec![self.couples[*c].left, self.couples[*c].right],
            UnitShape::Multi { pivot, marriages } => {
                let mut members = vec![*pivot];
                members.extend(marriages.iter().map(|c| self.couples[*c].partner_of(pivot)));
                members
            }
        }
    }

    /// Units holding the given children, deduplicated, without `exclude`.
    pub fn child_units(&self, children: &[&'a str], exclude: usize) -> Vec<usize> {
        let mut units = Vec::new();
        for child in children {
            if let Some(&u) = self.unit_of.get(child) {
                if u != exclude && !units.contains(&u) {
                    units.push(u);
                }
            }
        }
        units
    }

    pub fn rows(&self) -> BTreeMap<u32, Vec<usize>> {
        let mut rows: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (idx, unit) in self.units.iter().enumerate() {
            rows.entry(unit.generation).or_default().push(idx);
        }
        rows
    }
}

/// Groups persons into layout units.
///
/// Multi-couple units come first (pivots in order of first appearance among
/// the couples), then plain couples, then singles. Every person lands in
/// exactly one unit; a couple whose partner was already claimed by another
/// unit keeps its midpoint and edges but is not a unit of its own.
pub(super) fn plan_units<'a>(graph: &FamilyGraph<'a>, generations: &HashMap<&'a str, u32>) -> UnitPlan<'a> {
    let mut plan = UnitPlan::default();
    build_couples(graph, &mut plan);

    let mut claimed: HashSet<&'a str> = HashSet::new();
    let mut used = vec![false; plan.couples.len()];
    let mut child_claims: Vec<(usize, Vec<&'a str>)> = Vec::new();

    let mut pivots: Vec<&'a str> = Vec::new();
    for couple in &plan.couples {
        for id in [couple.left, couple.right] {
            if plan.couples_of[id].len() >= 2 && !pivots.contains(&id) {
                pivots.push(id);
            }
        }
    }

    for pivot in pivots {
        if claimed.contains(pivot) {
            continue;
        }
        let mut marriages: Vec<usize> = plan.couples_of[pivot]
            .iter()
            .copied()
            .filter(|&c| !used[c] && !claimed.contains(plan.couples[c].partner_of(pivot)))
            .collect();
        if marriages.len() < 2 {
            continue;
        }
        marriages.sort_by_key(|&c| graph.birth_sort_key(plan.couples[c].partner_of(pivot)));

        let pivot_children = graph.children_of(pivot);
        for &c in &marriages {
            let partner = plan.couples[c].partner_of(pivot);
            let theirs = graph.children_of(partner);
            plan.couples[c].children = pivot_children
                .iter()
                .copied()
                .filter(|child| theirs.contains(child))
                .collect();
        }
        let leftovers: Vec<&'a str> = pivot_children
            .iter()
            .copied()
            .filter(|child| !marriages.iter().any(|&c| plan.couples[c].children.contains(child)))
            .collect();
        plan.couples[marriages[0]].children.extend(leftovers);

        let mut children = Vec::new();
        for &c in &marriages {
            used[c] = true;
            claimed.insert(plan.couples[c].partner_of(pivot));
            children.extend(plan.couples[c].children.iter().copied());
        }
        claimed.insert(pivot);
        child_claims.push((plan.units.len(), children));
        plan.units.push(Unit {
            id: format!("multi-{pivot}"),
            shape: UnitShape::Multi { pivot, marriages },
            generation: generations.get(pivot).copied().unwrap_or(0),
            children: Vec::new(),
            parent: None,
            birth_key: graph.birth_sort_key(pivot),
        });
    }

    for c in 0..plan.couples.len() {
        if used[c] {
            continue;
        }
        let (left, right) = (plan.couples[c].left, plan.couples[c].right);
        if claimed.contains(left) || claimed.contains(right) {
            tracing::debug!(couple = %plan.couples[c].id, "partner already placed in another unit");
            continue;
        }
        used[c] = true;
        claimed.insert(left);
        claimed.insert(right);
        child_claims.push((plan.units.len(), plan.couples[c].children.clone()));
        plan.units.push(Unit {
            id: plan.couples[c].id.clone(),
            shape: UnitShape::Couple(c),
            generation: generations.get(left).copied().unwrap_or(0),
            children: Vec::new(),
            parent: None,
            birth_key: graph.birth_sort_key(left),
        });
    }

    let mut placed_children: HashSet<&'a str> =
        child_claims.iter().flat_map(|(_, kids)| kids.iter().copied()).collect();
    for &id in graph.ids() {
        if claimed.contains(id) {
            continue;
        }
        claimed.insert(id);
        let children: Vec<&'a str> = graph
            .children_of(id)
            .iter()
            .copied()
            .filter(|&child| placed_children.insert(child))
            .collect();
        child_claims.push((plan.units.len(), children));
        plan.units.push(Unit {
            id: id.to_string(),
            shape: UnitShape::Single(id),
            generation: generations.get(id).copied().unwrap_or(0),
            children: Vec::new(),
            parent: None,
            birth_key: graph.birth_sort_key(id),
        });
    }

    for unit in 0..plan.units.len() {
        for member in plan.members(unit) {
            plan.unit_of.insert(member, unit);
        }
    }
    link_units(graph, &mut plan, child_claims);
    plan
}

fn build_couples<'a>(graph: &FamilyGraph<'a>, plan: &mut UnitPlan<'a>) {
    for &(from, to) in graph.spouse_pairs() {
        let (left, right) = if !graph.has_parents(from) && graph.has_parents(to) {
            (to, from)
        } else {
            (from, to)
        };
        let mut children: Vec<&'a str> = graph.children_of(left).to_vec();
        for &child in graph.children_of(right) {
            if !children.contains(&child) {
                children.push(child);
            }
        }
        let idx = plan.couples.len();
        plan.couples.push(Couple {
            id: format!("couple-{left}-{right}"),
            left,
            right,
            stored: (from, to),
            children,
        });
        plan.couples_of.entry(left).or_default().push(idx);
        plan.couples_of.entry(right).or_default().push(idx);
    }
}

fn link_units<'a>(graph: &FamilyGraph<'a>, plan: &mut UnitPlan<'a>, child_claims: Vec<(usize, Vec<&'a str>)>) {
    for (unit, kids) in child_claims {
        plan.units[unit].children = plan.child_units(&kids, unit);
    }
    for unit in 0..plan.units.len() {
        for child in plan.units[unit].children.clone() {
            if plan.units[child].parent.is_none() {
                plan.units[child].parent = Some(unit);
            }
        }
    }
    for unit in 0..plan.units.len() {
        if plan.units[unit].parent.is_some() {
            continue;
        }
        let parent = plan
            .members(unit)
            .into_iter()
            .flat_map(|m| graph.parents_of(m).iter())
            .filter_map(|p| plan.unit_of.get(p).copied())
            .find(|&p| p != unit);
        plan.units[unit].parent = parent;
    }
}
