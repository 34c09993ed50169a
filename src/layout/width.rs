use super::*;

/// Subtree widths per unit plus the half-width each multi-couple marriage
/// claims on its side of the pivot.
#[derive(Debug, Default)]
pub(super) struct Widths {
    pub unit: Vec<f32>,
    pub marriage_half: HashMap<usize, f32>,
}

/// Memoised width recursion. `visiting` cuts parent/child cycles in
/// malformed data: a unit reached again while still being measured counts
/// as having no children.
struct WidthContext<'p, 'a> {
    plan: &'p UnitPlan<'a>,
    config: &'p LayoutConfig,
    memo: HashMap<usize, f32>,
    visiting: HashSet<usize>,
    marriage_half: HashMap<usize, f32>,
}

impl<'p, 'a> WidthContext<'p, 'a> {
    fn self_width(&self, unit: usize) -> f32 {
        let c = self.config;
        match &self.plan.units[unit].shape {
            UnitShape::Single(_) => c.node_width,
            UnitShape::Couple(_) => c.couple_width(),
            UnitShape::Multi { marriages, .. } => {
                c.node_width + marriages.len() as f32 * (c.node_width + c.spouse_gap)
            }
        }
    }

    fn row_width(&mut self, units: &[usize]) -> f32 {
        if units.is_empty() {
            return 0.0;
        }
        let gaps = (units.len() - 1) as f32 * self.config.sibling_gap;
        units.iter().map(|&u| self.width(u)).sum::<f32>() + gaps
    }

    fn width(&mut self, unit: usize) -> f32 {
        if let Some(&w) = self.memo.get(&unit) {
            return w;
        }
        if !self.visiting.insert(unit) {
            tracing::debug!(unit = %self.plan.units[unit].id, "cycle in unit tree, treating as leaf");
            return self.self_width(unit);
        }

        let plan = self.plan;
        let width = match &plan.units[unit].shape {
            UnitShape::Multi { marriages, .. } => {
                let mut total = self.config.node_width;
                for &c in marriages {
                    total += self.marriage_half_width(unit, c);
                }
                total
            }
            _ => {
                let children = plan.units[unit].children.clone();
                self.self_width(unit).max(self.row_width(&children))
            }
        };

        self.visiting.remove(&unit);
        self.memo.insert(unit, width);
        width
    }

    fn marriage_half_width(&mut self, unit: usize, couple: usize) -> f32 {
        let plan = self.plan;
        let kids = plan.child_units(&plan.couples[couple].children, unit);
        let row = self.row_width(&kids);
        let c = self.config;
        let half = (c.node_width + c.spouse_gap).max(row / 2.0 + c.spouse_gap / 2.0 + c.node_width / 2.0);
        self.marriage_half.insert(couple, half);
        half
    }
}

pub(super) fn measure_widths(plan: &UnitPlan<'_>, config: &LayoutConfig) -> Widths {
    let mut ctx = WidthContext {
        plan,
        config,
        memo: HashMap::new(),
        visiting: HashSet::new(),
        marriage_half: HashMap::new(),
    };
    let unit = (0..plan.units.len()).map(|u| ctx.width(u)).collect();
    Widths {
        unit,
        marriage_half: ctx.marriage_half,
    }
}
