/// A unit's horizontal extent, moved as one rigid block.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Slot {
    pub unit: usize,
    pub left: f32,
    pub right: f32,
    pub y: f32,
    pub shift: f32,
}

impl Slot {
    fn push(&mut self, dx: f32) {
        self.left += dx;
        self.right += dx;
        self.shift += dx;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum RowMatch {
    /// Slots share a row only at the same Y.
    Exact,
    /// Slots whose vertical centres are closer than this share a row.
    Within(f32),
}

impl RowMatch {
    fn same_row(self, a: f32, b: f32) -> bool {
        match self {
            RowMatch::Exact => a == b,
            RowMatch::Within(tolerance) => (a - b).abs() < tolerance,
        }
    }
}

/// Left-to-right sweep pushing overlapping slots apart by at least `min_gap`.
///
/// A slot closer than `min_gap` to the right edge of an earlier slot in its
/// row is shifted together with every later slot of that row. Exact rows
/// settle in one pass; tolerance rows repeat up to `max_passes`.
pub(super) fn resolve_overlaps(slots: &mut [Slot], rows: RowMatch, min_gap: f32, max_passes: usize) {
    slots.sort_by(|a, b| a.left.total_cmp(&b.left));
    let passes = match rows {
        RowMatch::Exact => 1,
        RowMatch::Within(_) => max_passes.max(1),
    };

    for pass in 0..passes {
        let mut moved = false;
        for i in 1..slots.len() {
            let edge = (0..i)
                .filter(|&j| rows.same_row(slots[j].y, slots[i].y))
                .map(|j| slots[j].right)
                .reduce(f32::max);
            let Some(edge) = edge else {
                continue;
            };
            let deficit = edge + min_gap - slots[i].left;
            if deficit <= 0.0 {
                continue;
            }
            let y = slots[i].y;
            for k in i..slots.len() {
                if k == i || rows.same_row(slots[k].y, y) {
                    slots[k].push(deficit);
                }
            }
            moved = true;
        }
        if !moved {
            return;
        }
        if pass + 1 == passes && matches!(rows, RowMatch::Within(_)) {
            tracing::debug!(passes, "overlap passes exhausted");
        }
        slots.sort_by(|a, b| a.left.total_cmp(&b.left));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(unit: usize, left: f32, width: f32, y: f32) -> Slot {
        Slot {
            unit,
            left,
            right: left + width,
            y,
            shift: 0.0,
        }
    }

    #[test]
    fn cascades_within_exact_row() {
        let mut slots = vec![slot(0, 0.0, 100.0, 0.0), slot(1, 90.0, 100.0, 0.0), slot(2, 300.0, 100.0, 0.0)];
        resolve_overlaps(&mut slots, RowMatch::Exact, 20.0, 5);
        assert_eq!(slots[1].left, 120.0);
        assert_eq!(slots[2].left, 330.0);
        assert_eq!(slots[2].shift, 30.0);
    }

    #[test]
    fn other_rows_are_untouched() {
        let mut slots = vec![slot(0, 0.0, 100.0, 0.0), slot(1, 50.0, 100.0, 140.0)];
        resolve_overlaps(&mut slots, RowMatch::Exact, 20.0, 5);
        assert_eq!(slots[1].left, 50.0);
    }

    #[test]
    fn tolerance_rows_group_nearby_centres() {
        let mut slots = vec![slot(0, 0.0, 100.0, 0.0), slot(1, 50.0, 100.0, 40.0), slot(2, 60.0, 100.0, 200.0)];
        resolve_overlaps(&mut slots, RowMatch::Within(62.0), 20.0, 5);
        let moved = slots.iter().find(|s| s.unit == 1).unwrap();
        assert_eq!(moved.left, 120.0);
        let far = slots.iter().find(|s| s.unit == 2).unwrap();
        assert_eq!(far.left, 60.0);
    }
}
