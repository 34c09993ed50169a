use super::*;

/// Assigns every person a generation index, 0 being the top row.
///
/// Each connected component is walked breadth-first from its best root
/// (most descendants, then earliest birth year): children one row down,
/// parents one row up, spouses on the same row. Persons reachable only
/// through sibling edges inherit their sibling's row. Spouses that ended up
/// on different rows are then pulled onto the row of the partner with
/// recorded parents, or the lower of the two rows.
pub(super) fn assign_generations<'a>(graph: &FamilyGraph<'a>) -> HashMap<&'a str, u32> {
    let mut generations: HashMap<&'a str, i32> = HashMap::new();
    let mut seen: HashSet<&'a str> = HashSet::new();

    for &start in graph.ids() {
        if seen.contains(start) {
            continue;
        }
        let component = collect_component(graph, start, &mut seen);
        let root = pick_root(graph, &component);
        propagate(graph, root, &component, &mut generations);
    }

    align_spouses(graph, &mut generations);

    for &id in graph.ids() {
        generations.entry(id).or_insert_with(|| {
            tracing::debug!(id, "unreachable person defaulted to generation 0");
            0
        });
    }

    let min = generations.values().copied().min().unwrap_or(0);
    generations
        .into_iter()
        .map(|(id, generation)| (id, (generation - min) as u32))
        .collect()
}

fn collect_component<'a>(
    graph: &FamilyGraph<'a>,
    start: &'a str,
    seen: &mut HashSet<&'a str>,
) -> Vec<&'a str> {
    let mut component = Vec::new();
    let mut queue = VecDeque::from([start]);
    seen.insert(start);
    while let Some(current) = queue.pop_front() {
        component.push(current);
        for (_, next) in graph.links(current) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    component
}

fn pick_root<'a>(graph: &FamilyGraph<'a>, component: &[&'a str]) -> &'a str {
    let mut best: Option<(&'a str, usize, i32)> = None;
    for &id in component.iter().filter(|id| !graph.has_parents(id)) {
        let descendants = graph.descendant_count(id);
        let year = graph.birth_year(id).unwrap_or(9999);
        let better = match best {
            None => true,
            Some((_, best_count, best_year)) => {
                descendants > best_count || (descendants == best_count && year < best_year)
            }
        };
        if better {
            best = Some((id, descendants, year));
        }
    }
    best.map(|(id, _, _)| id).unwrap_or(component[0])
}

fn propagate<'a>(
    graph: &FamilyGraph<'a>,
    root: &'a str,
    component: &[&'a str],
    generations: &mut HashMap<&'a str, i32>,
) {
    let mut queue = VecDeque::new();
    generations.insert(root, 0);
    queue.push_back(root);

    loop {
        while let Some(current) = queue.pop_front() {
            let generation = generations[current];
            let steps = graph
                .children_of(current)
                .iter()
                .map(|c| (*c, generation + 1))
                .chain(graph.parents_of(current).iter().map(|p| (*p, generation - 1)))
                .chain(graph.spouses_of(current).iter().map(|s| (*s, generation)));
            for (next, next_generation) in steps {
                if !generations.contains_key(next) {
                    generations.insert(next, next_generation);
                    queue.push_back(next);
                }
            }
        }

        let via_sibling = component.iter().find_map(|&id| {
            if generations.contains_key(id) {
                return None;
            }
            graph
                .siblings_of(id)
                .iter()
                .find_map(|s| generations.get(s).copied())
                .map(|generation| (id, generation))
        });
        match via_sibling {
            Some((id, generation)) => {
                generations.insert(id, generation);
                queue.push_back(id);
            }
            None => break,
        }
    }
}

fn align_spouses<'a>(graph: &FamilyGraph<'a>, generations: &mut HashMap<&'a str, i32>) {
    for &(a, b) in graph.spouse_pairs() {
        let (Some(&ga), Some(&gb)) = (generations.get(a), generations.get(b)) else {
            continue;
        };
        if ga == gb {
            continue;
        }
        let target = match (graph.has_parents(a), graph.has_parents(b)) {
            (true, false) => ga,
            (false, true) => gb,
            _ => ga.max(gb),
        };
        tracing::debug!(a, b, ga, gb, target, "aligning spouse generations");
        generations.insert(a, target);
        generations.insert(b, target);
    }
}
