use super::*;

/// Vertical position per person from the birth year.
///
/// Missing years are estimated from the average known year of the same
/// generation, else from the earliest known year plus a fixed span per
/// generation. The axis starts at the decade of the earliest known year.
pub(super) fn temporal_rows<'a>(
    graph: &FamilyGraph<'a>,
    generations: &HashMap<&'a str, u32>,
    config: &LayoutConfig,
) -> HashMap<&'a str, f32> {
    let known: Vec<(&'a str, i32)> = graph
        .ids()
        .iter()
        .filter_map(|&id| graph.birth_year(id).map(|year| (id, year)))
        .collect();
    let min_year = known.iter().map(|(_, year)| *year).min();

    let mut per_generation: BTreeMap<u32, (i64, i64)> = BTreeMap::new();
    for (id, year) in &known {
        let generation = generations.get(id).copied().unwrap_or(0);
        let entry = per_generation.entry(generation).or_insert((0, 0));
        entry.0 += i64::from(*year);
        entry.1 += 1;
    }

    let base = min_year.unwrap_or(config.empty_base_year).div_euclid(10) * 10;
    let span = config.fallback_years_per_generation;

    graph
        .ids()
        .iter()
        .map(|&id| {
            let generation = generations.get(id).copied().unwrap_or(0);
            let year = graph.birth_year(id).unwrap_or_else(|| {
                if let Some(&(sum, count)) = per_generation.get(&generation) {
                    (sum as f64 / count as f64).round() as i32
                } else {
                    let start = min_year.unwrap_or(config.fallback_base_year);
                    start + span * generation as i32
                }
            });
            (id, (year - base) as f32 * config.year_scale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Relationship};

    #[test]
    fn years_map_to_rows() {
        let people = vec![
            Person::new("gp", "", "").with_birth_date("1903-05-01"),
            Person::new("p", "", "").with_birth_date("1931"),
            Person::new("q", "", ""),
            Person::new("c", "", ""),
        ];
        let rels = vec![
            Relationship::parent_child("gp", "p"),
            Relationship::parent_child("gp", "q"),
            Relationship::parent_child("p", "c"),
        ];
        let graph = FamilyGraph::build(&people, &rels);
        let generations = assign_generations(&graph);
        let rows = temporal_rows(&graph, &generations, &LayoutConfig::default());
        assert_eq!(rows["gp"], 3.0 * 5.0);
        assert_eq!(rows["p"], 31.0 * 5.0);
        // same generation as p: takes p's year
        assert_eq!(rows["q"], rows["p"]);
        // no known year in generation 2: 1903 + 2 * 25
        assert_eq!(rows["c"], 53.0 * 5.0);
    }

    #[test]
    fn without_any_year() {
        let people = vec![Person::new("a", "", ""), Person::new("b", "", "")];
        let rels = vec![Relationship::parent_child("a", "b")];
        let graph = FamilyGraph::build(&people, &rels);
        let generations = assign_generations(&graph);
        let rows = temporal_rows(&graph, &generations, &LayoutConfig::default());
        assert_eq!(rows["a"], 30.0 * 5.0);
        assert_eq!(rows["b"], 55.0 * 5.0);
    }
}
