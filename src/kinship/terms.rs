use super::*;

pub const SELF_TERM: &str = "Ich selbst";
pub const NO_CONNECTION: &str = "Keine Verbindung gefunden";
pub const BY_MARRIAGE: &str = " (angeheiratet)";

fn gendered(gender: Gender, male: &str, female: &str, neutral: &str) -> String {
    match gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Unspecified => neutral,
    }
    .to_string()
}

pub(super) fn spouse(gender: Gender) -> String {
    gendered(gender, "Ehemann", "Ehefrau", "Ehepartner")
}

pub(super) fn sibling(gender: Gender) -> String {
    gendered(gender, "Bruder", "Schwester", "Geschwister")
}

pub(super) fn sibling_in_law(gender: Gender) -> String {
    gendered(gender, "Schwager", "Schwägerin", "Schwager/Schwägerin")
}

pub(super) fn parent_in_law(gender: Gender) -> String {
    gendered(gender, "Schwiegervater", "Schwiegermutter", "Schwiegerelternteil")
}

pub(super) fn step_parent(gender: Gender) -> String {
    gendered(gender, "Stiefvater", "Stiefmutter", "Stiefelternteil")
}

pub(super) fn child_in_law(gender: Gender) -> String {
    gendered(gender, "Schwiegersohn", "Schwiegertochter", "Schwiegerkind")
}

pub(super) fn step_child(gender: Gender) -> String {
    gendered(gender, "Stiefsohn", "Stieftochter", "Stiefkind")
}

pub(super) fn distant(hops: usize) -> String {
    format!("Verwandt über {hops} Verbindungen")
}

/// `Groß` for 2, `Urgroß` for 3, then one more `ur` per generation.
/// Empty below 2.
fn great_prefix(n: u32) -> String {
    match n {
        0 | 1 => String::new(),
        2 => "Groß".to_string(),
        n => format!("Ur{}groß", "ur".repeat((n - 3) as usize)),
    }
}

fn prefixed(prefix: &str, word: &str) -> String {
    if prefix.is_empty() {
        word.to_string()
    } else {
        format!("{prefix}{}", word.to_lowercase())
    }
}

fn prefixed_gendered(gender: Gender, prefix: &str, male: &str, female: &str) -> String {
    let male = prefixed(prefix, male);
    let female = prefixed(prefix, female);
    match gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Unspecified => format!("{male}/{female}"),
    }
}

/// Direct ancestor `generations` levels up: Vater, Großvater, Urgroßvater, ...
pub(super) fn ancestor(generations: u32, gender: Gender) -> String {
    let prefix = great_prefix(generations);
    gendered(
        gender,
        &prefixed(&prefix, "Vater"),
        &prefixed(&prefix, "Mutter"),
        &prefixed(&prefix, "Elternteil"),
    )
}

/// Direct descendant `generations` levels down: Sohn, Enkel, Urenkel, Ururenkel, ...
pub(super) fn descendant(generations: u32, gender: Gender) -> String {
    match generations {
        0 | 1 => gendered(gender, "Sohn", "Tochter", "Kind"),
        2 => gendered(gender, "Enkel", "Enkelin", "Enkelkind"),
        n => {
            let ur = format!("Ur{}", "ur".repeat((n - 3) as usize));
            gendered(
                gender,
                &format!("{ur}enkel"),
                &format!("{ur}enkelin"),
                &format!("{ur}enkelkind"),
            )
        }
    }
}

fn cousin(degree: u32, gender: Gender) -> String {
    let base = gendered(gender, "Cousin", "Cousine", "Cousin/Cousine");
    if degree > 1 {
        format!("{base} {degree}. Grades")
    } else {
        base
    }
}

/// Blood-relative term from the generation distances of both persons to
/// their common ancestor. `steps_b` belongs to the person being described.
pub(super) fn blood_term(steps_a: u32, steps_b: u32, gender: Gender) -> (String, u32) {
    if steps_a == 0 && steps_b == 0 {
        return (SELF_TERM.to_string(), 0);
    }
    if steps_a == 0 {
        return (descendant(steps_b, gender), steps_b);
    }
    if steps_b == 0 {
        return (ancestor(steps_a, gender), steps_a);
    }

    let nearer = steps_a.min(steps_b);
    let gen_diff = steps_a.abs_diff(steps_b);
    if gen_diff == 0 {
        if nearer == 1 {
            return (sibling(gender), 1);
        }
        let degree = nearer - 1;
        return (cousin(degree, gender), degree);
    }

    let prefix = great_prefix(gen_diff);
    // The described person sits closer to the ancestor: an older generation.
    let mut term = if steps_b < steps_a {
        prefixed_gendered(gender, &prefix, "Onkel", "Tante")
    } else {
        prefixed_gendered(gender, &prefix, "Neffe", "Nichte")
    };
    if nearer >= 2 {
        term.push_str(&format!(" {nearer}. Grades"));
    }
    let degree = if nearer == 1 { gen_diff } else { nearer };
    (term, degree)
}
