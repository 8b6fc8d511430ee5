/// Every canonical solving strategy the puzzle catalog knows, in catalog order.
pub const ALL_STRATEGIES: [&str; 22] = [
    "NAKED_SINGLE",
    "HIDDEN_SINGLE",
    "NAKED_PAIR",
    "NAKED_TRIPLET",
    "NAKED_QUADRUPLET",
    "NAKED_QUINTUPLET",
    "NAKED_SEXTUPLET",
    "NAKED_SEPTUPLET",
    "NAKED_OCTUPLET",
    "HIDDEN_PAIR",
    "HIDDEN_TRIPLET",
    "HIDDEN_QUADRUPLET",
    "HIDDEN_QUINTUPLET",
    "HIDDEN_SEXTUPLET",
    "HIDDEN_SEPTUPLET",
    "HIDDEN_OCTUPLET",
    "POINTING_PAIR",
    "POINTING_TRIPLET",
    "BOX_LINE_REDUCTION",
    "X_WING",
    "SWORDFISH",
    "SINGLES_CHAINING",
];

const STRATEGY_ALIASES: [(&str, [&str; 3]); 2] = [
    ("NAKED_SET", ["NAKED_PAIR", "NAKED_TRIPLET", "NAKED_QUADRUPLET"]),
    ("HIDDEN_SET", ["HIDDEN_PAIR", "HIDDEN_TRIPLET", "HIDDEN_QUADRUPLET"]),
];

pub fn is_canonical(strategy: &str) -> bool {
    ALL_STRATEGIES.contains(&strategy)
}

/// Replaces alias identifiers with their canonical members.
///
/// Running the expansion on its own output returns the same set.
pub fn expand_aliases<S: AsRef<str>>(learned: &[S]) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::with_capacity(learned.len() + 6);

    for strategy in learned {
        let strategy = strategy.as_ref();
        match STRATEGY_ALIASES.iter().find(|(alias, _)| *alias == strategy) {
            Some((_, members)) => {
                for member in members {
                    push_unique(&mut expanded, member);
                }
            }
            None => push_unique(&mut expanded, strategy),
        }
    }

    expanded
}

/// Canonical strategies the user has not learned yet, in catalog order.
pub fn strategies_to_exclude<S: AsRef<str>>(learned: &[S]) -> Vec<&'static str> {
    let learned = expand_aliases(learned);

    ALL_STRATEGIES
        .iter()
        .copied()
        .filter(|strategy| !learned.iter().any(|l| l == strategy))
        .collect()
}

fn push_unique(set: &mut Vec<String>, strategy: &str) {
    if !set.iter().any(|s| s == strategy) {
        set.push(strategy.to_string());
    }
}
