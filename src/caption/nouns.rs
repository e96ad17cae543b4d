//! Noun forms and oligomeric-state names.

use crate::error::Error;

/// Select the form of a noun for `count`.
///
/// `spec` is `stem`, `stem|plural` or `stem|singular|plural`: the stem is
/// used verbatim and the matching suffix is appended. A count of one picks
/// the singular suffix, anything else the plural one.
///
/// ```
/// # use pdbimg::caption::noun;
/// assert_eq!(noun(1, "cop|y|ies").unwrap(), "copy");
/// assert_eq!(noun(3, "chain|s").unwrap(), "chains");
/// assert_eq!(noun(3, "sheep").unwrap(), "sheep");
/// ```
pub fn noun(count: usize, spec: &str) -> Result<String, Error> {
    let parts: Vec<&str> = spec.split('|').collect();
    let (stem, singular, plural) = match parts.as_slice() {
        [stem] => (*stem, "", ""),
        [stem, plural] => (*stem, "", *plural),
        [stem, singular, plural] => (*stem, *singular, *plural),
        _ => return Err(Error::InvalidNounSpec(spec.to_owned())),
    };
    let suffix = if count == 1 { singular } else { plural };
    Ok(format!("{stem}{suffix}"))
}

/// `count` followed by the matching noun form, e.g. `2 copies`.
pub fn count_noun(count: usize, spec: &str) -> Result<String, Error> {
    Ok(format!("{count} {}", noun(count, spec)?))
}

const MULTIPLES: [&str; 12] = [
    "monomer",
    "dimer",
    "trimer",
    "tetramer",
    "pentamer",
    "hexamer",
    "heptamer",
    "octamer",
    "nonamer",
    "decamer",
    "undecamer",
    "dodecamer",
];

/// Name the oligomeric state of `chains` polymer chains drawn from
/// `polymer_entities` distinct polymer entities, e.g. `hetero-tetramer`.
#[must_use]
pub fn oligomer_name(chains: usize, polymer_entities: usize) -> String {
    let multiple = match chains.checked_sub(1).and_then(|i| MULTIPLES.get(i)) {
        Some(name) => (*name).to_owned(),
        None => format!("{chains}-mer"),
    };
    let prefix = match polymer_entities {
        _ if chains == 1 => "",
        0 => "",
        1 => "homo-",
        _ => "hetero-",
    };
    format!("{prefix}{multiple}")
}
