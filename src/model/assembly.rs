use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::util::report::Reporter;

/// One biological assembly as listed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    /// Assembly id (`"1"`, `"2"`, ...).
    pub assembly_id: String,
    /// `homo`, `hetero` or `?`.
    pub form: String,
    /// Oligomeric state name, e.g. `dimer`.
    pub name: String,
    /// Whether the archive marks this assembly as preferred.
    pub preferred: bool,
}

impl Assembly {
    /// Neutral placeholder used when no metadata is available.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            assembly_id: "1".to_owned(),
            form: "?".to_owned(),
            preferred: true,
            name: "?".to_owned(),
        }
    }

    /// Oligomer description from the gateway record, e.g. `homo-dimer`.
    /// `None` when the record carries no usable state.
    #[must_use]
    pub fn oligomer_name(&self) -> Option<String> {
        if self.name.is_empty() || self.name == "?" {
            return None;
        }
        match self.form.as_str() {
            "homo" | "hetero" => Some(format!("{}-{}", self.form, self.name)),
            _ => Some(self.name.clone()),
        }
    }
}

/// Resolve the preferred assembly: the first one flagged preferred.
///
/// With none flagged the first assembly is used; with several flagged the
/// first flagged one is kept. Both cases warn through `reporter`. An empty
/// list yields [`Assembly::neutral`].
pub fn preferred_assembly(
    entry_id: &str,
    assemblies: &[Assembly],
    reporter: &Reporter,
) -> Result<Assembly, Error> {
    let Some(first) = assemblies.first() else {
        reporter.warn(format!(
            "{entry_id}: no assemblies listed, using assembly 1"
        ))?;
        return Ok(Assembly::neutral());
    };
    let preferred: Vec<&Assembly> =
        assemblies.iter().filter(|a| a.preferred).collect();
    match preferred.as_slice() {
        [] => {
            reporter.warn(format!(
                "{entry_id}: no preferred assembly, using assembly {}",
                first.assembly_id
            ))?;
            Ok(first.clone())
        }
        [only] => Ok((*only).clone()),
        [chosen, ..] => {
            reporter.warn(format!(
                "{entry_id}: {} preferred assemblies, using assembly {}",
                preferred.len(),
                chosen.assembly_id
            ))?;
            Ok((*chosen).clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembly(id: &str, preferred: bool) -> Assembly {
        Assembly {
            assembly_id: id.to_owned(),
            form: "homo".to_owned(),
            name: "dimer".to_owned(),
            preferred,
        }
    }

    #[test]
    fn picks_flagged_assembly() {
        let list = [assembly("1", false), assembly("2", true)];
        let chosen =
            preferred_assembly("1abc", &list, &Reporter::default()).unwrap();
        assert_eq!(chosen.assembly_id, "2");
    }

    #[test]
    fn falls_back_to_first() {
        let list = [assembly("3", false), assembly("4", false)];
        let chosen =
            preferred_assembly("1abc", &list, &Reporter::default()).unwrap();
        assert_eq!(chosen.assembly_id, "3");
    }

    #[test]
    fn multiple_preferred_keeps_first() {
        let list = [assembly("1", false), assembly("2", true), assembly("3", true)];
        let chosen =
            preferred_assembly("1abc", &list, &Reporter::default()).unwrap();
        assert_eq!(chosen.assembly_id, "2");
    }

    #[test]
    fn ambiguity_fails_when_strict() {
        let list = [assembly("1", true), assembly("2", true)];
        let result = preferred_assembly("1abc", &list, &Reporter::new(true));
        assert!(matches!(result, Err(Error::WarningAsError(_))));
    }

    #[test]
    fn empty_list_is_neutral() {
        let chosen =
            preferred_assembly("1abc", &[], &Reporter::default()).unwrap();
        assert_eq!(chosen, Assembly::neutral());
        assert_eq!(chosen.oligomer_name(), None);
        assert_eq!(assembly("1", true).oligomer_name().as_deref(), Some("homo-dimer"));
    }
}
