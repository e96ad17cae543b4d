use super::{ApiError, MetadataGateway};
use crate::model::{
    empty_domains, Assembly, ChainCoverage, DomainsBySource, ModifiedResidue,
    Molecule,
};

/// Offline gateway returning fixed neutral metadata for every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoApi;

impl MetadataGateway for NoApi {
    fn molecules(&self, _entry_id: &str) -> Result<Vec<Molecule>, ApiError> {
        Ok(Vec::new())
    }

    fn assemblies(&self, _entry_id: &str) -> Result<Vec<Assembly>, ApiError> {
        Ok(vec![Assembly::neutral()])
    }

    fn experimental_methods(
        &self,
        _entry_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        Ok(Vec::new())
    }

    fn modified_residues(
        &self,
        _entry_id: &str,
    ) -> Result<Vec<ModifiedResidue>, ApiError> {
        Ok(Vec::new())
    }

    fn domain_mappings(
        &self,
        _entry_id: &str,
    ) -> Result<DomainsBySource, ApiError> {
        Ok(empty_domains())
    }

    fn polymer_coverage(
        &self,
        _entry_id: &str,
    ) -> Result<Vec<ChainCoverage>, ApiError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_defaults() {
        let api = NoApi;
        assert!(api.entity_names("1abc").unwrap().is_empty());
        assert_eq!(api.assemblies("1abc").unwrap(), [Assembly::neutral()]);
        assert!(api.modified_residues("1abc").unwrap().is_empty());
        let domains = api.domain_mappings("1abc").unwrap();
        assert_eq!(domains.len(), 4);
        assert!(domains.values().all(|families| families.is_empty()));
    }
}
