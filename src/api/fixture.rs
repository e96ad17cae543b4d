//! In-memory gateway with haemoglobin-like metadata for tests.

use std::collections::BTreeMap;

use super::{ApiError, MetadataGateway};
use crate::model::{
    empty_domains, Assembly, ChainCoverage, DomainRecord, DomainSource,
    DomainsBySource, EntityKind, ModifiedResidue, Molecule,
};

pub(crate) struct FixtureApi {
    pub molecules: Vec<Molecule>,
    pub assemblies: Vec<Assembly>,
    pub methods: Vec<String>,
    pub modified_residues: Vec<ModifiedResidue>,
    pub domains: DomainsBySource,
    pub coverage: Vec<ChainCoverage>,
    pub modres_error: Option<ApiError>,
    pub domains_error: Option<ApiError>,
}

fn molecule(
    id: &str,
    name: &str,
    kind: EntityKind,
    chains: &[&str],
    auth: &[&str],
    compounds: &[&str],
) -> Molecule {
    let owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect();
    Molecule {
        entity_id: id.to_owned(),
        name: name.to_owned(),
        kind,
        label_chains: owned(chains),
        auth_chains: owned(auth),
        compound_ids: owned(compounds),
    }
}

pub(crate) fn domain(
    id: &str,
    source: DomainSource,
    family: &str,
    entity: &str,
    chain: &str,
) -> DomainRecord {
    let mut record = DomainRecord {
        id: id.to_owned(),
        source,
        family: family.to_owned(),
        family_name: match source {
            DomainSource::Cath => "Globins".to_owned(),
            _ => "Globin".to_owned(),
        },
        chunks: Vec::new(),
    };
    record.push_segment(entity, chain, &chain.to_lowercase(), 1, 141);
    record
}

pub(crate) fn modres(entity: &str, chain: &str, number: i32, compound: &str) -> ModifiedResidue {
    ModifiedResidue {
        entity_id: entity.to_owned(),
        label_chain_id: chain.to_owned(),
        auth_chain_id: chain.to_owned(),
        residue_number: number,
        compound_id: compound.to_owned(),
        compound_name: format!("{compound} NAME"),
    }
}

fn coverage(entity: &str, chain: &str, residues: i32) -> ChainCoverage {
    ChainCoverage {
        entity_id: entity.to_owned(),
        chain_id: chain.to_owned(),
        auth_chain_id: chain.to_lowercase(),
        observed: vec![(1, residues)],
    }
}

impl FixtureApi {
    /// Haemoglobin: two alpha chains (A, C), two beta chains (B, D), four
    /// hemes and water. Author chain ids are the lowercase label ids.
    pub fn haemoglobin() -> Self {
        let mut domains = empty_domains();
        let cath = vec![
            domain("1hdaA00", DomainSource::Cath, "1.10.490.10", "1", "A"),
            domain("1hdaB00", DomainSource::Cath, "1.10.490.10", "2", "B"),
            domain("1hdaC00", DomainSource::Cath, "1.10.490.10", "1", "C"),
            domain("1hdaD00", DomainSource::Cath, "1.10.490.10", "2", "D"),
        ];
        let pfam = vec![
            domain("PF00042_A", DomainSource::Pfam, "PF00042", "1", "A"),
            domain("PF00042_C", DomainSource::Pfam, "PF00042", "1", "C"),
        ];
        let _ = domains.insert(
            DomainSource::Cath,
            BTreeMap::from([("1.10.490.10".to_owned(), cath)]),
        );
        let _ = domains.insert(
            DomainSource::Pfam,
            BTreeMap::from([("PF00042".to_owned(), pfam)]),
        );

        Self {
            molecules: vec![
                molecule("1", "Hemoglobin alpha chain", EntityKind::Polymer, &["A", "C"], &["a", "c"], &[]),
                molecule("2", "Hemoglobin beta chain", EntityKind::Polymer, &["B", "D"], &["b", "d"], &[]),
                molecule("3", "PROTOPORPHYRIN IX CONTAINING FE", EntityKind::NonPolymer, &["E", "F", "G", "H"], &["a", "b", "c", "d"], &["HEM"]),
                molecule("4", "water", EntityKind::Water, &["I", "J"], &["a", "b"], &["HOH"]),
            ],
            assemblies: vec![Assembly {
                assembly_id: "1".to_owned(),
                form: "hetero".to_owned(),
                name: "tetramer".to_owned(),
                preferred: true,
            }],
            methods: vec!["X-ray diffraction".to_owned()],
            modified_residues: Vec::new(),
            domains,
            coverage: vec![
                coverage("1", "A", 100),
                coverage("2", "B", 200),
                coverage("1", "C", 95),
                coverage("2", "D", 202),
            ],
            modres_error: None,
            domains_error: None,
        }
    }
}

impl MetadataGateway for FixtureApi {
    fn molecules(&self, _entry_id: &str) -> Result<Vec<Molecule>, ApiError> {
        Ok(self.molecules.clone())
    }

    fn assemblies(&self, _entry_id: &str) -> Result<Vec<Assembly>, ApiError> {
        Ok(self.assemblies.clone())
    }

    fn experimental_methods(&self, _entry_id: &str) -> Result<Vec<String>, ApiError> {
        Ok(self.methods.clone())
    }

    fn modified_residues(&self, _entry_id: &str) -> Result<Vec<ModifiedResidue>, ApiError> {
        match &self.modres_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.modified_residues.clone()),
        }
    }

    fn domain_mappings(&self, _entry_id: &str) -> Result<DomainsBySource, ApiError> {
        match &self.domains_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.domains.clone()),
        }
    }

    fn polymer_coverage(&self, _entry_id: &str) -> Result<Vec<ChainCoverage>, ApiError> {
        Ok(self.coverage.clone())
    }
}
