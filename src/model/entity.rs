//! Per-structure entity table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Chemical kind of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Protein or nucleic-acid chain.
    Polymer,
    /// Bound small molecule or ion.
    NonPolymer,
    /// Solvent water.
    Water,
    /// Oligosaccharide.
    Branched,
}

impl EntityKind {
    /// Classify a PDBe `molecule_type` string.
    #[must_use]
    pub fn from_molecule_type(molecule_type: &str) -> Self {
        let lower = molecule_type.to_ascii_lowercase();
        if lower.contains("water") {
            Self::Water
        } else if lower.contains("bound") || lower == "non-polymer" {
            Self::NonPolymer
        } else if lower.contains("branched") || lower.contains("carbohydrate")
        {
            Self::Branched
        } else {
            Self::Polymer
        }
    }
}

/// One entity of a structure as seen by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Molecule {
    /// Entity id (`"1"`, `"2"`, ...).
    pub entity_id: String,
    /// Human-readable name.
    pub name: String,
    /// Chemical kind.
    pub kind: EntityKind,
    /// Label (struct_asym) chain ids in deposition order.
    pub label_chains: Vec<String>,
    /// Author chain ids, index-aligned with `label_chains` where known.
    pub auth_chains: Vec<String>,
    /// Chemical component ids (ligands, ions).
    pub compound_ids: Vec<String>,
}

/// Immutable description of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    /// Human-readable description.
    pub description: String,
    /// Chemical kind.
    pub kind: EntityKind,
    /// Label chain ids belonging to the entity.
    pub chains: Vec<String>,
    /// Author chain ids, index-aligned with `chains` where known.
    pub auth_chains: Vec<String>,
    /// Zero-based position in entity iteration order.
    pub index: usize,
    /// Chemical component ids.
    pub compound_ids: Vec<String>,
    /// Distinct element symbols, when known.
    pub elements: Vec<String>,
}

impl EntityInfo {
    /// The single element symbol this entity consists of, if any.
    #[must_use]
    pub fn single_element(&self) -> Option<&str> {
        match self.elements.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    /// First chemical component id, used for ligand naming.
    #[must_use]
    pub fn compound_id(&self) -> Option<&str> {
        self.compound_ids.first().map(String::as_str)
    }

    /// Author chain id matching a label chain id.
    #[must_use]
    pub fn auth_chain_for(&self, label_chain: &str) -> Option<&str> {
        let pos = self.chains.iter().position(|c| c == label_chain)?;
        self.auth_chains.get(pos).map(String::as_str)
    }

    /// Whether this entity is shown in ligand-environment images.
    #[must_use]
    pub fn is_ligand(&self) -> bool {
        self.kind == EntityKind::NonPolymer
    }
}

/// One physical copy of an entity, in structure iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainInstance {
    /// Entity the chain belongs to.
    pub entity_id: String,
    /// Label chain id.
    pub chain_id: String,
}

/// Ion compound ids whose entity is a single element.
const SINGLE_ELEMENT_COMPOUNDS: &[(&str, &str)] = &[
    ("NA", "Na"),
    ("K", "K"),
    ("LI", "Li"),
    ("MG", "Mg"),
    ("CA", "Ca"),
    ("SR", "Sr"),
    ("BA", "Ba"),
    ("MN", "Mn"),
    ("FE", "Fe"),
    ("FE2", "Fe"),
    ("CO", "Co"),
    ("NI", "Ni"),
    ("CU", "Cu"),
    ("CU1", "Cu"),
    ("ZN", "Zn"),
    ("CD", "Cd"),
    ("HG", "Hg"),
    ("CL", "Cl"),
    ("BR", "Br"),
    ("IOD", "I"),
    ("CS", "Cs"),
    ("RB", "Rb"),
];

/// Entities keyed by id, iterated in entity index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entities {
    order: Vec<String>,
    by_id: FxHashMap<String, EntityInfo>,
}

impl Entities {
    /// Build the table from gateway molecules. Entities are ordered by
    /// numeric entity id, falling back to string order for non-numeric ids.
    #[must_use]
    pub fn from_molecules(molecules: &[Molecule]) -> Self {
        let mut sorted: Vec<&Molecule> = molecules.iter().collect();
        sorted.sort_by(|a, b| {
            let key = |m: &Molecule| m.entity_id.parse::<u64>().ok();
            key(*a)
                .cmp(&key(*b))
                .then_with(|| a.entity_id.cmp(&b.entity_id))
        });
        sorted.dedup_by(|a, b| a.entity_id == b.entity_id);

        let mut entities = Self::default();
        for (index, molecule) in sorted.into_iter().enumerate() {
            let elements = single_element_of(molecule)
                .map(|e| vec![e.to_owned()])
                .unwrap_or_default();
            entities.push(
                &molecule.entity_id,
                EntityInfo {
                    description: molecule.name.clone(),
                    kind: molecule.kind,
                    chains: molecule.label_chains.clone(),
                    auth_chains: molecule.auth_chains.clone(),
                    index,
                    compound_ids: molecule.compound_ids.clone(),
                    elements,
                },
            );
        }
        entities
    }

    fn push(&mut self, entity_id: &str, info: EntityInfo) {
        self.order.push(entity_id.to_owned());
        let _ = self.by_id.insert(entity_id.to_owned(), info);
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&EntityInfo> {
        self.by_id.get(entity_id)
    }

    /// Iterate `(entity_id, info)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityInfo)> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id).map(|e| (id.as_str(), e)))
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every chain instance, entity by entity, in deposition order.
    #[must_use]
    pub fn instances(&self) -> Vec<ChainInstance> {
        self.iter()
            .flat_map(|(id, info)| {
                info.chains.iter().map(move |chain| ChainInstance {
                    entity_id: id.to_owned(),
                    chain_id: chain.clone(),
                })
            })
            .collect()
    }

    /// Number of polymer chains and distinct polymer entities.
    #[must_use]
    pub fn polymer_composition(&self) -> (usize, usize) {
        self.iter()
            .filter(|(_, e)| e.kind == EntityKind::Polymer)
            .fold((0, 0), |(chains, types), (_, e)| {
                (chains + e.chains.len(), types + 1)
            })
    }
}

fn single_element_of(molecule: &Molecule) -> Option<&'static str> {
    if molecule.kind != EntityKind::NonPolymer {
        return None;
    }
    let [compound] = molecule.compound_ids.as_slice() else {
        return None;
    };
    SINGLE_ELEMENT_COMPOUNDS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(compound))
        .map(|(_, element)| *element)
}
