//! Decoding of PDBe API responses into typed records.
//!
//! Each endpoint wraps its payload in an object keyed by the entry id.
//! Numeric ids (entity ids, residue numbers) are accepted either as JSON
//! numbers or strings.

use std::collections::BTreeMap;

use serde_json::Value;

use super::ApiError;
use crate::model::{
    empty_domains, Assembly, ChainCoverage, DomainRecord, DomainSource,
    DomainsBySource, EntityKind, ModifiedResidue, Molecule,
};

fn entry_root<'a>(value: &'a Value, entry_id: &str) -> Result<&'a Value, ApiError> {
    value
        .get(entry_id)
        .or_else(|| value.get(entry_id.to_ascii_lowercase()))
        .ok_or_else(|| {
            ApiError::Decode(format!("response has no key {entry_id:?}"))
        })
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a [Value], ApiError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ApiError::Decode(format!("{what} is not an array")))
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(record: &Value, key: &str) -> String {
    id_string(record.get(key)).unwrap_or_default()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| id_string(Some(v))).collect())
        .unwrap_or_default()
}

fn residue_number(position: Option<&Value>) -> Option<i32> {
    let number = position?.get("residue_number")?;
    number
        .as_i64()
        .or_else(|| number.as_str().and_then(|s| s.parse().ok()))
        .and_then(|n| i32::try_from(n).ok())
}

/// Decode `pdb/entry/molecules`.
pub fn molecules(value: &Value, entry_id: &str) -> Result<Vec<Molecule>, ApiError> {
    as_array(entry_root(value, entry_id)?, "molecules")?
        .iter()
        .map(|record| {
            let entity_id = id_string(record.get("entity_id")).ok_or_else(
                || ApiError::Decode("molecule without entity_id".to_owned()),
            )?;
            Ok(Molecule {
                entity_id,
                name: string_list(record.get("molecule_name")).join(", "),
                kind: EntityKind::from_molecule_type(&string_field(
                    record,
                    "molecule_type",
                )),
                label_chains: string_list(record.get("in_struct_asyms")),
                auth_chains: string_list(record.get("in_chains")),
                compound_ids: string_list(record.get("chem_comp_ids")),
            })
        })
        .collect()
}

fn summary<'a>(
    value: &'a Value,
    entry_id: &str,
) -> Result<Option<&'a Value>, ApiError> {
    Ok(as_array(entry_root(value, entry_id)?, "summary")?.first())
}

/// Decode the assembly list from `pdb/entry/summary`.
pub fn assemblies(value: &Value, entry_id: &str) -> Result<Vec<Assembly>, ApiError> {
    let Some(summary) = summary(value, entry_id)? else {
        return Ok(Vec::new());
    };
    let Some(list) = summary.get("assemblies") else {
        return Ok(Vec::new());
    };
    Ok(as_array(list, "assemblies")?
        .iter()
        .map(|record| Assembly {
            assembly_id: string_field(record, "assembly_id"),
            form: string_field(record, "form"),
            name: string_field(record, "name"),
            preferred: record
                .get("preferred")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
        .collect())
}

/// Decode the experimental methods from `pdb/entry/summary`.
pub fn experimental_methods(
    value: &Value,
    entry_id: &str,
) -> Result<Vec<String>, ApiError> {
    Ok(summary(value, entry_id)?
        .map(|s| string_list(s.get("experimental_method")))
        .unwrap_or_default())
}

/// Decode `pdb/entry/modified_AA_or_NA`.
pub fn modified_residues(
    value: &Value,
    entry_id: &str,
) -> Result<Vec<ModifiedResidue>, ApiError> {
    Ok(as_array(entry_root(value, entry_id)?, "modified residues")?
        .iter()
        .map(|record| ModifiedResidue {
            entity_id: string_field(record, "entity_id"),
            label_chain_id: string_field(record, "struct_asym_id"),
            auth_chain_id: string_field(record, "chain_id"),
            residue_number: residue_number(Some(record)).unwrap_or_default(),
            compound_id: string_field(record, "chem_comp_id"),
            compound_name: string_field(record, "chem_comp_name"),
        })
        .collect())
}

fn family_name(family: &Value) -> String {
    ["identifier", "name", "description"]
        .iter()
        .find_map(|key| id_string(family.get(*key)))
        .unwrap_or_default()
}

fn domain_id(
    source: DomainSource,
    family_id: &str,
    mapping: &Value,
    chain_id: &str,
) -> String {
    let explicit = match source {
        DomainSource::Cath => id_string(mapping.get("domain")),
        DomainSource::Scop => id_string(mapping.get("scop_id")),
        DomainSource::Pfam | DomainSource::Rfam => None,
    };
    explicit.unwrap_or_else(|| format!("{family_id}_{chain_id}"))
}

fn family_domains(
    source: DomainSource,
    family_id: &str,
    family: &Value,
) -> Result<Vec<DomainRecord>, ApiError> {
    let name = family_name(family);
    let mappings = family
        .get("mappings")
        .map_or(Ok(&[][..]), |m| as_array(m, "mappings"))?;

    let mut domains: Vec<DomainRecord> = Vec::new();
    for mapping in mappings {
        let entity_id = string_field(mapping, "entity_id");
        let chain_id = string_field(mapping, "struct_asym_id");
        let auth_chain_id = string_field(mapping, "chain_id");
        let (Some(start), Some(end)) = (
            residue_number(mapping.get("start")),
            residue_number(mapping.get("end")),
        ) else {
            log::debug!("{source} {family_id}: mapping without residue range");
            continue;
        };
        let id = domain_id(source, family_id, mapping, &chain_id);
        let index = match domains.iter().position(|d| d.id == id) {
            Some(index) => index,
            None => {
                domains.push(DomainRecord {
                    id,
                    source,
                    family: family_id.to_owned(),
                    family_name: name.clone(),
                    chunks: Vec::new(),
                });
                domains.len() - 1
            }
        };
        domains[index].push_segment(
            &entity_id,
            &chain_id,
            &auth_chain_id,
            start,
            end,
        );
    }
    Ok(domains)
}

/// Decode SIFTS `mappings/{entry}` into domains by source and family.
pub fn domain_mappings(
    value: &Value,
    entry_id: &str,
) -> Result<DomainsBySource, ApiError> {
    let root = entry_root(value, entry_id)?;
    let mut result = empty_domains();
    for source in DomainSource::ALL {
        let Some(families) = root.get(source.as_str()).and_then(Value::as_object)
        else {
            continue;
        };
        let mut by_family = BTreeMap::new();
        for (family_id, family) in families {
            let domains = family_domains(source, family_id, family)?;
            if !domains.is_empty() {
                let _ = by_family.insert(family_id.clone(), domains);
            }
        }
        let _ = result.insert(source, by_family);
    }
    Ok(result)
}

/// Decode `pdb/entry/polymer_coverage`.
pub fn polymer_coverage(
    value: &Value,
    entry_id: &str,
) -> Result<Vec<ChainCoverage>, ApiError> {
    let root = entry_root(value, entry_id)?;
    let Some(molecules) = root.get("molecules") else {
        return Ok(Vec::new());
    };
    let mut coverage = Vec::new();
    for molecule in as_array(molecules, "coverage molecules")? {
        let entity_id = string_field(molecule, "entity_id");
        let chains = molecule
            .get("chains")
            .map_or(Ok(&[][..]), |c| as_array(c, "coverage chains"))?;
        for chain in chains {
            let observed = chain
                .get("observed")
                .and_then(Value::as_array)
                .map(|ranges| {
                    ranges
                        .iter()
                        .filter_map(|r| {
                            Some((
                                residue_number(r.get("start"))?,
                                residue_number(r.get("end"))?,
                            ))
                        })
                        .collect()
                })
                .unwrap_or_default();
            coverage.push(ChainCoverage {
                entity_id: entity_id.clone(),
                chain_id: string_field(chain, "struct_asym_id"),
                auth_chain_id: string_field(chain, "chain_id"),
                observed,
            });
        }
    }
    Ok(coverage)
}
