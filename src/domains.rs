//! Domain resolution: reduce per-source domain annotations to one
//! representative chain per (source, family, entity).
//!
//! The pipeline is pure and order-preserving:
//!
//! 1. [`sort_domains_by_entity`] regroups source → family → entity, keyed by
//!    the entity of each domain's first chunk.
//! 2. [`select_best_chain_for_domains`] keeps only the domains on the best
//!    covered chain of each group.
//! 3. [`sort_domains_by_chain`] and [`count_domains`] reorganize the result
//!    for iteration and caption numerals.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::model::{ChainCoverage, DomainRecord, DomainSource, DomainsByEntity, DomainsBySource};

/// Domains grouped as chain → source → family → domains.
pub type DomainsByChain =
    BTreeMap<String, BTreeMap<DomainSource, BTreeMap<String, Vec<DomainRecord>>>>;

/// Identifies one domain image: a family on one entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainKey {
    /// Classification source.
    pub source: DomainSource,
    /// Family id.
    pub family: String,
    /// Entity id.
    pub entity_id: String,
}

/// Copy numbers quoted in domain captions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainCounts {
    /// Domains of the family on the entity, across all chains.
    pub total: usize,
    /// Domains on the representative chain.
    pub shown: usize,
    /// Shown domains lying entirely outside the modelled residues.
    pub out_of_range: usize,
}

/// Regroup domains by the entity of their first chunk.
#[must_use]
pub fn sort_domains_by_entity(domains: &DomainsBySource) -> DomainsByEntity {
    let mut result = DomainsByEntity::new();
    for (&source, families) in domains {
        let by_family = result.entry(source).or_default();
        for (family, records) in families {
            let by_entity = by_family.entry(family.clone()).or_default();
            for record in records {
                let Some(entity_id) = record.entity_id() else {
                    log::debug!("{source} domain {} has no chunks, skipping", record.id);
                    continue;
                };
                by_entity
                    .entry(entity_id.to_owned())
                    .or_insert_with(Vec::new)
                    .push(record.clone());
            }
        }
    }
    result
}

/// Residue coverage per label chain.
#[must_use]
pub fn coverage_counts(coverage: &[ChainCoverage]) -> FxHashMap<String, usize> {
    let mut counts = FxHashMap::default();
    for chain in coverage {
        *counts.entry(chain.chain_id.clone()).or_insert(0) += chain.residue_count();
    }
    counts
}

/// Pick the representative chain among candidate domains.
///
/// Highest coverage wins; ties, and the no-coverage case, fall to the chain
/// encountered first.
fn best_chain<'a>(
    candidates: &'a [DomainRecord],
    coverage: Option<&FxHashMap<String, usize>>,
) -> Option<&'a str> {
    let mut chains: Vec<&str> = Vec::new();
    for chain in candidates.iter().filter_map(DomainRecord::chain_id) {
        if !chains.contains(&chain) {
            chains.push(chain);
        }
    }
    let Some(coverage) = coverage else {
        return chains.first().copied();
    };
    let mut best: Option<(&str, usize)> = None;
    for chain in chains {
        let count = coverage.get(chain).copied().unwrap_or(0);
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((chain, count)),
        }
    }
    best.map(|(chain, _)| chain)
}

/// Keep, per (source, family, entity), only the domains on the best chain.
#[must_use]
pub fn select_best_chain_for_domains(
    domains: &DomainsByEntity,
    coverage: Option<&FxHashMap<String, usize>>,
) -> DomainsByEntity {
    let mut result = DomainsByEntity::new();
    for (&source, families) in domains {
        let by_family = result.entry(source).or_default();
        for (family, entities) in families {
            let by_entity = by_family.entry(family.clone()).or_default();
            for (entity_id, candidates) in entities {
                let Some(chain) = best_chain(candidates, coverage) else {
                    continue;
                };
                let kept: Vec<DomainRecord> = candidates
                    .iter()
                    .filter(|d| d.chain_id() == Some(chain))
                    .cloned()
                    .collect();
                let _ = by_entity.insert(entity_id.clone(), kept);
            }
        }
    }
    result
}

/// Reorganize by label chain for per-chain iteration.
#[must_use]
pub fn sort_domains_by_chain(domains: &DomainsByEntity) -> DomainsByChain {
    let mut result = DomainsByChain::new();
    for (&source, families) in domains {
        for (family, entities) in families {
            for record in entities.values().flatten() {
                let Some(chain) = record.chain_id() else {
                    continue;
                };
                result
                    .entry(chain.to_owned())
                    .or_default()
                    .entry(source)
                    .or_default()
                    .entry(family.clone())
                    .or_default()
                    .push(record.clone());
            }
        }
    }
    result
}

/// Count total, shown and out-of-range copies per (source, family, entity).
///
/// `all` is the output of [`sort_domains_by_entity`], `selected` that of
/// [`select_best_chain_for_domains`]. A shown domain is out of range when
/// its chain has known coverage and none of its chunks overlaps it.
#[must_use]
pub fn count_domains(
    all: &DomainsByEntity,
    selected: &DomainsByEntity,
    coverage: &[ChainCoverage],
) -> BTreeMap<DomainKey, DomainCounts> {
    let by_chain: FxHashMap<&str, &ChainCoverage> =
        coverage.iter().map(|c| (c.chain_id.as_str(), c)).collect();
    let mut counts = BTreeMap::new();
    for (&source, families) in all {
        for (family, entities) in families {
            for (entity_id, records) in entities {
                let shown = selected
                    .get(&source)
                    .and_then(|f| f.get(family))
                    .and_then(|e| e.get(entity_id))
                    .map_or(&[][..], Vec::as_slice);
                let out_of_range = shown
                    .iter()
                    .filter(|d| {
                        d.chunks.iter().all(|chunk| {
                            by_chain
                                .get(chunk.chain_id.as_str())
                                .is_some_and(|c| !c.overlaps(chunk.start, chunk.end))
                        })
                    })
                    .count();
                let key = DomainKey {
                    source,
                    family: family.clone(),
                    entity_id: entity_id.clone(),
                };
                let _ = counts.insert(
                    key,
                    DomainCounts {
                        total: records.len(),
                        shown: shown.len(),
                        out_of_range,
                    },
                );
            }
        }
    }
    counts
}
