use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification database a domain annotation comes from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub enum DomainSource {
    /// CATH structural classification.
    #[serde(rename = "CATH")]
    Cath,
    /// Pfam protein families.
    #[serde(rename = "Pfam")]
    Pfam,
    /// Rfam RNA families.
    #[serde(rename = "Rfam")]
    Rfam,
    /// SCOP structural classification.
    #[serde(rename = "SCOP")]
    Scop,
}

impl DomainSource {
    /// All sources in iteration order.
    pub const ALL: [DomainSource; 4] =
        [Self::Cath, Self::Pfam, Self::Rfam, Self::Scop];

    /// Archive spelling of the source name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cath => "CATH",
            Self::Pfam => "Pfam",
            Self::Rfam => "Rfam",
            Self::Scop => "SCOP",
        }
    }
}

impl fmt::Display for DomainSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contiguous segment of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Entity id.
    pub entity_id: String,
    /// Label (struct_asym) chain id.
    pub chain_id: String,
    /// Author chain id.
    pub auth_chain_id: String,
    /// First residue number, `start <= end`.
    pub start: i32,
    /// Last residue number.
    pub end: i32,
    /// One-based segment index within the domain.
    pub segment: usize,
}

impl Chunk {
    /// Build a chunk, swapping inverted residue bounds.
    ///
    /// Upstream mappings occasionally list `start > end`. The swap is a
    /// data-quality workaround kept for compatibility; the inverted records
    /// should be reported upstream rather than relied on.
    #[must_use]
    pub fn new(
        entity_id: &str,
        chain_id: &str,
        auth_chain_id: &str,
        start: i32,
        end: i32,
        segment: usize,
    ) -> Self {
        let (start, end) = if start > end {
            log::debug!(
                "inverted residue range {start}..{end} in chain {chain_id}, swapping"
            );
            (end, start)
        } else {
            (start, end)
        };
        Self {
            entity_id: entity_id.to_owned(),
            chain_id: chain_id.to_owned(),
            auth_chain_id: auth_chain_id.to_owned(),
            start,
            end,
            segment,
        }
    }
}

/// One structural-domain instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Domain id, e.g. `1hdaA00`.
    pub id: String,
    /// Classification source.
    pub source: DomainSource,
    /// Family id, e.g. `1.10.490.10`.
    pub family: String,
    /// Family name.
    pub family_name: String,
    /// Segments in segment order.
    pub chunks: Vec<Chunk>,
}

impl DomainRecord {
    /// The first segment, which determines grouping.
    #[must_use]
    pub fn first_chunk(&self) -> Option<&Chunk> {
        self.chunks.first()
    }

    /// Entity id of the first segment.
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.first_chunk().map(|c| c.entity_id.as_str())
    }

    /// Label chain id of the first segment.
    #[must_use]
    pub fn chain_id(&self) -> Option<&str> {
        self.first_chunk().map(|c| c.chain_id.as_str())
    }

    /// Author chain id of the first segment.
    #[must_use]
    pub fn auth_chain_id(&self) -> Option<&str> {
        self.first_chunk().map(|c| c.auth_chain_id.as_str())
    }

    /// Append a segment, numbering it after the existing ones.
    pub fn push_segment(
        &mut self,
        entity_id: &str,
        chain_id: &str,
        auth_chain_id: &str,
        start: i32,
        end: i32,
    ) {
        let segment = self.chunks.len() + 1;
        self.chunks.push(Chunk::new(
            entity_id,
            chain_id,
            auth_chain_id,
            start,
            end,
            segment,
        ));
    }
}

/// Domains grouped as source → family → domains.
pub type DomainsBySource =
    BTreeMap<DomainSource, BTreeMap<String, Vec<DomainRecord>>>;

/// Domains grouped as source → family → entity → domains.
pub type DomainsByEntity = BTreeMap<
    DomainSource,
    BTreeMap<String, BTreeMap<String, Vec<DomainRecord>>>,
>;

/// A mapping with every source present and no families.
#[must_use]
pub fn empty_domains() -> DomainsBySource {
    DomainSource::ALL
        .iter()
        .map(|&source| (source, BTreeMap::new()))
        .collect()
}
