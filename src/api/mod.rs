//! Structural-metadata gateway.
//!
//! The planner only talks to [`MetadataGateway`]; [`PdbeApi`] backs it with
//! the PDBe REST API and [`NoApi`] substitutes neutral defaults when the
//! service is switched off. A "not found" response is a normal outcome for
//! many entries (no domains, no modified residues) and is reported as
//! [`ApiError::NotFound`] so callers can degrade it to an empty result.

#[cfg(test)]
pub(crate) mod fixture;
mod no_api;
pub mod parse;
#[cfg(feature = "api")]
mod pdbe;

use std::collections::BTreeMap;
use std::fmt;

pub use no_api::NoApi;
#[cfg(feature = "api")]
pub use pdbe::PdbeApi;

use crate::model::{
    Assembly, ChainCoverage, DomainsBySource, ModifiedResidue, Molecule,
};

/// Default PDBe REST API root.
pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/pdbe/api";

/// Failure of a single gateway query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The resource does not exist for this entry.
    NotFound(String),
    /// Non-404 HTTP failure.
    Http {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
    /// Connection-level failure.
    Transport(String),
    /// The response could not be decoded.
    Decode(String),
}

impl ApiError {
    /// Whether this is a "not found" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(url) => write!(f, "not found: {url}"),
            Self::Http { status, url } => {
                write!(f, "HTTP {status} for {url}")
            }
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Typed access to per-entry structural metadata.
///
/// Implementations must be shareable across threads: the planner issues
/// independent queries concurrently.
pub trait MetadataGateway: Sync {
    /// Entities with their chains and chemical components.
    fn molecules(&self, entry_id: &str) -> Result<Vec<Molecule>, ApiError>;

    /// Assemblies in archive order.
    fn assemblies(&self, entry_id: &str) -> Result<Vec<Assembly>, ApiError>;

    /// Experimental method names.
    fn experimental_methods(
        &self,
        entry_id: &str,
    ) -> Result<Vec<String>, ApiError>;

    /// Modified residue instances.
    fn modified_residues(
        &self,
        entry_id: &str,
    ) -> Result<Vec<ModifiedResidue>, ApiError>;

    /// Domain mappings split by source.
    fn domain_mappings(
        &self,
        entry_id: &str,
    ) -> Result<DomainsBySource, ApiError>;

    /// Observed residue ranges per polymer chain.
    fn polymer_coverage(
        &self,
        entry_id: &str,
    ) -> Result<Vec<ChainCoverage>, ApiError>;

    /// Entity id → name.
    fn entity_names(
        &self,
        entry_id: &str,
    ) -> Result<BTreeMap<String, String>, ApiError> {
        Ok(self
            .molecules(entry_id)?
            .into_iter()
            .map(|m| (m.entity_id, m.name))
            .collect())
    }
}

/// Degrade a "not found" failure to the type's empty value.
pub fn or_empty<T: Default>(
    result: Result<T, ApiError>,
) -> Result<T, ApiError> {
    match result {
        Err(ApiError::NotFound(what)) => {
            log::debug!("{what} not found, treating as empty");
            Ok(T::default())
        }
        other => other,
    }
}
