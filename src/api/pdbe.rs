use serde_json::Value;

use super::{parse, ApiError, MetadataGateway, DEFAULT_BASE_URL};
use crate::model::{
    Assembly, ChainCoverage, DomainsBySource, ModifiedResidue, Molecule,
};

/// Blocking client for the PDBe REST API.
#[derive(Debug, Clone)]
pub struct PdbeApi {
    base_url: String,
}

impl Default for PdbeApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PdbeApi {
    /// Client rooted at `base_url` (no trailing slash needed).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn get_json(&self, path: &str, entry_id: &str) -> Result<Value, ApiError> {
        let url = format!("{}/{path}/{}", self.base_url, entry_id.to_lowercase());
        log::debug!("GET {url}");
        let body = match ureq::get(&url).call() {
            Ok(response) => response
                .into_body()
                .read_to_string()
                .map_err(|e| ApiError::Transport(format!("{url}: {e}")))?,
            Err(ureq::Error::StatusCode(404)) => {
                return Err(ApiError::NotFound(url))
            }
            Err(ureq::Error::StatusCode(status)) => {
                return Err(ApiError::Http { status, url })
            }
            Err(e) => return Err(ApiError::Transport(format!("{url}: {e}"))),
        };
        serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("{url}: {e}")))
    }
}

impl MetadataGateway for PdbeApi {
    fn molecules(&self, entry_id: &str) -> Result<Vec<Molecule>, ApiError> {
        let value = self.get_json("pdb/entry/molecules", entry_id)?;
        parse::molecules(&value, &entry_id.to_lowercase())
    }

    fn assemblies(&self, entry_id: &str) -> Result<Vec<Assembly>, ApiError> {
        let value = self.get_json("pdb/entry/summary", entry_id)?;
        parse::assemblies(&value, &entry_id.to_lowercase())
    }

    fn experimental_methods(
        &self,
        entry_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        let value = self.get_json("pdb/entry/summary", entry_id)?;
        parse::experimental_methods(&value, &entry_id.to_lowercase())
    }

    fn modified_residues(
        &self,
        entry_id: &str,
    ) -> Result<Vec<ModifiedResidue>, ApiError> {
        let value = self.get_json("pdb/entry/modified_AA_or_NA", entry_id)?;
        parse::modified_residues(&value, &entry_id.to_lowercase())
    }

    fn domain_mappings(
        &self,
        entry_id: &str,
    ) -> Result<DomainsBySource, ApiError> {
        let value = self.get_json("mappings", entry_id)?;
        parse::domain_mappings(&value, &entry_id.to_lowercase())
    }

    fn polymer_coverage(
        &self,
        entry_id: &str,
    ) -> Result<Vec<ChainCoverage>, ApiError> {
        let value = self.get_json("pdb/entry/polymer_coverage", entry_id)?;
        parse::polymer_coverage(&value, &entry_id.to_lowercase())
    }
}
