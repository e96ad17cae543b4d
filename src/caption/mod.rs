//! Caption records and the builders that produce them.
//!
//! A [`CaptionRecord`] is written next to every planned image as
//! `<stem>.caption.json`. Fields prefixed with an underscore are routing
//! information for the collector and never reach the manifest.

mod nouns;
mod templates;
mod text;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use nouns::{count_noun, noun, oligomer_name};
pub use templates::{
    assembly_caption, bfactor_caption, domain_caption, entity_caption,
    entry_caption, ligand_caption, modres_caption, plddt_caption,
    validation_caption, CaptionContext, DomainFacts, MoleculeSummary,
};
pub use text::{Punct, TextBuilder};

use crate::error::Error;
use crate::model::View;
use crate::naming::CAPTION_SUFFIX;

/// Caption of one planned image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionRecord {
    /// File-name stem of the image.
    pub filename: String,
    /// Short alternative text.
    pub alt: String,
    /// Description with HTML markup.
    pub description: String,
    /// Description without markup.
    pub clean_description: String,
    /// Entry the image belongs to.
    #[serde(rename = "_entry_id")]
    pub entry_id: String,
    /// Camera view, if the image type has several.
    #[serde(rename = "_view", default)]
    pub view: Option<View>,
    /// Manifest path of the section this record is filed under.
    #[serde(rename = "_section")]
    pub section: Vec<String>,
    /// Extra keys merged into the section object.
    #[serde(
        rename = "_extras",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extras: Option<Map<String, Value>>,
}

impl CaptionRecord {
    /// Path of this record's file inside `dir`.
    #[must_use]
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{CAPTION_SUFFIX}", self.filename))
    }

    /// Write the record as pretty JSON into `dir`.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, Error> {
        let path = self.path_in(dir);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }

    /// Read a record written by [`CaptionRecord::save`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CaptionRecord {
        CaptionRecord {
            filename: "1hda_bfactor".to_owned(),
            alt: "alt".to_owned(),
            description: "<b>d</b>".to_owned(),
            clean_description: "d".to_owned(),
            entry_id: "1hda".to_owned(),
            view: None,
            section: vec!["entry".to_owned(), "bfactor".to_owned()],
            extras: None,
        }
    }

    #[test]
    fn private_fields_are_underscored() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["_entry_id"], "1hda");
        assert_eq!(value["_section"][1], "bfactor");
        assert!(value.get("_extras").is_none());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = sample();
        record.view = Some(View::Top);
        let path = record.save(dir.path()).unwrap();
        assert!(path.ends_with("1hda_bfactor.caption.json"));
        assert_eq!(CaptionRecord::load(&path).unwrap(), record);
    }
}
