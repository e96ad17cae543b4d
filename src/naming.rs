//! File naming conventions shared by the planner, caption builder and
//! collector.
//!
//! Every stem and suffix is built here and nowhere else, so the files the
//! planner expects are exactly the files the captions describe.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{DomainSource, ImageType, View};

/// Suffix of persisted caption records.
pub const CAPTION_SUFFIX: &str = ".caption.json";

/// Suffix of the saved viewer state accompanying each image.
pub const STATE_SUFFIX: &str = ".molj";

/// Suffix appended for a camera view, or nothing for single-view images.
#[must_use]
pub fn view_suffix(view: Option<View>) -> &'static str {
    match view {
        Some(View::Front) => "_front",
        Some(View::Side) => "_side",
        Some(View::Top) => "_top",
        None => "",
    }
}

/// Pixel dimensions of a rendered image, written `WIDTHxHEIGHT`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Create a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// File suffix for an image of this size, e.g. `_image-800x800.png`.
    #[must_use]
    pub fn suffix(self, extension: &str) -> String {
        format!("_image-{self}.{extension}")
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| format!("image size {s:?} is not WIDTHxHEIGHT"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| format!("image size {s:?}: {e}"))
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

impl TryFrom<String> for ImageSize {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImageSize> for String {
    fn from(size: ImageSize) -> Self {
        size.to_string()
    }
}

/// How chains are colored in whole-structure images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Coloring {
    /// One color per chain instance.
    Chain,
    /// One color per entity.
    Entity,
}

impl Coloring {
    /// Both colorings in emission order.
    pub const ALL: [Coloring; 2] = [Coloring::Chain, Coloring::Entity];

    /// File-name and section segment.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Chain => "chain",
            Self::Entity => "chemically_distinct_molecules",
        }
    }

    /// Phrase used in captions.
    #[must_use]
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Chain => "chain",
            Self::Entity => "chemically distinct molecules",
        }
    }
}

/// What a single logical image shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageSubject {
    /// Deposited structure.
    Entry {
        /// Coloring mode.
        coloring: Coloring,
    },
    /// One assembly.
    Assembly {
        /// Assembly id.
        assembly_id: String,
        /// Coloring mode.
        coloring: Coloring,
    },
    /// One highlighted entity.
    Entity {
        /// Entity id.
        entity_id: String,
    },
    /// One domain family on its representative chain.
    Domain {
        /// Classification source.
        source: DomainSource,
        /// Family id.
        family: String,
        /// Entity id.
        entity_id: String,
        /// Representative label chain.
        chain_id: String,
        /// Representative author chain.
        auth_chain_id: String,
    },
    /// Binding environment of one ligand.
    Ligand {
        /// Entity id of the ligand.
        entity_id: String,
        /// Chemical component id.
        compound_id: String,
    },
    /// All modified residues of one compound.
    Modres {
        /// Chemical component id.
        compound_id: String,
    },
    /// B-factor coloring of the deposited structure.
    Bfactor,
    /// Geometry-validation coloring of the deposited structure.
    Validation,
    /// pLDDT coloring of a predicted structure.
    Plddt,
}

impl ImageSubject {
    /// The image type this subject belongs to.
    #[must_use]
    pub fn image_type(&self) -> ImageType {
        match self {
            Self::Entry { .. } => ImageType::Entry,
            Self::Assembly { .. } => ImageType::Assembly,
            Self::Entity { .. } => ImageType::Entity,
            Self::Domain { .. } => ImageType::Domain,
            Self::Ligand { .. } => ImageType::Ligand,
            Self::Modres { .. } => ImageType::Modres,
            Self::Bfactor => ImageType::Bfactor,
            Self::Validation => ImageType::Validation,
            Self::Plddt => ImageType::Plddt,
        }
    }

    /// File-name stem for this subject seen from `view`.
    #[must_use]
    pub fn stem(&self, entry_id: &str, view: Option<View>) -> String {
        let body = match self {
            Self::Entry { coloring } => {
                format!("{entry_id}_deposited_{}", coloring.segment())
            }
            Self::Assembly {
                assembly_id,
                coloring,
            } => format!(
                "{entry_id}_assembly_{assembly_id}_{}",
                coloring.segment()
            ),
            Self::Entity { entity_id } => {
                format!("{entry_id}_entity_{entity_id}")
            }
            Self::Domain {
                source,
                family,
                entity_id,
                auth_chain_id,
                ..
            } => format!(
                "{entry_id}_entity_{entity_id}_{auth_chain_id}_{source}_{family}"
            ),
            Self::Ligand { compound_id, .. } => {
                format!("{entry_id}_ligand_{compound_id}")
            }
            Self::Modres { compound_id } => {
                format!("{entry_id}_modres_{compound_id}")
            }
            Self::Bfactor => format!("{entry_id}_bfactor"),
            Self::Validation => {
                format!("{entry_id}_validation_geometry_deposited")
            }
            Self::Plddt => format!("{entry_id}_plddt"),
        };
        body + view_suffix(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_follow_archive_conventions() {
        let domain = ImageSubject::Domain {
            source: DomainSource::Cath,
            family: "1.10.490.10".to_owned(),
            entity_id: "1".to_owned(),
            chain_id: "A".to_owned(),
            auth_chain_id: "A".to_owned(),
        };
        assert_eq!(
            domain.stem("1hda", None),
            "1hda_entity_1_A_CATH_1.10.490.10"
        );
        let assembly = ImageSubject::Assembly {
            assembly_id: "1".to_owned(),
            coloring: Coloring::Entity,
        };
        assert_eq!(
            assembly.stem("1hda", Some(View::Side)),
            "1hda_assembly_1_chemically_distinct_molecules_side"
        );
        assert_eq!(
            ImageSubject::Validation.stem("1hda", None),
            "1hda_validation_geometry_deposited"
        );
    }

    #[test]
    fn image_size_parses_and_formats() {
        let size: ImageSize = "800x600".parse().unwrap();
        assert_eq!(size, ImageSize::new(800, 600));
        assert_eq!(size.suffix("png"), "_image-800x600.png");
        assert!("800".parse::<ImageSize>().is_err());
        assert!("axb".parse::<ImageSize>().is_err());
    }
}
