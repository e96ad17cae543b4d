use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which kind of archive entry is being catalogued.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Experimental PDB entry.
    #[default]
    Pdb,
    /// AlphaFold DB predicted model.
    Alphafold,
}

impl Mode {
    /// Image types valid for this mode, in emission order.
    #[must_use]
    pub fn image_types(self) -> &'static [ImageType] {
        match self {
            Self::Pdb => &[
                ImageType::Entry,
                ImageType::Assembly,
                ImageType::Entity,
                ImageType::Domain,
                ImageType::Ligand,
                ImageType::Modres,
                ImageType::Bfactor,
                ImageType::Validation,
            ],
            Self::Alphafold => &[ImageType::Plddt],
        }
    }

    /// Lowercase name as used in options files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdb => "pdb",
            Self::Alphafold => "alphafold",
        }
    }
}

/// A logical kind of image in the catalogue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    /// Whole deposited structure.
    Entry,
    /// Each biological assembly.
    Assembly,
    /// One highlighted entity.
    Entity,
    /// One structural-domain family on a representative chain.
    Domain,
    /// Binding environment of a ligand.
    Ligand,
    /// Highlighted modified residues of one compound.
    Modres,
    /// Structure colored by B-factor.
    Bfactor,
    /// Structure colored by geometry validation.
    Validation,
    /// Predicted structure colored by pLDDT.
    Plddt,
}

impl ImageType {
    /// Name as accepted in requests and used in sections.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Assembly => "assembly",
            Self::Entity => "entity",
            Self::Domain => "domain",
            Self::Ligand => "ligand",
            Self::Modres => "modres",
            Self::Bfactor => "bfactor",
            Self::Validation => "validation",
            Self::Plddt => "plddt",
        }
    }

    /// Parse a type name; `None` for unknown names (including `all`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "entry" => Some(Self::Entry),
            "assembly" => Some(Self::Assembly),
            "entity" => Some(Self::Entity),
            "domain" => Some(Self::Domain),
            "ligand" => Some(Self::Ligand),
            "modres" => Some(Self::Modres),
            "bfactor" => Some(Self::Bfactor),
            "validation" => Some(Self::Validation),
            "plddt" => Some(Self::Plddt),
            _ => None,
        }
    }

    /// Whether `auto` view mode renders this type from three sides.
    #[must_use]
    pub fn is_multi_view(self) -> bool {
        matches!(
            self,
            Self::Entry | Self::Assembly | Self::Entity | Self::Plddt
        )
    }
}

/// Camera view of a rendered image.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Canonical orientation.
    Front,
    /// Rotated 270° about the vertical axis.
    Side,
    /// Rotated 90° about the horizontal axis.
    Top,
}

impl View {
    /// All views in suffix order.
    pub const ALL: [View; 3] = [View::Front, View::Side, View::Top];

    /// Lowercase view name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Side => "side",
            Self::Top => "top",
        }
    }
}

/// Which views to render per logical image.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Front view only.
    Front,
    /// Front, side and top views for every type.
    All,
    /// Three views for multi-view types, a single unsuffixed one otherwise.
    #[default]
    Auto,
}

impl ViewMode {
    /// The views (or `None` for an unsuffixed image) to emit for `ty`.
    #[must_use]
    pub fn views_for(self, ty: ImageType) -> &'static [Option<View>] {
        const THREE: &[Option<View>] =
            &[Some(View::Front), Some(View::Side), Some(View::Top)];
        const FRONT: &[Option<View>] = &[Some(View::Front)];
        const NONE: &[Option<View>] = &[None];
        match (self, ty.is_multi_view()) {
            (Self::All, _) | (Self::Auto, true) => THREE,
            (Self::Front, true) => FRONT,
            (Self::Front | Self::Auto, false) => NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdb_types_in_emission_order() {
        let names: Vec<&str> =
            Mode::Pdb.image_types().iter().map(|t| t.as_str()).collect();
        assert_eq!(
            names,
            [
                "entry",
                "assembly",
                "entity",
                "domain",
                "ligand",
                "modres",
                "bfactor",
                "validation"
            ]
        );
        assert_eq!(Mode::Alphafold.image_types(), &[ImageType::Plddt]);
    }

    #[test]
    fn view_table() {
        assert_eq!(ViewMode::Auto.views_for(ImageType::Entity).len(), 3);
        assert_eq!(ViewMode::Auto.views_for(ImageType::Ligand), &[None]);
        assert_eq!(
            ViewMode::Front.views_for(ImageType::Entry),
            &[Some(View::Front)]
        );
        assert_eq!(ViewMode::Front.views_for(ImageType::Modres), &[None]);
        assert_eq!(ViewMode::All.views_for(ImageType::Bfactor).len(), 3);
    }

    #[test]
    fn type_names_round_trip() {
        for ty in Mode::Pdb.image_types() {
            assert_eq!(ImageType::from_name(ty.as_str()), Some(*ty));
        }
        assert_eq!(ImageType::from_name("all"), None);
    }
}
