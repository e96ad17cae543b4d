//! Reproducible entity and instance coloring.
//!
//! Every entity gets a base color from, in order of priority, its single
//! element, the ligand palette or the polymer palette. Each chain instance
//! of an entity then gets a [sister color](sister_color) of that base, the
//! first instance keeping the base itself.

mod element;
pub mod palette;
mod sister;

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use element::{element_color, WATER};
pub use palette::CyclicPalette;
pub use sister::sister_color;

use crate::error::Error;
use crate::model::{ChainInstance, Entities, EntityInfo, EntityKind};
use crate::util::report::Reporter;

/// 24-bit sRGB color, `0xRRGGBB`. Serialized as `#rrggbb`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    /// Neutral gray used for context and unknown entities.
    pub const GRAY: Color = Color(0x808080);

    /// Build from 8-bit channels.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// 8-bit channels.
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Channels normalized to `[0, 1]`.
    #[must_use]
    pub fn to_unit(self) -> DVec3 {
        let [r, g, b] = self.rgb();
        DVec3::new(r as f64, g as f64, b as f64) / 255.0
    }

    /// Quantize normalized channels; values are clamped to `[0, 1]` first.
    #[must_use]
    pub fn from_unit(rgb: DVec3) -> Self {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_rgb(q(rgb.x), q(rgb.y), q(rgb.z))
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(format!("color {s:?} is not #rrggbb"));
        }
        u32::from_str_radix(hex, 16)
            .map(Color)
            .map_err(|e| format!("color {s:?}: {e}"))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Colors for one structure context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorAssignment {
    /// One color per entity, in entity iteration order.
    pub entity_colors: Vec<Color>,
    /// One color per chain instance, in instance order.
    pub instance_colors: Vec<Color>,
}

impl ColorAssignment {
    /// Base color of an entity.
    #[must_use]
    pub fn entity_color(&self, entity: &EntityInfo) -> Color {
        self.entity_colors
            .get(entity.index)
            .copied()
            .unwrap_or(Color::GRAY)
    }
}

fn base_color(
    entity: &EntityInfo,
    polymer: &mut CyclicPalette,
    ligand: &mut CyclicPalette,
) -> Color {
    if let Some(color) = entity.single_element().and_then(element_color) {
        return if entity.kind == EntityKind::Water {
            WATER
        } else {
            color
        };
    }
    match entity.kind {
        EntityKind::Water => WATER,
        EntityKind::NonPolymer => ligand.next_color(),
        EntityKind::Polymer | EntityKind::Branched => polymer.next_color(),
    }
}

/// Assign base colors to `entities` and sister colors to `instances`.
///
/// Instances whose entity is not in the table fall back to
/// [`Color::GRAY`] after a warning.
pub fn assign_colors(
    entities: &Entities,
    instances: &[ChainInstance],
    reporter: &Reporter,
) -> Result<ColorAssignment, Error> {
    let mut polymer = CyclicPalette::polymer();
    let mut ligand = CyclicPalette::ligand();

    let entity_colors: Vec<Color> = entities
        .iter()
        .map(|(_, info)| base_color(info, &mut polymer, &mut ligand))
        .collect();

    let mut ordinals: FxHashMap<&str, usize> = FxHashMap::default();
    let mut instance_colors = Vec::with_capacity(instances.len());
    for instance in instances {
        let Some(info) = entities.get(&instance.entity_id) else {
            reporter.warn(format!(
                "chain {} belongs to unknown entity {}",
                instance.chain_id, instance.entity_id
            ))?;
            instance_colors.push(Color::GRAY);
            continue;
        };
        let ordinal = ordinals.entry(instance.entity_id.as_str()).or_insert(0);
        instance_colors
            .push(sister_color(entity_colors[info.index], *ordinal));
        *ordinal += 1;
    }

    Ok(ColorAssignment {
        entity_colors,
        instance_colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixture::FixtureApi;
    use crate::model::Molecule;
    use palette::{LIGAND, POLYMER};

    fn haemoglobin() -> Entities {
        Entities::from_molecules(&FixtureApi::haemoglobin().molecules)
    }

    #[test]
    fn hex_round_trip() {
        let c: Color = "#1B9E77".parse().unwrap();
        assert_eq!(c, Color(0x1b9e77));
        assert_eq!(c.to_string(), "#1b9e77");
        assert!("1b9e7".parse::<Color>().is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color(0x00ff00)).unwrap();
        assert_eq!(json, "\"#00ff00\"");
    }

    #[test]
    fn entity_priorities() {
        let entities = haemoglobin();
        let colors =
            assign_colors(&entities, &[], &Reporter::default()).unwrap();
        assert_eq!(colors.entity_colors, [POLYMER[0], POLYMER[1], LIGAND[0], WATER]);
    }

    #[test]
    fn single_element_entities_use_element_color() {
        let molecules = vec![Molecule {
            entity_id: "1".to_owned(),
            name: "ZINC ION".to_owned(),
            kind: EntityKind::NonPolymer,
            label_chains: vec!["B".to_owned()],
            auth_chains: vec!["A".to_owned()],
            compound_ids: vec!["ZN".to_owned()],
        }];
        let entities = Entities::from_molecules(&molecules);
        let colors =
            assign_colors(&entities, &entities.instances(), &Reporter::default())
                .unwrap();
        assert_eq!(colors.entity_colors, [Color(0x7d80b0)]);
        assert_eq!(colors.instance_colors, [Color(0x7d80b0)]);
    }

    #[test]
    fn ligands_do_not_shift_polymer_sequence() {
        let molecule = |id: &str, kind| Molecule {
            entity_id: id.to_owned(),
            name: format!("entity {id}"),
            kind,
            label_chains: vec![format!("{id}A")],
            auth_chains: Vec::new(),
            compound_ids: Vec::new(),
        };
        let entities = Entities::from_molecules(&[
            molecule("1", EntityKind::Polymer),
            molecule("2", EntityKind::NonPolymer),
            molecule("3", EntityKind::Polymer),
            molecule("4", EntityKind::NonPolymer),
        ]);
        let colors =
            assign_colors(&entities, &[], &Reporter::default()).unwrap();
        assert_eq!(
            colors.entity_colors,
            [POLYMER[0], LIGAND[0], POLYMER[1], LIGAND[1]]
        );
    }

    #[test]
    fn first_instance_keeps_entity_color() {
        let entities = haemoglobin();
        let instances = entities.instances();
        let colors =
            assign_colors(&entities, &instances, &Reporter::default()).unwrap();
        assert_eq!(colors.instance_colors.len(), instances.len());
        // A, C are entity 1; B, D entity 2.
        assert_eq!(colors.instance_colors[0], POLYMER[0]);
        assert_ne!(colors.instance_colors[1], POLYMER[0]);
        assert_eq!(colors.instance_colors[2], POLYMER[1]);
    }

    #[test]
    fn unknown_entity_warns() {
        let entities = haemoglobin();
        let stray = [ChainInstance {
            entity_id: "9".to_owned(),
            chain_id: "Z".to_owned(),
        }];
        let lenient =
            assign_colors(&entities, &stray, &Reporter::default()).unwrap();
        assert_eq!(lenient.instance_colors, [Color::GRAY]);
        assert!(matches!(
            assign_colors(&entities, &stray, &Reporter::new(true)),
            Err(Error::WarningAsError(_))
        ));
    }
}
