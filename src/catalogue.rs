//! Captions for a planned set of images.
//!
//! The planner decides which files exist; this module describes each of
//! them, drawing colors and copy numbers from the same metadata snapshot
//! so text and file names cannot disagree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::caption::{
    assembly_caption, bfactor_caption, domain_caption, entity_caption,
    entry_caption, ligand_caption, modres_caption, oligomer_name,
    plddt_caption, validation_caption, CaptionContext, CaptionRecord,
    DomainFacts, MoleculeSummary,
};
use crate::colors::{assign_colors, Color, ColorAssignment, CyclicPalette};
use crate::domains::DomainKey;
use crate::error::Error;
use crate::model::{preferred_assembly, Assembly, EntityKind};
use crate::naming::{Coloring, ImageSubject};
use crate::planner::{Metadata, PlannedImage};
use crate::util::report::Reporter;

/// Highlight colors handed out in order of first request.
struct Highlights {
    palette: CyclicPalette,
    given: FxHashMap<ImageSubject, Color>,
}

impl Highlights {
    fn new(palette: CyclicPalette) -> Self {
        Self {
            palette,
            given: FxHashMap::default(),
        }
    }

    fn color_for(&mut self, subject: &ImageSubject) -> Color {
        if let Some(&color) = self.given.get(subject) {
            return color;
        }
        let color = self.palette.next_color();
        let _ = self.given.insert(subject.clone(), color);
        color
    }
}

fn molecules(
    metadata: &Metadata,
    colors: &ColorAssignment,
    coloring: Coloring,
) -> Vec<MoleculeSummary> {
    metadata
        .entities
        .iter()
        .filter(|(_, e)| e.kind != EntityKind::Water)
        .map(|(_, e)| MoleculeSummary {
            name: e.description.clone(),
            copies: e.chains.len(),
            color: (coloring == Coloring::Entity)
                .then(|| colors.entity_color(e)),
        })
        .collect()
}

/// Build one caption record per planned image, in plan order.
pub fn caption_plan(
    entry_id: &str,
    images: &[PlannedImage],
    metadata: &Metadata,
    reporter: &Reporter,
) -> Result<Vec<CaptionRecord>, Error> {
    let entities = &metadata.entities;
    let colors = assign_colors(entities, &entities.instances(), reporter)?;
    let (chains, polymer_types) = entities.polymer_composition();
    let oligomer = oligomer_name(chains, polymer_types);
    let resolved = metadata.resolve_domains();
    let mut annotation = Highlights::new(CyclicPalette::annotation());
    let mut modres = Highlights::new(CyclicPalette::modres());
    let mut preferred: Option<Assembly> = None;

    let mut modres_by_compound: BTreeMap<&str, (usize, &str)> = BTreeMap::new();
    for residue in &metadata.modified_residues {
        let entry = modres_by_compound
            .entry(residue.compound_id.as_str())
            .or_insert((0, residue.compound_name.as_str()));
        entry.0 += 1;
    }

    let mut records = Vec::with_capacity(images.len());
    for image in images {
        let ctx = CaptionContext {
            entry_id,
            view: image.view,
        };
        let record = match &image.subject {
            ImageSubject::Entry { coloring } => entry_caption(
                &ctx,
                *coloring,
                &oligomer,
                &molecules(metadata, &colors, *coloring),
            )?,
            ImageSubject::Assembly {
                assembly_id,
                coloring,
            } => {
                if preferred.is_none() {
                    preferred = Some(preferred_assembly(
                        entry_id,
                        &metadata.assemblies,
                        reporter,
                    )?);
                }
                let assembly = metadata
                    .assemblies
                    .iter()
                    .find(|a| &a.assembly_id == assembly_id)
                    .cloned()
                    .unwrap_or_else(|| Assembly {
                        assembly_id: assembly_id.clone(),
                        ..Assembly::neutral()
                    });
                let is_preferred = preferred
                    .as_ref()
                    .is_some_and(|p| p.assembly_id == assembly.assembly_id);
                assembly_caption(&ctx, &assembly, is_preferred, *coloring)?
            }
            ImageSubject::Entity { entity_id } => {
                let Some(info) = entities.get(entity_id) else {
                    reporter.warn(format!(
                        "{entry_id}: no entity {entity_id}, caption skipped"
                    ))?;
                    continue;
                };
                entity_caption(
                    &ctx,
                    entity_id,
                    &info.description,
                    info.chains.len(),
                    colors.entity_color(info),
                )?
            }
            subject @ ImageSubject::Domain {
                source,
                family,
                entity_id,
                chain_id,
                auth_chain_id,
            } => {
                let key = DomainKey {
                    source: *source,
                    family: family.clone(),
                    entity_id: entity_id.clone(),
                };
                let family_name = resolved
                    .selected
                    .get(source)
                    .and_then(|f| f.get(family))
                    .and_then(|e| e.get(entity_id))
                    .and_then(|records| records.first())
                    .map_or(family.as_str(), |d| d.family_name.as_str());
                let entity_name = entities
                    .get(entity_id)
                    .map_or("", |e| e.description.as_str());
                let facts = DomainFacts {
                    source: *source,
                    family,
                    family_name,
                    entity_id,
                    entity_name,
                    chain_id,
                    auth_chain_id,
                    counts: resolved.counts.get(&key).copied().unwrap_or_default(),
                };
                domain_caption(&ctx, &facts, annotation.color_for(subject))?
            }
            ImageSubject::Ligand {
                entity_id,
                compound_id,
            } => {
                let Some(info) = entities.get(entity_id) else {
                    reporter.warn(format!(
                        "{entry_id}: no ligand entity {entity_id}, caption skipped"
                    ))?;
                    continue;
                };
                ligand_caption(
                    &ctx,
                    entity_id,
                    compound_id,
                    &info.description,
                    info.chains.len(),
                    colors.entity_color(info),
                )?
            }
            subject @ ImageSubject::Modres { compound_id } => {
                let (instances, name) = modres_by_compound
                    .get(compound_id.as_str())
                    .copied()
                    .unwrap_or((0, ""));
                modres_caption(
                    &ctx,
                    compound_id,
                    name,
                    instances,
                    modres.color_for(subject),
                )?
            }
            ImageSubject::Bfactor => bfactor_caption(&ctx),
            ImageSubject::Validation => validation_caption(&ctx),
            ImageSubject::Plddt => plddt_caption(&ctx),
        };
        records.push(record);
    }
    Ok(records)
}

/// Persist `records` as `<stem>.caption.json` files in `dir`, creating it
/// if needed.
pub fn write_captions(
    dir: &Path,
    records: &[CaptionRecord],
) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(dir)?;
    let paths = records
        .iter()
        .map(|r| r.save(dir))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("wrote {} caption records to {}", paths.len(), dir.display());
    Ok(paths)
}
