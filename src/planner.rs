//! Output planning: from an entry id and a request to the exact list of
//! file stems and files that a run must produce.
//!
//! Metadata queries fan out concurrently, but stems are emitted type by
//! type in the order of [`Mode::image_types`], so the plan never depends
//! on which query finished first.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::api::{or_empty, ApiError, MetadataGateway};
use crate::domains::{
    count_domains, coverage_counts, select_best_chain_for_domains,
    sort_domains_by_entity, DomainCounts, DomainKey,
};
use crate::error::Error;
use crate::model::{
    Assembly, ChainCoverage, DomainRecord, DomainsByEntity, DomainsBySource,
    Entities, EntityKind, ImageType, Mode, ModifiedResidue, View, ViewMode,
};
use crate::naming::{
    Coloring, ImageSize, ImageSubject, CAPTION_SUFFIX, STATE_SUFFIX,
};

/// Name of the report written by [`verify_outputs`].
pub const MISSING_FILES_REPORT: &str = "missing_files.txt";

/// Expand a request into concrete image types for `mode`.
///
/// `all` selects every type of the mode. The result follows the mode's
/// emission order and holds no duplicates.
pub fn resolve_image_types(
    mode: Mode,
    requested: &[String],
) -> Result<Vec<ImageType>, Error> {
    let valid = mode.image_types();
    let mut wanted = BTreeSet::new();
    for name in requested {
        let name = name.trim();
        if name.eq_ignore_ascii_case("all") {
            wanted.extend(valid.iter().copied());
            continue;
        }
        match ImageType::from_name(&name.to_ascii_lowercase()) {
            Some(ty) if valid.contains(&ty) => {
                let _ = wanted.insert(ty);
            }
            _ => {
                return Err(Error::UnknownImageType {
                    mode,
                    name: name.to_owned(),
                })
            }
        }
    }
    Ok(valid.iter().copied().filter(|t| wanted.contains(t)).collect())
}

/// Reject entry ids that cannot safely name files.
pub fn validate_entry_id(entry_id: &str) -> Result<(), Error> {
    let bad = entry_id.is_empty()
        || entry_id.starts_with('.')
        || entry_id
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\');
    if bad {
        return Err(Error::InvalidEntryId(entry_id.to_owned()));
    }
    Ok(())
}

/// Everything the gateway reported about one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Entity table.
    pub entities: Entities,
    /// Assemblies in archive order.
    pub assemblies: Vec<Assembly>,
    /// Experimental methods.
    pub methods: Vec<String>,
    /// Modified residue instances.
    pub modified_residues: Vec<ModifiedResidue>,
    /// Domain mappings split by source.
    pub domains: DomainsBySource,
    /// Observed residues per polymer chain.
    pub coverage: Vec<ChainCoverage>,
}

impl Metadata {
    /// Whether any experimental method is a diffraction technique.
    #[must_use]
    pub fn is_diffraction(&self) -> bool {
        self.methods
            .iter()
            .any(|m| m.to_ascii_lowercase().contains("diffraction"))
    }

    /// Reduce the domain mappings to one representative chain per
    /// (source, family, entity).
    #[must_use]
    pub fn resolve_domains(&self) -> ResolvedDomains {
        let all = sort_domains_by_entity(&self.domains);
        let counts_by_chain = coverage_counts(&self.coverage);
        let coverage =
            (!counts_by_chain.is_empty()).then_some(&counts_by_chain);
        let selected = select_best_chain_for_domains(&all, coverage);
        let counts = count_domains(&all, &selected, &self.coverage);
        ResolvedDomains { selected, counts }
    }
}

/// Output of the domain resolver for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDomains {
    /// Domains on the representative chain of each group.
    pub selected: DomainsByEntity,
    /// Copy numbers per group.
    pub counts: BTreeMap<DomainKey, DomainCounts>,
}

impl ResolvedDomains {
    /// Groups in emission order, each with its first shown domain.
    pub fn groups(&self) -> impl Iterator<Item = (DomainKey, &DomainRecord)> {
        self.selected.iter().flat_map(|(&source, families)| {
            families.iter().flat_map(move |(family, entities)| {
                entities.iter().filter_map(move |(entity_id, records)| {
                    let first = records.first()?;
                    let key = DomainKey {
                        source,
                        family: family.clone(),
                        entity_id: entity_id.clone(),
                    };
                    Some((key, first))
                })
            })
        })
    }
}

fn query<T: Default>(
    needed: bool,
    f: impl FnOnce() -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    if needed {
        or_empty(f())
    } else {
        Ok(T::default())
    }
}

/// Fetch the metadata needed for `types`, querying the gateway
/// concurrently. "Not found" answers become empty values; any other
/// failure aborts.
pub fn fetch_metadata<G: MetadataGateway + ?Sized>(
    gateway: &G,
    entry_id: &str,
    types: &[ImageType],
) -> Result<Metadata, Error> {
    let wants = |ty: ImageType| types.contains(&ty);
    let need_molecules = types.iter().any(|t| {
        matches!(
            t,
            ImageType::Entry
                | ImageType::Assembly
                | ImageType::Entity
                | ImageType::Domain
                | ImageType::Ligand
        )
    });
    let need_assemblies = wants(ImageType::Assembly);
    let need_methods = wants(ImageType::Bfactor);
    let need_modres = wants(ImageType::Modres);
    let need_domains = wants(ImageType::Domain);

    let ((molecules, assemblies), ((methods, modres), (domains, coverage))) =
        rayon::join(
            || {
                rayon::join(
                    || query(need_molecules, || gateway.molecules(entry_id)),
                    || {
                        query(need_assemblies, || gateway.assemblies(entry_id))
                    },
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || {
                                query(need_methods, || {
                                    gateway.experimental_methods(entry_id)
                                })
                            },
                            || {
                                query(need_modres, || {
                                    gateway.modified_residues(entry_id)
                                })
                            },
                        )
                    },
                    || {
                        rayon::join(
                            || {
                                query(need_domains, || {
                                    gateway.domain_mappings(entry_id)
                                })
                            },
                            || {
                                query(need_domains, || {
                                    gateway.polymer_coverage(entry_id)
                                })
                            },
                        )
                    },
                )
            },
        );

    Ok(Metadata {
        entities: Entities::from_molecules(&molecules?),
        assemblies: assemblies?,
        methods: methods?,
        modified_residues: modres?,
        domains: domains?,
        coverage: coverage?,
    })
}

/// One image of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedImage {
    /// What the image shows.
    pub subject: ImageSubject,
    /// Camera view, `None` for single-view images.
    pub view: Option<View>,
}

impl PlannedImage {
    /// File-name stem of this image.
    #[must_use]
    pub fn stem(&self, entry_id: &str) -> String {
        self.subject.stem(entry_id, self.view)
    }
}

fn subjects_for(ty: ImageType, metadata: &Metadata) -> Vec<ImageSubject> {
    match ty {
        ImageType::Entry => Coloring::ALL
            .iter()
            .map(|&coloring| ImageSubject::Entry { coloring })
            .collect(),
        ImageType::Assembly => metadata
            .assemblies
            .iter()
            .flat_map(|a| {
                Coloring::ALL.iter().map(|&coloring| ImageSubject::Assembly {
                    assembly_id: a.assembly_id.clone(),
                    coloring,
                })
            })
            .collect(),
        ImageType::Entity => metadata
            .entities
            .iter()
            .filter(|(_, e)| e.kind != EntityKind::Water)
            .map(|(id, _)| ImageSubject::Entity {
                entity_id: id.to_owned(),
            })
            .collect(),
        ImageType::Domain => metadata
            .resolve_domains()
            .groups()
            .filter_map(|(key, first)| {
                let chunk = first.chunks.first()?;
                Some(ImageSubject::Domain {
                    source: key.source,
                    family: key.family,
                    entity_id: key.entity_id,
                    chain_id: chunk.chain_id.clone(),
                    auth_chain_id: chunk.auth_chain_id.clone(),
                })
            })
            .collect(),
        ImageType::Ligand => {
            let mut seen = BTreeSet::new();
            metadata
                .entities
                .iter()
                .filter(|(_, e)| e.is_ligand())
                .filter_map(|(id, e)| {
                    let compound = e.compound_id()?;
                    seen.insert(compound).then(|| ImageSubject::Ligand {
                        entity_id: id.to_owned(),
                        compound_id: compound.to_owned(),
                    })
                })
                .collect()
        }
        ImageType::Modres => metadata
            .modified_residues
            .iter()
            .map(|r| r.compound_id.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|compound| ImageSubject::Modres {
                compound_id: compound.to_owned(),
            })
            .collect(),
        ImageType::Bfactor => {
            if metadata.is_diffraction() {
                vec![ImageSubject::Bfactor]
            } else {
                log::info!("no diffraction method, skipping b-factor image");
                Vec::new()
            }
        }
        ImageType::Validation => vec![ImageSubject::Validation],
        ImageType::Plddt => vec![ImageSubject::Plddt],
    }
}

/// Every image to render for `types`, in emission order.
#[must_use]
pub fn plan_images(
    types: &[ImageType],
    view_mode: ViewMode,
    metadata: &Metadata,
) -> Vec<PlannedImage> {
    let mut images = Vec::new();
    for &ty in types {
        let views = view_mode.views_for(ty);
        for subject in subjects_for(ty, metadata) {
            for &view in views {
                images.push(PlannedImage {
                    subject: subject.clone(),
                    view,
                });
            }
        }
    }
    images
}

/// Plan an entry: file stems of every image the run must produce.
pub fn plan<G: MetadataGateway + ?Sized>(
    entry_id: &str,
    mode: Mode,
    requested: &[String],
    view_mode: ViewMode,
    gateway: &G,
) -> Result<Vec<String>, Error> {
    validate_entry_id(entry_id)?;
    let types = resolve_image_types(mode, requested)?;
    let metadata = fetch_metadata(gateway, entry_id, &types)?;
    let stems: Vec<String> = plan_images(&types, view_mode, &metadata)
        .iter()
        .map(|image| image.stem(entry_id))
        .collect();
    log::info!("{entry_id}: planned {} images", stems.len());
    Ok(stems)
}

/// Files expected for `stems`: caption record, viewer state and one image
/// per size, in that order.
#[must_use]
pub fn expected_files(
    stems: &[String],
    sizes: &[ImageSize],
    extension: &str,
) -> Vec<String> {
    let mut files = Vec::with_capacity(stems.len() * (2 + sizes.len()));
    for stem in stems {
        files.push(format!("{stem}{CAPTION_SUFFIX}"));
        files.push(format!("{stem}{STATE_SUFFIX}"));
        for size in sizes {
            files.push(format!("{stem}{}", size.suffix(extension)));
        }
    }
    files
}

/// Check after generation that every expected file exists and is not
/// empty.
///
/// Offenders are listed in [`MISSING_FILES_REPORT`] inside `dir` and
/// reported as one [`Error::MissingOutputFiles`].
pub fn verify_outputs(dir: &Path, expected: &[String]) -> Result<(), Error> {
    let missing: Vec<&str> = expected
        .iter()
        .filter(|name| {
            !fs::metadata(dir.join(name.as_str())).is_ok_and(|m| m.len() > 0)
        })
        .map(String::as_str)
        .collect();
    if missing.is_empty() {
        log::info!("all {} expected files present", expected.len());
        return Ok(());
    }
    let listing = dir.join(MISSING_FILES_REPORT);
    fs::write(&listing, missing.join("\n"))?;
    for name in &missing {
        log::warn!("missing or empty output: {name}");
    }
    Err(Error::MissingOutputFiles {
        count: missing.len(),
        listing,
    })
}
