//! Typed records shared by the planner, resolver and caption builder.
//!
//! Everything here is derived per run from gateway data and is immutable
//! once built.

mod assembly;
mod domain;
mod entity;
mod image;
mod residue;

pub use assembly::{preferred_assembly, Assembly};
pub use domain::{
    empty_domains, Chunk, DomainRecord, DomainSource, DomainsByEntity,
    DomainsBySource,
};
pub use entity::{ChainInstance, Entities, EntityInfo, EntityKind, Molecule};
pub use image::{ImageType, Mode, View, ViewMode};
pub use residue::{ChainCoverage, ModifiedResidue};
