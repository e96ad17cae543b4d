// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Deterministic image-catalogue planning and captioning for
//! macromolecular structures.
//!
//! Everything needed before and after the pixels exist: which images an
//! entry gets, how each one is oriented, colored and described, and the
//! manifest that indexes them. Rendering itself is left to an external
//! engine.
//!
//! # Key entry points
//!
//! - [`planner::plan`] - the exact list of file stems an entry must produce
//! - [`domains`] - reduction of domain annotations to one representative
//!   chain per family and entity
//! - [`orientation::canonical_rotation`] - principal-axis orientation with
//!   deterministic sign resolution
//! - [`colors::assign_colors`] - reproducible entity and instance colors
//! - [`catalogue::caption_plan`] - one [`caption::CaptionRecord`] per image
//! - [`collector::collect`] - the per-entry manifest and file list
//! - [`options::Options`] - runtime configuration (API, output, run)
//!
//! # Data flow
//!
//! The metadata gateway ([`api::MetadataGateway`]) feeds the domain
//! resolver and the planner; captions draw on the color engine and are
//! written as JSON records, which the collector later folds into one
//! manifest. Metadata queries for one entry run concurrently but stems are
//! always emitted in the fixed type order.

pub mod api;
pub mod caption;
pub mod catalogue;
pub mod collector;
pub mod colors;
pub mod domains;
pub mod error;
pub mod model;
pub mod naming;
pub mod options;
pub mod orientation;
pub mod planner;
pub mod util;

pub use error::Error;
