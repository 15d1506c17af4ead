//! Core library for the labelgene command line application.
//!
//! labelgene turns an EAD-encoded archival finding aid into two tabular
//! datasets used for label printing: one row per physical folder and one row
//! per physical box. The modules are structured to keep responsibilities
//! narrow and composable: tree navigation lives in [`ead`], per-component
//! field extraction in [`extract`], series lineage in [`ancestry`], the
//! folder numbering engine in [`numbering`], table finalization in
//! [`finalize`], and the file-level orchestration under [`convert`] and
//! [`io`].

pub mod ancestry;
pub mod convert;
pub mod ead;
pub mod error;
pub mod extract;
pub mod filter;
pub mod finalize;
pub mod io;
pub mod model;
pub mod numbering;

pub use error::{LabelError, Result};
