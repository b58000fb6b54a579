//! Data model for product datasets.
//!
//! Readers produce a [`RawTable`] of loosely typed cells; normalization maps
//! each raw row through a [`DatasetVariant`]'s column mapping into an
//! immutable [`ProductRecord`].

mod raw;
mod record;
mod variant;

pub use raw::*;
pub use record::*;
pub use variant::*;
