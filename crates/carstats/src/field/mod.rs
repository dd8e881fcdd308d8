//! Field accessors shared by every analysis component.
//!
//! Field names are resolved once into [`Field`] or [`Category`] values; an
//! unknown name is a configuration error at setup time, never a per-record
//! lookup failure.

mod category;
mod numeric;

pub use category::Category;
pub use numeric::{Field, FieldSpec};
