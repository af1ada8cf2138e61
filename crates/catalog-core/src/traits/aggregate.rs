//! Aggregate - an entity that owns a reference collection

use crate::value_objects::ReferenceSet;

/// An entity whose many-to-many references are replaced as a whole
pub trait Aggregate {
    /// The referenced entity type (Category for products, Role for users)
    type Reference;

    /// Current reference collection
    fn references(&self) -> &ReferenceSet<Self::Reference>;

    /// Replace the reference collection with a fully resolved set
    fn replace_references(&mut self, references: ReferenceSet<Self::Reference>);
}
