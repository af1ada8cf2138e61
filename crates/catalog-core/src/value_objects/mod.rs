//! Value objects - immutable types identified by their value

mod entity_id;
mod page;
mod reference_set;

pub use entity_id::{EntityId, EntityIdParseError};
pub use page::{Direction, Page, PageRequest, SortOrder, SortParseError};
pub use reference_set::ReferenceSet;
