//! Business logic services
//!
//! Each aggregate has a service borrowing the shared `ServiceContext`.
//! Create and update go through `reconcile`, which resolves every
//! referenced id before the aggregate is changed.

pub mod category;
pub mod context;
pub mod error;
pub mod product;
pub mod reconcile;
pub mod user;

pub use category::CategoryService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use product::ProductService;
pub use reconcile::reconcile;
pub use user::UserService;
