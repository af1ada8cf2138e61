//! Domain traits - ports implemented by the infrastructure layer

mod aggregate;
mod repositories;

pub use aggregate::Aggregate;
pub use repositories::{
    CategoryRepository, ProductRepository, RepoResult, RoleRepository, UserRepository,
};
