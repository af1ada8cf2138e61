//! # catalog-service
//!
//! Application layer: transfer objects, projection, reconciliation and the
//! per-aggregate services.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use services::{
    CategoryService, ProductService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, UserService,
};
