//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Transfer objects with validation, shared by requests and responses
//! - Page and health response wrappers
//! - Mappers between domain entities and transfer objects

pub mod mappers;
pub mod responses;
pub mod transfer;

pub use responses::{HealthChecks, HealthResponse, PageResponse, ReadinessResponse};
pub use transfer::{CategoryDto, CategoryRefDto, ProductDto, RoleRefDto, UserDto, UserInsertDto};
