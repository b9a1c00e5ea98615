//! Repository layer.
//!
//! Each repository is a zero-sized type providing async CRUD methods that
//! accept `&dyn DocumentStore` as the first argument and the verified owner
//! id where the operation is owner-scoped.

pub mod log_repo;
pub mod pet_repo;
pub mod resource;

pub use log_repo::{LogRepo, LogResource};
pub use pet_repo::{PetRepo, PetResource};
pub use resource::{RepoError, Resource, ResourceRepo};
