//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity, NamedEntity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity; the returned copy carries the assigned id
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity (`NotFound` when the id is unknown)
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID (`NotFound` when the id is unknown)
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories whose entities have unique names
#[async_trait]
pub trait NamedRepository<T: NamedEntity>: Repository<T> {
    /// Exact-match lookup used for the uniqueness check
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<T>>;
}
