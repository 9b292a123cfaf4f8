//! # Store Error Types
//!
//! Error types for entity store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                             │
//! │                                                                     │
//! │  ValidationError (bolt-core)                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← Adds entity/id context                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  CheckoutError (checkout module) ← The transaction's view           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Caller (HTTP layer) maps to a user-facing message                  │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use bolt_core::ValidationError;
use thiserror::Error;

/// Entity store operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    ///
    /// ## When This Occurs
    /// - Updating a product id that was never created
    /// - Updating a product id that has been deleted
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u32 },

    /// Input failed field validation; nothing was written.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        StoreError::NotFound { entity, id }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
