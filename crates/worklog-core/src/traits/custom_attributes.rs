//! Custom attribute validation port
//!
//! Companies can define required custom attributes per entity type; entries
//! of type "work added" must pass that check before persistence.

use crate::entities::WorkLog;
use crate::error::DomainError;

/// Validates the custom attribute values attached to a work log against the
/// owning company's attribute definitions.
pub trait CustomAttributeValidator: Send + Sync {
    fn validate(&self, work_log: &WorkLog) -> Result<(), DomainError>;
}

/// Validator for deployments without custom attribute definitions
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveAttributeValidator;

impl CustomAttributeValidator for PermissiveAttributeValidator {
    fn validate(&self, _work_log: &WorkLog) -> Result<(), DomainError> {
        Ok(())
    }
}
