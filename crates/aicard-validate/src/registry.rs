//! # Extension Registry
//!
//! Maps the service `type` discriminator to the extension validator for
//! that protocol family. Composed once at startup via the builder (built-in
//! A2A and MCP validators plus any externally supplied ones) and immutable
//! thereafter: concurrent `resolve` calls read a full-map snapshot that was
//! never mutated in place.
//!
//! Open world: an unregistered discriminator is not an error — it resolves
//! to the permissive validator.

use std::collections::HashMap;
use std::sync::Arc;

use crate::a2a::A2aValidator;
use crate::extension::{ExtensionValidator, PermissiveValidator};
use crate::mcp::McpValidator;

/// Immutable discriminator → validator mapping.
///
/// Cheap to clone (validators are shared via `Arc`); `Send + Sync`, safe to
/// use from any number of validation threads.
#[derive(Clone)]
pub struct ExtensionRegistry {
    validators: HashMap<String, Arc<dyn ExtensionValidator>>,
    permissive: Arc<dyn ExtensionValidator>,
}

impl ExtensionRegistry {
    /// Start composing a registry seeded with the built-in A2A and MCP
    /// validators.
    pub fn builder() -> ExtensionRegistryBuilder {
        ExtensionRegistryBuilder::new()
    }

    /// Look up the validator registered for a discriminator.
    pub fn resolve(&self, protocol_type: &str) -> Option<&dyn ExtensionValidator> {
        self.validators.get(protocol_type).map(Arc::as_ref)
    }

    /// Look up a validator, falling back to the permissive one for
    /// unregistered discriminators.
    pub fn resolve_or_permissive(&self, protocol_type: &str) -> &dyn ExtensionValidator {
        self.resolve(protocol_type).unwrap_or(self.permissive.as_ref())
    }

    /// The registered discriminators, sorted.
    pub fn protocol_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("protocol_types", &self.protocol_types())
            .finish()
    }
}

/// Builder for [`ExtensionRegistry`]. Registration is last-write-wins.
pub struct ExtensionRegistryBuilder {
    validators: HashMap<String, Arc<dyn ExtensionValidator>>,
}

impl ExtensionRegistryBuilder {
    fn new() -> Self {
        let mut validators: HashMap<String, Arc<dyn ExtensionValidator>> = HashMap::new();
        validators.insert("a2a".to_string(), Arc::new(A2aValidator));
        validators.insert("mcp".to_string(), Arc::new(McpValidator));
        Self { validators }
    }

    /// A builder with no built-ins, for tests and closed deployments.
    pub fn bare() -> Self {
        Self { validators: HashMap::new() }
    }

    /// Register a validator for a discriminator. Re-registering overwrites
    /// the previous validator (last write wins), with a warning for
    /// observability.
    pub fn register(
        mut self,
        protocol_type: impl Into<String>,
        validator: Arc<dyn ExtensionValidator>,
    ) -> Self {
        let protocol_type = protocol_type.into();
        if self.validators.insert(protocol_type.clone(), validator).is_some() {
            tracing::warn!(
                protocol_type = %protocol_type,
                "extension validator re-registered; previous validator replaced"
            );
        }
        self
    }

    /// Finish composition. The returned registry never changes.
    pub fn build(self) -> ExtensionRegistry {
        ExtensionRegistry {
            validators: self.validators,
            permissive: Arc::new(PermissiveValidator),
        }
    }
}
