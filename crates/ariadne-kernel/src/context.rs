//! Execution context and service lookup passed through to handlers.
//!
//! The kernel never inspects either of them: the [`AgentContext`] stands in
//! for the wallet/session handle of the external provider, and the
//! [`ServiceRegistry`] is how handlers reach collaborators such as a record
//! store or a ledger client.

use crate::error::KernelResult;
use ariadne_types::config::AgentConfig;
use async_trait::async_trait;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Opaque per-request context handed to handlers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentContext {
    /// Name of the agent processing the message.
    pub agent_name: String,
    /// The agent's DID, when provisioned.
    pub agent_did: Option<String>,
    /// Provider-specific values (wallet handle, session id, ...).
    pub properties: HashMap<String, serde_json::Value>,
}

/// Supplies the context for each inbound message.
#[async_trait]
pub trait ContextProvider: Send + Sync + 'static {
    async fn context(&self) -> KernelResult<AgentContext>;
}

/// Builds every context from the agent configuration.
#[derive(Debug, Clone)]
pub struct ConfigContextProvider {
    template: AgentContext,
}

impl ConfigContextProvider {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            template: AgentContext {
                agent_name: config.agent_name.clone(),
                agent_did: config.agent_did.clone(),
                properties: HashMap::new(),
            },
        }
    }
}

#[async_trait]
impl ContextProvider for ConfigContextProvider {
    async fn context(&self) -> KernelResult<AgentContext> {
        Ok(self.template.clone())
    }
}

/// Collaborators keyed by their type.
///
/// Trait-object capabilities are stored as `Arc<dyn Trait>` and looked up
/// with the same type.
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service, replacing any previous one of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, service: T) {
        self.services.insert(TypeId::of::<T>(), Box::new(service));
    }

    /// Look up a service by type.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.services
            .get(&TypeId::of::<T>())
            .and_then(|service| service.downcast_ref::<T>())
    }

    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    trait Ledger: Send + Sync {
        fn pool_name(&self) -> &str;
    }

    struct TestLedger;

    impl Ledger for TestLedger {
        fn pool_name(&self) -> &str {
            "test-pool"
        }
    }

    #[test]
    fn test_lookup_by_type() {
        let mut services = ServiceRegistry::new();
        services.insert(42u32);
        services.insert("records".to_string());
        assert_eq!(services.get::<u32>(), Some(&42));
        assert_eq!(services.get::<String>().map(String::as_str), Some("records"));
        assert!(services.get::<u64>().is_none());
        assert_eq!(services.len(), 2);
    }

    #[test]
    fn test_trait_object_capability() {
        let mut services = ServiceRegistry::new();
        let ledger: Arc<dyn Ledger> = Arc::new(TestLedger);
        services.insert(ledger);
        let found = services.get::<Arc<dyn Ledger>>().unwrap();
        assert_eq!(found.pool_name(), "test-pool");
    }

    #[test]
    fn test_insert_replaces() {
        let mut services = ServiceRegistry::new();
        services.insert(1u8);
        services.insert(2u8);
        assert_eq!(services.get::<u8>(), Some(&2));
        assert_eq!(services.len(), 1);
    }

    #[tokio::test]
    async fn test_config_context_provider() {
        let config = AgentConfig {
            agent_name: "alice".to_string(),
            agent_did: Some("did:example:alice".to_string()),
            ..AgentConfig::default()
        };
        let provider = ConfigContextProvider::new(&config);
        let context = provider.context().await.unwrap();
        assert_eq!(context.agent_name, "alice");
        assert_eq!(context.agent_did.as_deref(), Some("did:example:alice"));
        assert!(context.properties.is_empty());
    }
}
