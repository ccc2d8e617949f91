//! AgentKernel — assembles the codec, handlers and services into a running agent.

use crate::context::{ConfigContextProvider, ContextProvider, ServiceRegistry};
use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, DispatchStage, KernelResult};
use crate::event_bus::EventBus;
use crate::handler::{HandlerRegistry, MessageHandler};
use crate::handlers::{ForwardHandler, TrustPingHandler};
use ariadne_types::config::AgentConfig;
use ariadne_types::error::AriadneError;
use ariadne_types::event::{Event, EventPayload, SystemEvent};
use ariadne_types::message::MessageShape;
use ariadne_wire::TypeRegistry;
use std::sync::Arc;
use tracing::info;

/// The agent kernel.
pub struct AgentKernel {
    config: AgentConfig,
    dispatcher: Dispatcher,
    events: Arc<EventBus>,
    context_provider: Arc<dyn ContextProvider>,
}

/// Collects extra message shapes, handlers and services before boot.
pub struct KernelBuilder {
    config: AgentConfig,
    codec: TypeRegistry,
    handlers: Vec<Arc<dyn MessageHandler>>,
    services: ServiceRegistry,
    context_provider: Option<Arc<dyn ContextProvider>>,
    codec_error: Option<AriadneError>,
}

impl KernelBuilder {
    /// Make a custom message shape decodable.
    pub fn message_type<T: MessageShape>(mut self) -> Self {
        if let Err(e) = self.codec.register::<T>() {
            self.codec_error.get_or_insert(e);
        }
        self
    }

    /// Add a handler next to the built-in ones.
    pub fn handler(mut self, handler: Arc<dyn MessageHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Make a collaborator available to handlers.
    pub fn service<T: Send + Sync + 'static>(mut self, service: T) -> Self {
        self.services.insert(service);
        self
    }

    pub fn context_provider(mut self, provider: Arc<dyn ContextProvider>) -> Self {
        self.context_provider = Some(provider);
        self
    }

    /// Boot the kernel. Fails on duplicate shapes or handlers, or on a
    /// handler for a type the codec cannot decode.
    pub fn build(self) -> KernelResult<AgentKernel> {
        if let Some(e) = self.codec_error {
            return Err(e.into());
        }

        let events = Arc::new(EventBus::new(self.config.event_history_size));
        let mut handlers = HandlerRegistry::new();
        handlers.register(Arc::new(TrustPingHandler::new(Arc::clone(&events))))?;
        handlers.register(Arc::new(ForwardHandler::new(Arc::clone(&events))))?;
        for handler in self.handlers {
            handlers.register(handler)?;
        }

        let mut services = self.services;
        services.insert(Arc::clone(&events));
        services.insert(self.config.clone());

        let dispatcher = Dispatcher::new(self.codec, handlers, services)?;
        let context_provider = self
            .context_provider
            .unwrap_or_else(|| {
                Arc::new(ConfigContextProvider::new(&self.config)) as Arc<dyn ContextProvider>
            });

        info!(
            agent = %self.config.agent_name,
            message_types = ?dispatcher.handlers().message_types(),
            "Kernel booted"
        );

        Ok(AgentKernel {
            config: self.config,
            dispatcher,
            events,
            context_provider,
        })
    }
}

impl AgentKernel {
    /// Boot with the built-in message types and handlers.
    pub fn boot(config: AgentConfig) -> KernelResult<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: AgentConfig) -> KernelBuilder {
        KernelBuilder {
            config,
            codec: TypeRegistry::with_builtin_types(),
            handlers: Vec::new(),
            services: ServiceRegistry::new(),
            context_provider: None,
            codec_error: None,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Process one inbound wire message under a fresh context.
    pub async fn process(&self, raw: &[u8]) -> Result<Option<Vec<u8>>, DispatchError> {
        let context = self
            .context_provider
            .context()
            .await
            .map_err(|e| DispatchError::new(DispatchStage::Received, e))?;
        self.dispatcher.dispatch(raw, &context).await
    }

    /// Announce that the kernel is accepting messages.
    pub async fn start(&self) {
        info!(agent = %self.config.agent_name, "Kernel started");
        self.events
            .publish(Event::new(EventPayload::System(SystemEvent::KernelStarted)))
            .await;
    }

    pub async fn shutdown(&self) {
        info!(agent = %self.config.agent_name, "Kernel shutting down");
        self.events
            .publish(Event::new(EventPayload::System(SystemEvent::ShuttingDown)))
            .await;
    }
}
