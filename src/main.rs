//! Pub/Sub proxy HTTP service entry point.
//!
//! Loads configuration, picks the broker backend, wires the publish handler
//! into the router and serves until ctrl-c. Cached publishers are shut
//! down after the server stops accepting requests.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::info;

use pubsub_proxy::adapters::pubsub::{
    InMemoryPublisherFactory, RedisPublisherFactory, RedisPublisherSettings,
    TracingOutcomeListener,
};
use pubsub_proxy::adapters::{app_router, PublishAppState};
use pubsub_proxy::application::{PublishMessagesHandler, PublisherRegistry};
use pubsub_proxy::config::{AppConfig, BrokerBackend};
use pubsub_proxy::domain::foundation::DomainError;
use pubsub_proxy::observability;
use pubsub_proxy::ports::PublisherFactory;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    observability::init_tracing(&config.server);

    let registry = Arc::new(PublisherRegistry::new(build_factory(&config)?));
    let outcomes = Arc::new(TracingOutcomeListener::new());
    let handler = Arc::new(PublishMessagesHandler::new(
        Arc::clone(&registry),
        outcomes.clone(),
        Handle::current(),
    ));
    let app = app_router(
        PublishAppState::new(handler, outcomes),
        config.server.request_timeout(),
    );

    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend = ?config.broker.backend, "pubsub proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(topics = registry.len().await, "Shutting down publishers");
    registry.shutdown().await;
    Ok(())
}

fn build_factory(config: &AppConfig) -> Result<Arc<dyn PublisherFactory>, DomainError> {
    let factory: Arc<dyn PublisherFactory> = match config.broker.backend {
        BrokerBackend::Memory => Arc::new(InMemoryPublisherFactory::new(
            config.broker.max_message_bytes,
        )),
        BrokerBackend::Redis => {
            let settings = RedisPublisherSettings {
                stream_prefix: config.broker.stream_prefix.clone(),
                max_message_bytes: config.broker.max_message_bytes,
                ack_timeout: config.broker.ack_timeout(),
            };
            Arc::new(RedisPublisherFactory::new(
                &config.broker.redis_url,
                settings,
                config.broker.connect_timeout(),
            )?)
        }
    };
    Ok(factory)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for ctrl-c, shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubsub_proxy::config::BrokerConfig;
    use pubsub_proxy::ports::TopicPublisher;

    #[tokio::test]
    async fn memory_backend_builds_in_memory_factory() {
        let factory = build_factory(&AppConfig::default()).unwrap();
        let publisher = factory.create("orders").await.unwrap();
        assert_eq!(publisher.topic(), "orders");
    }

    #[test]
    fn redis_backend_rejects_unparseable_url() {
        let config = AppConfig {
            broker: BrokerConfig {
                backend: BrokerBackend::Redis,
                redis_url: "not-a-url".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(build_factory(&config).is_err());
    }

    #[test]
    fn redis_backend_connects_lazily() {
        let config = AppConfig {
            broker: BrokerConfig {
                backend: BrokerBackend::Redis,
                redis_url: "redis://127.0.0.1:1".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(build_factory(&config).is_ok());
    }
}
