//! Timer service - owns the registry, the tick engine and its driver

use std::sync::Arc;

use tempo_core::{TempoResult, TimerEvent};
use tempo_engine::{TickEngine, TickReport, TimerContext, TimerRegistry};
use tempo_state::MemoryStore;
use tokio::sync::broadcast;

use crate::{dispatch, ChannelSink, Command, Reply, RuntimeConfig, TickDriver, EVENT_CHANNEL_CAPACITY};

/// A hosted timer core
pub struct TimerService {
    config: RuntimeConfig,
    registry: TimerRegistry,
    engine: TickEngine,
    driver: Option<TickDriver>,
}

impl TimerService {
    pub fn new(config: RuntimeConfig, ctx: TimerContext) -> Self {
        TimerService {
            config,
            registry: TimerRegistry::new(ctx.clone()),
            engine: TickEngine::new(ctx),
            driver: None,
        }
    }

    /// Service over an in-process store on the system clock, with events
    /// broadcast to the returned receiver
    pub fn in_memory(config: RuntimeConfig) -> (Self, broadcast::Receiver<TimerEvent>) {
        let (sink, events) = ChannelSink::new(EVENT_CHANNEL_CAPACITY);
        let ctx = TimerContext::with_system_clock(Arc::new(MemoryStore::new()), Arc::new(sink));
        (TimerService::new(config, ctx), events)
    }

    /// Start the periodic driver; must run inside a tokio runtime
    pub fn start(&mut self) {
        if self.is_running() {
            tracing::warn!("timer service already started");
            return;
        }
        self.driver = Some(TickDriver::start(
            self.engine.clone(),
            self.config.tick_interval,
        ));
    }

    pub fn is_running(&self) -> bool {
        self.driver.as_ref().is_some_and(TickDriver::is_running)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn registry(&self) -> &TimerRegistry {
        &self.registry
    }

    /// Run one tick outside the driver's schedule
    pub fn tick_now(&self) -> TickReport {
        self.engine.tick()
    }

    /// Ticks completed by the driver
    pub fn ticks(&self) -> u64 {
        self.driver.as_ref().map_or(0, TickDriver::ticks)
    }

    pub fn execute(&self, command: Command) -> TempoResult<Reply> {
        dispatch(&self.registry, command)
    }

    /// Stop the driver, if any
    pub async fn shutdown(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.stop().await;
        }
    }
}
