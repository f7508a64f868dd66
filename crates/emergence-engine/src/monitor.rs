//! EmergenceMonitor: polls an intelligence source on a fixed interval and
//! renders a text frame. Every error is transient: the monitor backs off,
//! doubling up to a ceiling, and keeps polling until shut down.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use emergence_analysis::PatternEvolution;
use emergence_core::config::MonitorConfig;
use emergence_core::errors::EngineResult;
use emergence_core::models::{DiscoveryLogEntry, StateView};

use crate::service::IntelligenceService;

/// Read-only queries the monitor needs.
pub trait IIntelligenceSource: Send + Sync {
    fn state(&self) -> EngineResult<StateView>;
    fn recent_discoveries(&self, limit: usize) -> EngineResult<Vec<DiscoveryLogEntry>>;
    fn pattern_evolution(&self) -> EngineResult<PatternEvolution>;
}

impl IIntelligenceSource for IntelligenceService {
    fn state(&self) -> EngineResult<StateView> {
        self.snapshot()
    }

    fn recent_discoveries(&self, limit: usize) -> EngineResult<Vec<DiscoveryLogEntry>> {
        IntelligenceService::recent_discoveries(self, limit)
    }

    fn pattern_evolution(&self) -> EngineResult<PatternEvolution> {
        IntelligenceService::pattern_evolution(self)
    }
}

/// One successful poll.
#[derive(Debug, Clone)]
pub struct MonitorFrame {
    pub polled_at: DateTime<Utc>,
    pub state: StateView,
    pub recent: Vec<DiscoveryLogEntry>,
    pub evolution: PatternEvolution,
}

/// Counters returned when the monitor stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub frames: u64,
    pub errors: u64,
}

/// Doubling retry delay, capped at `max`.
#[derive(Debug, Clone)]
struct Backoff {
    base: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            current: base,
        }
    }

    fn next_delay(&mut self) -> Duration {
        self.current = self.current.saturating_mul(2).min(self.max);
        self.current
    }

    fn reset(&mut self) {
        self.current = self.base;
    }
}

pub struct EmergenceMonitor<S: ?Sized> {
    source: Arc<S>,
    refresh: Duration,
    max_backoff: Duration,
    recent_limit: usize,
}

impl<S: IIntelligenceSource + ?Sized> EmergenceMonitor<S> {
    pub fn new(source: Arc<S>, refresh: Duration, max_backoff: Duration, recent_limit: usize) -> Self {
        Self {
            source,
            refresh,
            max_backoff: max_backoff.max(refresh),
            recent_limit,
        }
    }

    pub fn from_config(source: Arc<S>, config: &MonitorConfig) -> Self {
        Self::new(
            source,
            config.effective_refresh(),
            config.effective_max_backoff(),
            config.effective_recent_limit(),
        )
    }

    /// Fetch state, recent discoveries, and evolution once.
    pub fn poll_once(&self) -> EngineResult<MonitorFrame> {
        Ok(MonitorFrame {
            polled_at: Utc::now(),
            state: self.source.state()?,
            recent: self.source.recent_discoveries(self.recent_limit)?,
            evolution: self.source.pattern_evolution()?,
        })
    }

    /// Poll until `shutdown` carries `true` or its sender is dropped.
    pub async fn run<F>(&self, mut shutdown: watch::Receiver<bool>, mut on_frame: F) -> MonitorStats
    where
        F: FnMut(&MonitorFrame),
    {
        let mut stats = MonitorStats::default();
        let mut backoff = Backoff::new(self.refresh, self.max_backoff);

        loop {
            if *shutdown.borrow() {
                break;
            }

            let delay = match self.poll_once() {
                Ok(frame) => {
                    stats.frames += 1;
                    backoff.reset();
                    on_frame(&frame);
                    self.refresh
                }
                Err(e) => {
                    stats.errors += 1;
                    let delay = backoff.next_delay();
                    warn!(
                        error = %e,
                        retry_in_ms = delay.as_millis() as u64,
                        "monitor poll failed, backing off"
                    );
                    delay
                }
            };

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!(frames = stats.frames, errors = stats.errors, "monitor stopped");
        stats
    }
}

/// Render a frame as plain text.
pub fn render(frame: &MonitorFrame) -> String {
    let state = &frame.state;
    let mut out = String::new();

    let _ = writeln!(out, "=== Emergence Monitor ({}) ===", frame.polled_at.format("%H:%M:%S"));
    let _ = writeln!(out, "Items processed: {}", state.items_processed);
    let _ = writeln!(
        out,
        "Patterns: {}  Correlations: {}  Unknown: {} ({:.1}% unknown space)",
        state.total_patterns,
        state.total_correlations,
        state.total_unknown,
        state.unknown_space_used * 100.0
    );
    let _ = writeln!(
        out,
        "Diversity: {}  Density: {}  Discovery rate: {:.2}",
        state.metrics.pattern_diversity,
        state.metrics.correlation_density,
        state.metrics.discovery_rate
    );
    if let Some(checkpoint) = &state.last_checkpoint {
        let _ = writeln!(out, "Last checkpoint: item {}", checkpoint.item_index);
    }
    let _ = writeln!(out, "Trend: {}", trend_arrow(&frame.evolution.timeline));

    let _ = writeln!(out, "Recent discoveries:");
    for entry in &frame.recent {
        let _ = writeln!(
            out,
            "  #{:<6} patterns={} correlations={} unknown={}",
            entry.item_index, entry.pattern_count, entry.correlation_count, entry.unknown_count
        );
    }

    let events = &frame.evolution.emergence_events;
    let _ = writeln!(out, "Emergence events: {}", events.len());
    for event in &events[events.len().saturating_sub(3)..] {
        let _ = writeln!(
            out,
            "  #{:<6} {} ({:.2})",
            event.item_index, event.pattern, event.initial_strength
        );
    }
    out
}

/// Direction of pattern counts between the last two timeline entries.
pub fn trend_arrow(timeline: &[DiscoveryLogEntry]) -> &'static str {
    match timeline {
        [.., prev, last] if last.pattern_count > prev.pattern_count => "↑",
        [.., prev, last] if last.pattern_count < prev.pattern_count => "↓",
        [.., _, _] => "→",
        _ => "·",
    }
}
