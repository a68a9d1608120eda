use dtn_router_application::TickOutcome;
use dtn_router_domain::{NodeId, Tick};
use serde::Serialize;

/// Running counters kept by the world while it steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimMetrics {
    pub created: u64,
    pub delivered: u64,
    /// Every completed transfer, deliveries included
    pub relayed: u64,
    pub aborted: u64,
    /// Messages evicted to make room
    pub dropped: u64,
    pub expired: u64,
    /// Copies that reached a node unable to store them
    pub rejected: u64,

    pub ticks_idle: u64,
    pub ticks_delivered: u64,
    pub ticks_flooded: u64,
    pub ticks_forwarded: u64,
    pub ticks_no_action: u64,

    pub latency_sum: u64,
    pub hop_count_sum: u64,
}

impl SimMetrics {
    pub fn record_outcome(&mut self, outcome: TickOutcome) {
        let counter = match outcome {
            TickOutcome::Idle => &mut self.ticks_idle,
            TickOutcome::Delivered { .. } => &mut self.ticks_delivered,
            TickOutcome::Flooded { .. } => &mut self.ticks_flooded,
            TickOutcome::Forwarded { .. } => &mut self.ticks_forwarded,
            TickOutcome::NoAction { .. } => &mut self.ticks_no_action,
        };
        *counter += 1;
    }

    pub fn record_delivery(&mut self, latency: Tick, hops: u32) {
        self.delivered += 1;
        self.latency_sum += latency;
        self.hop_count_sum += u64::from(hops);
    }
}

/// Per node state at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostSummary {
    pub node: NodeId,
    pub buffered: usize,
    pub cache: Vec<(NodeId, u32)>,
}

/// Final statistics of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub ticks: Tick,
    pub metrics: SimMetrics,
    pub delivery_ratio: f64,
    /// Extra transfers per delivered message
    pub overhead_ratio: f64,
    pub latency_avg: f64,
    pub hop_count_avg: f64,
    pub hosts: Vec<HostSummary>,
}

impl SimReport {
    pub fn new(ticks: Tick, metrics: SimMetrics, hosts: Vec<HostSummary>) -> Self {
        let delivered = metrics.delivered as f64;
        let ratio = |value: f64, total: f64| if total > 0.0 { value / total } else { 0.0 };

        Self {
            ticks,
            delivery_ratio: ratio(delivered, metrics.created as f64),
            overhead_ratio: ratio(
                metrics.relayed.saturating_sub(metrics.delivered) as f64,
                delivered,
            ),
            latency_avg: ratio(metrics.latency_sum as f64, delivered),
            hop_count_avg: ratio(metrics.hop_count_sum as f64, delivered),
            metrics,
            hosts,
        }
    }
}
