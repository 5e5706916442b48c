use super::stats::Stats;

/// Verdict of the before/after average-latency gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateVerdict {
    Passed { regression_pct: f64 },
    Failed { regression_pct: f64, threshold_pct: f64 },
    /// The baseline has no measured latency, so no percentage exists.
    Inconclusive,
}

impl GateVerdict {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, GateVerdict::Failed { .. })
    }
}

/// Percentage change of the average latency from `before` to `after`.
#[must_use]
pub fn regression_percent(before: &Stats, after: &Stats) -> Option<f64> {
    if before.avg_latency > 0.0 {
        Some((after.avg_latency - before.avg_latency) / before.avg_latency * 100.0)
    } else {
        None
    }
}

/// Fails when the average latency grew by strictly more than `threshold_pct`.
#[must_use]
pub fn evaluate_gate(before: &Stats, after: &Stats, threshold_pct: f64) -> GateVerdict {
    match regression_percent(before, after) {
        Some(regression_pct) if regression_pct > threshold_pct => GateVerdict::Failed {
            regression_pct,
            threshold_pct,
        },
        Some(regression_pct) => GateVerdict::Passed { regression_pct },
        None => GateVerdict::Inconclusive,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Regressed,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub before: f64,
    pub after: f64,
    pub lower_is_better: bool,
}

impl ComparisonRow {
    /// Relative change in percent; 0 when the baseline is 0.
    #[must_use]
    pub fn delta_pct(&self) -> f64 {
        if self.before.abs() < f64::EPSILON {
            return 0.0;
        }
        (self.after - self.before) / self.before * 100.0
    }

    #[must_use]
    pub fn trend(&self) -> Trend {
        let diff = self.after - self.before;
        if diff.abs() < f64::EPSILON {
            Trend::Unchanged
        } else if (diff < 0.0) == self.lower_is_better {
            Trend::Improved
        } else {
            Trend::Regressed
        }
    }
}

#[must_use]
pub fn comparison_rows(before: &Stats, after: &Stats) -> Vec<ComparisonRow> {
    let latency = |label, before, after| ComparisonRow {
        label,
        before,
        after,
        lower_is_better: true,
    };
    vec![
        latency("Avg Latency", before.avg_latency, after.avg_latency),
        latency("P50 Latency", before.p50_latency, after.p50_latency),
        latency("P95 Latency", before.p95_latency, after.p95_latency),
        latency("P99 Latency", before.p99_latency, after.p99_latency),
        ComparisonRow {
            label: "RPS",
            before: before.rps,
            after: after.rps,
            lower_is_better: false,
        },
        ComparisonRow {
            label: "Success Rate",
            before: before.success_rate(),
            after: after.success_rate(),
            lower_is_better: false,
        },
    ]
}
