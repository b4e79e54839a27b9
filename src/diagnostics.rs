//! Serializable summary of a render, written next to the image by the tools.
use crate::plan::{RenderPlan, SegmentKind};
use crate::types::Canvas;
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of a render.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentCounts {
    pub converging: usize,
    pub horizontal: usize,
    pub horizon: usize,
    pub proportion: usize,
    /// Converging lines per vanishing point, indexed like the plan.
    pub per_vanishing_point: Vec<usize>,
}

impl SegmentCounts {
    pub fn from_plan(plan: &RenderPlan) -> Self {
        let mut counts = SegmentCounts::default();
        for seg in &plan.segments {
            match seg.kind {
                SegmentKind::Converging { vp } => {
                    counts.converging += 1;
                    if counts.per_vanishing_point.len() <= vp {
                        counts.per_vanishing_point.resize(vp + 1, 0);
                    }
                    counts.per_vanishing_point[vp] += 1;
                }
                SegmentKind::Horizontal => counts.horizontal += 1,
                SegmentKind::Horizon => counts.horizon += 1,
                SegmentKind::Proportion => counts.proportion += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.converging + self.horizontal + self.horizon + self.proportion
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderReport {
    pub canvas: Canvas,
    pub export_canvas: Canvas,
    pub preset: Option<String>,
    pub segments: SegmentCounts,
    pub markers: Vec<String>,
    pub timings: TimingBreakdown,
}

impl RenderReport {
    pub fn new(plan: &RenderPlan, export_canvas: Canvas, preset: Option<String>) -> Self {
        Self {
            canvas: plan.canvas,
            export_canvas,
            preset,
            segments: SegmentCounts::from_plan(plan),
            markers: plan.markers.iter().map(|m| m.label.clone()).collect(),
            timings: TimingBreakdown::default(),
        }
    }
}
