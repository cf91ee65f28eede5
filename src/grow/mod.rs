//! Grow a fatigue crack from its initial size until failure.
//!
//! The engine steps crack length forward under constant amplitude loading,
//! asking the crack case for beta/K at the current size, the NASGRO
//! equation for the growth rate, and checking the failure criteria each
//! step. Everything here is synchronous and owned by one run; independent
//! runs can be farmed out in parallel with the `sweep` module.

use crate::COMMENT;
use std::f64::consts::PI;
use std::fmt;

use thiserror::Error;

pub mod engine;
pub mod sweep;

pub use engine::Growth;

/// Errors raised while setting up a run. Anything that goes wrong after
/// setup is a termination mode, not an error.
#[derive(Debug, Clone, Error)]
pub enum GrowError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown crack case '{0}'")]
    UnknownCase(String),
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),
}

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// the stress intensity reached the fracture toughness
    Fracture,
    /// the net section stress reached the flow stress
    NetSectionYield,
    /// no active tip is growing
    ThresholdArrest,
    /// a crack ran out of the valid domain of its beta solution
    GeometryLimit,
    /// safety cap, not a physical outcome
    MaxCyclesReached,
    /// safety cap, not a physical outcome
    MaxStepsReached,
}

impl FailureMode {
    /// Short tag used in the sparse log.
    pub fn tag(&self) -> &'static str {
        match self {
            FailureMode::Fracture => "FRACTURE",
            FailureMode::NetSectionYield => "NSY",
            FailureMode::ThresholdArrest => "THRESHOLD",
            FailureMode::GeometryLimit => "GEOMETRY",
            FailureMode::MaxCyclesReached => "MAX-CYCLES",
            FailureMode::MaxStepsReached => "MAX-STEPS",
        }
    }

    /// Whether this is a physical outcome rather than a budget cap.
    pub fn is_physical(&self) -> bool {
        !matches!(
            self,
            FailureMode::MaxCyclesReached | FailureMode::MaxStepsReached
        )
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            FailureMode::Fracture => "Fracture",
            FailureMode::NetSectionYield => "Net Section Yield",
            FailureMode::ThresholdArrest => "Threshold Arrest",
            FailureMode::GeometryLimit => "Geometry Limit",
            FailureMode::MaxCyclesReached => "Max Cycles Reached",
            FailureMode::MaxStepsReached => "Max Steps Reached",
        };
        write!(f, "{}", text)
    }
}

/// A per-tip pair of values. Single-tip cases only ever fill `left`.
#[derive(Debug, Clone, Default)]
pub struct TipValue {
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl TipValue {
    pub fn single(value: f64) -> Self {
        TipValue {
            left: Some(value),
            right: None,
        }
    }

    pub fn pair(left: f64, right: f64) -> Self {
        TipValue {
            left: Some(left),
            right: Some(right),
        }
    }

    /// Largest of the present values.
    pub fn max_present(&self) -> Option<f64> {
        match (self.left, self.right) {
            (Some(l), Some(r)) => Some(l.max(r)),
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }
}

/// Data collected for each integration step.
#[derive(Debug, Clone)]
pub struct Sample {
    /// cycle count at the end of the step
    pub cycles: f64,
    /// crack length per tip
    pub length: TipValue,
    /// plasticity-corrected maximum stress intensity per tip
    pub kmax: TipValue,
    /// stress intensity range per tip
    pub dk: TipValue,
    /// geometry factor per tip
    pub beta: TipValue,
    /// growth rate per tip
    pub rate: TipValue,
}

/// Terminal record of one run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub mode: FailureMode,
    pub final_length: TipValue,
    pub cycles: f64,
    pub steps: u64,
    /// fracture toughness used by the run
    pub kc: f64,
    /// cycle count at dual-crack link-up, if it happened
    pub transition: Option<f64>,
    /// dense per-step series
    pub history: Vec<Sample>,
    /// sparse human-readable trace
    pub log: Vec<String>,
}

/// Everything needed to set up one run. Cloneable so sweeps can vary a
/// field per run.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// crack case identifier, see `beta::get_all_cases`
    pub case: String,
    pub params: crate::beta::CaseParams,
    /// built-in material name
    pub material: String,
    /// initial crack length (left tip)
    pub initial: f64,
    /// initial right-tip crack length for dual-tip cases
    pub initial2: Option<f64>,
    /// peak remote stress
    pub smax: f64,
    /// stress ratio Smin/Smax
    pub r: f64,
    /// override the thickness-derived fracture toughness
    pub kc: Option<f64>,
    pub max_cycles: f64,
    pub max_steps: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            case: String::new(),
            params: crate::beta::CaseParams::default(),
            material: String::new(),
            initial: 0.0,
            initial2: None,
            smax: 0.0,
            r: 0.0,
            kc: None,
            max_cycles: 1.0e7,
            max_steps: 500_000,
        }
    }
}

pub fn k_on_stress(beta: f64, crack_length: f64) -> f64 {
    beta * (PI * crack_length).sqrt()
}

pub fn k(stress: f64, beta: f64, crack_length: f64) -> f64 {
    stress * k_on_stress(beta, crack_length)
}

/// Crack increment for one step, from the margin against fracture.
///
/// The step shrinks as Kmax closes on Kc so the instability is resolved
/// rather than jumped over.
pub fn step_size(margin: f64) -> f64 {
    if margin < 0.05 {
        0.0005
    } else if margin < 0.15 {
        0.001
    } else if margin < 0.3 {
        0.002
    } else {
        0.005
    }
}

// Smallest crack increment; keeps the loop moving even hard against a
// geometry bound.
pub const MIN_STEP: f64 = 1e-8;

/// Sparse log cadence in steps.
pub const LOG_EVERY: u64 = 50;

fn display_tip(value: Option<f64>, width: usize) -> String {
    match value {
        Some(v) => format!("{:>width$.6}", v, width = width),
        None => format!("{:>width$}", "N/A", width = width),
    }
}

/// One line of the sparse trace.
pub fn format_log(sample: &Sample, tag: &str) -> String {
    format!(
        "{}N {:12.1}  a {} {}  K {:8.3}  dK {:8.3}  beta {:8.4}  dadn {:10.3e}  {}",
        COMMENT,
        sample.cycles,
        display_tip(sample.length.left, 10),
        display_tip(sample.length.right, 10),
        sample.kmax.max_present().unwrap_or(0.0),
        sample.dk.max_present().unwrap_or(0.0),
        sample.beta.max_present().unwrap_or(0.0),
        sample.rate.max_present().unwrap_or(0.0),
        tag
    )
}
