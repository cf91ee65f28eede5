//! Irwin plastic zone correction.
//!
//! Ref. Anderson P. 485
//! Ref. Tada 1973 P. 1.17

use std::f64::consts::PI;

/// Irwin plastic zone radius ahead of the crack tip.
///
/// `alpha` is the constraint factor from the material record (between the
/// plane stress and plane strain bounds). The effective crack length used
/// by the corrected stress intensity is the physical length plus this
/// radius.
pub fn irwin_radius(k: f64, flow_stress: f64, alpha: f64) -> f64 {
    k.powi(2) / (2.0 * alpha * PI * flow_stress.powi(2))
}
