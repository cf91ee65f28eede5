#![allow(clippy::unreadable_literal)]

//! Database of NASGRO equation constants for typical airframe alloys.
//!
//! All values are in English units: stresses in ksi, lengths in inches,
//! stress intensities in ksi sqrt(in). Each entry is a plain data record;
//! the behaviour lives in the `dadn` and `grow` modules.

use crate::grow::GrowError;
use std::collections::BTreeMap;

/// NASGRO equation constants for one alloy/product form.
#[derive(Debug, Clone)]
pub struct Properties {
    /// Paris coefficient
    pub c: f64,
    /// Paris exponent
    pub n: f64,
    /// threshold exponent
    pub p: f64,
    /// instability exponent
    pub q: f64,
    /// threshold stress intensity range at R = 0
    pub dk1: f64,
    /// threshold curve control coefficient for R >= 0
    pub cth_plus: f64,
    /// threshold curve control coefficient for R < 0
    pub cth_minus: f64,
    /// plane strain fracture toughness
    pub k1c: f64,
    /// thickness-toughness fit coefficient
    pub ak: f64,
    /// thickness-toughness fit coefficient
    pub bk: f64,
    /// tensile yield strength
    pub yield_stress: f64,
    /// ultimate tensile strength
    pub ultimate: f64,
    /// Newman closure constraint factor
    pub alpha: f64,
    /// ratio of maximum applied stress to flow stress
    pub smax_on_sigma0: f64,
    /// constraint factor for the threshold closure, if measured separately
    pub alpha_th: Option<f64>,
    /// stress ratio for the threshold closure, if measured separately
    pub smax_on_sigma0_th: Option<f64>,
}

/// A named material entry with its literature source.
pub struct MaterialData {
    pub name: &'static str,
    pub cite: &'static str,
    pub units: &'static str,
    pub props: Properties,
}

impl Properties {
    /// Check that the constants are usable before a run is started.
    ///
    /// Everything must be strictly positive except the threshold curve
    /// coefficients which may be zero.
    pub fn validate(&self) -> Result<(), GrowError> {
        let strict = [
            ("c", self.c),
            ("n", self.n),
            ("p", self.p),
            ("q", self.q),
            ("dk1", self.dk1),
            ("k1c", self.k1c),
            ("ak", self.ak),
            ("bk", self.bk),
            ("yield_stress", self.yield_stress),
            ("ultimate", self.ultimate),
            ("alpha", self.alpha),
            ("smax_on_sigma0", self.smax_on_sigma0),
        ];
        for (label, value) in &strict {
            if *value <= 0.0 {
                return Err(GrowError::InvalidInput(format!(
                    "material constant {} must be positive, got {}",
                    label, value
                )));
            }
        }
        if self.cth_plus < 0.0 || self.cth_minus < 0.0 {
            return Err(GrowError::InvalidInput(format!(
                "threshold coefficients must not be negative, got cth+ {} cth- {}",
                self.cth_plus, self.cth_minus
            )));
        }
        Ok(())
    }

    /// Flow stress used by the net-section and plastic zone checks.
    pub fn flow_stress(&self) -> f64 {
        0.5 * (self.yield_stress + self.ultimate)
    }
}

lazy_static! {
    static ref MATERIALS: BTreeMap<&'static str, MaterialData> = {
        let mut materials = BTreeMap::new();

        let mut name = "aa2024-t3-sheet";
        materials.insert(
            name,
            MaterialData {
                name,
                cite: "[Forman 05]",
                units: "ksi.in",
                props: Properties {
                    c: 6.31e-9,
                    n: 3.2,
                    p: 0.5,
                    q: 1.0,
                    dk1: 2.9,
                    cth_plus: 1.5,
                    cth_minus: 0.1,
                    k1c: 33.0,
                    ak: 1.0,
                    bk: 1.5,
                    yield_stress: 53.0,
                    ultimate: 65.0,
                    alpha: 1.5,
                    smax_on_sigma0: 0.3,
                    alpha_th: None,
                    smax_on_sigma0_th: None,
                },
            },
        );

        name = "aa7075-t6-sheet";
        materials.insert(
            name,
            MaterialData {
                name,
                cite: "[Forman 05]",
                units: "ksi.in",
                props: Properties {
                    c: 1.2e-8,
                    n: 3.0,
                    p: 0.5,
                    q: 1.0,
                    dk1: 2.0,
                    cth_plus: 1.5,
                    cth_minus: 0.1,
                    k1c: 28.0,
                    ak: 1.0,
                    bk: 1.0,
                    yield_stress: 68.0,
                    ultimate: 78.0,
                    alpha: 1.9,
                    smax_on_sigma0: 0.3,
                    alpha_th: None,
                    smax_on_sigma0_th: None,
                },
            },
        );

        name = "aa7050-t7451-plate";
        materials.insert(
            name,
            MaterialData {
                name,
                cite: "[Forman 05]",
                units: "ksi.in",
                props: Properties {
                    c: 8.0e-9,
                    n: 2.9,
                    p: 0.5,
                    q: 1.0,
                    dk1: 2.5,
                    cth_plus: 1.5,
                    cth_minus: 0.1,
                    k1c: 31.0,
                    ak: 1.0,
                    bk: 0.75,
                    yield_stress: 64.0,
                    ultimate: 74.0,
                    alpha: 2.0,
                    smax_on_sigma0: 0.3,
                    alpha_th: Some(2.0),
                    smax_on_sigma0_th: Some(0.3),
                },
            },
        );

        name = "ti-6al-4v-annealed";
        materials.insert(
            name,
            MaterialData {
                name,
                cite: "[Harter 99]",
                units: "ksi.in",
                props: Properties {
                    c: 2.0e-9,
                    n: 3.5,
                    p: 0.25,
                    q: 0.75,
                    dk1: 4.0,
                    cth_plus: 1.0,
                    cth_minus: 0.1,
                    k1c: 55.0,
                    ak: 1.0,
                    bk: 0.5,
                    yield_stress: 120.0,
                    ultimate: 130.0,
                    alpha: 2.5,
                    smax_on_sigma0: 0.3,
                    alpha_th: None,
                    smax_on_sigma0_th: None,
                },
            },
        );

        materials
    };
}

/// Look up a built-in material by name.
pub fn get_material(name: &str) -> Option<&'static MaterialData> {
    MATERIALS.get(name)
}

/// Names of all built-in materials, for listings.
pub fn material_names() -> Vec<&'static str> {
    MATERIALS.keys().copied().collect()
}
