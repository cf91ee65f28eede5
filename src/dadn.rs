//! NASGRO crack growth rate equation.
//!
//! These routines are history independent and depend only on the current
//! $K_{max}$, the stress ratio $R$ and the material constants. The closure
//! model is Newman's crack opening function, the threshold follows the
//! R-dependent NASGRO form and the toughness is adjusted for thickness.
//!
//! Ref: AFGROW users guide and technical manual,
//! James A. Harter, AFRL-VA-WP-TR-1999-3016, Feb 1999.

use crate::material::Properties;
use log::debug;
use std::f64::consts::FRAC_PI_2;

/// Newman crack opening result.
#[derive(Debug, Clone, Copy)]
pub struct Closure {
    /// opening ratio f = Sop/Smax
    pub f: f64,
    /// the A0 closure coefficient, needed again by the threshold equation
    pub a0: f64,
}

/// Instantaneous growth rate and the intermediate quantities that are
/// worth reporting alongside it.
#[derive(Debug, Clone, Copy)]
pub struct Rate {
    /// crack growth increment per cycle
    pub dadn: f64,
    /// applied stress intensity range
    pub dk: f64,
    /// threshold stress intensity range at this R
    pub dk_th: f64,
    /// Newman opening ratio used
    pub f: f64,
}

/// Newman's crack opening function.
///
/// For R >= 0 the cubic fit is used, limited from below by R itself. For
/// negative R the linear form A0 + A1 R applies with no lower clamp: a
/// negative result is valid and means the crack faces never close.
pub fn newman_closure(r: f64, alpha: f64, smax_on_sigma0: f64) -> Closure {
    let a0 = (0.825 - 0.34 * alpha + 0.05 * alpha.powi(2))
        * (FRAC_PI_2 * smax_on_sigma0).cos().powf(1.0 / alpha);
    let a1 = (0.415 - 0.071 * alpha) * smax_on_sigma0;
    let a3 = 2.0 * a0 + a1 - 1.0;
    let a2 = 1.0 - a0 - a1 - a3;

    let f = if r >= 0.0 {
        (a0 + a1 * r + a2 * r.powi(2) + a3 * r.powi(3)).max(r)
    } else {
        a0 + a1 * r
    };

    Closure { f, a0 }
}

/// Threshold stress intensity range at stress ratio `r`.
///
/// Uses the threshold-specific closure constants when the material defines
/// them, otherwise falls back to the growth-rate constants. The stress
/// ratio is clamped to [-2, 0.7] before use.
pub fn threshold_deltak(r: f64, mat: &Properties) -> f64 {
    let alpha = mat.alpha_th.unwrap_or(mat.alpha);
    let smax_on_sigma0 = mat.smax_on_sigma0_th.unwrap_or(mat.smax_on_sigma0);

    let rc = r.max(-2.0).min(0.7);
    let Closure { f, a0 } = newman_closure(rc, alpha, smax_on_sigma0);

    let cth = if rc >= 0.0 {
        mat.cth_plus
    } else {
        mat.cth_minus
    };

    let ratio = ((1.0 - f) / (1.0 - a0)).max(1e-10);
    mat.dk1 * ratio.powf(1.0 + cth * rc)
}

/// Thickness-adjusted fracture toughness.
///
/// t0 is the transition thickness 2.5 (K1c / yield)^2; below it the
/// toughness rises towards the plane stress value K1c (1 + Bk).
pub fn toughness(thickness: f64, mat: &Properties) -> f64 {
    let t0 = 2.5 * (mat.k1c / mat.yield_stress).powi(2);
    mat.k1c * (1.0 + mat.bk * (-(mat.ak * thickness / t0).powi(2)).exp())
}

/// NASGRO growth rate at the given `kmax` and stress ratio.
///
/// Returns a zero rate (arrest) when the applied range is at or below the
/// threshold. The instability denominator is floored at 1e-3 so the rate
/// stays finite as Kmax approaches Kc.
pub fn growth_rate(kmax: f64, r: f64, mat: &Properties, kc: f64) -> Rate {
    let dk = kmax * (1.0 - r);
    let dk_th = threshold_deltak(r, mat);
    let Closure { f, .. } = newman_closure(r, mat.alpha, mat.smax_on_sigma0);

    if dk <= dk_th {
        return Rate {
            dadn: 0.0,
            dk,
            dk_th,
            f,
        };
    }

    let eff_dk = (((1.0 - f) / (1.0 - r)) * dk).max(0.0);
    let threshold_term = (1.0 - dk_th / dk).max(0.0).powf(mat.p);
    let fracture_term = (1.0 - kmax / kc).max(1e-3);

    let dadn = mat.c * eff_dk.powf(mat.n) * threshold_term / fracture_term.powf(mat.q);
    debug!(
        "nasgro: kmax {} r {} dk {} dk_th {} f {} dadn {}",
        kmax, r, dk, dk_th, f, dadn
    );

    Rate { dadn, dk, dk_th, f }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material;

    fn aa2024() -> &'static Properties {
        &material::get_material("aa2024-t3-sheet").unwrap().props
    }

    #[test]
    fn closure_a0_matches_hand_calculation() {
        // alpha = 1.5, Smax/sigma0 = 0.3:
        // A0 = (0.825 - 0.51 + 0.1125) cos(0.15 pi)^(2/3) = 0.395843
        let closure = newman_closure(0.0, 1.5, 0.3);
        assert!((closure.a0 - 0.395843).abs() < 1e-4);
        assert!((closure.f - closure.a0).abs() < f64::EPSILON);
    }

    #[test]
    fn closure_is_continuous_across_r_zero() {
        let below = newman_closure(-1e-9, 1.5, 0.3).f;
        let above = newman_closure(1e-9, 1.5, 0.3).f;
        assert!((below - above).abs() < 1e-6);
    }

    #[test]
    fn closure_is_not_clamped_for_negative_r() {
        // f(-2) = A0 - 2 A1 with A1 = (0.415 - 0.071 * 1.5) * 0.3 = 0.09255
        let closure = newman_closure(-2.0, 1.5, 0.3);
        assert!((closure.f - 0.210743).abs() < 1e-4);
        // a sufficiently severe Smax/sigma0 drives f below zero, which is
        // valid (fully open crack)
        let open = newman_closure(-2.0, 1.5, 0.9);
        assert!(open.f < 0.1);
    }

    #[test]
    fn threshold_at_r_zero_equals_dk1() {
        // the closure ratio is exactly one at R = 0
        let dk_th = threshold_deltak(0.0, aa2024());
        assert!((dk_th - aa2024().dk1).abs() < 1e-12);
    }

    #[test]
    fn threshold_decreases_with_increasing_positive_r() {
        let mat = aa2024();
        let mut previous = threshold_deltak(0.0, mat);
        for i in 1..=7 {
            let r = 0.1 * f64::from(i);
            let current = threshold_deltak(r, mat);
            assert!(current < previous, "threshold rose at R = {}", r);
            previous = current;
        }
    }

    #[test]
    fn threshold_clamps_r_beyond_limits() {
        let mat = aa2024();
        assert!((threshold_deltak(0.7, mat) - threshold_deltak(0.95, mat)).abs() < 1e-12);
        assert!((threshold_deltak(-2.0, mat) - threshold_deltak(-5.0, mat)).abs() < 1e-12);
    }

    #[test]
    fn toughness_of_thin_2024_sheet() {
        // t0 = 2.5 (33/53)^2 = 0.9692; Kc(0.063) = 33 (1 + 1.5 e^-0.004225)
        let kc = toughness(0.063, aa2024());
        assert!((kc - 82.29).abs() < 5e-3);
    }

    #[test]
    fn toughness_tends_to_plane_strain_for_thick_sections() {
        let mat = aa2024();
        let kc = toughness(20.0, mat);
        assert!((kc - mat.k1c).abs() / mat.k1c < 1e-6);
    }

    #[test]
    fn rate_is_zero_at_or_below_threshold() {
        let mat = aa2024();
        let kc = toughness(0.063, mat);
        // at R = 0 the threshold is dk1 = 2.9, so kmax = 2.9 means dk = dk_th
        let rate = growth_rate(2.9, 0.0, mat, kc);
        assert!(rate.dadn.abs() < f64::EPSILON);
        let rate = growth_rate(1.0, 0.0, mat, kc);
        assert!(rate.dadn.abs() < f64::EPSILON);
    }

    #[test]
    fn rate_is_monotonic_in_kmax_below_kc() {
        let mat = aa2024();
        let kc = toughness(0.063, mat);
        let mut previous = 0.0;
        for i in 1..80 {
            let kmax = f64::from(i);
            if kmax >= kc {
                break;
            }
            let rate = growth_rate(kmax, 0.1, mat, kc).dadn;
            assert!(rate >= previous, "rate fell at kmax = {}", kmax);
            previous = rate;
        }
    }

    #[test]
    fn rate_matches_hand_calculation_at_r_zero() {
        // kmax = 10, R = 0, Kc = 82.29:
        //   effDK = 0.604157 * 10, threshold term sqrt(0.71),
        //   fracture term 1 - 10/82.29
        let mat = aa2024();
        let rate = growth_rate(10.0, 0.0, mat, 82.2913);
        let expected = 1.9125e-6;
        assert!((rate.dadn - expected).abs() / expected < 0.02);
    }

    #[test]
    fn rate_stays_finite_as_kmax_approaches_kc() {
        let mat = aa2024();
        let kc = 80.0;
        let at_kc = growth_rate(kc, 0.0, mat, kc).dadn;
        let above = growth_rate(kc * 1.01, 0.0, mat, kc).dadn;
        assert!(at_kc.is_finite());
        assert!(above.is_finite());
    }
}
