//! The integration loop for a single growth prediction.
//!
//! One `Growth` owns the crack state for one run. The loop branches on a
//! `Phase` value so the dual-crack configuration and its post-link-up
//! edge crack share the accumulated cycle count, step count and output
//! series instead of handing them between functions.

use crate::beta::{self, CrackCase, Tip};
use crate::dadn;
use crate::material::{self, Properties};
use crate::plastic;
use log::info;

use super::{
    format_log, step_size, FailureMode, GrowError, RunResult, Sample, Scenario, TipValue,
    LOG_EVERY, MIN_STEP,
};

// Crack configuration the loop is currently growing.
#[derive(Debug, Clone, Copy)]
enum Phase {
    Single { a: f64 },
    Dual { c1: f64, c2: f64 },
    Edge { a: f64 },
}

// What one step decided.
enum Step {
    Advance { sample: Sample, phase: Phase, dn: f64 },
    LinkUp { surviving: f64 },
    Terminate { mode: FailureMode },
}

/// A single crack growth run.
pub struct Growth {
    case: Box<dyn CrackCase + Send + Sync>,
    mat: Properties,
    smax: f64,
    r: f64,
    kc: f64,
    flow: f64,
    max_cycles: f64,
    max_steps: u64,
    phase: Phase,
}

impl Growth {
    /// Validate a scenario and set up a run. All input errors surface
    /// here; once `run` starts every outcome is a termination mode.
    pub fn new(scenario: &Scenario) -> Result<Growth, GrowError> {
        let data = material::get_material(&scenario.material)
            .ok_or_else(|| GrowError::UnknownMaterial(scenario.material.clone()))?;
        let mat = data.props.clone();
        mat.validate()?;

        if scenario.smax <= 0.0 {
            return Err(GrowError::InvalidInput(format!(
                "peak stress must be positive, got {}",
                scenario.smax
            )));
        }
        if !scenario.r.is_finite() || scenario.r >= 1.0 {
            return Err(GrowError::InvalidInput(format!(
                "stress ratio must be < 1, got {}",
                scenario.r
            )));
        }

        let case = beta::get_case(&scenario.case, &scenario.params)?;

        let kc = match scenario.kc {
            Some(kc) if kc > 0.0 => kc,
            Some(kc) => {
                return Err(GrowError::InvalidInput(format!(
                    "toughness override must be positive, got {}",
                    kc
                )));
            }
            None => {
                if scenario.params.thickness <= 0.0 {
                    return Err(GrowError::InvalidInput(format!(
                        "thickness must be positive, got {}",
                        scenario.params.thickness
                    )));
                }
                dadn::toughness(scenario.params.thickness, &mat)
            }
        };

        let check_initial = |label: &str, value: f64, bound: f64| {
            if value <= 0.0 {
                return Err(GrowError::InvalidInput(format!(
                    "initial crack {} must be positive, got {}",
                    label, value
                )));
            }
            if value >= bound {
                return Err(GrowError::InvalidInput(format!(
                    "initial crack {} of {} is at or past the geometry bound {}",
                    label, value, bound
                )));
            }
            Ok(())
        };

        let phase = if case.tips().len() == 2 {
            let c2 = scenario.initial2.ok_or_else(|| {
                GrowError::InvalidInput(
                    "a dual tip case needs both initial crack lengths".to_owned(),
                )
            })?;
            check_initial("c1", scenario.initial, case.max_crack(Tip::Left))?;
            check_initial("c2", c2, case.max_crack(Tip::Right))?;
            Phase::Dual {
                c1: scenario.initial,
                c2,
            }
        } else {
            check_initial("a", scenario.initial, case.max_crack(Tip::Left))?;
            Phase::Single {
                a: scenario.initial,
            }
        };

        Ok(Growth {
            case,
            flow: mat.flow_stress(),
            mat,
            smax: scenario.smax,
            r: scenario.r,
            kc,
            max_cycles: scenario.max_cycles,
            max_steps: scenario.max_steps,
            phase,
        })
    }

    /// Run the prediction to termination.
    pub fn run(&mut self) -> RunResult {
        let mut history: Vec<Sample> = Vec::new();
        let mut log: Vec<String> = Vec::new();
        let mut cycles = 0.0;
        let mut steps: u64 = 0;
        let mut transition: Option<f64> = None;

        let mode = loop {
            if steps >= self.max_steps {
                break FailureMode::MaxStepsReached;
            }
            if cycles >= self.max_cycles {
                break FailureMode::MaxCyclesReached;
            }

            let outcome = match self.phase {
                Phase::Single { a } | Phase::Edge { a } => self.advance_single(a, cycles),
                Phase::Dual { c1, c2 } => self.advance_dual(c1, c2, cycles),
            };

            match outcome {
                Step::Advance { sample, phase, dn } => {
                    cycles += dn;
                    if steps % LOG_EVERY == 0 {
                        log.push(format_log(&sample, ""));
                    }
                    history.push(sample);
                    self.phase = phase;
                    steps += 1;
                }
                Step::LinkUp { surviving } => {
                    // the ligament between hole and near edge has failed;
                    // the structure still carries load on one edge crack
                    let (successor, a_edge) = match self.case.link_up(surviving) {
                        Some(result) => result,
                        None => break FailureMode::GeometryLimit,
                    };
                    info!("link-up at N = {}, edge crack length {}", cycles, a_edge);
                    transition = Some(cycles);
                    let sample = Sample {
                        cycles,
                        length: TipValue::single(a_edge),
                        kmax: TipValue::default(),
                        dk: TipValue::default(),
                        beta: TipValue::default(),
                        rate: TipValue::default(),
                    };
                    log.push(format_log(&sample, "LINK-UP"));
                    history.push(sample);
                    self.case = successor;
                    self.phase = Phase::Edge { a: a_edge };
                    steps += 1;
                }
                Step::Terminate { mode } => break mode,
            }
        };

        let final_length = match self.phase {
            Phase::Single { a } | Phase::Edge { a } => TipValue::single(a),
            Phase::Dual { c1, c2 } => TipValue::pair(c1, c2),
        };
        if let Some(sample) = history.last() {
            log.push(format_log(sample, mode.tag()));
        }
        info!(
            "run finished: {} after {:.0} cycles in {} steps",
            mode, cycles, steps
        );

        RunResult {
            mode,
            final_length,
            cycles,
            steps,
            kc: self.kc,
            transition,
            history,
            log,
        }
    }

    // Apply the two-iteration Irwin correction to a stress intensity. A
    // correction that leaves the valid geometry domain is discarded in
    // favour of the last accepted value.
    fn corrected_k(&self, this: f64, other: f64, tip: Tip, base: f64) -> f64 {
        let mut k = base;
        for _ in 0..2 {
            let ry = plastic::irwin_radius(k, self.flow, self.mat.alpha);
            match self.case.k(this + ry, other, self.smax, tip) {
                Ok(corrected) => k = corrected,
                Err(_) => break,
            }
        }
        k
    }

    fn advance_single(&self, a: f64, cycles: f64) -> Step {
        let bound = self.case.max_crack(Tip::Left);
        if a >= bound {
            return Step::Terminate {
                mode: FailureMode::GeometryLimit,
            };
        }

        let evaluated = self
            .case
            .beta(a, 0.0, Tip::Left)
            .and_then(|beta| self.case.k(a, 0.0, self.smax, Tip::Left).map(|k| (beta, k)));
        let (beta, base_k) = match evaluated {
            Ok(result) => result,
            Err(_) => {
                return Step::Terminate {
                    mode: FailureMode::GeometryLimit,
                }
            }
        };
        let kmax = self.corrected_k(a, 0.0, Tip::Left, base_k);

        if kmax >= self.kc {
            return Step::Terminate {
                mode: FailureMode::Fracture,
            };
        }
        if self.case.net_section_stress(a, 0.0, self.smax) >= self.flow {
            return Step::Terminate {
                mode: FailureMode::NetSectionYield,
            };
        }

        let rate = dadn::growth_rate(kmax, self.r, &self.mat, self.kc);
        if rate.dadn <= 0.0 {
            return Step::Terminate {
                mode: FailureMode::ThresholdArrest,
            };
        }

        let margin = 1.0 - kmax / self.kc;
        let da = step_size(margin).min(bound - a).max(MIN_STEP);
        let dn = da / rate.dadn;
        let a_next = a + da;

        let sample = Sample {
            cycles: cycles + dn,
            length: TipValue::single(a_next),
            kmax: TipValue::single(kmax),
            dk: TipValue::single(rate.dk),
            beta: TipValue::single(beta),
            rate: TipValue::single(rate.dadn),
        };
        let phase = match self.phase {
            Phase::Edge { .. } => Phase::Edge { a: a_next },
            _ => Phase::Single { a: a_next },
        };

        Step::Advance { sample, phase, dn }
    }

    fn advance_dual(&self, c1: f64, c2: f64, cycles: f64) -> Step {
        // Right tip reaching its bound, its toughness or the edge of its
        // beta domain is ligament break-through, not ordinary failure.
        if c2 >= self.case.max_crack(Tip::Right) {
            return Step::LinkUp { surviving: c1 };
        }
        if c1 >= self.case.max_crack(Tip::Left) {
            return Step::Terminate {
                mode: FailureMode::GeometryLimit,
            };
        }

        let evaluated = self
            .case
            .beta(c2, c1, Tip::Right)
            .and_then(|beta| self.case.k(c2, c1, self.smax, Tip::Right).map(|k| (beta, k)));
        let (beta_right, k_right) = match evaluated {
            Ok((beta, base)) => (beta, self.corrected_k(c2, c1, Tip::Right, base)),
            Err(_) => return Step::LinkUp { surviving: c1 },
        };
        if k_right >= self.kc {
            return Step::LinkUp { surviving: c1 };
        }

        let evaluated = self
            .case
            .beta(c1, c2, Tip::Left)
            .and_then(|beta| self.case.k(c1, c2, self.smax, Tip::Left).map(|k| (beta, k)));
        let (beta_left, k_left) = match evaluated {
            Ok((beta, base)) => (beta, self.corrected_k(c1, c2, Tip::Left, base)),
            Err(_) => {
                return Step::Terminate {
                    mode: FailureMode::GeometryLimit,
                }
            }
        };
        if k_left >= self.kc {
            return Step::Terminate {
                mode: FailureMode::Fracture,
            };
        }

        if self.case.net_section_stress(c1, c2, self.smax) >= self.flow {
            return Step::Terminate {
                mode: FailureMode::NetSectionYield,
            };
        }

        let rate_left = dadn::growth_rate(k_left, self.r, &self.mat, self.kc);
        let rate_right = dadn::growth_rate(k_right, self.r, &self.mat, self.kc);
        if rate_left.dadn <= 0.0 && rate_right.dadn <= 0.0 {
            return Step::Terminate {
                mode: FailureMode::ThresholdArrest,
            };
        }

        // Both tips share the cycle increment; the faster tip takes the
        // full length step and the other grows at its own rate.
        let k_worst = k_left.max(k_right);
        let margin = 1.0 - k_worst / self.kc;
        let rate_max = rate_left.dadn.max(rate_right.dadn);
        let mut dn = step_size(margin) / rate_max;
        if rate_left.dadn > 0.0 {
            dn = dn.min((self.case.max_crack(Tip::Left) - c1) / rate_left.dadn);
        }
        if rate_right.dadn > 0.0 {
            dn = dn.min((self.case.max_crack(Tip::Right) - c2) / rate_right.dadn);
        }
        dn = dn.max(MIN_STEP / rate_max);

        let c1_next = c1 + rate_left.dadn * dn;
        let c2_next = c2 + rate_right.dadn * dn;

        let sample = Sample {
            cycles: cycles + dn,
            length: TipValue::pair(c1_next, c2_next),
            kmax: TipValue::pair(k_left, k_right),
            dk: TipValue::pair(rate_left.dk, rate_right.dk),
            beta: TipValue::pair(beta_left, beta_right),
            rate: TipValue::pair(rate_left.dadn, rate_right.dadn),
        };

        Step::Advance {
            sample,
            phase: Phase::Dual {
                c1: c1_next,
                c2: c2_next,
            },
            dn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beta::CaseParams;

    fn centre_crack_scenario() -> Scenario {
        Scenario {
            case: "tc01".to_owned(),
            params: CaseParams {
                width: 10.0,
                thickness: 0.063,
                ..CaseParams::default()
            },
            material: "aa2024-t3-sheet".to_owned(),
            initial: 0.25,
            smax: 20.0,
            r: 0.0,
            ..Scenario::default()
        }
    }

    fn offset_hole_scenario() -> Scenario {
        Scenario {
            case: "tc23".to_owned(),
            params: CaseParams {
                width: 4.0,
                thickness: 0.063,
                diameter: 0.25,
                offset: 0.5,
                restraint: 1.0,
                ..CaseParams::default()
            },
            material: "aa2024-t3-sheet".to_owned(),
            initial: 0.05,
            initial2: Some(0.08),
            smax: 20.0,
            r: 0.0,
            ..Scenario::default()
        }
    }

    #[test]
    fn centre_crack_run_terminates_physically() {
        let scenario = centre_crack_scenario();
        let mut growth = Growth::new(&scenario).unwrap();
        let result = growth.run();

        assert!(result.mode.is_physical(), "ran into a cap: {}", result.mode);
        assert!(result.cycles > 0.0);
        assert!(!result.history.is_empty());
        assert!(!result.log.is_empty());

        // the toughness comes from the thickness correction
        let mat = &crate::material::get_material("aa2024-t3-sheet").unwrap().props;
        assert!((result.kc - crate::dadn::toughness(0.063, mat)).abs() < 5e-3);

        // crack length never shrinks
        let mut previous = scenario.initial;
        for sample in &result.history {
            let a = sample.length.left.unwrap();
            assert!(a >= previous);
            previous = a;
        }
    }

    #[test]
    fn tiny_stress_arrests_before_any_growth() {
        let mut scenario = centre_crack_scenario();
        scenario.smax = 1.0;
        let result = Growth::new(&scenario).unwrap().run();

        assert_eq!(result.mode, FailureMode::ThresholdArrest);
        assert_eq!(result.steps, 0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn step_cap_is_reported_distinctly() {
        let mut scenario = centre_crack_scenario();
        scenario.max_steps = 10;
        let result = Growth::new(&scenario).unwrap().run();

        assert_eq!(result.mode, FailureMode::MaxStepsReached);
        assert_eq!(result.steps, 10);
    }

    #[test]
    fn cycle_cap_is_reported_distinctly() {
        let mut scenario = centre_crack_scenario();
        scenario.max_cycles = 1.0;
        let result = Growth::new(&scenario).unwrap().run();

        assert_eq!(result.mode, FailureMode::MaxCyclesReached);
        assert_eq!(result.steps, 1);
    }

    #[test]
    fn toughness_override_is_used_verbatim() {
        let mut scenario = centre_crack_scenario();
        scenario.kc = Some(50.0);
        let result = Growth::new(&scenario).unwrap().run();
        assert!((result.kc - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_inputs_are_rejected_before_the_loop() {
        let mut scenario = centre_crack_scenario();
        scenario.r = 1.0;
        assert!(Growth::new(&scenario).is_err());

        let mut scenario = centre_crack_scenario();
        scenario.smax = -5.0;
        assert!(Growth::new(&scenario).is_err());

        let mut scenario = centre_crack_scenario();
        scenario.initial = 9.6;
        assert!(Growth::new(&scenario).is_err());

        let mut scenario = centre_crack_scenario();
        scenario.material = "unobtainium".to_owned();
        assert!(Growth::new(&scenario).is_err());

        let mut scenario = offset_hole_scenario();
        scenario.initial2 = None;
        assert!(Growth::new(&scenario).is_err());

        let mut scenario = centre_crack_scenario();
        scenario.params.thickness = 0.0;
        assert!(Growth::new(&scenario).is_err());
    }

    #[test]
    fn offset_hole_run_links_up_exactly_once() {
        let scenario = offset_hole_scenario();
        let result = Growth::new(&scenario).unwrap().run();

        assert!(result.transition.is_some(), "no link-up: {}", result.mode);
        assert!(result.mode.is_physical());

        // exactly one dual-to-edge boundary in the series
        let mut transitions = 0;
        let mut index = 0;
        for i in 1..result.history.len() {
            if result.history[i - 1].length.right.is_some()
                && result.history[i].length.right.is_none()
            {
                transitions += 1;
                index = i;
            }
        }
        assert_eq!(transitions, 1);

        // the edge crack spans the surviving crack, the hole and the
        // broken ligament
        let c1 = result.history[index - 1].length.left.unwrap();
        let expected = c1 + 0.25 + (4.0 / 2.0 - 0.5 - 0.125);
        assert!((result.history[index].length.left.unwrap() - expected).abs() < 1e-12);

        // and the trace records the event
        assert!(result.log.iter().any(|line| line.contains("LINK-UP")));
    }
}
