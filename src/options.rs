//! Command line options and their defaults.

use clap::{App, AppSettings, Arg};
use fracture::grow::Scenario;
use log::error;

/// Everything the command line can ask for.
pub struct Options {
    pub scenario: Scenario,
    /// extra peak stress levels to sweep in parallel
    pub sweep: Vec<f64>,
    pub list_cases: bool,
    pub list_materials: bool,
}

pub fn get_default_options() -> Options {
    Options {
        scenario: Scenario {
            case: "tc01".to_owned(),
            material: "aa2024-t3-sheet".to_owned(),
            initial: 0.05,
            params: fracture::beta::CaseParams {
                restraint: 1.0,
                ..fracture::beta::CaseParams::default()
            },
            ..Scenario::default()
        },
        sweep: Vec::new(),
        list_cases: false,
        list_materials: false,
    }
}

/// Get the options from the command line.
pub fn get_options_clap(options: &mut Options) {
    let process = App::new("dtgrow: A damage tolerance crack growth program")
        .version(crate_version!())
        .about(
            "Predicts fatigue crack growth life for flat panels, hole rows and \
             offset-hole panels under constant amplitude loading.",
        )
        .setting(AppSettings::AllowLeadingHyphen)
        .arg(
            Arg::with_name("case")
                .short("g")
                .long("case")
                .value_name("NAME")
                .help("select the crack case (default tc01, see --list-cases)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("material")
                .short("m")
                .long("material")
                .value_name("NAME")
                .help("select the material data (default aa2024-t3-sheet)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("smax")
                .short("s")
                .long("smax")
                .value_name("STRESS")
                .help("peak remote stress in ksi. There is no default, so a value must be specified by the user.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ratio")
                .short("r")
                .long("ratio")
                .value_name("R")
                .help("stress ratio Smin/Smax (default 0.0)")
                .takes_value(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::with_name("crack")
                .short("a")
                .long("crack")
                .value_name("LENGTH")
                .help("initial crack length in inches (default 0.05)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("crack2")
                .long("crack2")
                .value_name("LENGTH")
                .help("initial right tip crack length for the dual tip case")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .value_name("W")
                .help("plate width in inches")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("thickness")
                .short("t")
                .long("thickness")
                .value_name("T")
                .help("plate thickness in inches, used for the toughness correction")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("diameter")
                .short("d")
                .long("diameter")
                .value_name("D")
                .help("hole diameter in inches")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("pitch")
                .long("pitch")
                .value_name("H")
                .help("hole pitch along the row in inches")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("offset")
                .long("offset")
                .value_name("E0")
                .help("hole centre offset from the plate centreline in inches")
                .takes_value(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::with_name("restraint")
                .long("restraint")
                .value_name("ETA")
                .help("bending restraint factor in [0, 1]; 1 suppresses edge crack bending (default 1.0)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("bending")
                .long("bending")
                .value_name("S2")
                .help("in-plane bending stress in ksi (default 0.0)")
                .takes_value(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::with_name("bearing")
                .long("bearing")
                .value_name("S3")
                .help("bearing (pin load) stress in ksi (default 0.0)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("kc")
                .long("kc")
                .value_name("KC")
                .help("override the thickness-derived fracture toughness")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max_cycles")
                .long("max_cycles")
                .value_name("N")
                .help("stop after this many cycles (default 1e7)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max_steps")
                .long("max_steps")
                .value_name("N")
                .help("stop after this many integration steps (default 500000)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("sweep")
                .long("sweep")
                .value_name("S1,S2,...")
                .help("run a parallel sweep over these peak stress levels instead of a single run")
                .takes_value(true)
                .require_delimiter(true),
        )
        .arg(
            Arg::with_name("list_cases")
                .long("list-cases")
                .help("list the available crack cases and exit"),
        )
        .arg(
            Arg::with_name("list_materials")
                .long("list-materials")
                .help("list the built-in materials and exit"),
        );

    let matches = process.get_matches();

    let float = |name: &str, target: &mut f64| {
        if let Some(text) = matches.value_of(name) {
            match text.parse::<f64>() {
                Ok(value) => *target = value,
                Err(_) => {
                    error!("Error: option --{} expects a number, got '{}'", name, text);
                    std::process::exit(2);
                }
            }
        }
    };

    float("smax", &mut options.scenario.smax);
    float("ratio", &mut options.scenario.r);
    float("crack", &mut options.scenario.initial);
    float("width", &mut options.scenario.params.width);
    float("thickness", &mut options.scenario.params.thickness);
    float("diameter", &mut options.scenario.params.diameter);
    float("pitch", &mut options.scenario.params.pitch);
    float("offset", &mut options.scenario.params.offset);
    float("restraint", &mut options.scenario.params.restraint);
    float("bending", &mut options.scenario.params.bending);
    float("bearing", &mut options.scenario.params.bearing);
    float("max_cycles", &mut options.scenario.max_cycles);

    let optional = |name: &str, target: &mut Option<f64>| {
        if let Some(text) = matches.value_of(name) {
            match text.parse::<f64>() {
                Ok(value) => *target = Some(value),
                Err(_) => {
                    error!("Error: option --{} expects a number, got '{}'", name, text);
                    std::process::exit(2);
                }
            }
        }
    };

    optional("crack2", &mut options.scenario.initial2);
    optional("kc", &mut options.scenario.kc);

    if let Some(text) = matches.value_of("max_steps") {
        match text.parse::<u64>() {
            Ok(value) => options.scenario.max_steps = value,
            Err(_) => {
                error!("Error: option --max_steps expects an integer, got '{}'", text);
                std::process::exit(2);
            }
        }
    }

    if let Some(name) = matches.value_of("case") {
        options.scenario.case = name.to_owned();
    }
    if let Some(name) = matches.value_of("material") {
        options.scenario.material = name.to_owned();
    }

    if let Some(levels) = matches.values_of("sweep") {
        options.sweep = levels
            .map(|text| match text.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    error!("Error: option --sweep expects numbers, got '{}'", text);
                    std::process::exit(2);
                }
            })
            .collect();
    }

    options.list_cases = matches.is_present("list_cases");
    options.list_materials = matches.is_present("list_materials");
}
