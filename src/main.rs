/// dtgrow
///
/// A program to predict damage tolerance life for cracked panels.
///
/// The program grows a crack under constant amplitude loading until the
/// panel fails by fracture or net-section yield, the crack runs out of
/// the geometry, or growth arrests below threshold. All of the
/// calculations are done through calls to the associated **fracture**
/// library which is included; the main program only collects the command
/// line flags into a `Scenario`, runs it and prints the result.
///
/// Think of the program flow as
///
/// 1. Collect the scenario from the command line flags
/// 2. Run the growth prediction (or a parallel stress sweep)
/// 3. Write out the sparse trace and the terminal record

#[macro_use]
extern crate clap;
extern crate env_logger;
extern crate fracture;
extern crate log;

use fracture::grow::{sweep, Growth, RunResult};
use fracture::{beta, material, COMMENT};
use log::error;

mod options;

fn main() {
    env_logger::init();

    let mut options = options::get_default_options();
    options::get_options_clap(&mut options);
    println!("{}dtgrow: version {}", COMMENT, crate_version!());
    println!("{}", COMMENT);

    if options.list_cases {
        print_cases();
        return;
    }
    if options.list_materials {
        print_materials();
        return;
    }

    if !options.sweep.is_empty() {
        run_sweep(&options);
        return;
    }

    let mut growth = match Growth::new(&options.scenario) {
        Ok(growth) => growth,
        Err(why) => {
            error!("Error: {}", why);
            std::process::exit(1)
        }
    };

    let result = growth.run();
    for line in &result.log {
        println!("{}", line);
    }
    print_summary(&result);
}

fn run_sweep(options: &options::Options) {
    println!(
        "{}Sweeping {} stress levels in parallel",
        COMMENT,
        options.sweep.len()
    );

    for (smax, outcome) in sweep::stress_sweep(&options.scenario, &options.sweep) {
        match outcome {
            Ok(result) => println!(
                "{}smax {:8.2}: {} at {:12.0} cycles ({} steps)",
                COMMENT, smax, result.mode, result.cycles, result.steps
            ),
            Err(why) => println!("{}smax {:8.2}: error: {}", COMMENT, smax, why),
        }
    }
}

fn print_summary(result: &RunResult) {
    println!("{}", COMMENT);
    println!("{}Failure mode: {}", COMMENT, result.mode);
    match (result.final_length.left, result.final_length.right) {
        (Some(left), Some(right)) => {
            println!("{}Final crack lengths: c1 {:.6} c2 {:.6}", COMMENT, left, right)
        }
        (Some(left), None) => println!("{}Final crack length: {:.6}", COMMENT, left),
        _ => {}
    }
    println!("{}Total cycles: {:.0}", COMMENT, result.cycles);
    println!("{}Total steps: {}", COMMENT, result.steps);
    println!("{}Kc used: {:.2}", COMMENT, result.kc);
    if let Some(transition) = result.transition {
        println!("{}Link-up at cycle: {:.0}", COMMENT, transition);
    }
}

fn print_cases() {
    println!("{}Available crack cases:", COMMENT);
    for case in beta::get_all_cases() {
        println!(
            "{}{:18} {:70} {} ({})",
            COMMENT, case.name, case.summary, case.cite, case.args
        );
    }
}

fn print_materials() {
    println!("{}Built-in materials:", COMMENT);
    for name in material::material_names() {
        let data = material::get_material(name).unwrap();
        println!("{}{:24} {:8} {}", COMMENT, data.name, data.units, data.cite);
    }
}
