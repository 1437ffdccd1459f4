//! HPSO driver CLI
//!
//! Interprets one configuration command and evaluates it at a chosen
//! precision.

use hpsoc::commands::{run_check, run_distance, run_function, run_operation, run_rng};
use hpsoc::{init_tracing, parse_options, CommandError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    match command {
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" => {
            println!("hpso {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {}
    }

    let options = match parse_options(&args[2..]) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    init_tracing(options.verbose);

    let result = match command {
        "function" => run_function(&options),
        "distance" => run_distance(&options),
        "operation" => run_operation(&options),
        "rng" => run_rng(&options),
        "check" => run_check(&options),
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => print!("{output}"),
        Err(error @ CommandError::Uninterpretable { .. }) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("HPSO expression interpreter");
    println!();
    println!("Usage: hpso <command> [options] <tokens...>");
    println!();
    println!("Commands:");
    println!("  function --at=<x1,...>            Evaluate an objective function");
    println!("  distance --at=<x1,...> --dim=<d>  Distance to the local optimum along <d>");
    println!("  operation --at=<x>                Apply a unary operation");
    println!("  rng [--draws=<n>]                 Print integer and uniform draws");
    println!("  check <kind>                      Parse only (function, specific,");
    println!("                                    statistic, operation, rng)");
    println!("  help                              Show this help message");
    println!();
    println!("Options:");
    println!("  --precision=<bits>                Working precision (default 32)");
    println!("  --safety-margin=<bits>            Bits an addition may lose before warning");
    println!("  --output-precision=<digits>       Digits after the point, -1 to derive");
    println!("  --check-precision=<mode>          all, allExceptStatistics or never");
    println!("  --check-probability=<p>           Fraction of additions checked");
    println!("  --bounds=<mode>                   clamp, normal, infinity or periodic");
    println!("  --verify                          Re-evaluate at twice the precision");
    println!("  --verbose                         Debug tracing on stderr");
    println!();
    println!("Example:");
    println!("  hpso function --precision=256 --at=3,4 pow 0.5 standard sphere");
}
