use clap::{App, Arg};
use dpllsat::formula::dimacs::{parse, DimacsParseError};
use dpllsat::formula::Formula;
use dpllsat::*;
use std::fs::File;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .arg(Arg::with_name("INPUT").help("input file (in DIMACS CNF)").index(1))
        .arg(
            Arg::with_name("trace")
                .long("trace")
                .help("log every recursive call (needs RUST_LOG=trace)"),
        )
        .get_matches();

    let f = if let Some(path) = matches.value_of("INPUT") {
        parse_from_file(path)
    } else {
        parse(std::io::stdin())
    };

    match f {
        Ok(f) => {
            let solver = Solver::new(f);

            let result = if matches.is_present("trace") {
                solver.solve_with(&mut TraceObserver)
            } else {
                solver.solve()
            };

            let exit_code = match result {
                SatResult::Satisfiable(model) => {
                    println!("s SATISFIABLE");
                    println!("{}", model_line(&model));
                    0
                }
                SatResult::Unsatisfiable => {
                    println!("s UNSATISFIABLE");
                    1
                }
            };
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("parse error: {:?}", e);
            std::process::exit(-1);
        }
    }
}

fn parse_from_file(path: &str) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn model_line(model: &Assignment) -> String {
    let mut line = String::from("v");
    for (Variable(x), value) in model.iter() {
        line.push_str(&format!(" {}{}", if value { "" } else { "-" }, x));
    }
    line.push_str(" 0");
    line
}
