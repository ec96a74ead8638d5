pub mod formula;
mod solver;

#[cfg(test)]
mod brute_force;

/// Verdict of a solver run. Unsatisfiability is a first-class answer, not an
/// error; a satisfiable result carries a witness over the variables assigned
/// along the successful branch.
#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        match self {
            SatResult::Satisfiable(_) => true,
            SatResult::Unsatisfiable => false,
        }
    }
}

pub use formula::{Assignment, Clause, Formula, Literal, Variable};
pub use solver::{SearchObserver, Solver, TraceObserver};
