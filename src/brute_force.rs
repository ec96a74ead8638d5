use crate::formula::{Assignment, Formula, Variable};
use crate::SatResult;
use std::collections::BTreeSet;

// Truth-table oracle for the property tests: enumerate every assignment over
// the variables the formula actually mentions.
pub(crate) fn solve_brute_force(f: &Formula) -> SatResult {
    let variables: Vec<Variable> = f
        .clauses()
        .flat_map(|clause| clause.variables())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    assert!(variables.len() <= 20); // just for safety

    for bits in 0..(1u32 << variables.len()) {
        let assignment: Assignment = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, bits & (1 << i) != 0))
            .collect();
        if f.satisfied_by(&assignment) {
            return SatResult::Satisfiable(assignment);
        }
    }
    SatResult::Unsatisfiable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p, Clause};

    #[test]
    fn brute_force_sat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let f = Formula::new(vec![c1, c2]);

        match solve_brute_force(&f) {
            SatResult::Satisfiable(model) => assert!(f.satisfied_by(&model)),
            SatResult::Unsatisfiable => panic!("expected a model"),
        }
    }

    #[test]
    fn brute_force_unsat() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let c3 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn brute_force_empty_formula() {
        assert_eq!(
            solve_brute_force(&Formula::new(vec![])),
            SatResult::Satisfiable(Assignment::new())
        );
    }

    #[test]
    fn brute_force_empty_clause() {
        let f = Formula::new(vec![Clause::new(vec![])]);
        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn brute_force_sparse_variable_ids() {
        // variable ids need not be dense or start at zero
        let f = Formula::new(vec![Clause::new(vec![p(17)]), Clause::new(vec![n(99)])]);
        match solve_brute_force(&f) {
            SatResult::Satisfiable(model) => {
                assert_eq!(model.get(Variable(17)), Some(true));
                assert_eq!(model.get(Variable(99)), Some(false));
            }
            SatResult::Unsatisfiable => panic!("expected a model"),
        }
    }
}
