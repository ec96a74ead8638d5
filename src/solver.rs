use crate::formula::{Assignment, Clause, Formula, Variable};
use crate::SatResult;
use log::trace;

/// What the variable selector found in the current formula.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Selection {
    /// No clause mentions any variable: the assignment so far is a model.
    Solved,
    /// An empty clause is present: this branch cannot be extended.
    Conflict,
    /// Branch on this variable next.
    Branch(Variable),
}

/// Pick the next branching variable. Unit clauses win over everything else;
/// otherwise the first variable of the first clause is taken, which together
/// with the ordered clause maps keeps the search path deterministic.
fn next_var(formula: &Formula) -> Selection {
    if formula.clauses().any(Clause::is_empty) {
        return Selection::Conflict;
    }
    for clause in formula.clauses() {
        if let Some(v) = clause.unit() {
            return Selection::Branch(v);
        }
    }
    match formula.clauses().flat_map(Clause::variables).next() {
        Some(v) => Selection::Branch(v),
        None => Selection::Solved,
    }
}

/// Cheap pruning check: does `variable := value` contradict a unit clause?
/// Multi-literal clauses are exempt since another of their literals can still
/// satisfy them; only a unit clause pins the variable outright.
fn can_assign(value: bool, variable: Variable, formula: &Formula) -> bool {
    formula
        .clauses()
        .filter(|clause| clause.len() == 1)
        .all(|clause| match clause.polarity(variable) {
            Some(required) => required == value,
            None => true,
        })
}

/// Reduce the formula under `variable := value`: clauses satisfied by the
/// binding are dropped, every other clause has the variable stripped. The
/// input is untouched and the variable never survives into the result.
fn remove_var(value: bool, variable: Variable, formula: &Formula) -> Formula {
    Formula::new(formula.clauses().filter_map(|clause| {
        match clause.polarity(variable) {
            Some(required) if required == value => None,
            Some(_) | None => Some(clause.without(variable)),
        }
    }))
}

/// Observes the recursive search without influencing it.
pub trait SearchObserver {
    fn enter(&mut self, _depth: usize, _formula: &Formula, _assignment: &Assignment) {}
    fn leave(&mut self, _depth: usize, _satisfiable: bool) {}
}

struct NullObserver;

impl SearchObserver for NullObserver {}

/// Logs every recursive call through the `log` facade at trace level,
/// indented two spaces per recursion depth.
pub struct TraceObserver;

impl SearchObserver for TraceObserver {
    fn enter(&mut self, depth: usize, formula: &Formula, assignment: &Assignment) {
        trace!("{:indent$}solve {:?} given {:?}", "", formula, assignment, indent = depth * 2);
    }

    fn leave(&mut self, depth: usize, satisfiable: bool) {
        let outcome = if satisfiable { "sat" } else { "backtrack" };
        trace!("{:indent$}-> {}", "", outcome, indent = depth * 2);
    }
}

fn search(
    formula: &Formula,
    assignment: Assignment,
    depth: usize,
    observer: &mut dyn SearchObserver,
) -> Option<Assignment> {
    observer.enter(depth, formula, &assignment);
    let result = match next_var(formula) {
        Selection::Solved => Some(assignment),
        Selection::Conflict => None,
        Selection::Branch(variable) => {
            let mut model = None;
            for &value in &[true, false] {
                if !can_assign(value, variable, formula) {
                    continue;
                }
                let reduced = remove_var(value, variable, formula);
                if let Some(found) = search(&reduced, assignment.with(variable, value), depth + 1, observer) {
                    model = Some(found);
                    break;
                }
            }
            model
        }
    };
    observer.leave(depth, result.is_some());
    result
}

pub struct Solver {
    formula: Formula,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        Self { formula }
    }

    pub fn solve(&self) -> SatResult {
        self.solve_from(Assignment::new())
    }

    /// Solve with bindings committed up front. Seeded variables are reduced
    /// out of the formula before the search starts, so the search never
    /// branches on them; a seed contradicting a unit clause leaves an empty
    /// clause behind and yields `Unsatisfiable`.
    pub fn solve_from(&self, assignment: Assignment) -> SatResult {
        self.run(assignment, &mut NullObserver)
    }

    pub fn solve_with(&self, observer: &mut dyn SearchObserver) -> SatResult {
        self.run(Assignment::new(), observer)
    }

    fn run(&self, assignment: Assignment, observer: &mut dyn SearchObserver) -> SatResult {
        let mut formula = self.formula.clone();
        for (variable, value) in assignment.iter() {
            formula = remove_var(value, variable, &formula);
        }
        match search(&formula, assignment, 0, observer) {
            Some(model) => SatResult::Satisfiable(model),
            None => SatResult::Unsatisfiable,
        }
    }
}
