pub mod dimacs;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fmt::{self, Formatter};

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) => *v,
            Literal::Negative(v) => *v,
        }
    }

    /// The value the variable must take for this literal to hold.
    pub fn polarity(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }
}

/// A disjunction of literals, keyed by variable. Each variable appears at
/// most once; an empty clause is unsatisfiable.
#[derive(Clone, PartialEq, Eq)]
pub struct Clause {
    literals: BTreeMap<Variable, bool>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals = BTreeMap::new();
        for literal in disjuncts {
            // first occurrence of a variable wins
            literals.entry(literal.variable()).or_insert_with(|| literal.polarity());
        }
        Self { literals }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The variable of a unit clause, if this clause is one.
    pub fn unit(&self) -> Option<Variable> {
        if self.literals.len() == 1 {
            self.literals.keys().next().copied()
        } else {
            None
        }
    }

    /// The polarity this clause requires of `variable`, if it mentions it.
    pub fn polarity(&self, variable: Variable) -> Option<bool> {
        self.literals.get(&variable).copied()
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.literals.keys().copied()
    }

    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().map(|(v, polarity)| {
            if *polarity {
                Literal::Positive(*v)
            } else {
                Literal::Negative(*v)
            }
        })
    }

    /// A copy of this clause with `variable` stripped, whatever its polarity.
    pub fn without(&self, variable: Variable) -> Clause {
        let mut literals = self.literals.clone();
        literals.remove(&variable);
        Self { literals }
    }

    pub fn satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .any(|(v, polarity)| assignment.get(*v) == Some(*polarity))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| clause.satisfied_by(assignment))
    }
}

/// A partial mapping from variables to truth values, extended copy-on-write
/// so sibling search branches never observe each other's bindings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<Variable, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: Variable) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A copy of this assignment with one additional binding. The receiver is
    /// untouched; a variable is never re-bound within a branch.
    pub fn with(&self, variable: Variable, value: bool) -> Assignment {
        debug_assert!(self.get(variable).is_none(), "variable assigned twice on one branch");
        let mut values = self.values.clone();
        values.insert(variable, value);
        Self { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values.iter().map(|(v, value)| (*v, *value))
    }
}

impl std::iter::FromIterator<(Variable, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (Variable, bool)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Debug for Assignment {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first = true;
        f.write_str("{")?;
        for (Variable(x), value) in self.iter() {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            f.write_fmt(format_args!("{}{}", if value { "" } else { "!" }, x))?;
        }
        f.write_str("}")
    }
}

impl Debug for Clause {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.literals.len() > 1 {
            f.write_str("(")?;
        }
        let mut first_literal = true;
        for literal in self.literals() {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" | ")?;
            }
            match literal {
                Literal::Positive(Variable(x)) => f.write_fmt(format_args!("{}", x))?,
                Literal::Negative(Variable(x)) => f.write_fmt(format_args!("!{}", x))?,
            }
        }
        if self.literals.len() > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            clause.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

// Proptest strategy shared by the solver and lib tests: small formulas whose
// verdict a truth-table oracle can check.
#[cfg(test)]
pub(crate) fn formula_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    const MAX_VARS: usize = 8;
    let literal = (0..MAX_VARS, any::<bool>()).prop_map(|(x, sign)| if sign { p(x) } else { n(x) });
    let clause = proptest::collection::vec(literal, 1..=3).prop_map(Clause::new);
    proptest::collection::vec(clause, 0..=12).prop_map(Formula::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_keeps_first_polarity() {
        let c = Clause::new(vec![p(0), n(0), p(1)]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.polarity(Variable(0)), Some(true));
        assert_eq!(c.polarity(Variable(1)), Some(true));
    }

    #[test]
    fn clause_unit() {
        assert_eq!(Clause::new(vec![n(3)]).unit(), Some(Variable(3)));
        assert_eq!(Clause::new(vec![p(0), p(1)]).unit(), None);
        assert_eq!(Clause::new(vec![]).unit(), None);
    }

    #[test]
    fn clause_without_strips_either_polarity() {
        let c = Clause::new(vec![p(0), n(1)]);
        let stripped = c.without(Variable(1));
        assert_eq!(stripped.polarity(Variable(1)), None);
        assert_eq!(stripped.polarity(Variable(0)), Some(true));
        // the original is untouched
        assert_eq!(c.polarity(Variable(1)), Some(false));
    }

    #[test]
    fn assignment_with_does_not_alias() {
        let a = Assignment::new().with(Variable(0), true);
        let b = a.with(Variable(1), false);
        assert_eq!(a.get(Variable(1)), None);
        assert_eq!(b.get(Variable(0)), Some(true));
        assert_eq!(b.get(Variable(1)), Some(false));
    }

    #[test]
    fn formula_satisfied_by() {
        let f = Formula::new(vec![Clause::new(vec![p(0), p(1)]), Clause::new(vec![n(0)])]);
        let sat: Assignment = vec![(Variable(0), false), (Variable(1), true)].into_iter().collect();
        let unsat: Assignment = vec![(Variable(0), true), (Variable(1), true)].into_iter().collect();
        assert!(f.satisfied_by(&sat));
        assert!(!f.satisfied_by(&unsat));
    }

    #[test]
    fn empty_clause_never_satisfied() {
        let f = Formula::new(vec![Clause::new(vec![])]);
        assert!(!f.satisfied_by(&Assignment::new()));
    }

    #[test]
    fn debug_formatting() {
        let f = Formula::new(vec![Clause::new(vec![p(0), n(1)]), Clause::new(vec![p(2)])]);
        assert_eq!(format!("{:?}", f), "(0 | !1) & 2");
    }
}
