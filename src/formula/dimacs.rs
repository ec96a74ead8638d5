use crate::formula::{Clause, Formula, Literal, Variable};
use std::io::{BufRead, BufReader, Read};

/// Parse a DIMACS CNF file. Clauses are terminated by a `0` token, not by
/// line endings, so a clause may span lines and a line may hold several
/// clauses. The `p cnf` header's counts are informational only.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut header_seen = false;
    let mut pending: Vec<Literal> = vec![];

    for line in reader.lines() {
        let line = line?;
        if line.starts_with('c') {
            continue;
        }
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            None => continue,
            Some(&"p") => {
                let _ = tokens.next();

                if tokens.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let _num_variables = tokens
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                let _num_clauses = tokens
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;

                header_seen = true;
            }
            Some(_) => {
                if !header_seen {
                    return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
                }

                for token in tokens {
                    match parse_literal(token)? {
                        Some(literal) => pending.push(literal),
                        // a 0 token closes the clause, empty or not
                        None => clauses.push(Clause::new(pending.drain(..))),
                    }
                }
            }
        }
    }

    if !header_seen {
        return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
    }
    if !pending.is_empty() {
        return Err(DimacsParseError::Format("clause missing '0' terminator".into()));
    }

    Ok(Formula::new(clauses))
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    // parse the magnitude from the digits rather than negating a signed
    // integer, which overflows for the most negative token
    let (negated, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = digits
        .parse::<usize>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    if magnitude == 0 {
        Ok(None)
    } else if negated {
        Ok(Some(Literal::Negative(Variable(magnitude))))
    } else {
        Ok(Some(Literal::Positive(Variable(magnitude))))
    }
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
