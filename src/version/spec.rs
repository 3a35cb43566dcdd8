// src/version/spec.rs

//! Version specifiers
//!
//! A specifier is a comma-separated list of clauses such as
//! `>=2.0.0,!=4.0.0`. A version satisfies the specifier when it satisfies
//! every clause. An empty specifier or `*` accepts every version.

use super::Version;
use super::compare::compare_fragment;
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a single clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `==` or `=`, also used when no operator is given
    Exact,
    /// `!=`
    NotEqual,
    /// `>` or `>>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `<` or `<<`
    Less,
    /// `<=`
    LessEq,
    /// `~=`, compatible release: at least this version, same leading components
    Compatible,
}

impl Op {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "" | "==" | "=" => Some(Op::Exact),
            "!=" => Some(Op::NotEqual),
            ">" | ">>" => Some(Op::Greater),
            ">=" => Some(Op::GreaterEq),
            "<" | "<<" => Some(Op::Less),
            "<=" => Some(Op::LessEq),
            "~=" => Some(Op::Compatible),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Op::Exact => "==",
            Op::NotEqual => "!=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
            Op::Compatible => "~=",
        })
    }
}

/// One `<op><version>` clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    op: Op,
    version: Version,
}

impl Clause {
    pub fn op(&self) -> Op {
        self.op
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check a candidate against this clause
    ///
    /// Candidates are compared on their upstream part. The revision and then
    /// the epoch break ties, but only when the clause spells them out: `!=4.0.0`
    /// also rejects `4.0.0-1`, and `<3.0.0` accepts `1:2.0.0`.
    pub fn matches(&self, candidate: &Version) -> bool {
        let mut ord = candidate.cmp_upstream(&self.version);
        if self.version.revision().is_some() {
            ord = ord.then_with(|| candidate.cmp_revision(&self.version));
        }
        if self.version.has_epoch() {
            ord = ord.then_with(|| candidate.cmp_epoch(&self.version));
        }

        match self.op {
            Op::Exact => ord == Ordering::Equal,
            Op::NotEqual => ord != Ordering::Equal,
            Op::Greater => ord == Ordering::Greater,
            Op::GreaterEq => ord != Ordering::Less,
            Op::Less => ord == Ordering::Less,
            Op::LessEq => ord != Ordering::Greater,
            Op::Compatible => ord != Ordering::Less && self.shares_release_prefix(candidate),
        }
    }

    /// `~=2.2.1` pins the `2.2` prefix
    fn shares_release_prefix(&self, candidate: &Version) -> bool {
        if self.version.has_epoch() && candidate.epoch() != self.version.epoch() {
            return false;
        }

        let pinned: Vec<&str> = self.version.components().collect();
        let prefix = &pinned[..pinned.len().saturating_sub(1)];
        let mut components = candidate.components();

        prefix.iter().all(|want| {
            components
                .next()
                .is_some_and(|have| compare_fragment(have, want) == Ordering::Equal)
        })
    }
}

impl FromStr for Clause {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let symbol_len = s
            .find(|c: char| !matches!(c, '<' | '>' | '=' | '!' | '~'))
            .unwrap_or(s.len());
        let (symbol, rest) = s.split_at(symbol_len);

        let op = Op::from_symbol(symbol)
            .ok_or_else(|| Error::InvalidSpecifier(format!("unknown operator '{}' in '{}'", symbol, s)))?;

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(Error::InvalidSpecifier(format!("clause '{}' has no version", s)));
        }

        let version = Version::parse(rest)
            .map_err(|e| Error::InvalidSpecifier(format!("clause '{}': {}", s, e)))?;

        if op == Op::Compatible && version.components().count() < 2 {
            return Err(Error::InvalidSpecifier(format!(
                "'{}' needs at least two version components",
                s
            )));
        }

        Ok(Self { op, version })
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

/// A conjunction of version clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSpec {
    clauses: Vec<Clause>,
}

impl VersionSpec {
    /// A specifier that accepts every version
    pub fn any() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, candidate: &Version) -> bool {
        self.clauses.iter().all(|clause| clause.matches(candidate))
    }
}

impl FromStr for VersionSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let clauses = s
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty() && *clause != "*")
            .map(Clause::from_str)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { clauses })
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("*");
        }

        for (i, clause) in self.clauses.iter().enumerate() {
            if i != 0 {
                f.write_str(",")?;
            }
            clause.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn spec(s: &str) -> VersionSpec {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_operators() {
        let cases = [
            (">=1.0", Op::GreaterEq),
            ("<=1.0", Op::LessEq),
            (">1.0", Op::Greater),
            (">>1.0", Op::Greater),
            ("<1.0", Op::Less),
            ("<<1.0", Op::Less),
            ("==1.0", Op::Exact),
            ("=1.0", Op::Exact),
            ("1.0", Op::Exact),
            ("!=1.0", Op::NotEqual),
            ("~=1.0", Op::Compatible),
        ];

        for (input, op) in cases {
            let clause: Clause = input.parse().unwrap();
            assert_eq!(clause.op(), op, "operator of {}", input);
            assert_eq!(clause.version().as_str(), "1.0");
        }
    }

    #[test]
    fn test_parse_whitespace_and_epoch() {
        let parsed = spec(" >= 1:2.0 , != 1:3.0 ,");
        assert_eq!(parsed.clauses().len(), 2);
        assert_eq!(parsed.clauses()[0].version().epoch(), 1);
        assert_eq!(parsed.to_string(), ">=1:2.0,!=1:3.0");
    }

    #[test]
    fn test_parse_errors() {
        assert!(">=".parse::<VersionSpec>().is_err());
        assert!("=>1.0".parse::<VersionSpec>().is_err());
        assert!("!1.0".parse::<VersionSpec>().is_err());
        assert!("~=1".parse::<VersionSpec>().is_err());
        assert!(">=1.0,<".parse::<VersionSpec>().is_err());
    }

    #[test]
    fn test_wildcard_and_empty() {
        assert!(spec("").matches(&v("0.0.1")));
        assert!(spec("*").matches(&v("1:9.9")));
        assert_eq!(spec("*").to_string(), "*");
        assert_eq!(VersionSpec::any(), spec(""));
    }

    #[test]
    fn test_conjunction() {
        let parsed = spec(">=2.0.0,!=4.0.0");
        assert!(parsed.matches(&v("2.0.0")));
        assert!(parsed.matches(&v("3.0.0")));
        assert!(!parsed.matches(&v("4.0.0")));
        assert!(parsed.matches(&v("4.0.1")));
        assert!(!parsed.matches(&v("1.0.0-1")));
    }

    #[test]
    fn test_unrevised_clause_ignores_revision() {
        assert!(spec(">=2.0.0").matches(&v("2.0.0-1ubuntu1")));
        assert!(!spec("!=4.0.0").matches(&v("4.0.0-1")));
        assert!(spec("==4.0.0").matches(&v("4.0.0-3")));
        assert!(!spec(">2.0.0").matches(&v("2.0.0-1")));
    }

    #[test]
    fn test_revised_clause_uses_revision() {
        assert!(spec(">2.0.0-1").matches(&v("2.0.0-1ubuntu1")));
        assert!(!spec("==2.0.0-1").matches(&v("2.0.0-2")));
        assert!(spec("<<2.0.0-2").matches(&v("2.0.0-1ubuntu1")));
    }

    #[test]
    fn test_epoch_only_breaks_ties() {
        assert!(spec(">=2.0.0").matches(&v("1:2.0.0")));
        assert!(spec("<3.0.0").matches(&v("1:2.0.0")));
        assert!(!spec(">=2.0.0").matches(&v("1:1.0.0")));
        assert!(spec("==2.0.0").matches(&v("1:2.0.0")));
        assert!(!spec(">=1:2.0").matches(&v("2.0")));
        assert!(spec(">=1:2.0").matches(&v("2.1")));
        assert!(spec("!=1:2.0.0").matches(&v("2.0.0")));
        assert!(!spec("!=1:2.0.0").matches(&v("1:2.0.0")));
    }

    #[test]
    fn test_compatible_release() {
        let parsed = spec("~=2.2.1");
        assert!(parsed.matches(&v("2.2.1")));
        assert!(parsed.matches(&v("2.2.9")));
        assert!(parsed.matches(&v("2.2.10-1")));
        assert!(!parsed.matches(&v("2.2.0")));
        assert!(!parsed.matches(&v("2.3.0")));
        assert!(parsed.matches(&v("1:2.2.5")));
        assert!(!spec("~=1:2.2.1").matches(&v("2.2.5")));
        assert!(spec("~=1:2.2.1").matches(&v("1:2.2.5")));

        let two = spec("~=2.2");
        assert!(two.matches(&v("2.9")));
        assert!(!two.matches(&v("3.0")));
    }
}
