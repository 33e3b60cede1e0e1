//! The four option kinds and the effects a token can have on them.

use plusopt_metadata::{OptionKind, OptionValue};

use crate::coerce::{coerce_bool, coerce_int};
use crate::error::ParseResult;

/// Identity shared by every option kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Names {
    pub(crate) short: char,
    pub(crate) long: String,
    pub(crate) help: String,
}

impl Names {
    pub(crate) fn new(short: char, long: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            short,
            long: long.into(),
            help: help.into(),
        }
    }
}

/// Read access common to all option kinds.
pub trait Descriptor {
    fn kind(&self) -> OptionKind;
    fn short(&self) -> char;
    fn long(&self) -> &str;
    fn help(&self) -> &str;
    /// Current state as a report value.
    fn state(&self) -> OptionValue;
}

/// What a positive occurrence did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Applied,
    /// The option needs the next token as its value.
    AwaitValue,
}

/// Per-kind effect of a recognized token.
pub(crate) trait Effect: Descriptor {
    /// `-x` or `--long`.
    fn positive(&mut self) -> Step;
    /// `+x`.
    fn negate(&mut self);
    /// `--long=V`, `-xV`, or the token following a bare value option.
    fn assign(&mut self, literal: &str) -> ParseResult<()>;
}

macro_rules! impl_descriptor {
    ($ty:ty, $kind:expr, |$this:ident| $value:expr) => {
        impl Descriptor for $ty {
            fn kind(&self) -> OptionKind {
                $kind
            }

            fn short(&self) -> char {
                self.names.short
            }

            fn long(&self) -> &str {
                &self.names.long
            }

            fn help(&self) -> &str {
                &self.names.help
            }

            fn state(&self) -> OptionValue {
                let $this = self;
                $value
            }
        }
    };
}

/// Boolean option. `passed` is true after `-x`/`--long`, false after `+x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub(crate) names: Names,
    passed: bool,
}

impl Flag {
    pub(crate) fn new(names: Names) -> Self {
        Self {
            names,
            passed: false,
        }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }
}

impl_descriptor!(Flag, OptionKind::Flag, |f| OptionValue::Passed(f.passed));

impl Effect for Flag {
    fn positive(&mut self) -> Step {
        self.passed = true;
        Step::Applied
    }

    fn negate(&mut self) {
        self.passed = false;
    }

    fn assign(&mut self, literal: &str) -> ParseResult<()> {
        self.passed = coerce_bool(literal)?;
        Ok(())
    }
}

/// Option holding one value; each occurrence overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleArg {
    pub(crate) names: Names,
    value: String,
}

impl SingleArg {
    pub(crate) fn new(names: Names) -> Self {
        Self {
            names,
            value: String::new(),
        }
    }

    /// Empty until set.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl_descriptor!(SingleArg, OptionKind::SingleArg, |a| OptionValue::Value(
    a.value.clone()
));

impl Effect for SingleArg {
    fn positive(&mut self) -> Step {
        Step::AwaitValue
    }

    fn negate(&mut self) {
        self.value.clear();
    }

    fn assign(&mut self, literal: &str) -> ParseResult<()> {
        self.value = literal.to_string();
        Ok(())
    }
}

/// Option collecting every value it is given, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiArg {
    pub(crate) names: Names,
    values: Vec<String>,
}

impl MultiArg {
    pub(crate) fn new(names: Names) -> Self {
        Self {
            names,
            values: Vec::new(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl_descriptor!(MultiArg, OptionKind::MultiArg, |m| OptionValue::Values(
    m.values.clone()
));

impl Effect for MultiArg {
    fn positive(&mut self) -> Step {
        Step::AwaitValue
    }

    fn negate(&mut self) {
        self.values.clear();
    }

    fn assign(&mut self, literal: &str) -> ParseResult<()> {
        self.values.push(literal.to_string());
        Ok(())
    }
}

/// Occurrence counter: `-vvv` and `--verbose=3` both give 3, `+v` subtracts one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub(crate) names: Names,
    count: i64,
}

impl Counter {
    pub(crate) fn new(names: Names) -> Self {
        Self { names, count: 0 }
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

impl_descriptor!(Counter, OptionKind::Counter, |c| OptionValue::Count(c.count));

impl Effect for Counter {
    fn positive(&mut self) -> Step {
        self.count = self.count.saturating_add(1);
        Step::Applied
    }

    fn negate(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    fn assign(&mut self, literal: &str) -> ParseResult<()> {
        self.count = coerce_int(literal, &self.names.long)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn names(short: char, long: &str) -> Names {
        Names::new(short, long, "")
    }

    #[test]
    fn flag_effects() {
        let mut f = Flag::new(names('f', "force"));
        assert_eq!(f.positive(), Step::Applied);
        assert!(f.passed());
        f.negate();
        assert!(!f.passed());
        f.assign("T").unwrap();
        assert!(f.passed());
        assert!(matches!(f.assign("Fase"), Err(ParseError::BooleanParseError(_))));
        // A failed assignment leaves the previous state alone.
        assert!(f.passed());
    }

    #[test]
    fn value_kinds_wait_for_a_value() {
        let mut s = SingleArg::new(names('o', "output"));
        let mut m = MultiArg::new(names('i', "include"));
        assert_eq!(s.positive(), Step::AwaitValue);
        assert_eq!(m.positive(), Step::AwaitValue);
        assert_eq!(s.value(), "");
        assert!(m.values().is_empty());
    }

    #[test]
    fn single_arg_overwrites_and_negate_clears() {
        let mut s = SingleArg::new(names('o', "output"));
        s.assign("a.txt").unwrap();
        s.assign("b.txt").unwrap();
        assert_eq!(s.value(), "b.txt");
        s.negate();
        assert_eq!(s.value(), "");
    }

    #[test]
    fn multi_arg_appends_and_negate_resets() {
        let mut m = MultiArg::new(names('i', "include"));
        m.assign("a").unwrap();
        m.assign("b").unwrap();
        assert_eq!(m.values(), ["a", "b"]);
        m.negate();
        assert!(m.values().is_empty());
    }

    #[test]
    fn counter_counts_past_literal_range() {
        let mut c = Counter::new(names('v', "verbose"));
        c.positive();
        c.positive();
        c.negate();
        assert_eq!(c.count(), 1);
        c.assign("0x10").unwrap();
        assert_eq!(c.count(), 16);
        c.assign(&i32::MAX.to_string()).unwrap();
        c.positive();
        assert_eq!(c.count(), i64::from(i32::MAX) + 1);
        assert!(c.assign("2147483648").is_err());
        match c.assign("lots") {
            Err(ParseError::NumberParseError { literal, option }) => {
                assert_eq!(literal, "lots");
                assert_eq!(option, "verbose");
            }
            other => panic!("expected NumberParseError, got {other:?}"),
        }
    }

    #[test]
    fn descriptor_reports_value() {
        let mut c = Counter::new(Names::new('v', "verbose", "More output"));
        c.positive();
        assert_eq!(c.kind(), OptionKind::Counter);
        assert_eq!(Descriptor::short(&c), 'v');
        assert_eq!(Descriptor::long(&c), "verbose");
        assert_eq!(Descriptor::help(&c), "More output");
        assert_eq!(c.state(), OptionValue::Count(1));
    }
}
