//! Token classification and dispatch.

use std::ffi::OsString;
use std::fmt;

use plusopt_metadata::{
    DEFAULT_PROGRAM_VERSION, OptionReport, OptionSchema, ParseReport, ProgramInfo,
};

use crate::descriptor::{Counter, Flag, MultiArg, SingleArg, Step};
use crate::error::{ParseError, ParseResult};
use crate::registry::{CounterId, FlagId, MultiArgId, Registry, SingleArgId, Slot};

/// Callback run for the bare `-` token.
pub type StdinHandler = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Leading character of an option token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    /// `-`: apply the option.
    Dash,
    /// `+`: negate the option.
    Plus,
}

/// Shape of one non-empty token, before any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `-`
    Stdin,
    /// `--`
    Terminator,
    /// `-c` or `+c`
    Short { sigil: Sigil, short: char },
    /// `--name`
    Long { name: &'a str },
    /// `--name=value`
    LongAssign { name: &'a str, value: &'a str },
    /// `-abc` or `+abc`; `body` excludes the sigil.
    Cluster { sigil: Sigil, body: &'a str },
    Positional,
}

/// Classify a token by shape alone. Lengths are counted in characters.
pub fn classify(arg: &str) -> Token<'_> {
    let mut chars = arg.chars();
    let first = chars.next();
    let second = chars.next();
    let longer = chars.next().is_some();

    // '-' and '+' are one byte wide, so the slices below are on boundaries.
    match (first, second, longer) {
        (Some('-'), None, _) => Token::Stdin,
        (Some('-'), Some('-'), false) => Token::Terminator,
        (Some('-'), Some(short), false) => Token::Short {
            sigil: Sigil::Dash,
            short,
        },
        (Some('+'), Some(short), false) => Token::Short {
            sigil: Sigil::Plus,
            short,
        },
        (Some('-'), Some('-'), true) => match arg[2..].split_once('=') {
            Some((name, value)) => Token::LongAssign { name, value },
            None => Token::Long { name: &arg[2..] },
        },
        (Some('-'), Some(_), true) => Token::Cluster {
            sigil: Sigil::Dash,
            body: &arg[1..],
        },
        (Some('+'), Some(_), true) => Token::Cluster {
            sigil: Sigil::Plus,
            body: &arg[1..],
        },
        _ => Token::Positional,
    }
}

/// Option registry plus the state that outlives a single parse call.
///
/// `rest` accumulates across calls until the caller clears it.
pub struct Parser {
    registry: Registry,
    rest: Vec<String>,
    stdin_handler: StdinHandler,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("registry", &self.registry)
            .field("rest", &self.rest)
            .finish_non_exhaustive()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            rest: Vec::new(),
            stdin_handler: Box::new(|| Ok(())),
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parser with every option of `schema` registered in order.
    pub fn from_schema(schema: &OptionSchema) -> Self {
        let mut parser = Self::new();
        for decl in &schema.options {
            parser.registry.register(decl);
        }
        parser
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn new_flag(&mut self, short: char, long: &str, help: &str) -> FlagId {
        self.registry.new_flag(short, long, help)
    }

    pub fn new_single_arg(&mut self, short: char, long: &str, help: &str) -> SingleArgId {
        self.registry.new_single_arg(short, long, help)
    }

    pub fn new_multi_arg(&mut self, short: char, long: &str, help: &str) -> MultiArgId {
        self.registry.new_multi_arg(short, long, help)
    }

    pub fn new_counter(&mut self, short: char, long: &str, help: &str) -> CounterId {
        self.registry.new_counter(short, long, help)
    }

    pub fn flag(&self, id: FlagId) -> &Flag {
        self.registry.flag(id)
    }

    pub fn single_arg(&self, id: SingleArgId) -> &SingleArg {
        self.registry.single_arg(id)
    }

    pub fn multi_arg(&self, id: MultiArgId) -> &MultiArg {
        self.registry.multi_arg(id)
    }

    pub fn counter(&self, id: CounterId) -> &Counter {
        self.registry.counter(id)
    }

    /// Replace the callback run for the bare `-` token.
    pub fn set_stdin_handler<F>(&mut self, handler: F)
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.stdin_handler = Box::new(handler);
    }

    /// Tokens not consumed as options, in encounter order.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }

    /// Mutable access, e.g. to pre-seed leftovers before a parse.
    pub fn rest_mut(&mut self) -> &mut Vec<String> {
        &mut self.rest
    }

    pub fn clear_rest(&mut self) {
        self.rest.clear();
    }

    pub fn take_rest(&mut self) -> Vec<String> {
        std::mem::take(&mut self.rest)
    }

    /// Parse `argv` (without the program name), applying option effects and
    /// collecting leftovers into [`Parser::rest`].
    ///
    /// Stops at the first error; effects applied before it stay applied.
    pub fn parse_argv<I, S>(&mut self, argv: I) -> ParseResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tracing::debug!(rest = self.rest.len(), "parsing argv");

        let mut pending: Option<Slot> = None;
        let mut tokens = argv.into_iter();
        while let Some(token) = tokens.next() {
            let arg = token.as_ref();
            if arg.is_empty() {
                continue;
            }

            if let Some(slot) = pending.take() {
                tracing::trace!(token = arg, ?slot, "value for pending option");
                self.registry.effect_mut(slot).assign(arg)?;
                continue;
            }

            match classify(arg) {
                Token::Stdin => {
                    tracing::trace!("stdin marker");
                    (self.stdin_handler)().map_err(ParseError::Stdin)?;
                }
                Token::Positional => {
                    tracing::trace!(token = arg, "positional");
                    self.rest.push(arg.to_string());
                }
                Token::Terminator => {
                    let before = self.rest.len();
                    self.rest
                        .extend(tokens.map(|t| t.as_ref().to_string()));
                    tracing::debug!(
                        forwarded = self.rest.len() - before,
                        "terminator; remaining tokens forwarded"
                    );
                    return Ok(());
                }
                Token::Short { sigil, short } => match self.registry.lookup_short(short) {
                    Some(slot) => pending = self.apply(slot, sigil),
                    None => tracing::trace!(token = arg, "unknown short option ignored"),
                },
                Token::Long { name } => {
                    let slot = self
                        .registry
                        .lookup_long(name)
                        .ok_or_else(|| ParseError::unrecognized_long(name))?;
                    pending = self.apply(slot, Sigil::Dash);
                }
                Token::LongAssign { name, value } => match self.registry.lookup_long(name) {
                    Some(slot) => {
                        tracing::trace!(token = arg, ?slot, "long assignment");
                        self.registry.effect_mut(slot).assign(value)?;
                    }
                    None => tracing::trace!(token = arg, "unknown long assignment ignored"),
                },
                Token::Cluster { sigil, body } => {
                    pending = self.apply_cluster(sigil, body)?;
                }
            }
        }

        if let Some(slot) = pending {
            let d = self.registry.descriptor(slot);
            return Err(ParseError::MissingArgument {
                short: d.short(),
                long: d.long().to_string(),
            });
        }

        tracing::debug!(rest = self.rest.len(), "argv parsed");
        Ok(())
    }

    /// Read the real process arguments, fill in missing program metadata
    /// and parse everything after the program name.
    pub fn parse_env(&mut self, info: &mut ProgramInfo) -> ParseResult<()> {
        self.parse_args_os(info, std::env::args_os())
    }

    /// Same as [`Parser::parse_env`] for an explicit argument list whose first
    /// element is the program name.
    pub fn parse_args_os<I>(&mut self, info: &mut ProgramInfo, args: I) -> ParseResult<()>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args = args
            .into_iter()
            .map(|a| a.into_string().map_err(ParseError::NonUtf8Argument))
            .collect::<ParseResult<Vec<String>>>()?;
        let mut args = args.into_iter();

        let program = args.next().unwrap_or_default();
        if info.name.is_empty() {
            info.name = program;
        }
        if info.version.is_empty() {
            info.version = DEFAULT_PROGRAM_VERSION.to_string();
        }

        self.parse_argv(args)
    }

    /// Snapshot of every reachable option plus the leftovers.
    pub fn report(&self) -> ParseReport {
        let options = self
            .registry
            .reachable()
            .into_iter()
            .map(|slot| {
                let d = self.registry.descriptor(slot);
                OptionReport {
                    kind: d.kind(),
                    short: self.registry.owns_short(slot).then(|| d.short()),
                    long: d.long().to_string(),
                    value: d.state(),
                }
            })
            .collect();

        ParseReport {
            options,
            rest: self.rest.clone(),
        }
    }

    /// Apply a single `-c`/`+c`/`--name` occurrence. Returns the slot when it
    /// now waits for a value.
    fn apply(&mut self, slot: Slot, sigil: Sigil) -> Option<Slot> {
        let effect = self.registry.effect_mut(slot);
        match sigil {
            Sigil::Dash => match effect.positive() {
                Step::Applied => None,
                Step::AwaitValue => Some(slot),
            },
            Sigil::Plus => {
                effect.negate();
                None
            }
        }
    }

    /// Scan a short cluster left to right. A value option consumes the rest
    /// of the cluster as its value, or waits for the next token when it is
    /// the last character. Under `+` every character is a negation.
    fn apply_cluster(&mut self, sigil: Sigil, body: &str) -> ParseResult<Option<Slot>> {
        for (idx, short) in body.char_indices() {
            let slot = self
                .registry
                .lookup_short(short)
                .ok_or_else(|| ParseError::unrecognized_short(short))?;
            let effect = self.registry.effect_mut(slot);

            match sigil {
                Sigil::Plus => effect.negate(),
                Sigil::Dash => {
                    if effect.positive() == Step::AwaitValue {
                        let attached = &body[idx + short.len_utf8()..];
                        if attached.is_empty() {
                            return Ok(Some(slot));
                        }
                        effect.assign(attached)?;
                        return Ok(None);
                    }
                }
            }
        }
        Ok(None)
    }
}
