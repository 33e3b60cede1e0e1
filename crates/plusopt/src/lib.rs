//! Getopt-style option parsing.
//!
//! Options are registered on a [`Parser`] and come in four kinds:
//! - [`Flag`]: `-f`, `--force`, negated by `+f` or `--force=false`
//! - [`SingleArg`]: `-ofile`, `-o file`, `--output=file`, `--output file`
//! - [`MultiArg`]: like `SingleArg`, but every occurrence appends
//! - [`Counter`]: `-vvv`, `--verbose=3`, decremented by `+v`
//!
//! Short options cluster (`-abc`), `--` ends option processing, and a bare
//! `-` runs the stdin handler. Everything else is collected into
//! [`Parser::rest`].
//!
//! ```
//! use plusopt::Parser;
//!
//! let mut parser = Parser::new();
//! let verbose = parser.new_counter('v', "verbose", "More output");
//! let output = parser.new_single_arg('o', "output", "Output file");
//!
//! parser.parse_argv(["-vvo", "out.txt", "input.txt"]).unwrap();
//!
//! assert_eq!(parser.counter(verbose).count(), 2);
//! assert_eq!(parser.single_arg(output).value(), "out.txt");
//! assert_eq!(parser.rest(), ["input.txt"]);
//! ```

mod coerce;
mod descriptor;
mod error;
mod parser;
mod registry;
mod render;

pub use coerce::{coerce_bool, coerce_int};
pub use descriptor::{Counter, Descriptor, Flag, MultiArg, SingleArg};
pub use error::{ParseError, ParseResult};
pub use parser::{Parser, Sigil, StdinHandler, Token, classify};
pub use registry::{CounterId, FlagId, MultiArgId, Registry, SingleArgId, Slot};
pub use render::{render_help, render_version};

pub use plusopt_metadata as metadata;
