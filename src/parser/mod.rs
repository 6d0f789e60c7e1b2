//! Makefile parser.
//!
//! Turns a Makefile into an ordered list of rules and variable assignments
//! with line numbers for error reporting. No evaluation is performed:
//! variables stay unexpanded and conditional directives are ignored.

pub mod makefile;
pub mod scanner;

pub use makefile::{Makefile, Rule, Variable, parse, parse_reader, parse_source};
pub use scanner::MakefileScanner;
