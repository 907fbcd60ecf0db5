//! # Regular expressions (C2)
//!
//! `lexparse` regexes are a small subset of the usual pattern language: literals,
//! `| * + ? ( )`, character classes `[...]` with ranges and `^`-negation, `.` (any
//! printable character except newline) and the escapes `\s \d \w \\ \c`. There are no
//! anchors, no backreferences and no lazy quantifiers (see the crate's Non-goals).
//!
//! Compiling a pattern happens in two steps, mirroring the classic shunting-yard
//! construction:
//!
//! 1. [preprocess] expands classes/escapes/`.` into the primitive operator grammar
//!    below and inserts the implicit concatenation operator between adjacent atoms.
//! 2. [shunt] converts that infix token stream into postfix, ready for
//!    [crate::nfa::thompson] to fold into an NFA fragment.
//!
//! The reserved concat marker used internally is `·` (U+00B7); it must not appear
//! literally in a source pattern.

use std::collections::BTreeSet;
use thiserror::Error;

pub(crate) mod preprocess;
pub(crate) mod shunt;

/// One token of the regex operator grammar, shared between the infix stream produced
/// by [preprocess] and the postfix stream produced by [shunt]: Thompson's operators
/// are modeled as a tagged variant here rather than as dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Char(char),
    Concat,
    Alt,
    Star,
    Plus,
    Opt,
    LParen,
    RParen,
}

/// Errors raised while turning a pattern string into an NFA fragment: by the
/// preprocessor, by the shunting-yard converter, or by the Thompson builder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BadRegex {
    #[error("unmatched '(' at position {0}")]
    UnmatchedOpenParen(usize),
    #[error("unmatched ')' at position {0}")]
    UnmatchedCloseParen(usize),
    #[error("malformed character class or escape near position {0}")]
    MalformedClass(usize),
    #[error("reserved concat marker '·' is not allowed in a pattern (position {0})")]
    ReservedConcatMarker(usize),
    #[error("operator applied to an empty operand stack")]
    EmptyOperand,
    #[error("pattern reduces to an empty expression")]
    EmptyPattern,
    #[error("pattern leaves {0} unconsumed operand(s) after construction")]
    UnconsumedOperands(usize),
}

/// Parses a source pattern into its postfix token stream, ready for
/// [crate::nfa::thompson::build_fragment].
pub(crate) fn parse(pattern: &str) -> Result<Vec<Token>, BadRegex> {
    let infix = preprocess::preprocess(pattern)?;
    shunt::to_postfix(infix)
}

/// The fixed character set Σ: 8-bit printable ASCII plus space, tab, newline and
/// carriage return. Shared by `.`, `\s`/`\d`/`\w`, class negation, and by
/// [crate::dfa::subset] when it computes the alphabet to drive subset construction.
pub(crate) fn fixed_alphabet() -> BTreeSet<char> {
    let mut set: BTreeSet<char> = (0x21u8..=0x7Eu8).map(|b| b as char).collect();
    set.insert(' ');
    set.insert('\t');
    set.insert('\n');
    set.insert('\r');
    set
}
