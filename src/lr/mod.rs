//! # LALR(1) parser generator and driver (C9–C11)
//!
//! [items] builds the canonical LR(1) collection (closure, GOTO, the full state
//! automaton); [lalr] merges same-kernel LR(1) states into an LALR(1) [LalrTable],
//! recording shift/reduce and reduce/reduce conflicts as diagnostics rather than
//! failing the build; [driver] runs a stack-based shift/reduce parse against that
//! table.

pub(crate) mod driver;
pub(crate) mod items;
pub(crate) mod lalr;

pub use driver::SyntaxError;
pub use lalr::{Action, ConflictKind, LalrTable, TableConflict};
