#[macro_use]
mod fmt;

mod compilable;
pub use compilable::Compilable;

pub mod compiler;
pub use compiler::{Compiled, Compiler, Config, CteLayout};

mod element;
pub use element::{Element, NodeRef};

pub mod flavor;
pub use flavor::Flavor;

pub mod interpreter;
pub use interpreter::{Sequence, State, Statements, ThreadLocalInterpreter};

pub mod stmt;

pub use datadiff_core::{ArithString, Dialect, Error, Executor, Response, Result};
