use crate::Compiler;

use datadiff_core::Result;
use std::fmt::Debug;

/// A query node that renders itself as SQL text.
///
/// This is the only extension point of the compiler: joins, selects, column
/// references and every other structured node live outside this crate and
/// implement `Compilable`.
///
/// Implementations receive a non-root compiler. They may:
///
/// - compile children with [`Compiler::compile_sql`] (or the [`sql!`] macro),
/// - derive new compilers with extended table context or changed flags,
/// - register a named subquery with [`Compiler::hoist`] and reference it by
///   the returned name.
///
/// Only the derivation methods may be used to change compiler state.
pub trait Compilable: Debug + Send + Sync {
    fn compile(&self, c: &Compiler) -> Result<String>;
}

impl<T: Compilable + ?Sized> Compilable for Box<T> {
    fn compile(&self, c: &Compiler) -> Result<String> {
        (**self).compile(c)
    }
}
