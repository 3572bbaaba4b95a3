/// Compile each fragment through the given compiler and concatenate the
/// resulting text.
///
/// Fragments are anything convertible into an [`Element`](crate::Element).
/// Expands to an expression of type `String` and returns early from the
/// enclosing function on the first error.
///
/// ```ignore
/// fn compile(&self, c: &Compiler) -> Result<String> {
///     Ok(sql!(c, "SELECT * FROM ", &self.table, " LIMIT ", self.limit))
/// }
/// ```
#[macro_export]
macro_rules! sql {
    ($c:expr, $( $fragment:expr ),* $(,)?) => {{
        let mut dst = String::new();
        $(
            dst.push_str(&$c.compile_sql($fragment)?);
        )*
        dst
    }};
}
