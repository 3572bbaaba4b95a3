use datadiff_core::Result;
use datadiff_sql::{
    sql,
    stmt::{Delimited, Name},
    Compilable, Compiler, Config, CteLayout,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn suffix(name: &str, prefix: &str) -> u64 {
    name.strip_prefix(prefix).unwrap().parse().unwrap()
}

#[test]
fn unique_names_strictly_increase_across_derivations() {
    let root = Compiler::postgresql();
    let derived = root.non_root().with_in_select(true);
    let nested = derived.with_extended_table_context([Name::from("t")]);

    let names = [
        root.new_unique_name("tmp"),
        derived.new_unique_name("tmp"),
        nested.new_unique_name("tmp"),
        root.new_unique_name("tmp"),
        nested.new_tmp_name(),
    ];

    let suffixes: Vec<u64> = names.iter().map(|name| suffix(name, "tmp")).collect();
    assert_eq!(suffixes, vec![1, 2, 3, 4, 5]);
}

#[test]
fn unique_names_keep_prefix() {
    let c = Compiler::sqlite();
    assert_eq!(c.new_unique_name("alias_"), "alias_1");
    assert_eq!(c.new_unique_name("t"), "t2");
}

#[test]
fn unique_table_names_do_not_repeat() {
    let c = Compiler::postgresql();
    let mut seen = HashSet::new();

    for _ in 0..10_000 {
        assert!(seen.insert(c.new_unique_table_name("tmp")));
    }
}

#[test]
fn unique_table_name_shape() {
    let c = Compiler::postgresql();
    c.new_unique_name("x");

    let name = c.new_unique_table_name("tmp");
    let (counter, hex) = name.strip_prefix("tmp").unwrap().split_once('_').unwrap();

    assert_eq!(counter, "2");
    assert!(!hex.is_empty() && hex.len() <= 8);
    assert!(u32::from_str_radix(hex, 16).is_ok());
}

#[test]
fn extended_table_context_leaves_parent_unchanged() {
    let parent = Compiler::postgresql().with_extended_table_context([Name::from("a")]);
    let child = parent.with_extended_table_context([Name::from(["public", "b"])]);

    assert_eq!(parent.table_context(), &[Name::from("a")]);
    assert_eq!(
        child.table_context(),
        &[Name::from("a"), Name::new(["public", "b"])]
    );

    // Extending the parent afterwards does not reach the child
    let sibling = parent.with_extended_table_context([Name::from("c")]);
    assert_eq!(child.table_context().len(), 2);
    assert_eq!(sibling.table_context().len(), 2);
    assert_eq!(parent.table_context().len(), 1);
}

#[test]
fn flags_are_copied_on_derive() {
    let root = Compiler::postgresql();
    let select = root.with_in_select(true);
    let join = select.with_in_join(true);

    assert!(!root.in_select() && !root.in_join());
    assert!(select.in_select() && !select.in_join());
    assert!(join.in_select() && join.in_join());
    assert!(root.is_root());
    assert!(!root.non_root().is_root());
}

/// Qualifies a column with the innermost table in context.
#[derive(Debug)]
struct Column(&'static str);

impl Compilable for Column {
    fn compile(&self, c: &Compiler) -> Result<String> {
        match c.table_context().last() {
            Some(table) => Ok(sql!(c, table, ".", &Name::from(self.0))),
            None => c.compile_sql(&Name::from(self.0)),
        }
    }
}

#[derive(Debug)]
struct Select {
    columns: Delimited<Column>,
    from: Name,
}

impl Compilable for Select {
    fn compile(&self, c: &Compiler) -> Result<String> {
        let inner = c
            .with_extended_table_context([self.from.clone()])
            .with_in_select(true);

        assert!(!c.is_root());
        assert!(inner.in_select());

        Ok(sql!(c, "SELECT ", sql!(inner, &self.columns), " FROM ", &self.from))
    }
}

#[test]
fn nodes_see_table_context() {
    let select = Select {
        columns: Delimited::new([Column("id"), Column("rating")], ", "),
        from: Name::from(["public", "ratings"]),
    };

    assert_eq!(
        Compiler::postgresql().compile_sql(&select).unwrap(),
        "SELECT \"public\".\"ratings\".\"id\", \"public\".\"ratings\".\"rating\" FROM \"public\".\"ratings\""
    );
    assert_eq!(
        Compiler::mysql().compile_sql(&Column("id")).unwrap(),
        "`id`"
    );
}

#[test]
fn delimited_mixes_literals() {
    let c = Compiler::sqlite();
    let node = Delimited::new(
        [String::from("a = 1"), String::from("b IS NULL")],
        " AND ",
    );
    assert_eq!(c.compile_sql(&node).unwrap(), "a = 1 AND b IS NULL");
}

#[test]
fn config_deserializes_with_defaults() {
    let config: Config = serde_json::from_str(r#"{ "cte_layout": "inline" }"#).unwrap();
    assert_eq!(config.cte_layout, CteLayout::Inline);
    assert_eq!(config.unique_prefix, "tmp");
    assert_eq!(config.channel_capacity, 1);

    let config: Config = serde_json::from_str(r#"{ "unique_prefix": "dd_" }"#).unwrap();
    assert_eq!(config, Config::new().unique_prefix("dd_"));
}
