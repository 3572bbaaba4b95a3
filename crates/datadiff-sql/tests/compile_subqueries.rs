use datadiff_core::Result;
use datadiff_sql::{
    sql,
    stmt::{Comma, Cte, Name},
    Compilable, Compiler, Config, CteLayout, Flavor,
};
use pretty_assertions::assert_eq;

/// Selects everything from a hoisted subquery.
#[derive(Debug)]
struct FromSubquery(&'static str);

impl Compilable for FromSubquery {
    fn compile(&self, c: &Compiler) -> Result<String> {
        let name = c.hoist(self.0)?;
        Ok(format!("SELECT * FROM {name}"))
    }
}

#[derive(Debug)]
struct UnionAll<L, R>(L, R);

impl<L: Compilable, R: Compilable> Compilable for UnionAll<L, R> {
    fn compile(&self, c: &Compiler) -> Result<String> {
        Ok(sql!(c, &self.0, " UNION ALL ", &self.1))
    }
}

/// Always fails after registering a subquery.
#[derive(Debug)]
struct Broken;

impl Compilable for Broken {
    fn compile(&self, c: &Compiler) -> Result<String> {
        c.hoist("SELECT 'orphan'")?;
        datadiff_core::bail!("broken node")
    }
}

fn union() -> UnionAll<FromSubquery, FromSubquery> {
    UnionAll(FromSubquery("SELECT 1"), FromSubquery("SELECT 2"))
}

#[test]
fn subqueries_hoisted_in_registration_order() {
    let c = Compiler::postgresql();

    assert_eq!(
        c.compile_sql(&union()).unwrap(),
        "WITH \n  tmp1 AS (SELECT 1), \n  tmp2 AS (SELECT 2)\nSELECT * FROM tmp1 UNION ALL SELECT * FROM tmp2"
    );
    assert_eq!(c.pending_subqueries(), 0);
}

#[test]
fn inline_layout() {
    let config = Config::new().cte_layout(CteLayout::Inline);
    let c = Compiler::for_flavor(Flavor::Sqlite, config);

    assert_eq!(
        c.compile_sql(&union()).unwrap(),
        "WITH tmp1 AS (SELECT 1), tmp2 AS (SELECT 2) SELECT * FROM tmp1 UNION ALL SELECT * FROM tmp2"
    );
}

#[test]
fn no_subqueries_no_preamble() {
    let c = Compiler::postgresql();
    let node = UnionAll(Name::from("a"), Name::from("b"));
    assert_eq!(c.compile_sql(&node).unwrap(), "\"a\" UNION ALL \"b\"");
}

#[test]
fn independent_compilers_do_not_share_registry() {
    let first = Compiler::postgresql();
    let second = Compiler::postgresql();

    first.compile_sql(&union()).unwrap();

    // A fresh compiler starts its own session
    assert_eq!(
        second.compile_sql(&FromSubquery("SELECT 3")).unwrap(),
        "WITH \n  tmp1 AS (SELECT 3)\nSELECT * FROM tmp1"
    );
}

#[test]
fn repeated_compile_does_not_leak() {
    let c = Compiler::postgresql();

    c.compile_sql(&union()).unwrap();

    // The counter keeps going; the registry starts empty again
    assert_eq!(
        c.compile_sql(&FromSubquery("SELECT 3")).unwrap(),
        "WITH \n  tmp3 AS (SELECT 3)\nSELECT * FROM tmp3"
    );
}

#[test]
fn failed_compile_does_not_leak() {
    let c = Compiler::postgresql();

    let err = c.compile_sql(&Broken).unwrap_err();
    assert_eq!(err.to_string(), "broken node");
    assert_eq!(c.pending_subqueries(), 0);

    assert_eq!(c.compile_sql(&Name::from("t")).unwrap(), "\"t\"");
}

#[test]
fn nested_subqueries_precede_their_users() {
    let c = Compiler::postgresql();

    // The outer CTE's query itself hoists a subquery
    let cte = Cte::new(FromSubquery("SELECT id FROM ratings"));
    let node = UnionAll(cte, Name::from("x"));

    assert_eq!(
        c.compile_sql(&node).unwrap(),
        "WITH \n  tmp1 AS (SELECT id FROM ratings), \n  tmp2 AS (SELECT * FROM tmp1)\ntmp2 UNION ALL \"x\""
    );
}

#[test]
fn named_cte_registered_once() {
    let c = Compiler::postgresql();

    let cte = Cte::sql("SELECT 1").named("ones");
    let node = UnionAll(cte.clone(), cte);

    assert_eq!(
        c.compile_sql(&node).unwrap(),
        "WITH \n  ones AS (SELECT 1)\nones UNION ALL ones"
    );
}

#[test]
fn conflicting_named_cte_fails() {
    let c = Compiler::postgresql();

    let node = UnionAll(
        Cte::sql("SELECT 1").named("dup"),
        Cte::sql("SELECT 2").named("dup"),
    );

    let err = c.compile_sql(&node).unwrap_err();
    assert_eq!(
        err.to_string(),
        "subquery `dup` is already registered with different text"
    );
}

#[test]
fn unnamed_cte_uses_configured_prefix() {
    let c = Compiler::for_flavor(Flavor::Postgresql, Config::new().unique_prefix("cte_"));
    let node = Comma(vec![Cte::sql("SELECT 1"), Cte::sql("SELECT 2")]);

    assert_eq!(
        c.compile_sql(&node).unwrap(),
        "WITH \n  cte_1 AS (SELECT 1), \n  cte_2 AS (SELECT 2)\ncte_1, cte_2"
    );
}

#[test]
fn non_root_compile_does_not_hoist() {
    let c = Compiler::postgresql().non_root();

    assert_eq!(
        c.compile_sql(&FromSubquery("SELECT 1")).unwrap(),
        "SELECT * FROM tmp1"
    );
    assert_eq!(c.pending_subqueries(), 1);
}
