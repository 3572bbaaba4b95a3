mod config;
pub use config::{Config, CteLayout};

mod session;
use session::Session;

use crate::{stmt::Name, Element, Executor, ThreadLocalInterpreter};

use datadiff_core::{bail, Dialect, Error, Response, Result};
use indexmap::IndexMap;
use rand::Rng;
use std::{fmt, rc::Rc, sync::Arc};

/// Compiles elements into SQL text for one dialect.
///
/// A compiler is created once per external compile request. Recursive steps
/// receive derived copies: flags and table context are copied on derivation,
/// while the name counter and the subquery registry live in a session shared
/// by every copy.
#[derive(Clone)]
pub struct Compiler {
    /// Renders identifiers and timestamps
    dialect: Arc<dyn Dialect>,

    config: Arc<Config>,

    /// Set while compiling the projection of a `SELECT`
    in_select: bool,

    /// Set while compiling the operands of a join
    in_join: bool,

    /// Tables visible to unqualified names, innermost last
    table_context: Vec<Name>,

    /// Only the root compiler assembles the `WITH` preamble
    root: bool,

    session: Rc<Session>,
}

/// Output of a compile call
#[derive(Debug)]
pub enum Compiled {
    /// A complete SQL fragment
    Sql(String),

    /// Statements that must be executed one at a time
    Interpreter(ThreadLocalInterpreter),
}

impl Compiler {
    pub fn new(dialect: impl Dialect) -> Compiler {
        Compiler::with_config(Arc::new(dialect), Config::default())
    }

    pub fn with_config(dialect: Arc<dyn Dialect>, config: Config) -> Compiler {
        Compiler {
            dialect,
            config: Arc::new(config),
            in_select: false,
            in_join: false,
            table_context: Vec::new(),
            root: true,
            session: Rc::new(Session::default()),
        }
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.dialect
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn in_select(&self) -> bool {
        self.in_select
    }

    pub fn in_join(&self) -> bool {
        self.in_join
    }

    pub fn table_context(&self) -> &[Name] {
        &self.table_context
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Quote an identifier using the dialect's rules.
    pub fn quote(&self, ident: &str) -> String {
        self.dialect.quote(ident)
    }

    /// Compile an element.
    ///
    /// When called on the root compiler, subqueries registered while compiling
    /// are emitted as a `WITH` preamble in registration order, and the
    /// registry is emptied.
    pub fn compile<'a>(&self, element: impl Into<Element<'a>>) -> Result<Compiled> {
        let element = element.into();

        if !self.root {
            return self.dispatch(element);
        }

        // Leftovers from a call that failed part way must not leak into this one.
        self.session.clear_subqueries();

        let compiled = self.dispatch(element);
        let subqueries = self.session.take_subqueries();

        match compiled? {
            Compiled::Sql(body) if !subqueries.is_empty() => {
                tracing::debug!(
                    dialect = self.dialect.name(),
                    subqueries = subqueries.len(),
                    "hoisting subqueries into WITH clause"
                );
                Ok(Compiled::Sql(self.with_clause(subqueries, &body)))
            }
            compiled => {
                // A sequence compiles none of its statements up front, so it
                // cannot have registered anything.
                debug_assert!(subqueries.is_empty() || matches!(compiled, Compiled::Sql(_)));
                Ok(compiled)
            }
        }
    }

    /// Compile an element that must produce inline SQL text.
    ///
    /// Nodes use this for their children. Sequences are rejected since they
    /// cannot be inlined.
    pub fn compile_sql<'a>(&self, element: impl Into<Element<'a>>) -> Result<String> {
        self.compile(element)?.into_sql()
    }

    fn dispatch(&self, element: Element<'_>) -> Result<Compiled> {
        use Element::*;

        let sql = match element {
            Null => "NULL".to_string(),
            Node(node) => node.compile(&self.non_root())?,
            Text(text) => text.into_owned(),
            Integer(value) => value.to_string(),
            Timestamp(value) => self.dialect.render_timestamp(&value)?,
            // No escaping is performed: the bytes are expected to be plain text.
            Bytes(bytes) => format!("b'{}'", std::str::from_utf8(&bytes)?),
            ArithString(value) => format!("'{value}'"),
            Sequence(sequence) => {
                return Ok(Compiled::Interpreter(ThreadLocalInterpreter::new(
                    self.clone(),
                    sequence,
                )))
            }
        };

        Ok(Compiled::Sql(sql))
    }

    fn with_clause(&self, subqueries: IndexMap<String, String>, body: &str) -> String {
        let mut sql = String::from("WITH ");
        let mut s = "";

        for (name, subquery) in &subqueries {
            sql.push_str(s);
            match self.config.cte_layout {
                CteLayout::Multiline => sql.push_str("\n  "),
                CteLayout::Inline => {}
            }
            sql.push_str(name);
            sql.push_str(" AS (");
            sql.push_str(subquery);
            sql.push(')');
            s = ", ";
        }

        match self.config.cte_layout {
            CteLayout::Multiline => sql.push('\n'),
            CteLayout::Inline => sql.push(' '),
        }
        sql.push_str(body);
        sql
    }

    /// Returns `prefix` followed by the next value of the session counter.
    ///
    /// Names are unique within one compilation tree, including across derived
    /// compilers.
    pub fn new_unique_name(&self, prefix: &str) -> String {
        let name = format!("{prefix}{}", self.session.next_id());
        tracing::trace!(%name, "generated unique name");
        name
    }

    /// Like [`new_unique_name`](Self::new_unique_name) using the configured prefix.
    pub fn new_tmp_name(&self) -> String {
        self.new_unique_name(&self.config.unique_prefix)
    }

    /// Returns a table name meant to be unique across a whole schema.
    ///
    /// The counter alone only guarantees uniqueness within this session, so a
    /// random 32-bit hexadecimal suffix is appended.
    pub fn new_unique_table_name(&self, prefix: &str) -> String {
        let suffix: u32 = rand::thread_rng().gen();
        let name = format!("{prefix}{}_{suffix:x}", self.session.next_id());
        tracing::trace!(%name, "generated unique table name");
        name
    }

    /// Returns a compiler that also sees `tables`. `self` is unchanged.
    pub fn with_extended_table_context(&self, tables: impl IntoIterator<Item = Name>) -> Compiler {
        let mut table_context = self.table_context.clone();
        table_context.extend(tables);

        Compiler {
            table_context,
            ..self.clone()
        }
    }

    pub fn with_in_select(&self, in_select: bool) -> Compiler {
        Compiler {
            in_select,
            ..self.clone()
        }
    }

    pub fn with_in_join(&self, in_join: bool) -> Compiler {
        Compiler {
            in_join,
            ..self.clone()
        }
    }

    /// Returns a copy that never assembles a `WITH` preamble.
    pub fn non_root(&self) -> Compiler {
        Compiler {
            root: false,
            ..self.clone()
        }
    }

    /// Register already compiled SQL as a named subquery.
    ///
    /// Registering the same name twice is accepted only if the text matches.
    pub fn add_subquery(&self, name: impl Into<String>, sql: impl Into<String>) -> Result<()> {
        let name = name.into();
        let sql = sql.into();

        tracing::trace!(%name, "registering subquery");

        if let Some(existing) = self.session.add_subquery(name.clone(), sql.clone()) {
            if existing != sql {
                bail!("subquery `{name}` is already registered with different text");
            }
        }

        Ok(())
    }

    /// Compile `element`, register it as a subquery under a fresh name and
    /// return that name.
    pub fn hoist<'a>(&self, element: impl Into<Element<'a>>) -> Result<String> {
        let sql = self.non_root().compile_sql(element)?;
        let name = self.new_tmp_name();
        self.add_subquery(name.clone(), sql)?;
        Ok(name)
    }

    /// Compile `element` and register it as a subquery under `name`.
    pub fn hoist_as<'a>(&self, name: &str, element: impl Into<Element<'a>>) -> Result<String> {
        let sql = self.non_root().compile_sql(element)?;
        self.add_subquery(name, sql)?;
        Ok(name.to_string())
    }

    /// Number of subqueries currently waiting to be emitted.
    pub fn pending_subqueries(&self) -> usize {
        self.session.subquery_count()
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("dialect", &self.dialect.name())
            .field("in_select", &self.in_select)
            .field("in_join", &self.in_join)
            .field("table_context", &self.table_context)
            .field("root", &self.root)
            .finish()
    }
}

impl Compiled {
    pub fn is_sql(&self) -> bool {
        matches!(self, Compiled::Sql(_))
    }

    pub fn is_interpreter(&self) -> bool {
        matches!(self, Compiled::Interpreter(_))
    }

    pub fn as_sql(&self) -> Option<&str> {
        match self {
            Compiled::Sql(sql) => Some(sql),
            Compiled::Interpreter(_) => None,
        }
    }

    pub fn into_sql(self) -> Result<String> {
        match self {
            Compiled::Sql(sql) => Ok(sql),
            Compiled::Interpreter(_) => Err(Error::unsupported_element(
                "a lazy statement sequence cannot be compiled to inline SQL",
            )),
        }
    }

    pub fn into_interpreter(self) -> Option<ThreadLocalInterpreter> {
        match self {
            Compiled::Interpreter(interpreter) => Some(interpreter),
            Compiled::Sql(_) => None,
        }
    }

    /// Execute the compiled output: text is run as a single statement, an
    /// interpreter is driven to completion on the same executor.
    pub async fn exec<E: Executor>(self, executor: &mut E) -> Result<Response> {
        match self {
            Compiled::Sql(sql) => executor.exec(&sql).await,
            Compiled::Interpreter(interpreter) => interpreter.run(executor).await,
        }
    }
}
