//! Small nodes shared by every query builder.

mod cte;
pub use cte::Cte;

mod delim;
pub use delim::{Comma, Delimited};

mod name;
pub use name::Name;
