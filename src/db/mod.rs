//! Persistence port and adapters. Feature repositories talk to the
//! synchronous [`Db`](port::Db) port; [`MySqlDb`](mysql_adapter::MySqlDb)
//! is the production adapter.

pub mod mysql_adapter;
pub mod port;

pub use mysql_adapter::MySqlDb;
pub use port::{Db, Param, Row, Value};
