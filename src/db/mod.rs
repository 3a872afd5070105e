//! Persistence module split across logical submodules. `connection` owns the
//! handle and transaction discipline; the sibling modules attach the query
//! operations in their own `impl Database` blocks.

mod connection;
mod favorites;
mod hymns;
mod maintenance;
mod schema;
mod settings;

#[cfg(test)]
mod tests;

pub use connection::Database;
