//! Autovault
//!
//! Autovault manages a catalog of vehicle records held in a document store.
//! A [`catalog::Catalog`] keeps a full in-memory snapshot of the collection,
//! derives statistics from it, filters and searches it for display, and
//! mediates create, edit and delete operations, re-reading the collection
//! after every confirmed write.

pub mod bootstrap;
pub mod catalog;
pub mod prelude;
pub mod store;
pub mod vehicles;

#[cfg(test)]
mod test;
