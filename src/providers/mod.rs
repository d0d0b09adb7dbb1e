//! Loaders that turn data files into the in-memory sequences the core consumes.

pub mod rates_xml;
pub mod transactions_csv;
