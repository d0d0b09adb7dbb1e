//! Core business logic: conversion graph and sales aggregation

pub mod analytics;
pub mod config;
pub mod currency;
pub mod edge;
pub mod error;
pub mod exact;
pub mod graph;
pub mod log;
pub mod sales;
pub mod shared;

// Re-export main types for cleaner imports
pub use currency::{CurrencyCode, CurrencyRateProvider};
pub use edge::{ConversionEdge, RawRate};
pub use error::{Result, TradeError};
pub use graph::{ConversionGraph, GraphOptions, InferenceStrategy};
pub use sales::{SalesAggregator, SalesQuery, TransactionRecord};
pub use shared::SharedConversionGraph;
