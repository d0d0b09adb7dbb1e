use crate::core::currency::CurrencyRateProvider;
use crate::core::edge::ConversionEdge;
use crate::core::error::{Result, TradeError};
use crate::core::exact::exact_mul;
use crate::core::graph::ConversionGraph;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// A conversion graph shared between concurrent aggregation tasks.
///
/// Direct lookups run under the read lock. A miss takes the write lock and
/// resolves again, so tasks racing on the same missing pair wait for the
/// first one and then find its memoized edge.
#[derive(Clone)]
pub struct SharedConversionGraph {
    inner: Arc<RwLock<ConversionGraph>>,
}

impl SharedConversionGraph {
    pub fn new(graph: ConversionGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    #[instrument(name = "ResolveRate", skip(self))]
    pub async fn resolve(&self, from: &str, to: &str) -> Result<ConversionEdge> {
        {
            let graph = self.inner.read().await;
            if let Some(edge) = graph.find_direct(from, to) {
                debug!("Rate cache HIT");
                return Ok(edge.clone());
            }
        }
        debug!("Rate cache MISS");
        let mut graph = self.inner.write().await;
        graph.resolve(from, to)
    }

    pub async fn convert(&self, from: &str, to: &str, amount: Decimal) -> Result<Decimal> {
        if from == to {
            return Ok(amount);
        }
        let rate = self.get_rate(from, to).await?;
        exact_mul(amount, rate).map_err(|kind| TradeError::inexact_conversion(kind, from, to))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// A copy of every edge, in insertion order.
    pub async fn edges(&self) -> Vec<ConversionEdge> {
        self.inner.read().await.edges().cloned().collect()
    }
}

#[async_trait]
impl CurrencyRateProvider for SharedConversionGraph {
    async fn get_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        self.resolve(from, to).await.map(|edge| edge.rate())
    }
}
