//! Trade listing service.

use crate::datasource::{DataSource, DataSourceError};
use crate::domain::ordering::sort_fills_newest_first;
use crate::domain::{Address, Coin, Fill, TimeMs};
use crate::engine::window::{Clock, TimeWindow};
use std::sync::Arc;

/// Query parameters for a trade listing.
#[derive(Debug, Clone, Default)]
pub struct TradesQuery {
    pub user: Address,
    pub coin: Option<Coin>,
    pub from_ms: Option<TimeMs>,
    pub to_ms: Option<TimeMs>,
    pub builder_only: bool,
}

/// Lists normalized fills for a user, newest first.
#[derive(Clone)]
pub struct TradeService {
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
    target_builder: Option<Address>,
}

impl TradeService {
    pub fn new(
        source: Arc<dyn DataSource>,
        clock: Arc<dyn Clock>,
        target_builder: Option<Address>,
    ) -> Self {
        Self {
            source,
            clock,
            target_builder,
        }
    }

    pub async fn trades(&self, query: &TradesQuery) -> Result<Vec<Fill>, DataSourceError> {
        let window = TimeWindow::resolve(query.from_ms, query.to_ms, self.clock.as_ref());

        let mut fills = self
            .source
            .fetch_fills(&query.user, window.start, window.end)
            .await?;

        if let Some(coin) = &query.coin {
            fills.retain(|f| f.coin == *coin);
        }

        if query.builder_only {
            match &self.target_builder {
                Some(target) => fills.retain(|f| f.attributed_to(target)),
                // No target configured: the listing yields nothing, unlike
                // PnL aggregation which falls back to unfiltered data. Kept
                // divergent on purpose; see DESIGN.md.
                None => return Ok(Vec::new()),
            }
        }

        sort_fills_newest_first(&mut fills);
        Ok(fills)
    }
}
