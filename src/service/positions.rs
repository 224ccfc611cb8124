//! Position history reconstruction service.

use crate::datasource::{DataSource, DataSourceError};
use crate::domain::ordering::sort_fills_chronological;
use crate::domain::{Address, Coin, PositionState, TimeMs};
use crate::engine::replay::{replay_positions, ReplayOptions};
use crate::engine::window::{Clock, TimeWindow};
use std::sync::Arc;

/// Query parameters for a position history reconstruction.
#[derive(Debug, Clone, Default)]
pub struct PositionHistoryQuery {
    pub user: Address,
    pub coin: Option<Coin>,
    pub from_ms: Option<TimeMs>,
    pub to_ms: Option<TimeMs>,
    pub builder_only: bool,
}

/// Replays fills into position states over time.
#[derive(Clone)]
pub struct PositionService {
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
    target_builder: Option<Address>,
}

impl PositionService {
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

    /// Reconstruct position states for a user, chronological.
    ///
    /// Position state is path-dependent, so fills are always fetched from
    /// epoch up to the resolved end; `from_ms` only bounds the emitted
    /// output.
    pub async fn position_history(
        &self,
        query: &PositionHistoryQuery,
    ) -> Result<Vec<PositionState>, DataSourceError> {
        let window = TimeWindow::resolve(None, query.to_ms, self.clock.as_ref());

        let mut fills = self
            .source
            .fetch_fills(&query.user, TimeMs::EPOCH, window.end)
            .await?;

        if let Some(coin) = &query.coin {
            fills.retain(|f| f.coin == *coin);
        }
        sort_fills_chronological(&mut fills);

        let options = ReplayOptions {
            builder_only: query.builder_only,
            target_builder: self.target_builder.clone(),
            from_ms: query.from_ms,
            to_ms: query.to_ms,
        };
        Ok(replay_positions(&fills, &options))
    }
}
