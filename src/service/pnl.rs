//! Realized-PnL aggregation and effective-capital reconstruction.
//!
//! Return % is realized PnL over effective capital. Without access to the
//! margin engine's equity snapshots, starting equity is approximated by
//! replaying all public ledger history (deposits, realized PnL, fees,
//! funding) up to the window start.

use crate::datasource::{DataSource, DataSourceError};
use crate::domain::numeric::safe_div;
use crate::domain::ordering::sort_fills_chronological;
use crate::domain::{Address, Coin, Decimal, PnlMetrics, TimeMs};
use crate::engine::taint::filter_retroactive;
use crate::engine::window::{Clock, TimeWindow};
use std::sync::Arc;
use tracing::warn;

/// Query parameters for a PnL computation.
#[derive(Debug, Clone, Default)]
pub struct PnlQuery {
    pub user: Address,
    pub coin: Option<Coin>,
    pub from_ms: Option<TimeMs>,
    pub to_ms: Option<TimeMs>,
    pub builder_only: bool,
    pub max_start_capital: Option<Decimal>,
}

/// Computes [`PnlMetrics`] for arbitrary query windows.
#[derive(Clone)]
pub struct PnlService {
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
    target_builder: Option<Address>,
}

impl PnlService {
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

    /// Compute realized PnL, fees, volume and normalized return for a window.
    ///
    /// A failure on the in-window fetch propagates to the caller; a failure
    /// on the historical equity fetch degrades `effective_capital` to 1 and
    /// the request still succeeds.
    pub async fn compute_pnl(&self, query: &PnlQuery) -> Result<PnlMetrics, DataSourceError> {
        let window = TimeWindow::resolve(query.from_ms, query.to_ms, self.clock.as_ref());

        let mut fills = self
            .source
            .fetch_fills(&query.user, window.start, window.end)
            .await?;

        if let Some(coin) = &query.coin {
            fills.retain(|f| f.coin == *coin);
        }
        sort_fills_chronological(&mut fills);

        let mut tainted = false;
        if query.builder_only {
            // With no target configured, aggregation deliberately falls back
            // to unfiltered data (trade listing behaves differently; see
            // DESIGN.md).
            if let Some(target) = &self.target_builder {
                let (kept, any_violated) = filter_retroactive(fills, target);
                fills = kept;
                tainted = any_violated;
            }
        }

        let mut realized_pnl = Decimal::zero();
        let mut fees_paid = Decimal::zero();
        let mut volume = Decimal::zero();
        for fill in &fills {
            realized_pnl += fill.closed_pnl;
            fees_paid += fill.fee;
            volume += fill.notional();
        }

        let effective_capital = self
            .effective_capital(&query.user, &window, query.max_start_capital)
            .await;

        let return_pct = safe_div(realized_pnl, effective_capital) * Decimal::hundred();

        Ok(PnlMetrics {
            realized_pnl,
            return_pct,
            fees_paid,
            trade_count: fills.len() as i64,
            volume,
            tainted,
            effective_capital,
        })
    }

    /// Resolve the return-normalization denominator for a window.
    async fn effective_capital(
        &self,
        user: &Address,
        window: &TimeWindow,
        max_start_capital: Option<Decimal>,
    ) -> Decimal {
        let mut capital = if window.has_explicit_start() {
            match self.starting_equity(user, window.start).await {
                Ok(equity) => match max_start_capital {
                    Some(max) => equity.min(max),
                    None => equity,
                },
                Err(e) => {
                    warn!(user = %user, error = %e, "Historical equity fetch failed, defaulting effective capital to 1");
                    Decimal::one()
                }
            }
        } else {
            // All-time query: starting equity is ambiguous.
            max_start_capital.unwrap_or_else(Decimal::one)
        };

        // Non-positive equity would produce nonsense return percentages.
        if !capital.is_positive() {
            capital = Decimal::one();
        }
        capital
    }

    /// Approximate account equity at `start` by replaying all prior history.
    ///
    /// The three fetches run concurrently and combine only once all of them
    /// resolve; any failure fails the whole reconstruction.
    async fn starting_equity(
        &self,
        user: &Address,
        start: TimeMs,
    ) -> Result<Decimal, DataSourceError> {
        let (past_fills, past_funding, past_ledger) = tokio::try_join!(
            self.source.fetch_fills(user, TimeMs::EPOCH, start),
            self.source.fetch_funding(user, TimeMs::EPOCH, start),
            self.source.fetch_ledger_updates(user, TimeMs::EPOCH, start),
        )?;

        let mut past_pnl = Decimal::zero();
        let mut past_fees = Decimal::zero();
        for fill in &past_fills {
            past_pnl += fill.closed_pnl;
            past_fees += fill.fee;
        }

        let mut past_funding_total = Decimal::zero();
        for entry in &past_funding {
            past_funding_total += entry.amount;
        }

        let mut past_deposits = Decimal::zero();
        for entry in &past_ledger {
            past_deposits += entry.amount;
        }

        Ok(past_deposits + past_pnl - past_fees + past_funding_total)
    }
}
