use hyperlens::datasource::MockDataSource;
use hyperlens::domain::{Address, Coin, Decimal, Fill, LedgerEntry, Side, TimeMs};
use hyperlens::engine::FixedClock;
use hyperlens::service::{
    InMemoryUserRegistry, LeaderboardMetric, LeaderboardQuery, LeaderboardService, LedgerService,
    PnlService, PositionHistoryQuery, PositionService, TradeService, TradesQuery, UserRegistry,
};
use hyperlens::Clock;
use std::str::FromStr;
use std::sync::Arc;

const ALICE: &str = "0x1111111111111111111111111111111111111111";
const BOB: &str = "0x2222222222222222222222222222222222222222";
const BUILDER: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn addr(s: &str) -> Address {
    Address::new(s.to_string())
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(TimeMs::new(1_000_000)))
}

fn fill(user: &str, time_ms: i64, side: Side, px: &str, sz: &str, closed_pnl: &str) -> Fill {
    Fill {
        time_ms: TimeMs::new(time_ms),
        user: addr(user),
        coin: Coin::new("BTC".to_string()),
        side,
        px: dec(px),
        sz: dec(sz),
        fee: Decimal::zero(),
        closed_pnl: dec(closed_pnl),
        builder: None,
        hash: format!("0x{:x}", time_ms),
        oid: None,
        tid: Some(time_ms),
    }
}

fn attributed(mut f: Fill) -> Fill {
    f.builder = Some(addr(BUILDER));
    f
}

#[tokio::test]
async fn test_trades_listed_newest_first() {
    let source = MockDataSource::new()
        .with_fill(fill(ALICE, 100, Side::Buy, "100", "1", "0"))
        .with_fill(fill(ALICE, 300, Side::Sell, "110", "1", "10"))
        .with_fill(fill(ALICE, 200, Side::Buy, "105", "1", "0"));
    let svc = TradeService::new(Arc::new(source), clock(), None);

    let query = TradesQuery {
        user: addr(ALICE),
        ..Default::default()
    };
    let trades = svc.trades(&query).await.unwrap();
    let times: Vec<i64> = trades.iter().map(|f| f.time_ms.as_ms()).collect();
    assert_eq!(times, vec![300, 200, 100]);
}

#[tokio::test]
async fn test_trades_builder_only_keeps_attributed_fills() {
    let source = MockDataSource::new()
        .with_fill(attributed(fill(ALICE, 100, Side::Buy, "100", "1", "0")))
        .with_fill(fill(ALICE, 200, Side::Sell, "110", "1", "10"));
    let svc = TradeService::new(Arc::new(source), clock(), Some(addr(BUILDER)));

    let query = TradesQuery {
        user: addr(ALICE),
        builder_only: true,
        ..Default::default()
    };
    let trades = svc.trades(&query).await.unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].time_ms, TimeMs::new(100));
}

#[tokio::test]
async fn test_trades_builder_only_without_target_is_empty() {
    let source = MockDataSource::new().with_fill(fill(ALICE, 100, Side::Buy, "100", "1", "0"));
    let svc = TradeService::new(Arc::new(source), clock(), None);

    let query = TradesQuery {
        user: addr(ALICE),
        builder_only: true,
        ..Default::default()
    };
    let trades = svc.trades(&query).await.unwrap();
    assert!(trades.is_empty());
}

#[tokio::test]
async fn test_position_history_replays_from_before_the_window() {
    // The fill at t=100 shapes the state even though only t>=200 is emitted.
    let source = MockDataSource::new()
        .with_fill(fill(ALICE, 100, Side::Buy, "50000", "1", "0"))
        .with_fill(fill(ALICE, 200, Side::Buy, "60000", "1", "0"));
    let svc = PositionService::new(Arc::new(source), clock(), None);

    let query = PositionHistoryQuery {
        user: addr(ALICE),
        from_ms: Some(TimeMs::new(200)),
        ..Default::default()
    };
    let history = svc.position_history(&query).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].time_ms, TimeMs::new(200));
    assert_eq!(history[0].net_size, dec("2"));
    assert_eq!(history[0].avg_entry_px, dec("55000"));
}

#[tokio::test]
async fn test_position_history_annotates_taint_when_builder_only() {
    let source = MockDataSource::new()
        .with_fill(attributed(fill(ALICE, 100, Side::Buy, "100", "1", "0")))
        .with_fill(fill(ALICE, 200, Side::Buy, "110", "1", "0"));
    let svc = PositionService::new(Arc::new(source), clock(), Some(addr(BUILDER)));

    let query = PositionHistoryQuery {
        user: addr(ALICE),
        builder_only: true,
        ..Default::default()
    };
    let history = svc.position_history(&query).await.unwrap();
    assert_eq!(history[0].tainted, Some(false));
    assert_eq!(history[1].tainted, Some(true));
}

#[tokio::test]
async fn test_deposits_exclude_withdrawals() {
    let ledger = vec![
        LedgerEntry {
            user: addr(ALICE),
            time_ms: TimeMs::new(100),
            amount: dec("1000"),
            hash: Some("0xaaa".to_string()),
        },
        LedgerEntry {
            user: addr(ALICE),
            time_ms: TimeMs::new(200),
            amount: dec("-400"),
            hash: Some("0xbbb".to_string()),
        },
        LedgerEntry {
            user: addr(ALICE),
            time_ms: TimeMs::new(300),
            amount: dec("250"),
            hash: None,
        },
    ];
    let source = MockDataSource::new().with_ledger(ledger);
    let svc = LedgerService::new(Arc::new(source), clock());

    let report = svc.deposits(&addr(ALICE), None, None).await.unwrap();
    assert_eq!(report.deposit_count, 2);
    assert_eq!(report.total_deposits, dec("1250"));
    assert_eq!(report.deposits[0].time_ms, TimeMs::new(100));
    assert_eq!(report.deposits[1].hash, None);
}

#[tokio::test]
async fn test_leaderboard_ranks_by_pnl_descending() {
    let source = MockDataSource::new()
        .with_fill(fill(ALICE, 100, Side::Sell, "100", "1", "50"))
        .with_fill(fill(BOB, 100, Side::Sell, "100", "1", "200"));
    let pnl = Arc::new(PnlService::new(Arc::new(source), clock(), None));
    let registry = Arc::new(InMemoryUserRegistry::new(vec![addr(ALICE), addr(BOB)]));
    let svc = LeaderboardService::new(pnl, registry);

    let query = LeaderboardQuery {
        coin: None,
        from_ms: None,
        to_ms: None,
        metric: LeaderboardMetric::Pnl,
        builder_only: false,
        max_start_capital: None,
    };
    let entries = svc.leaderboard(&query).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[0].user, addr(BOB));
    assert_eq!(entries[0].metric_value, dec("200"));
    assert_eq!(entries[1].rank, 2);
    assert_eq!(entries[1].user, addr(ALICE));
}

#[tokio::test]
async fn test_leaderboard_skips_users_whose_fetch_fails() {
    let source = MockDataSource::new().failing_fills();
    let pnl = Arc::new(PnlService::new(Arc::new(source), clock(), None));
    let registry = Arc::new(InMemoryUserRegistry::new(vec![addr(ALICE)]));
    let svc = LeaderboardService::new(pnl, registry);

    let query = LeaderboardQuery {
        coin: None,
        from_ms: None,
        to_ms: None,
        metric: LeaderboardMetric::Volume,
        builder_only: false,
        max_start_capital: None,
    };
    let entries = svc.leaderboard(&query).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_registry_track_dedupes() {
    let registry = InMemoryUserRegistry::new(vec![addr(ALICE)]);
    registry.track(addr(ALICE));
    registry.track(addr(BOB));
    assert_eq!(registry.users().len(), 2);
}
