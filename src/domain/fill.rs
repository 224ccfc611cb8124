//! Fill type representing a single trade execution.

use crate::domain::{Address, Coin, Decimal, Side, TimeMs};
use serde::{Deserialize, Serialize};

/// A single trade fill, as reported by the exchange. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    /// Time of the fill in milliseconds since Unix epoch.
    pub time_ms: TimeMs,
    /// User/wallet address the fill belongs to.
    pub user: Address,
    /// Coin/asset being traded.
    pub coin: Coin,
    /// Trade side (Buy or Sell).
    pub side: Side,
    /// Price per unit.
    pub px: Decimal,
    /// Size/quantity traded (always positive).
    pub sz: Decimal,
    /// Fee paid for this fill.
    pub fee: Decimal,
    /// Realized PnL closed by this fill.
    pub closed_pnl: Decimal,
    /// Builder address the fill was attributed to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builder: Option<Address>,
    /// Transaction hash.
    pub hash: String,
    /// Order ID.
    pub oid: Option<i64>,
    /// Trade ID.
    pub tid: Option<i64>,
}

impl Fill {
    /// Signed size of this fill: Buy = +sz, Sell = -sz.
    pub fn signed_size(&self) -> Decimal {
        match self.side {
            Side::Buy => self.sz,
            Side::Sell => -self.sz,
        }
    }

    /// Notional value of this fill (px * sz).
    pub fn notional(&self) -> Decimal {
        self.px * self.sz
    }

    /// True if this fill is attributed to `target`.
    pub fn attributed_to(&self, target: &Address) -> bool {
        self.builder.as_ref() == Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fill(side: Side, builder: Option<&str>) -> Fill {
        Fill {
            time_ms: TimeMs::new(1000),
            user: Address::new("0x123".to_string()),
            coin: Coin::new("BTC".to_string()),
            side,
            px: Decimal::from_str("50000").unwrap(),
            sz: Decimal::from_str("1.5").unwrap(),
            fee: Decimal::from_str("10").unwrap(),
            closed_pnl: Decimal::zero(),
            builder: builder.map(|b| Address::new(b.to_string())),
            hash: "0xabc".to_string(),
            oid: Some(456),
            tid: Some(123),
        }
    }

    #[test]
    fn test_signed_size() {
        assert_eq!(
            fill(Side::Buy, None).signed_size(),
            Decimal::from_str("1.5").unwrap()
        );
        assert_eq!(
            fill(Side::Sell, None).signed_size(),
            Decimal::from_str("-1.5").unwrap()
        );
    }

    #[test]
    fn test_notional() {
        assert_eq!(
            fill(Side::Buy, None).notional(),
            Decimal::from_str("75000").unwrap()
        );
    }

    #[test]
    fn test_attributed_to() {
        let target = Address::new("0xbuilder".to_string());
        assert!(fill(Side::Buy, Some("0xbuilder")).attributed_to(&target));
        assert!(!fill(Side::Buy, Some("0xother")).attributed_to(&target));
        assert!(!fill(Side::Buy, None).attributed_to(&target));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let f = fill(Side::Buy, Some("0xbuilder"));
        let json = serde_json::to_string(&f).unwrap();
        let back: Fill = serde_json::from_str(&json).unwrap();
        assert_eq!(f, back);
    }
}
