use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{GolferId, Ledger, Money, RoundingMode};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundingPolicy {
    pub unit: Money,
    #[serde(default)]
    pub mode: RoundingMode,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self {
            unit: Money::from_cents(100),
            mode: RoundingMode::Down,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct SettlementId(u32);

impl SettlementId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for SettlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Venmo,
    Zelle,
    #[serde(rename = "paypal")]
    PayPal,
    Other(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SettlementStatus {
    #[default]
    Pending,
    Paid { method: PaymentMethod },
    Forgiven,
}

impl SettlementStatus {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// `from` owes `to`. Always `calculated_amount = rounded_amount + tip_fund_amount`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub id: SettlementId,
    pub from: GolferId,
    pub to: GolferId,
    pub calculated_amount: Money,
    pub rounded_amount: Money,
    pub tip_fund_amount: Money,
    pub status: SettlementStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    pub settlements: Vec<Settlement>,
    pub tip_fund_delta: Money,
    /// Balances left once one side ran out: money collected but never paid
    /// out (negative) or owed with nobody left to pay it (positive).
    pub unmatched: Ledger,
}

/// Picks the largest balance; equal balances go to the lowest golfer id.
fn largest(balances: &[(GolferId, Money)]) -> Option<usize> {
    balances
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(i, _)| i)
}

/// Reduces net balances to pairwise debts by repeatedly matching the
/// largest creditor with the largest debtor. Each edge is rounded to the
/// policy's unit and the remainder goes to the tip fund. `Nearest` only
/// rounds an edge up while the fund accumulated so far covers the shortfall.
#[must_use]
pub fn settle(net: &Ledger, policy: &RoundingPolicy) -> SettlementPlan {
    let mut creditors: Vec<(GolferId, Money)> = net
        .iter()
        .filter(|(_, m)| m.is_positive())
        .map(|(g, m)| (g.clone(), *m))
        .collect();
    let mut debtors: Vec<(GolferId, Money)> = net
        .iter()
        .filter(|(_, m)| m.is_negative())
        .map(|(g, m)| (g.clone(), m.abs()))
        .collect();

    let mut settlements = Vec::new();
    let mut tip_fund_delta = Money::ZERO;
    while let (Some(c), Some(d)) = (largest(&creditors), largest(&debtors)) {
        let amount = creditors[c].1.min(debtors[d].1);
        let mut rounded = amount.round_to(policy.unit, policy.mode);
        if (tip_fund_delta + amount - rounded).is_negative() {
            // Rounding up would draw the fund below zero.
            rounded = amount.round_to(policy.unit, RoundingMode::Down);
        }
        let tip = amount - rounded;
        tip_fund_delta += tip;
        settlements.push(Settlement {
            id: SettlementId::new(settlements.len() as u32 + 1),
            from: debtors[d].0.clone(),
            to: creditors[c].0.clone(),
            calculated_amount: amount,
            rounded_amount: rounded,
            tip_fund_amount: tip,
            status: SettlementStatus::Pending,
        });
        creditors[c].1 -= amount;
        debtors[d].1 -= amount;
        creditors.retain(|(_, m)| m.is_positive());
        debtors.retain(|(_, m)| m.is_positive());
    }

    let mut unmatched = Ledger::new();
    for (golfer, amount) in creditors {
        unmatched.insert(golfer, amount);
    }
    for (golfer, amount) in debtors {
        unmatched.insert(golfer, -amount);
    }
    if !unmatched.is_empty() {
        let residue: Money = unmatched.values().sum();
        log::warn!("net table does not balance; {residue} left unmatched");
    }

    SettlementPlan {
        settlements,
        tip_fund_delta,
        unmatched,
    }
}
