use serde::{Deserialize, Serialize};

use super::simplify::{
    PaymentMethod, RoundingPolicy, Settlement, SettlementId, SettlementStatus, settle,
};
use crate::model::{Ledger, Money};

/// Pooled rounding remainders for one event. Paying it out is the host's business.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TipFund {
    pub balance: Money,
}

impl TipFund {
    /// Adds `amount` unless that would leave the balance negative; a refused
    /// contribution leaves the balance untouched and returns `false`.
    pub fn contribute(&mut self, amount: Money) -> bool {
        let next = self.balance + amount;
        if next.is_negative() {
            log::warn!("tip fund contribution of {amount} refused; balance is {}", self.balance);
            return false;
        }
        self.balance = next;
        true
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    Applied,
    /// The settlement was already terminal; nothing changed.
    Unchanged { status: SettlementStatus },
    UnknownSettlement,
}

/// The settlement ledger for one event. Sole owner of settlement status.
/// Callers serialize access (e.g. one mutex per event); each transition is
/// then atomic and idempotent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SettlementLedger {
    pub event_id: String,
    pub policy: RoundingPolicy,
    pub settlements: Vec<Settlement>,
    pub tip_fund: TipFund,
    pub unmatched: Ledger,
}

impl SettlementLedger {
    /// Settles a net table into a fresh ledger.
    #[must_use]
    pub fn settle(event_id: impl Into<String>, net: &Ledger, policy: RoundingPolicy) -> Self {
        let plan = settle(net, &policy);
        let mut tip_fund = TipFund::default();
        tip_fund.contribute(plan.tip_fund_delta);
        Self {
            event_id: event_id.into(),
            policy,
            settlements: plan.settlements,
            tip_fund,
            unmatched: plan.unmatched,
        }
    }

    #[must_use]
    pub fn get(&self, id: SettlementId) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.id == id)
    }

    pub fn mark_paid(&mut self, id: SettlementId, method: PaymentMethod) -> Transition {
        self.transition(id, SettlementStatus::Paid { method })
    }

    pub fn forgive(&mut self, id: SettlementId) -> Transition {
        self.transition(id, SettlementStatus::Forgiven)
    }

    fn transition(&mut self, id: SettlementId, next: SettlementStatus) -> Transition {
        let Some(settlement) = self.settlements.iter_mut().find(|s| s.id == id) else {
            return Transition::UnknownSettlement;
        };
        if settlement.status.is_terminal() {
            return Transition::Unchanged {
                status: settlement.status.clone(),
            };
        }
        settlement.status = next;
        Transition::Applied
    }

    /// Rounded amounts still pending.
    #[must_use]
    pub fn outstanding(&self) -> Money {
        self.settlements
            .iter()
            .filter(|s| s.status == SettlementStatus::Pending)
            .map(|s| s.rounded_amount)
            .sum()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.settlements.iter().all(|s| s.status.is_terminal())
    }
}
