use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::handicap::{
    Differential, HandicapUpdate, handicap_index, recalculate, round_differential,
    sort_most_recent_first,
};
use crate::model::ingest::check_hole_score;
use crate::model::{EventSnapshot, GameId, GameOutcome, GolferId, SideBetWinner};
use crate::payout::{EventPayouts, compute_event_payouts};
use crate::settlement::{
    PaymentMethod, RoundingPolicy, SettlementId, SettlementLedger, Transition,
};

#[derive(Debug, Clone)]
pub struct EventModel {
    pub snapshot: EventSnapshot,
    pub policy: RoundingPolicy,
    /// Each golfer's history, most recent first.
    pub differentials: BTreeMap<GolferId, Vec<Differential>>,
    pub payouts: EventPayouts,
    pub ledger: Option<SettlementLedger>,
}

impl EventModel {
    #[must_use]
    pub fn new(snapshot: EventSnapshot, policy: RoundingPolicy) -> Self {
        let payouts = compute_event_payouts(&snapshot);
        Self {
            snapshot,
            policy,
            differentials: BTreeMap::new(),
            payouts,
            ledger: None,
        }
    }

    #[must_use]
    pub fn current_index(&self, golfer: &GolferId) -> Option<f64> {
        self.differentials
            .get(golfer)
            .and_then(|d| handicap_index(d).index)
    }

    /// No game is still waiting on scores.
    #[must_use]
    pub fn is_final(&self) -> bool {
        !self
            .payouts
            .outcomes
            .iter()
            .any(|o| matches!(o, GameOutcome::InProgress { .. }))
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    ScoreEntered {
        golfer: GolferId,
        hole: u8,
        strokes: Option<u8>,
    },
    SideBetRecorded {
        game_id: GameId,
        winner: SideBetWinner,
    },
    DifferentialsLoaded {
        golfer: GolferId,
        differentials: Vec<Differential>,
    },
    RoundFinalized {
        round_id: String,
        played_on: NaiveDate,
    },
    SettleRequested,
    MarkPaid {
        id: SettlementId,
        method: PaymentMethod,
    },
    Forgive {
        id: SettlementId,
    },
}

#[derive(Debug, Clone)]
pub enum Effect {
    PublishPayouts(EventPayouts),
    PublishHandicap(HandicapUpdate),
    PersistLedger(SettlementLedger),
}

pub fn update(model: &mut EventModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::ScoreEntered {
            golfer,
            hole,
            strokes,
        } => {
            if let Err(err) =
                check_hole_score(&golfer, hole, strokes, model.snapshot.tee.as_ref())
            {
                log::warn!("score entry ignored: {err}");
                return vec![];
            }
            if model.ledger.is_some() {
                log::warn!("score change for {golfer} after settlement; ledger left as is");
            }
            model.snapshot.scorecard.record(&golfer, hole, strokes);
            recompute(model)
        }
        Msg::SideBetRecorded { game_id, winner } => {
            let recorded = model.snapshot.side_bet_winners.entry(game_id).or_default();
            recorded.retain(|w| w.hole != winner.hole);
            recorded.push(winner);
            recorded.sort_by_key(|w| w.hole);
            recompute(model)
        }
        Msg::DifferentialsLoaded {
            golfer,
            mut differentials,
        } => {
            sort_most_recent_first(&mut differentials);
            let previous = model.current_index(&golfer).or_else(|| {
                model
                    .snapshot
                    .roster_entry(&golfer)
                    .and_then(|r| r.handicap_index)
            });
            let update = recalculate(&golfer, previous, &differentials);
            model.differentials.insert(golfer, differentials);
            update.into_iter().map(Effect::PublishHandicap).collect()
        }
        Msg::RoundFinalized {
            round_id,
            played_on,
        } => finalize_round(model, &round_id, played_on),
        Msg::SettleRequested => {
            if model.ledger.is_some() {
                return vec![];
            }
            if !model.is_final() {
                log::info!("event {} still in progress; not settling", model.snapshot.event_id);
                return vec![];
            }
            let ledger = SettlementLedger::settle(
                model.snapshot.event_id.clone(),
                &model.payouts.table.net(),
                model.policy,
            );
            model.ledger = Some(ledger.clone());
            vec![Effect::PersistLedger(ledger)]
        }
        Msg::MarkPaid { id, method } => {
            apply_transition(model, |ledger| ledger.mark_paid(id, method))
        }
        Msg::Forgive { id } => apply_transition(model, |ledger| ledger.forgive(id)),
    }
}

fn recompute(model: &mut EventModel) -> Vec<Effect> {
    let payouts = compute_event_payouts(&model.snapshot);
    if payouts == model.payouts {
        return vec![];
    }
    model.payouts = payouts.clone();
    vec![Effect::PublishPayouts(payouts)]
}

/// Adds a differential for every golfer with a complete card, once per round.
fn finalize_round(model: &mut EventModel, round_id: &str, played_on: NaiveDate) -> Vec<Effect> {
    let mut effects = Vec::new();
    for entry in &model.snapshot.roster {
        let golfer = &entry.golfer;
        let history = model.differentials.entry(golfer.clone()).or_default();
        if history.iter().any(|d| d.round_id == round_id) {
            continue;
        }
        let Some(differential) = round_differential(
            round_id,
            played_on,
            &model.snapshot.scorecard,
            golfer,
            model.snapshot.tee.as_ref(),
            entry.handicap_index,
        ) else {
            continue;
        };
        let previous = handicap_index(history).index.or(entry.handicap_index);
        history.push(differential);
        sort_most_recent_first(history);
        if let Some(update) = recalculate(golfer, previous, history) {
            effects.push(Effect::PublishHandicap(update));
        }
    }
    effects
}

fn apply_transition(
    model: &mut EventModel,
    apply: impl FnOnce(&mut SettlementLedger) -> Transition,
) -> Vec<Effect> {
    let Some(ledger) = model.ledger.as_mut() else {
        return vec![];
    };
    match apply(ledger) {
        Transition::Applied => vec![Effect::PersistLedger(ledger.clone())],
        other => {
            log::debug!("settlement transition ignored: {other:?}");
            vec![]
        }
    }
}
