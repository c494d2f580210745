use serde_json::json;

use super::event::{Effect, EventModel, Msg, update};
use crate::handicap::HandicapUpdate;
use crate::payout::EventPayouts;
use crate::settlement::SettlementLedger;

/// The host side of the loop: persistence and the profile store.
pub trait EffectSink {
    fn publish_payouts(&mut self, payouts: &EventPayouts);
    fn publish_handicap(&mut self, update: &HandicapUpdate);
    fn persist_ledger(&mut self, ledger: &SettlementLedger);
}

/// Feeds `msgs` through `update` in order and hands every resulting effect to `sink`.
pub fn run_event(
    model: &mut EventModel,
    msgs: impl IntoIterator<Item = Msg>,
    sink: &mut dyn EffectSink,
) {
    for msg in msgs {
        log::debug!("{}", json!({"mvu": "msg", "msg": format!("{msg:?}")}));
        let effects = update(model, msg);
        log::debug!(
            "{}",
            json!({"mvu": "update", "queued_effects": effects.len()})
        );
        for effect in effects {
            match &effect {
                Effect::PublishPayouts(payouts) => sink.publish_payouts(payouts),
                Effect::PublishHandicap(update) => sink.publish_handicap(update),
                Effect::PersistLedger(ledger) => sink.persist_ledger(ledger),
            }
            log::debug!("{}", json!({"mvu": "effect_done", "effect": effect_name(&effect)}));
        }
    }
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::PublishPayouts(_) => "publish_payouts",
        Effect::PublishHandicap(_) => "publish_handicap",
        Effect::PersistLedger(_) => "persist_ledger",
    }
}
