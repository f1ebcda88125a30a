use dlg_core::{
    ActionKind, ActionRecord, CompareOp, ConditionRecord, ConditionTest, ItemSpec, PlayerState,
    StatKey,
};
use log::warn;

/// Evaluates one gating condition against player state. Conditions outside
/// the known grammar never block progress.
pub fn evaluate_condition(condition: &ConditionRecord, player: &dyn PlayerState) -> bool {
    match &condition.test {
        ConditionTest::Stat { stat, op, amount } => {
            let actual = match stat {
                StatKey::Gold => player.gold(),
                StatKey::Level => player.level(),
                StatKey::Mana => player.current_mana(),
            };
            match op {
                CompareOp::AtLeast => actual >= *amount,
                CompareOp::Above => actual > *amount,
            }
        }
        ConditionTest::HasItem { name } => player.has_item(name),
        ConditionTest::Unknown => true,
    }
}

/// Applies one action to player state. Individual failures (insufficient
/// funds, a full inventory) are reported and skipped; they never abort the
/// rest of a choice's actions.
pub fn execute_action(action: &ActionRecord, player: &mut dyn PlayerState) {
    match action.kind {
        ActionKind::Gold => {
            if action.int_param > 0 {
                player.add_gold(action.int_param);
            } else if !player.spend_gold(-action.int_param) {
                warn!(
                    "action could not spend {} gold, only {} available",
                    -action.int_param,
                    player.gold()
                );
            }
        }
        ActionKind::Item => {
            let spec = ItemSpec::parse(&action.string_param);
            if !player.pickup_item(&spec) {
                warn!("inventory rejected item \"{}\"", spec.name);
            }
        }
        ActionKind::Xp => player.gain_experience(action.int_param),
        ActionKind::Health => {
            if action.int_param > 0 {
                player.heal(action.int_param);
            } else {
                player.take_damage(-action.int_param);
            }
        }
        ActionKind::Mana => player.restore_mana(action.int_param),
        ActionKind::EndDialogue => {}
    }
}
