use std::collections::VecDeque;
use std::path::Path;

use dlg_core::{ActionRecord, DialogueError, DialogueNode, NodeId, PlayerState};
use dlg_graph::DialogueGraph;
use log::{info, warn};

use crate::dispatch::{evaluate_condition, execute_action};

pub type NavigationCallback = Box<dyn FnMut(NodeId)>;

/// Result of selecting a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// A gating condition failed. No actions ran and no navigation happened.
    Blocked { condition: String },
    /// Every condition held and every action ran. A `None` target marks a
    /// terminal choice; the shell is expected to end the interaction.
    Advanced { target: Option<NodeId> },
}

/// One queued action with the delay it still has to wait out.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelayedAction {
    pub action: ActionRecord,
    pub remaining_seconds: f32,
}

/// One loaded dialogue session: the graph, the delayed-action queue, and the
/// navigation callback the shell registers. Player state is passed into each
/// call that can mutate it; the session never owns it.
pub struct DialogueSession {
    graph: DialogueGraph,
    pending: VecDeque<PendingDelayedAction>,
    on_navigate: Option<NavigationCallback>,
}

impl std::fmt::Debug for DialogueSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueSession")
            .field("graph", &self.graph)
            .field("pending", &self.pending)
            .field(
                "on_navigate",
                &self.on_navigate.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl DialogueSession {
    pub fn new() -> Self {
        Self::with_graph(DialogueGraph::new())
    }

    pub fn with_graph(graph: DialogueGraph) -> Self {
        Self {
            graph,
            pending: VecDeque::new(),
            on_navigate: None,
        }
    }

    pub fn graph(&self) -> &DialogueGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut DialogueGraph {
        &mut self.graph
    }

    pub fn load_primary_file(&mut self, path: impl AsRef<Path>) -> Result<(), DialogueError> {
        self.graph.load_primary_file(path)
    }

    pub fn load_additional_file(&mut self, path: impl AsRef<Path>) -> Result<(), DialogueError> {
        self.graph.load_additional_file(path)
    }

    pub fn load_primary_source(
        &mut self,
        name: impl Into<String>,
        source: &str,
    ) -> Result<(), DialogueError> {
        self.graph.load_primary_source(name, source)
    }

    pub fn load_additional_source(
        &mut self,
        name: impl Into<String>,
        source: &str,
    ) -> Result<(), DialogueError> {
        self.graph.load_additional_source(name, source)
    }

    pub fn resolve_root(&mut self) -> Result<NodeId, DialogueError> {
        self.graph.resolve_root()
    }

    pub fn resolve_node(&mut self, id: &str) -> Result<NodeId, DialogueError> {
        self.graph.resolve_node(id)
    }

    pub fn node(&self, id: NodeId) -> &DialogueNode {
        self.graph.node(id)
    }

    /// Registers the callback invoked whenever a selected choice navigates to
    /// a target node.
    pub fn set_navigation_callback(&mut self, callback: impl FnMut(NodeId) + 'static) {
        self.on_navigate = Some(Box::new(callback));
    }

    /// Runs the choice at `choice_index` of `node`: evaluates the condition
    /// gate (all-or-nothing), then applies every action in declaration order,
    /// then navigates. Individual action failures do not stop later actions.
    pub fn select_choice(
        &mut self,
        node: NodeId,
        choice_index: usize,
        player: &mut dyn PlayerState,
    ) -> Result<ChoiceOutcome, DialogueError> {
        let Some(choice) = self.graph.node(node).choices.get(choice_index).cloned() else {
            return Err(DialogueError::new(
                "SESSION_CHOICE_INDEX",
                format!(
                    "Node \"{}\" has no choice {}.",
                    self.graph.node(node).id,
                    choice_index
                ),
            ));
        };

        for condition in &choice.conditions {
            if !evaluate_condition(condition, player) {
                warn!("condition not met: {}", condition.raw);
                return Ok(ChoiceOutcome::Blocked {
                    condition: condition.raw.clone(),
                });
            }
        }

        for action in &choice.actions {
            execute_action(action, player);
        }

        if let Some(target) = choice.target {
            if let Some(callback) = self.on_navigate.as_mut() {
                callback(target);
            }
        }

        Ok(ChoiceOutcome::Advanced {
            target: choice.target,
        })
    }

    /// Queues `action` to fire after `delay_seconds` of ticked time, behind
    /// everything already queued.
    pub fn enqueue_delayed(&mut self, action: ActionRecord, delay_seconds: f32) {
        self.pending.push_back(PendingDelayedAction {
            action,
            remaining_seconds: delay_seconds,
        });
        info!(
            "queued action with {}s delay ({} pending)",
            delay_seconds,
            self.pending.len()
        );
    }

    /// Advances the delayed queue by `delta_seconds`. Only the front item's
    /// timer moves, and at most one action fires per tick; an item never
    /// fires before everything queued ahead of it.
    pub fn tick(&mut self, delta_seconds: f32, player: &mut dyn PlayerState) {
        let Some(front) = self.pending.front_mut() else {
            return;
        };
        front.remaining_seconds -= delta_seconds;
        if front.remaining_seconds > 0.0 {
            return;
        }
        if let Some(fired) = self.pending.pop_front() {
            info!("executing delayed action ({} still pending)", self.pending.len());
            execute_action(&fired.action, player);
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for DialogueSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dlg_core::{ActionKind, PlayerState};
    use dlg_player::Player;

    use super::*;

    fn session_from(source: &str) -> DialogueSession {
        let mut session = DialogueSession::new();
        session
            .load_primary_source("test.dlg", source)
            .expect("source should load");
        session
    }

    fn shop_session() -> DialogueSession {
        session_from(
            "ROOT:start\n\
             NODE:start\n\
             SPEAKER:Merchant\n\
             MSG:Care to trade?\n\
             CHOICE:Go|target:shop|gold:-10|condition:gold>=10\n\
             NODE:shop\n\
             MSG:Welcome in.\n",
        )
    }

    #[test]
    fn failed_condition_blocks_without_side_effects() {
        let mut session = shop_session();
        let root = session.resolve_root().expect("root should resolve");

        let visited: Rc<RefCell<Vec<NodeId>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&visited);
        session.set_navigation_callback(move |node| sink.borrow_mut().push(node));

        let mut player = Player::new("Tester");
        player.stats_mut().add_gold(5);

        let outcome = session
            .select_choice(root, 0, &mut player)
            .expect("selection should run");
        assert_eq!(
            outcome,
            ChoiceOutcome::Blocked {
                condition: "gold>=10".to_string(),
            }
        );
        assert_eq!(player.gold(), 5);
        assert!(visited.borrow().is_empty());
    }

    #[test]
    fn passing_condition_applies_actions_and_navigates() {
        let mut session = shop_session();
        let root = session.resolve_root().expect("root should resolve");
        let shop = session.resolve_node("shop").expect("shop should resolve");

        let visited: Rc<RefCell<Vec<NodeId>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&visited);
        session.set_navigation_callback(move |node| sink.borrow_mut().push(node));

        let mut player = Player::new("Tester");
        player.stats_mut().add_gold(15);

        let outcome = session
            .select_choice(root, 0, &mut player)
            .expect("selection should run");
        assert_eq!(outcome, ChoiceOutcome::Advanced { target: Some(shop) });
        assert_eq!(player.gold(), 5);
        assert_eq!(visited.borrow().as_slice(), &[shop]);
    }

    #[test]
    fn conditions_short_circuit_on_first_failure() {
        let mut session = session_from(
            "ROOT:a\n\
             NODE:a\n\
             CHOICE:Strict|target:a|xp:50|condition:level>3|condition:gold>=1000000\n",
        );
        let a = session.resolve_root().expect("root should resolve");

        let mut player = Player::new("Tester");
        let outcome = session
            .select_choice(a, 0, &mut player)
            .expect("selection should run");
        assert_eq!(
            outcome,
            ChoiceOutcome::Blocked {
                condition: "level>3".to_string(),
            }
        );
        assert_eq!(player.stats().experience(), 0);
    }

    #[test]
    fn unknown_conditions_never_block() {
        let mut session = session_from(
            "ROOT:a\n\
             NODE:a\n\
             CHOICE:Odd|target:a|gold:3|condition:moon=full\n",
        );
        let a = session.resolve_root().expect("root should resolve");

        let mut player = Player::new("Tester");
        let outcome = session
            .select_choice(a, 0, &mut player)
            .expect("selection should run");
        assert!(matches!(outcome, ChoiceOutcome::Advanced { .. }));
        assert_eq!(player.gold(), 3);
    }

    #[test]
    fn item_action_adds_the_item() {
        let mut session = session_from(
            "ROOT:a\n\
             NODE:a\n\
             CHOICE:Loot|item:Health Potion:POTION:50\n",
        );
        let a = session.resolve_root().expect("root should resolve");

        let mut player = Player::new("Tester");
        let outcome = session
            .select_choice(a, 0, &mut player)
            .expect("selection should run");
        assert_eq!(outcome, ChoiceOutcome::Advanced { target: None });
        assert!(player.has_item("Health Potion"));
        let item = player
            .inventory()
            .find_item("Health Potion")
            .expect("item should be present");
        assert_eq!(item.health_restore, 50);
    }

    #[test]
    fn full_inventory_rejects_the_item_but_the_choice_completes() {
        let mut session = session_from(
            "ROOT:a\n\
             NODE:a\n\
             CHOICE:Loot|item:Anvil:MISC:0|xp:5|target:a\n",
        );
        let a = session.resolve_root().expect("root should resolve");

        let mut player = Player::with_capacity("Packrat", 0);
        let outcome = session
            .select_choice(a, 0, &mut player)
            .expect("selection should run despite the full inventory");
        assert!(matches!(outcome, ChoiceOutcome::Advanced { .. }));
        assert!(!player.has_item("Anvil"));
        assert_eq!(player.stats().experience(), 5);
    }

    #[test]
    fn failed_spend_does_not_stop_later_actions() {
        let mut session = session_from(
            "ROOT:a\n\
             NODE:a\n\
             CHOICE:Haggle|gold:-10|xp:20\n",
        );
        let a = session.resolve_root().expect("root should resolve");

        let mut player = Player::new("Tester");
        session
            .select_choice(a, 0, &mut player)
            .expect("selection should run");
        assert_eq!(player.gold(), 0);
        assert_eq!(player.stats().experience(), 20);
    }

    #[test]
    fn selecting_an_out_of_range_choice_is_an_error() {
        let mut session = shop_session();
        let root = session.resolve_root().expect("root should resolve");

        let mut player = Player::new("Tester");
        let error = session
            .select_choice(root, 9, &mut player)
            .expect_err("index past the choice list should fail");
        assert_eq!(error.code, "SESSION_CHOICE_INDEX");
    }

    #[test]
    fn delayed_actions_fire_in_queue_order() {
        let mut session = DialogueSession::new();
        let mut player = Player::new("Tester");

        session.enqueue_delayed(
            ActionRecord::numeric(ActionKind::Gold, 10),
            1.0,
        );
        session.enqueue_delayed(
            ActionRecord::numeric(ActionKind::Gold, 1),
            0.5,
        );

        session.tick(0.5, &mut player);
        assert_eq!(player.gold(), 0);
        assert_eq!(session.pending_count(), 2);

        // The second action's own delay has elapsed, but it sits behind the
        // front item and must wait for it.
        session.tick(0.5, &mut player);
        assert_eq!(player.gold(), 10);
        assert_eq!(session.pending_count(), 1);

        session.tick(0.5, &mut player);
        assert_eq!(player.gold(), 11);
        assert_eq!(session.pending_count(), 0);
    }

    #[test]
    fn at_most_one_delayed_action_fires_per_tick() {
        let mut session = DialogueSession::new();
        let mut player = Player::new("Tester");

        session.enqueue_delayed(ActionRecord::numeric(ActionKind::Gold, 1), 0.1);
        session.enqueue_delayed(ActionRecord::numeric(ActionKind::Gold, 1), 0.1);

        session.tick(5.0, &mut player);
        assert_eq!(player.gold(), 1);
        session.tick(5.0, &mut player);
        assert_eq!(player.gold(), 2);
    }

    #[test]
    fn ticking_an_empty_queue_is_a_no_op() {
        let mut session = DialogueSession::new();
        let mut player = Player::new("Tester");
        session.tick(1.0, &mut player);
        assert_eq!(session.pending_count(), 0);
    }

    #[test]
    fn end_dialogue_action_leaves_player_untouched() {
        let mut session = DialogueSession::new();
        let mut player = Player::new("Tester");
        session.enqueue_delayed(ActionRecord::end_dialogue(), 0.0);
        session.tick(0.1, &mut player);
        assert_eq!(player.gold(), 0);
        assert_eq!(player.stats().experience(), 0);
    }

    #[test]
    fn terminal_choice_does_not_invoke_navigation() {
        let mut session = session_from(
            "ROOT:a\n\
             NODE:a\n\
             CHOICE:Farewell|xp:1\n",
        );
        let a = session.resolve_root().expect("root should resolve");

        let visited: Rc<RefCell<Vec<NodeId>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&visited);
        session.set_navigation_callback(move |node| sink.borrow_mut().push(node));

        let mut player = Player::new("Tester");
        let outcome = session
            .select_choice(a, 0, &mut player)
            .expect("selection should run");
        assert_eq!(outcome, ChoiceOutcome::Advanced { target: None });
        assert!(visited.borrow().is_empty());
    }
}
