//! History store: per-tab `{previous, next}` links in activation order.
//!
//! The store is a map from tab id to [`HistoryNode`]. Following `next`
//! pointers from a node walks forward through the order in which tabs were
//! activated, `previous` walks back. Several disjoint chains may exist at
//! once. An unknown id and an empty neighbour mean the same thing: there is
//! no history in that direction.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tabtrail_types::TabId;

/// Links of a single tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryNode {
    pub previous: Option<TabId>,
    pub next: Option<TabId>,
}

impl HistoryNode {
    fn linked(previous: TabId) -> Self {
        Self {
            previous: Some(previous),
            next: None,
        }
    }
}

/// How a new activation treats the links it replaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPolicy {
    /// Overwrite the activated tab's node and leave every other pointer
    /// alone. Abandoned branches keep stale `previous` pointers.
    #[default]
    Legacy,
    /// Detach the activated tab from its old position and clear the
    /// back-pointer of the abandoned forward branch. Links stay symmetric.
    Relink,
}

impl fmt::Display for BranchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relink => write!(f, "relink"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

/// Which pointer of a node a [`Violation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Previous,
    Next,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Previous => write!(f, "previous"),
            Self::Next => write!(f, "next"),
        }
    }
}

/// A broken store invariant, as reported by [`HistoryStore::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `tab.link == neighbour` but the neighbour does not point back.
    Asymmetric {
        tab: TabId,
        link: Link,
        neighbour: TabId,
    },
    /// `tab.link` names a tab that has no node.
    Dangling {
        tab: TabId,
        link: Link,
        missing: TabId,
    },
    /// Walking `next` from `tab` revisits a node.
    Cycle { tab: TabId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asymmetric {
                tab,
                link,
                neighbour,
            } => write!(f, "{tab}.{link} = {neighbour}, but {neighbour} does not link back"),
            Self::Dangling { tab, link, missing } => {
                write!(f, "{tab}.{link} = {missing}, which has no node")
            },
            Self::Cycle { tab } => write!(f, "walking next from {tab} loops"),
        }
    }
}

/// Map from tab id to its history links.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    nodes: HashMap<TabId, HistoryNode>,
    policy: BranchPolicy,
}

impl HistoryStore {
    pub fn new(policy: BranchPolicy) -> Self {
        Self {
            nodes: HashMap::new(),
            policy,
        }
    }

    /// Reset the store to a single unlinked node for `id`.
    pub fn initialize(&mut self, id: TabId) {
        self.nodes.clear();
        self.nodes.insert(id, HistoryNode::default());
        log::debug!("history: initialized at {id}");
    }

    /// Record that `activated` became active while `from` was current.
    ///
    /// When `from` has a node, `from.next` becomes `activated` and
    /// `activated` gets a fresh node pointing back at `from`. Otherwise no
    /// link is made; `activated` just gets an empty node if it has none, so
    /// tracking restarts from there. Re-activating `from` itself is ignored.
    pub fn record_activation(&mut self, from: Option<TabId>, activated: TabId) {
        if from == Some(activated) {
            return;
        }
        let Some(from) = from.filter(|id| self.nodes.contains_key(id)) else {
            self.nodes.entry(activated).or_default();
            log::debug!("history: {activated} starts a new chain");
            return;
        };

        if self.policy == BranchPolicy::Relink {
            self.remove(activated);
            let abandoned = self.nodes.get(&from).and_then(|n| n.next);
            if let Some(node) = abandoned.and_then(|id| self.nodes.get_mut(&id)) {
                if node.previous == Some(from) {
                    node.previous = None;
                }
            }
        }

        if let Some(node) = self.nodes.get_mut(&from) {
            node.next = Some(activated);
        }
        self.nodes.insert(activated, HistoryNode::linked(from));
        log::debug!("history: linked {from} -> {activated}");
    }

    /// Drop `id` and join its neighbours to each other.
    ///
    /// Returns `false` if `id` had no node.
    pub fn remove(&mut self, id: TabId) -> bool {
        let Some(HistoryNode { previous, next }) = self.nodes.remove(&id) else {
            return false;
        };
        if let Some(node) = previous.and_then(|p| self.nodes.get_mut(&p)) {
            node.next = next;
        }
        if let Some(node) = next.and_then(|n| self.nodes.get_mut(&n)) {
            node.previous = previous;
        }
        log::debug!("history: removed {id}");
        true
    }

    /// The tab activated before `id`, if known.
    pub fn previous(&self, id: TabId) -> Option<TabId> {
        self.nodes.get(&id).and_then(|n| n.previous)
    }

    /// The tab activated after `id`, if known.
    pub fn next(&self, id: TabId) -> Option<TabId> {
        self.nodes.get(&id).and_then(|n| n.next)
    }

    pub fn node(&self, id: TabId) -> Option<HistoryNode> {
        self.nodes.get(&id).copied()
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// `id` followed by every tab reachable through `previous`.
    pub fn walk_back(&self, id: TabId) -> Vec<TabId> {
        self.walk(id, |n| n.previous)
    }

    /// `id` followed by every tab reachable through `next`.
    pub fn walk_forward(&self, id: TabId) -> Vec<TabId> {
        self.walk(id, |n| n.next)
    }

    /// Stops at an unknown id or the first revisit.
    fn walk(&self, id: TabId, step: impl Fn(&HistoryNode) -> Option<TabId>) -> Vec<TabId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = Some(id);
        while let Some(tab) = cursor {
            let Some(node) = self.nodes.get(&tab) else {
                break;
            };
            if !seen.insert(tab) {
                break;
            }
            chain.push(tab);
            cursor = step(node);
        }
        chain
    }

    /// Ordered copy of every node, for display and serialization.
    pub fn snapshot(&self) -> BTreeMap<TabId, HistoryNode> {
        self.nodes.iter().map(|(id, node)| (*id, *node)).collect()
    }

    /// Check symmetry, dangling references and cycles.
    pub fn verify(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (tab, node) in self.snapshot() {
            let links = [(Link::Previous, node.previous), (Link::Next, node.next)];
            for (link, target) in links {
                let Some(neighbour) = target else {
                    continue;
                };
                let back = match self.nodes.get(&neighbour) {
                    None => {
                        violations.push(Violation::Dangling {
                            tab,
                            link,
                            missing: neighbour,
                        });
                        continue;
                    },
                    Some(n) => match link {
                        Link::Previous => n.next,
                        Link::Next => n.previous,
                    },
                };
                if back != Some(tab) {
                    violations.push(Violation::Asymmetric {
                        tab,
                        link,
                        neighbour,
                    });
                }
            }

            let mut seen = HashSet::from([tab]);
            let mut cursor = node.next;
            while let Some(id) = cursor {
                if !seen.insert(id) {
                    violations.push(Violation::Cycle { tab });
                    break;
                }
                cursor = self.next(id);
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: u32) -> TabId {
        TabId(id)
    }

    /// Activate `ids` in order starting from an initialized store.
    fn chain(policy: BranchPolicy, ids: &[u32]) -> (HistoryStore, TabId) {
        let mut store = HistoryStore::new(policy);
        store.initialize(t(ids[0]));
        let mut current = t(ids[0]);
        for &id in &ids[1..] {
            store.record_activation(Some(current), t(id));
            current = t(id);
        }
        (store, current)
    }

    #[test]
    fn initialize_seeds_single_empty_node() {
        let mut store = HistoryStore::default();
        store.initialize(t(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.node(t(1)), Some(HistoryNode::default()));
    }

    #[test]
    fn initialize_discards_previous_state() {
        let (mut store, _) = chain(BranchPolicy::Relink, &[1, 2, 3]);
        store.initialize(t(9));
        assert_eq!(store.len(), 1);
        assert!(!store.contains(t(1)));
    }

    #[test]
    fn activation_links_both_directions() {
        let (store, current) = chain(BranchPolicy::Relink, &[1, 2, 3]);
        assert_eq!(current, t(3));
        assert_eq!(store.next(t(1)), Some(t(2)));
        assert_eq!(store.previous(t(2)), Some(t(1)));
        assert_eq!(store.next(t(2)), Some(t(3)));
        assert_eq!(store.previous(t(3)), Some(t(2)));
        assert_eq!(store.next(t(3)), None);
        assert!(store.verify().is_empty());
    }

    #[test]
    fn activation_without_known_current_starts_new_chain() {
        let mut store = HistoryStore::default();
        store.record_activation(None, t(5));
        assert_eq!(store.node(t(5)), Some(HistoryNode::default()));

        // A current tab that was removed behaves the same way.
        store.record_activation(Some(t(77)), t(6));
        assert_eq!(store.node(t(6)), Some(HistoryNode::default()));
        assert_eq!(store.next(t(5)), None);
    }

    #[test]
    fn activation_without_known_current_keeps_existing_node() {
        let (mut store, _) = chain(BranchPolicy::Relink, &[1, 2]);
        store.record_activation(None, t(1));
        assert_eq!(store.next(t(1)), Some(t(2)));
    }

    #[test]
    fn reactivating_current_is_ignored() {
        let (mut store, current) = chain(BranchPolicy::Legacy, &[1, 2]);
        store.record_activation(Some(current), current);
        assert_eq!(store.node(t(2)), Some(HistoryNode::linked(t(1))));
        assert!(store.verify().is_empty());
    }

    #[test]
    fn removal_splices_middle_node() {
        let (mut store, _) = chain(BranchPolicy::Relink, &[1, 2, 3]);
        assert!(store.remove(t(2)));
        assert_eq!(store.next(t(1)), Some(t(3)));
        assert_eq!(store.previous(t(3)), Some(t(1)));
        assert!(!store.contains(t(2)));
        assert!(store.verify().is_empty());
    }

    #[test]
    fn removal_of_ends() {
        let (mut store, _) = chain(BranchPolicy::Relink, &[1, 2, 3]);
        store.remove(t(1));
        assert_eq!(store.previous(t(2)), None);
        store.remove(t(3));
        assert_eq!(store.next(t(2)), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn removal_of_unknown_is_noop() {
        let (mut store, _) = chain(BranchPolicy::Relink, &[1, 2]);
        assert!(!store.remove(t(42)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn peek_unknown_is_empty() {
        let store = HistoryStore::default();
        assert_eq!(store.previous(t(1)), None);
        assert_eq!(store.next(t(1)), None);
        assert!(store.walk_forward(t(1)).is_empty());
    }

    #[test]
    fn walks_follow_links() {
        let (store, _) = chain(BranchPolicy::Relink, &[1, 2, 3, 4]);
        assert_eq!(store.walk_forward(t(2)), vec![t(2), t(3), t(4)]);
        assert_eq!(store.walk_back(t(3)), vec![t(3), t(2), t(1)]);
    }

    // X -> Y, back to X, then activate W.
    fn branch(policy: BranchPolicy) -> HistoryStore {
        let (mut store, _) = chain(policy, &[1, 2]);
        store.record_activation(Some(t(1)), t(3));
        store
    }

    #[test]
    fn branch_overwrites_forward_link_legacy() {
        let store = branch(BranchPolicy::Legacy);
        assert_eq!(store.next(t(1)), Some(t(3)));
        assert_eq!(store.previous(t(3)), Some(t(1)));
        // The abandoned branch still points back at X, which no longer
        // points forward to it.
        assert_eq!(store.previous(t(2)), Some(t(1)));
        assert_eq!(
            store.verify(),
            vec![Violation::Asymmetric {
                tab: t(2),
                link: Link::Previous,
                neighbour: t(1),
            }]
        );
    }

    #[test]
    fn branch_overwrites_forward_link_relink() {
        let store = branch(BranchPolicy::Relink);
        assert_eq!(store.next(t(1)), Some(t(3)));
        assert_eq!(store.previous(t(3)), Some(t(1)));
        assert_eq!(store.previous(t(2)), None);
        assert!(store.contains(t(2)));
        assert_eq!(store.walk_forward(t(1)), vec![t(1), t(3)]);
        assert!(store.verify().is_empty());
    }

    #[test]
    fn default_policy_keeps_stale_links() {
        let mut store = HistoryStore::default();
        store.initialize(t(1));
        store.record_activation(Some(t(1)), t(2));
        store.record_activation(Some(t(2)), t(3));
        store.record_activation(Some(t(3)), t(1));

        assert_eq!(store.node(t(1)), Some(HistoryNode::linked(t(3))));
        assert_eq!(store.previous(t(2)), Some(t(1)));
        assert_eq!(store.next(t(3)), Some(t(1)));
    }

    #[test]
    fn reactivating_older_tab_legacy_leaves_stale_links() {
        // 1 -> 2 -> 3, then 1 again from 3.
        let (mut store, current) = chain(BranchPolicy::Legacy, &[1, 2, 3]);
        store.record_activation(Some(current), t(1));
        assert_eq!(store.node(t(1)), Some(HistoryNode::linked(t(3))));
        // 2 still believes 1 precedes it.
        assert_eq!(store.previous(t(2)), Some(t(1)));
        assert!(!store.verify().is_empty());
    }

    #[test]
    fn reactivating_older_tab_relink_moves_it() {
        let (mut store, current) = chain(BranchPolicy::Relink, &[1, 2, 3]);
        store.record_activation(Some(current), t(1));
        assert_eq!(store.walk_back(t(1)), vec![t(1), t(3), t(2)]);
        assert_eq!(store.previous(t(2)), None);
        assert!(store.verify().is_empty());
    }

    #[test]
    fn walk_terminates_on_cycle() {
        // Legacy can close a loop: 1 -> 2, then 1 from 2 leaves 2.previous = 1
        // and 1.previous = 2.
        let (mut store, current) = chain(BranchPolicy::Legacy, &[1, 2]);
        store.record_activation(Some(current), t(1));
        assert_eq!(store.walk_back(t(1)), vec![t(1), t(2)]);
    }

    #[test]
    fn verify_reports_dangling_and_cycles() {
        let mut store = HistoryStore::default();
        store.nodes.insert(
            t(1),
            HistoryNode {
                previous: None,
                next: Some(t(2)),
            },
        );
        store.nodes.insert(
            t(2),
            HistoryNode {
                previous: Some(t(1)),
                next: Some(t(1)),
            },
        );
        store.nodes.insert(t(3), HistoryNode::linked(t(9)));
        let violations = store.verify();
        assert!(violations.contains(&Violation::Cycle { tab: t(1) }));
        assert!(violations.contains(&Violation::Dangling {
            tab: t(3),
            link: Link::Previous,
            missing: t(9),
        }));
    }

    #[test]
    fn violation_display() {
        let v = Violation::Dangling {
            tab: t(3),
            link: Link::Previous,
            missing: t(9),
        };
        assert_eq!(v.to_string(), "3.previous = 9, which has no node");
    }

    #[test]
    fn snapshot_serializes_in_id_order() {
        let (store, _) = chain(BranchPolicy::Relink, &[2, 1]);
        let json = serde_json::to_string(&store.snapshot()).unwrap();
        assert_eq!(
            json,
            r#"{"1":{"previous":2,"next":null},"2":{"previous":null,"next":1}}"#
        );
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Activate(u32),
            Remove(u32),
        }

        fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
            proptest::collection::vec(
                prop_oneof![
                    3 => (1u32..12).prop_map(Op::Activate),
                    1 => (1u32..12).prop_map(Op::Remove),
                ],
                0..60,
            )
        }

        /// Final store, the store after every op, and the last activated tab.
        fn run(policy: BranchPolicy, ops: &[Op]) -> (HistoryStore, Vec<HistoryStore>, TabId) {
            let mut store = HistoryStore::new(policy);
            store.initialize(TabId(1));
            let mut current = TabId(1);
            let mut states = Vec::new();
            for op in ops {
                match *op {
                    Op::Activate(id) => {
                        store.record_activation(Some(current), TabId(id));
                        current = TabId(id);
                    },
                    Op::Remove(id) => {
                        store.remove(TabId(id));
                    },
                }
                states.push(store.clone());
            }
            (store, states, current)
        }

        proptest! {
            #[test]
            fn relink_keeps_links_symmetric(ops in arb_ops()) {
                let (_, states, _) = run(BranchPolicy::Relink, &ops);
                for state in &states {
                    prop_assert_eq!(state.verify(), Vec::<Violation>::new());
                }
            }

            #[test]
            fn removed_tabs_leave_no_references(ops in arb_ops(), victim in 1u32..12) {
                let (mut store, _, _) = run(BranchPolicy::Relink, &ops);
                store.remove(TabId(victim));
                prop_assert!(!store.contains(TabId(victim)));
                for node in store.snapshot().values() {
                    prop_assert_ne!(node.previous, Some(TabId(victim)));
                    prop_assert_ne!(node.next, Some(TabId(victim)));
                }
            }

            #[test]
            fn walks_never_revisit(ops in arb_ops()) {
                for policy in [BranchPolicy::Relink, BranchPolicy::Legacy] {
                    let (store, _, _) = run(policy, &ops);
                    for id in store.snapshot().keys() {
                        let forward = store.walk_forward(*id);
                        let unique: HashSet<_> = forward.iter().collect();
                        prop_assert_eq!(unique.len(), forward.len());
                    }
                }
            }

            #[test]
            fn last_activated_tab_has_no_next(ops in arb_ops(), last in 1u32..12) {
                for policy in [BranchPolicy::Relink, BranchPolicy::Legacy] {
                    let (mut store, _, current) = run(policy, &ops);
                    let last = TabId(last);
                    if current == last || !store.contains(current) {
                        continue;
                    }
                    store.record_activation(Some(current), last);
                    prop_assert_eq!(store.next(current), Some(last));
                    prop_assert_eq!(store.previous(last), Some(current));
                    prop_assert_eq!(store.next(last), None);
                }
            }

        }
    }
}
