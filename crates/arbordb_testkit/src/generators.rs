//! Property-based test generators using proptest.

use arbordb_store::NodeKey;
use proptest::prelude::*;

/// Strategy for a single node key across the full `i64` range.
pub fn node_key_strategy() -> impl Strategy<Value = NodeKey> {
    any::<i64>().prop_map(NodeKey::new)
}

/// Strategy for a shuffled sequence of distinct keys.
///
/// Feeding any such sequence through `TreeEngine::insert` must uphold the
/// structural guarantees: every key stored once, a single root, at most
/// two children per node.
pub fn distinct_key_sequence() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(-1000i64..1000, 1..64)
        .prop_map(|keys| keys.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Strategy for an optional subtree depth bound.
pub fn depth_strategy() -> impl Strategy<Value = Option<u32>> {
    prop::option::of(0u32..6)
}
