//! Placement resolution for new keys.

use crate::error::EngineResult;
use arbordb_store::{NodeKey, NodeRecord, RecordStore};

/// Resolves the parent under which `key` should be created.
///
/// Walks down from `root`, at each step fetching the current node's
/// children ordered ascending by key:
///
/// - **No children**: the current node adopts the key.
/// - **One child**: the current node adopts the key only when the key falls
///   strictly outside the {current, child} pair on one side - below both or
///   above both. Anything in between descends into the child.
/// - **Two children**: descend into the first child when `key < current.key`,
///   otherwise into the second.
///
/// The one-child rule compares against the current node and its immediate
/// child only, never the ancestor range established on the way down. A key
/// can therefore be adopted on the counterintuitive side of a pair (for
/// example 20 under a root 50 whose only child is 30, leaving 50 with
/// children 20 and 30). This window is the contract; read-side ordering by
/// key is what presents children as first/second.
///
/// The descent is read-only, deterministic for a fixed tree shape, and
/// terminates because every step moves one level down a finite acyclic
/// tree. Equal keys never reach the resolver: uniqueness is settled before
/// placement runs.
///
/// # Errors
///
/// Returns an error if the record store fails.
pub fn resolve_placement(
    store: &dyn RecordStore,
    root: &NodeRecord,
    key: NodeKey,
) -> EngineResult<NodeRecord> {
    let mut current = root.clone();

    loop {
        let children = store.children_of(current.id)?;

        match children.as_slice() {
            [] => return Ok(current),
            [only] => {
                let below_pair = key < current.key && key < only.key;
                let above_pair = key > current.key && key > only.key;
                if below_pair || above_pair {
                    return Ok(current);
                }
                current = only.clone();
            }
            [first, .., second] => {
                current = if key < current.key {
                    first.clone()
                } else {
                    second.clone()
                };
            }
        }
    }
}
