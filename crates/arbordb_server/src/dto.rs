//! Wire types for the HTTP API, plus the rendering glue that turns engine
//! views into localized response bodies.

use crate::extract::RequestContext;
use arbordb_engine::{Deletion, InsertedNode, InternalNode, SubtreeNode};
use arbordb_format::{render_label, render_timestamp};
use arbordb_store::NodeKey;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Body of `POST /api/nodes`.
#[derive(Debug, Deserialize)]
pub struct CreateNodeRequest {
    /// Key of the node to create.
    pub id: Option<i64>,
}

/// Body of `POST /api/nodes/roots`.
#[derive(Debug, Default, Deserialize)]
pub struct RootsRequest {
    /// Locale override for labels.
    pub language: Option<String>,
    /// Zone override for timestamps.
    pub timezone: Option<String>,
}

/// Body of `POST /api/nodes/children`.
#[derive(Debug, Deserialize)]
pub struct SubtreeRequest {
    /// Key of the subtree root.
    #[serde(rename = "parentId")]
    pub parent_id: Option<i64>,
    /// Locale override for labels.
    pub language: Option<String>,
    /// Zone override for timestamps.
    pub timezone: Option<String>,
    /// How many levels below the root to collect children for.
    pub depth: Option<u32>,
}

/// Body of `DELETE /api/nodes/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    /// Key of the node to delete.
    pub id: Option<i64>,
}

/// Plain `{ success, message }` body, used for the development reset and
/// for every error response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

/// Response of `POST /api/nodes`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CreatedResponse {
    /// Always `true`.
    pub success: bool,
    /// The stored node.
    pub data: CreatedNode,
}

/// The created node as stored.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CreatedNode {
    /// External key.
    pub id: i64,
    /// Label rendered at creation time.
    pub title: String,
    /// Parent's key, or `null` for the root.
    pub parent: Option<i64>,
    /// Creation instant, RFC 3339.
    pub created_at: String,
}

impl CreatedResponse {
    /// Builds the creation response from the engine's view. The title is
    /// the label stored with the record, not a fresh rendering.
    #[must_use]
    pub fn new(inserted: &InsertedNode) -> Self {
        Self {
            success: true,
            data: CreatedNode {
                id: inserted.record.key.as_i64(),
                title: inserted.record.label.clone(),
                parent: inserted.parent_key.map(|key| key.as_i64()),
                created_at: inserted
                    .record
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        }
    }
}

/// Response of `POST /api/nodes/roots`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InternalListResponse {
    /// Always `true`.
    pub success: bool,
    /// Number of entries in `data`.
    pub count: usize,
    /// Internal nodes, ascending by key.
    pub data: Vec<InternalEntry>,
}

/// One internal node, rendered for the request.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InternalEntry {
    /// External key.
    pub id: i64,
    /// Label re-rendered in the request locale.
    pub title: String,
    /// Parent's key, or `null` for the root.
    pub parent: Option<i64>,
    /// Number of direct children.
    pub children_count: usize,
    /// Creation instant, wall-clock in the request zone.
    pub created_at: String,
}

impl InternalEntry {
    /// Renders one listing entry in the request's locale and zone.
    #[must_use]
    pub fn render(node: &InternalNode, context: RequestContext) -> Self {
        Self {
            id: node.record.key.as_i64(),
            title: render_label(node.record.key, context.locale),
            parent: node.parent_key.map(|key| key.as_i64()),
            children_count: node.child_count,
            created_at: render_timestamp(node.record.created_at, context.zone),
        }
    }
}

/// Response of `POST /api/nodes/children`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SubtreeResponse {
    /// Always `true`.
    pub success: bool,
    /// The rendered subtree.
    pub data: SubtreeEntry,
}

/// One node of a rendered subtree.
///
/// `children` is serialized only when present; a node whose children were
/// never collected and a node with none to show look the same on the wire.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SubtreeEntry {
    /// External key.
    pub id: i64,
    /// Label re-rendered in the request locale.
    pub title: String,
    /// Parent's key, or `null` for the root.
    pub parent: Option<i64>,
    /// Creation instant, wall-clock in the request zone.
    pub created_at: String,
    /// Children ascending by key, when collected and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SubtreeEntry>>,
}

/// Renders a materialized subtree for the request.
///
/// Walks with an explicit ancestor stack so a chain-shaped subtree cannot
/// overflow the call stack.
#[must_use]
pub fn render_subtree(node: SubtreeNode, context: RequestContext) -> SubtreeEntry {
    let mut ancestors: Vec<RenderFrame> = Vec::new();
    let mut current = RenderFrame::new(node, context);

    loop {
        if let Some(child) = current.pending.pop_front() {
            ancestors.push(current);
            current = RenderFrame::new(child, context);
            continue;
        }

        match ancestors.pop() {
            Some(mut parent) => {
                parent
                    .entry
                    .children
                    .get_or_insert_with(Vec::new)
                    .push(current.entry);
                current = parent;
            }
            None => return current.entry,
        }
    }
}

struct RenderFrame {
    entry: SubtreeEntry,
    pending: VecDeque<SubtreeNode>,
}

impl RenderFrame {
    fn new(mut node: SubtreeNode, context: RequestContext) -> Self {
        let pending: VecDeque<SubtreeNode> = match node.children.take() {
            Some(children) if !children.is_empty() => children.into(),
            _ => VecDeque::new(),
        };
        let entry = SubtreeEntry {
            id: node.record.key.as_i64(),
            title: render_label(node.record.key, context.locale),
            parent: node.parent_key.map(NodeKey::as_i64),
            created_at: render_timestamp(node.record.created_at, context.zone),
            children: None,
        };
        Self { entry, pending }
    }
}

/// Response of `DELETE /api/nodes/delete`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DeletedResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// What was removed.
    pub deleted: DeletedNode,
}

/// Key and former parent of a removed node.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DeletedNode {
    /// External key of the removed node.
    pub id: i64,
    /// Key of its former parent, or `null` for the root.
    pub parent: Option<i64>,
}

impl DeletedResponse {
    /// Builds the deletion response from the engine's view.
    #[must_use]
    pub fn new(deletion: &Deletion) -> Self {
        Self {
            success: true,
            message: "node deleted".to_string(),
            deleted: DeletedNode {
                id: deletion.deleted_key.as_i64(),
                parent: deletion.parent_key.map(|key| key.as_i64()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbordb_format::Locale;
    use arbordb_store::{NodeId, NodeRecord};
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    fn record(key: i64, parent: Option<NodeId>) -> NodeRecord {
        NodeRecord {
            key: NodeKey::new(key),
            id: NodeId::new(),
            parent,
            label: format!("stored {key}"),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap(),
        }
    }

    fn spanish_madrid() -> RequestContext {
        RequestContext {
            locale: Locale::Es,
            zone: Tz::Europe__Madrid,
        }
    }

    #[test]
    fn created_response_uses_the_stored_title() {
        let inserted = InsertedNode {
            record: record(20, Some(NodeId::new())),
            parent_key: Some(NodeKey::new(30)),
        };

        let response = CreatedResponse::new(&inserted);
        assert!(response.success);
        assert_eq!(response.data.id, 20);
        assert_eq!(response.data.title, "stored 20");
        assert_eq!(response.data.parent, Some(30));
        assert_eq!(response.data.created_at, "2024-03-01T12:30:45Z");
    }

    #[test]
    fn internal_entry_rerenders_per_request() {
        let node = InternalNode {
            record: record(30, Some(NodeId::new())),
            child_count: 2,
            parent_key: Some(NodeKey::new(50)),
        };

        let entry = InternalEntry::render(&node, spanish_madrid());
        assert_eq!(entry.title, "treinta");
        assert_eq!(entry.children_count, 2);
        assert_eq!(entry.parent, Some(50));
        assert_eq!(entry.created_at, "2024-03-01 13:30:45");
    }

    #[test]
    fn subtree_rendering_keeps_shape_and_order() {
        let leaf = SubtreeNode {
            record: record(20, Some(NodeId::new())),
            parent_key: Some(NodeKey::new(30)),
            children: Some(Vec::new()),
        };
        let middle = SubtreeNode {
            record: record(30, Some(NodeId::new())),
            parent_key: Some(NodeKey::new(50)),
            children: Some(vec![leaf]),
        };
        let sibling = SubtreeNode {
            record: record(70, Some(NodeId::new())),
            parent_key: Some(NodeKey::new(50)),
            children: Some(Vec::new()),
        };
        let root = SubtreeNode {
            record: record(50, None),
            parent_key: None,
            children: Some(vec![middle, sibling]),
        };

        let entry = render_subtree(root, RequestContext::default());
        assert_eq!(entry.id, 50);
        assert_eq!(entry.title, "fifty");

        let children = entry.children.as_ref().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id, 30);
        assert_eq!(children[0].children.as_ref().unwrap()[0].id, 20);
        assert_eq!(children[1].id, 70);
    }

    #[test]
    fn empty_and_uncollected_children_are_omitted_on_the_wire() {
        let collected_empty = SubtreeNode {
            record: record(70, Some(NodeId::new())),
            parent_key: Some(NodeKey::new(50)),
            children: Some(Vec::new()),
        };
        let entry = render_subtree(collected_empty, RequestContext::default());
        assert_eq!(entry.children, None);

        let uncollected = SubtreeNode {
            record: record(70, Some(NodeId::new())),
            parent_key: Some(NodeKey::new(50)),
            children: None,
        };
        let entry = render_subtree(uncollected, RequestContext::default());
        assert_eq!(entry.children, None);

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("children").is_none());
        assert_eq!(value["id"], 70);
    }

    #[test]
    fn subtree_request_accepts_the_camel_case_field() {
        let request: SubtreeRequest =
            serde_json::from_value(serde_json::json!({ "parentId": 50, "depth": 2 })).unwrap();
        assert_eq!(request.parent_id, Some(50));
        assert_eq!(request.depth, Some(2));
        assert_eq!(request.language, None);
    }

    #[test]
    fn deleted_response_reports_key_and_parent() {
        let deletion = Deletion {
            deleted_key: NodeKey::new(20),
            parent_key: Some(NodeKey::new(30)),
        };
        let response = DeletedResponse::new(&deletion);
        assert_eq!(response.message, "node deleted");
        assert_eq!(response.deleted.id, 20);
        assert_eq!(response.deleted.parent, Some(30));
    }
}
