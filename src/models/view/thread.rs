use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entities::reply::Reply;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyNode {
    pub reply: Reply,
    pub children: Vec<ReplyNode>,
}

/// Walks the forest from `outer` down each node's `replies` list.
///
/// `all` is every reply of the review. References to replies missing from
/// `all` are skipped, and a reply is emitted at most once.
pub fn build_thread(outer: &[Reply], all: Vec<Reply>) -> Vec<ReplyNode> {
    let mut by_id: HashMap<String, Reply> = all
        .into_iter()
        .map(|reply| (reply.id.to_raw(), reply))
        .collect();
    let mut visited: HashSet<String> = HashSet::new();

    outer
        .iter()
        .filter_map(|reply| build_node(&reply.id.to_raw(), &mut by_id, &mut visited))
        .collect()
}

fn build_node(
    id: &str,
    by_id: &mut HashMap<String, Reply>,
    visited: &mut HashSet<String>,
) -> Option<ReplyNode> {
    if !visited.insert(id.to_string()) {
        return None;
    }
    let reply = by_id.remove(id)?;
    let children = reply
        .replies
        .iter()
        .filter_map(|child| build_node(&child.to_raw(), by_id, visited))
        .collect();
    Some(ReplyNode { reply, children })
}

impl ReplyNode {
    /// Number of replies in this subtree, the node included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(ReplyNode::size).sum::<usize>()
    }
}
