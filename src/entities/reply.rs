use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use surrealdb::sql::Thing;

/// One node of the reply forest of a review.
///
/// `review` always points at the root review, whatever the depth. `parent` is
/// `None` exactly for outer replies, and `replies` lists the direct children in
/// the order they were added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub id: Thing,
    pub author: Thing,
    pub review: Thing,
    pub name: String,
    pub text: String,
    pub outer: bool,
    /// Distance from the nearest outer reply.
    pub depth: u32,
    #[serde(default)]
    pub parent: Option<Thing>,
    #[serde(default)]
    pub replies: Vec<Thing>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reply {
    pub fn is_author(&self, user: &Thing) -> bool {
        &self.author == user
    }
}

/// What happens to the descendants of a deleted reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ReplyDeletePolicy {
    /// Delete the whole subtree.
    #[default]
    Cascade,
    /// Move the children up to the deleted reply's parent.
    Reparent,
    /// Leave the descendants in place, unreachable from the outer replies.
    Detach,
}

/// Ids of every descendant of `root`, found through the `parent` pointers,
/// closest first. `root` itself is not included.
pub fn collect_descendants(replies: &[Reply], root: &Thing) -> Vec<Thing> {
    let mut children_by_parent: HashMap<String, Vec<&Thing>> = HashMap::new();
    for reply in replies {
        if let Some(parent) = &reply.parent {
            children_by_parent
                .entry(parent.to_raw())
                .or_default()
                .push(&reply.id);
        }
    }

    let mut found: Vec<Thing> = vec![];
    let mut next = 0;
    let mut frontier = root.to_raw();
    loop {
        if let Some(children) = children_by_parent.remove(&frontier) {
            found.extend(children.into_iter().cloned());
        }
        match found.get(next) {
            Some(id) => {
                frontier = id.to_raw();
                next += 1;
            }
            None => break,
        }
    }
    found
}
