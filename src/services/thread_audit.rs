use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::entities::reply::Reply;

/// A broken invariant of a review's reply forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThreadIssue {
    /// `outer` disagrees with `depth == 0` or with the absence of a parent.
    OuterFlagMismatch { reply: Thing, outer: bool, depth: u32 },
    DepthMismatch { reply: Thing, expected: u32, found: u32 },
    /// The parent does not list the child in its `replies`.
    MissingBackReference { parent: Thing, child: Thing },
    /// `replies` holds an id that no longer exists.
    DanglingReference { holder: Thing, missing: Thing },
    /// `replies` holds a reply whose parent is someone else.
    StrayReference { holder: Thing, child: Thing },
    /// A nested reply with no live parent.
    Orphan { reply: Thing },
}

/// Checks every reply of one review against the thread invariants.
pub fn audit_thread(replies: &[Reply]) -> Vec<ThreadIssue> {
    let by_id: HashMap<String, &Reply> = replies
        .iter()
        .map(|reply| (reply.id.to_raw(), reply))
        .collect();
    let mut issues = vec![];

    for reply in replies {
        if reply.outer != (reply.depth == 0) || reply.outer != reply.parent.is_none() {
            issues.push(ThreadIssue::OuterFlagMismatch {
                reply: reply.id.clone(),
                outer: reply.outer,
                depth: reply.depth,
            });
        }

        match reply.parent.as_ref().map(|p| (p, by_id.get(&p.to_raw()))) {
            None if !reply.outer => issues.push(ThreadIssue::Orphan {
                reply: reply.id.clone(),
            }),
            None => {}
            Some((_, None)) => issues.push(ThreadIssue::Orphan {
                reply: reply.id.clone(),
            }),
            Some((parent_id, Some(parent))) => {
                if reply.depth != parent.depth + 1 {
                    issues.push(ThreadIssue::DepthMismatch {
                        reply: reply.id.clone(),
                        expected: parent.depth + 1,
                        found: reply.depth,
                    });
                }
                if !parent.replies.contains(&reply.id) {
                    issues.push(ThreadIssue::MissingBackReference {
                        parent: parent_id.clone(),
                        child: reply.id.clone(),
                    });
                }
            }
        }

        for child_id in &reply.replies {
            match by_id.get(&child_id.to_raw()) {
                None => issues.push(ThreadIssue::DanglingReference {
                    holder: reply.id.clone(),
                    missing: child_id.clone(),
                }),
                Some(child) if child.parent.as_ref() != Some(&reply.id) => {
                    issues.push(ThreadIssue::StrayReference {
                        holder: reply.id.clone(),
                        child: child_id.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }
    issues
}
