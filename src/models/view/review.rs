use serde::{Deserialize, Serialize};

use crate::entities::{reply::Reply, review::Review};

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewView {
    pub review: Review,
    pub replies: Vec<Reply>,
}
