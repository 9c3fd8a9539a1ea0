use core::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_COUNT: u16 = 50;
pub const MAX_PAGE_COUNT: u16 = 200;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub order_dir: Option<QryOrder>,
    pub count: u16,
    pub start: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            order_dir: None,
            count: DEFAULT_PAGE_COUNT,
            start: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QryOrder {
    DESC,
    ASC,
}

impl fmt::Display for QryOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QryOrder::DESC => write!(f, "DESC"),
            QryOrder::ASC => write!(f, "ASC"),
        }
    }
}

/// Query string of list routes.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub order_dir: Option<QryOrder>,
    pub start: Option<u32>,
    pub count: Option<u16>,
}

impl From<ListQuery> for Pagination {
    fn from(value: ListQuery) -> Self {
        Pagination {
            order_dir: value.order_dir,
            count: value
                .count
                .unwrap_or(DEFAULT_PAGE_COUNT)
                .min(MAX_PAGE_COUNT),
            start: value.start.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_is_capped() {
        let pagination: Pagination = ListQuery {
            order_dir: Some(QryOrder::ASC),
            start: Some(10),
            count: Some(5000),
        }
        .into();
        assert_eq!(pagination.count, MAX_PAGE_COUNT);
        assert_eq!(pagination.start, 10);
        assert_eq!(pagination.order_dir, Some(QryOrder::ASC));

        let defaults: Pagination = ListQuery::default().into();
        assert_eq!(defaults.count, DEFAULT_PAGE_COUNT);
        assert_eq!(defaults.order_dir, None);
    }
}
