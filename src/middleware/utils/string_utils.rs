use surrealdb::sql::Thing;

use crate::middleware::error::{AppError, AppResult};

pub fn get_str_thing(value: &str) -> AppResult<Thing> {
    Thing::try_from(value).map_err(|_| AppError::Generic {
        description: "error into Thing".to_string(),
    })
}

/// Record id of `table` from either a bare key or a full `table:key` id.
pub fn get_table_thing(table: &str, value: &str) -> AppResult<Thing> {
    if value.trim().is_empty() {
        return Err(AppError::Generic {
            description: format!("empty {table} id"),
        });
    }
    if !value.contains(':') {
        return Ok(Thing::from((table, value)));
    }
    let thing = get_str_thing(value)?;
    if thing.tb != table {
        return Err(AppError::Generic {
            description: format!("expected {table} id, got {}", thing.tb),
        });
    }
    Ok(thing)
}
