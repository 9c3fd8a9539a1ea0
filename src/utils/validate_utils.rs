use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use crate::entities::review::{EXPERIENCES, HOSPITALS};

pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn validate_hospital(value: &String) -> Result<(), ValidationError> {
    if !HOSPITALS.contains(&value.as_str()) {
        return Err(ValidationError::new("hospital").with_message("Unknown hospital".into()));
    }
    Ok(())
}

pub fn validate_experience(value: &String) -> Result<(), ValidationError> {
    if !EXPERIENCES.contains(&value.as_str()) {
        return Err(ValidationError::new("experience").with_message("Unknown experience".into()));
    }
    Ok(())
}
