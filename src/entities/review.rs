use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Hospitals a review can be about.
pub const HOSPITALS: [&str; 8] = [
    "Wilma Chan Highland Hospital",
    "Alta Bates Summit Medical Center",
    "UCSF Benioff Children's Hospital",
    "Kaiser Permanente",
    "Fairmont Rehabilitation & Wellness",
    "John George Psychiatric Pavilion",
    "Alameda Hospital",
    "San Leandro Hospital",
];

/// Kinds of experience a review can describe.
pub const EXPERIENCES: [&str; 8] = [
    "Patient Care",
    "Visitor",
    "Waiting Duration",
    "Internship/Learning Programs",
    "Volunteer",
    "Patient",
    "Hospitality",
    "Other",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Thing,
    pub author: Thing,
    pub name: String,
    pub subject: String,
    pub text: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn is_author(&self, user: &Thing) -> bool {
        &self.author == user
    }
}
