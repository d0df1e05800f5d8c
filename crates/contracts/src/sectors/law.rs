use serde::{Deserialize, Serialize};

categorical! {
    pub enum HearingStatus {
        Scheduled => ("scheduled", "Scheduled"),
        Adjourned => ("adjourned", "Adjourned"),
        Concluded => ("concluded", "Concluded"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

categorical! {
    pub enum Priority {
        Low => ("low", "Low"),
        Medium => ("medium", "Medium"),
        High => ("high", "High"),
        Critical => ("critical", "Critical"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hearing {
    pub id: String,
    pub case_number: String,
    pub title: String,
    pub court: String,
    pub status: HearingStatus,
    pub priority: Priority,
    /// YYYY-MM-DD or YYYY-MM-DDTHH:MM
    pub scheduled_on: String,
    pub estimated_hours: f64,
}
