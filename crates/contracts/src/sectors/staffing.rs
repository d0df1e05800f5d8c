use serde::{Deserialize, Serialize};

categorical! {
    pub enum PlacementStatus {
        Active => ("active", "Active"),
        Pending => ("pending", "Pending"),
        Completed => ("completed", "Completed"),
        Terminated => ("terminated", "Terminated"),
    }
}

categorical! {
    pub enum ContractType {
        Permanent => ("permanent", "Permanent"),
        Contract => ("contract", "Contract"),
        Temp => ("temp", "Temporary"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: String,
    pub candidate: String,
    pub client: String,
    pub role: String,
    pub status: PlacementStatus,
    pub contract: ContractType,
    pub hourly_rate: f64,
    pub hours_per_week: f64,
    pub start_on: String,
}

impl Placement {
    pub fn weekly_billing(&self) -> f64 {
        self.hourly_rate * self.hours_per_week
    }
}
