use serde::{Deserialize, Serialize};

categorical! {
    pub enum VehicleStatus {
        Active => ("active", "Active"),
        Maintenance => ("maintenance", "In maintenance"),
        Idle => ("idle", "Idle"),
        Retired => ("retired", "Retired"),
    }
}

categorical! {
    pub enum FuelType {
        Diesel => ("diesel", "Diesel"),
        Petrol => ("petrol", "Petrol"),
        Electric => ("electric", "Electric"),
        Hybrid => ("hybrid", "Hybrid"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub plate: String,
    pub model: String,
    /// Unassigned vehicles have no driver
    #[serde(default)]
    pub driver: Option<String>,
    pub status: VehicleStatus,
    pub fuel: FuelType,
    pub mileage_km: f64,
    /// Tank or battery level, 0..=100
    pub fuel_level: f64,
    pub next_service_on: String,
}
