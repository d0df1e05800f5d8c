use serde::{Deserialize, Serialize};

categorical! {
    pub enum AppointmentStatus {
        Scheduled => ("scheduled", "Scheduled"),
        CheckedIn => ("checked_in", "Checked in"),
        Completed => ("completed", "Completed"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

categorical! {
    pub enum VisitKind {
        Consultation => ("consultation", "Consultation"),
        FollowUp => ("follow_up", "Follow-up"),
        Checkup => ("checkup", "Checkup"),
        Emergency => ("emergency", "Emergency"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient: String,
    /// Id of a [`Doctor`] in the doctors collection (not enforced)
    pub doctor_id: String,
    pub reason: String,
    pub kind: VisitKind,
    pub status: AppointmentStatus,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub time: String,
    pub duration_minutes: f64,
}

/// Fixture shape for the healthcare pages: appointments plus the doctors
/// they reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthcareData {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}
