//! Appointments page. Rows carry the resolved doctor next to the
//! appointment's `doctor_id`.

use contracts::enums::Sector;
use contracts::sectors::healthcare::{Appointment, AppointmentStatus, Doctor, HealthcareData};
use contracts::shared::indicators::{PageSummary, ValueFormat};
use contracts::shared::list_state::{DateBucket, ListState};
use list_query::{find_by_id, AggregateSpec, Criteria, Denominator, Record, Value};
use serde::Serialize;

use super::{build_summary, rows, PageContext, PageDef, PageStat, Row};

record_fields! {
    pub enum DoctorField {
        Name => "name",
        Specialty => "specialty",
    }
}

impl Record for Row<Doctor> {
    type Field = DoctorField;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: &DoctorField) -> Option<Value<'_>> {
        Some(match field {
            DoctorField::Name => Value::Text(&self.name),
            DoctorField::Specialty => Value::Text(&self.specialty),
        })
    }

    fn field_by_name(name: &str) -> Option<DoctorField> {
        DoctorField::from_name(name)
    }
}

/// An appointment with its doctor looked up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentRow {
    #[serde(flatten)]
    pub appointment: Appointment,
    /// `None` when `doctor_id` is not in the doctors list
    pub doctor_name: Option<String>,
    pub doctor_specialty: Option<String>,
    /// `date` and `time` joined, e.g. `2024-03-15T09:00`
    #[serde(skip)]
    pub starts_at: String,
}

record_fields! {
    pub enum AppointmentField {
        Patient => "patient",
        Reason => "reason",
        DoctorId => "doctor_id",
        DoctorName => "doctor_name",
        Kind => "kind",
        Status => "status",
        Date => "date",
        Time => "time",
        /// Date and time together, for chronological sorting
        StartsAt => "starts_at",
        DurationMinutes => "duration_minutes",
    }
}

impl Record for AppointmentRow {
    type Field = AppointmentField;

    fn id(&self) -> &str {
        &self.appointment.id
    }

    fn field(&self, field: &AppointmentField) -> Option<Value<'_>> {
        let a = &self.appointment;
        Some(match field {
            AppointmentField::Patient => Value::Text(&a.patient),
            AppointmentField::Reason => Value::Text(&a.reason),
            AppointmentField::DoctorId => Value::Text(&a.doctor_id),
            AppointmentField::DoctorName => return self.doctor_name.as_deref().map(Value::Text),
            AppointmentField::Kind => Value::Text(a.kind.code()),
            AppointmentField::Status => Value::Text(a.status.code()),
            AppointmentField::Date => Value::Text(&a.date),
            AppointmentField::Time => Value::Text(&a.time),
            AppointmentField::StartsAt => Value::Text(&self.starts_at),
            AppointmentField::DurationMinutes => Value::Number(a.duration_minutes),
        })
    }

    fn field_by_name(name: &str) -> Option<AppointmentField> {
        AppointmentField::from_name(name)
    }

    fn is_date_field(field: &AppointmentField) -> bool {
        matches!(field, AppointmentField::Date | AppointmentField::StartsAt)
    }
}

/// Joins appointments to their doctors; dangling ids are kept unresolved
pub fn resolve_doctors(data: HealthcareData) -> anyhow::Result<Vec<AppointmentRow>> {
    let doctors = rows(data.doctors)?;
    let appointments: Vec<AppointmentRow> = data
        .appointments
        .into_iter()
        .map(|appointment| {
            let doctor = find_by_id(&doctors, &appointment.doctor_id);
            if doctor.is_none() {
                tracing::debug!(
                    appointment = %appointment.id,
                    doctor_id = %appointment.doctor_id,
                    "unknown doctor"
                );
            }
            AppointmentRow {
                doctor_name: doctor.map(|d| d.name.clone()),
                doctor_specialty: doctor.map(|d| d.specialty.clone()),
                starts_at: starts_at(&appointment),
                appointment,
            }
        })
        .collect();
    list_query::ensure_unique_ids(&appointments)?;
    Ok(appointments)
}

fn starts_at(appointment: &Appointment) -> String {
    let time = appointment.time.trim();
    if time.is_empty() {
        appointment.date.clone()
    } else {
        format!("{}T{}", appointment.date.trim(), time)
    }
}

fn with_status(status: AppointmentStatus) -> Criteria<AppointmentField> {
    Criteria::new().equals(AppointmentField::Status, status.code())
}

pub fn page(ctx: &PageContext) -> PageDef<AppointmentRow> {
    PageDef {
        sector: Sector::Healthcare,
        text_fields: vec![
            AppointmentField::Patient,
            AppointmentField::Reason,
            AppointmentField::DoctorName,
        ],
        date_field: Some(AppointmentField::Date),
        stats: vec![
            PageStat::new(
                AggregateSpec::count(
                    "today",
                    Criteria::new().on_day(AppointmentField::Date, DateBucket::Today, ctx.reference),
                ),
                "Today",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::count("checked_in", with_status(AppointmentStatus::CheckedIn)),
                "Checked in",
                ValueFormat::Integer,
            ),
            PageStat::new(
                AggregateSpec::ratio(
                    "completion_rate",
                    with_status(AppointmentStatus::Completed),
                    Denominator::Records,
                ),
                "Completed",
                ctx.percent(),
            ),
            PageStat::new(
                AggregateSpec::average("avg_duration", AppointmentField::DurationMinutes),
                "Avg. duration, min",
                ValueFormat::Number { decimals: 0 },
            ),
            PageStat::new(
                AggregateSpec::count("shown", Criteria::new()),
                "Shown",
                ValueFormat::Integer,
            )
            .filtered(),
        ],
    }
}

pub fn summarize(
    data: HealthcareData,
    state: &ListState,
    ctx: &PageContext,
) -> anyhow::Result<PageSummary<AppointmentRow>> {
    let rows = resolve_doctors(data)?;
    Ok(build_summary(&page(ctx), &rows, state, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::ctx;
    use contracts::sectors::healthcare::VisitKind;
    use contracts::shared::list_state::SortDirection;

    fn appointment(id: &str, doctor_id: &str, status: AppointmentStatus, date: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            patient: format!("Patient {id}"),
            doctor_id: doctor_id.to_string(),
            reason: "Annual checkup".to_string(),
            kind: VisitKind::Checkup,
            status,
            date: date.to_string(),
            time: "09:00".to_string(),
            duration_minutes: 30.0,
        }
    }

    fn data() -> HealthcareData {
        HealthcareData {
            doctors: vec![Doctor {
                id: "d1".to_string(),
                name: "Dr. Okafor".to_string(),
                specialty: "Cardiology".to_string(),
            }],
            appointments: vec![
                appointment("a1", "d1", AppointmentStatus::Completed, "2024-03-15"),
                appointment("a2", "d9", AppointmentStatus::Scheduled, "2024-03-16"),
                appointment("a3", "d1", AppointmentStatus::CheckedIn, "2024-03-15"),
            ],
        }
    }

    #[test]
    fn test_doctor_lookup() {
        let rows = resolve_doctors(data()).unwrap();
        assert_eq!(rows[0].doctor_name.as_deref(), Some("Dr. Okafor"));
        assert_eq!(rows[1].doctor_name, None);
        assert_eq!(rows[1].field(&AppointmentField::DoctorName), None);
    }

    #[test]
    fn test_search_by_doctor_and_today() {
        let state = ListState::default()
            .with_search("okafor")
            .with_date_bucket(DateBucket::Today)
            .with_sort("date", SortDirection::Desc);
        let summary = summarize(data(), &state, &ctx()).unwrap();
        let ids: Vec<&str> = summary.rows.iter().map(|r| r.appointment.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a3"]);
        assert_eq!(summary.stat("today").unwrap().value, 2.0);
        assert_eq!(summary.stat("checked_in").unwrap().value, 1.0);
        assert_eq!(summary.stat("completion_rate").unwrap().display, "33.3%");
        assert_eq!(summary.stat("avg_duration").unwrap().display, "30");
    }

    #[test]
    fn test_row_json_is_flat() {
        let rows = resolve_doctors(data()).unwrap();
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["doctor_id"], "d1");
        assert_eq!(json["doctor_name"], "Dr. Okafor");
        assert_eq!(json["status"], "completed");
    }

    #[test]
    fn test_starts_at_orders_same_day_by_time() {
        let mut data = data();
        data.appointments[0].time = "14:30".to_string();
        data.appointments[2].time = "08:15".to_string();
        data.appointments[1].time = String::new();
        let state = ListState::default().with_sort("starts_at", SortDirection::Asc);
        let summary = summarize(data, &state, &ctx()).unwrap();
        let ids: Vec<&str> = summary.rows.iter().map(|r| r.appointment.id.as_str()).collect();
        assert_eq!(ids, vec!["a3", "a1", "a2"]);
        assert_eq!(summary.rows[0].starts_at, "2024-03-15T08:15");
        assert_eq!(summary.rows[2].starts_at, "2024-03-16");
    }
}
