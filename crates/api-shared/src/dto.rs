//! Wire types for the prescription APIs.
//!
//! Outer keys of a submission are PascalCase (`Patient`, `Doctor`, ...) and inner keys are
//! camelCase (`idPatient`, `firstName`, ...). Both spellings are accepted on input so that
//! clients written against either convention can submit.
//!
//! Date fields accept a local ISO-8601 date-time (`2024-01-01T00:00:00` or `2024-01-01T00:00`),
//! an RFC 3339 timestamp with offset (normalised to UTC), or a plain date (`2024-01-01`, read as
//! midnight).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Patient section of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientReq {
    #[serde(alias = "IdPatient")]
    pub id_patient: i32,
    #[serde(alias = "FirstName")]
    pub first_name: String,
    #[serde(alias = "LastName")]
    pub last_name: String,
    #[serde(alias = "Birthdate", deserialize_with = "deserialize_date_time")]
    #[schema(value_type = String)]
    pub birthdate: NaiveDateTime,
}

/// Doctor section of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReq {
    #[serde(alias = "IdDoctor")]
    pub id_doctor: i32,
    #[serde(alias = "FirstName")]
    pub first_name: String,
    #[serde(alias = "LastName")]
    pub last_name: String,
    #[serde(alias = "Email")]
    pub email: String,
}

/// Prescription header of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionHeaderReq {
    #[serde(alias = "IdPrescription")]
    pub id_prescription: i32,
    #[serde(alias = "Date", deserialize_with = "deserialize_date_time")]
    #[schema(value_type = String)]
    pub date: NaiveDateTime,
    #[serde(alias = "DueDate", deserialize_with = "deserialize_date_time")]
    #[schema(value_type = String)]
    pub due_date: NaiveDateTime,
}

/// One medicament line of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicamentLineReq {
    #[serde(alias = "IdMedicament")]
    pub id_medicament: i32,
    #[serde(alias = "Dose")]
    pub dose: i32,
    #[serde(alias = "Details")]
    pub details: String,
}

/// Body of `POST /api/adding_prescription/add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubmitPrescriptionReq {
    #[serde(rename = "Patient", alias = "patient")]
    pub patient: PatientReq,
    #[serde(rename = "Doctor", alias = "doctor")]
    pub doctor: DoctorReq,
    #[serde(rename = "Prescription", alias = "prescription")]
    pub prescription: PrescriptionHeaderReq,
    #[serde(rename = "Medicaments", alias = "medicaments")]
    pub medicaments: Vec<MedicamentLineReq>,
}

/// Parse a submission date field.
///
/// Accepts a bare date at midnight, a local date-time with minute precision, an RFC 3339
/// timestamp (converted to UTC), or a local date-time with seconds and optional fraction.
///
/// A value that is none of these reports the error of the last form, so a bad time of day is
/// described as such rather than as trailing input after a date.
pub fn parse_date_time(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_utc()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
}

fn deserialize_date_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_time(&raw).map_err(serde::de::Error::custom)
}
