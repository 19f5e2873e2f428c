//! Row types for the relational store.
//!
//! Identifiers are supplied by callers rather than generated by the store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id_patient: i32,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id_doctor: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Catalogue entry. Populated out-of-band; never created by a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicament {
    pub id_medicament: i32,
    pub name: String,
    pub description: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id_prescription: i32,
    pub date: NaiveDateTime,
    pub due_date: NaiveDateTime,
    pub id_patient: i32,
    pub id_doctor: i32,
}

/// Join row linking a prescription to a medicament. Keyed by both ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionMedicament {
    pub id_medicament: i32,
    pub id_prescription: i32,
    pub dose: i32,
    pub details: String,
}

/// A stored prescription together with everything it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionDetails {
    pub prescription: Prescription,
    pub patient: Patient,
    pub doctor: Doctor,
    pub lines: Vec<PrescriptionLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionLine {
    pub medicament: Medicament,
    pub dose: i32,
    pub details: String,
}
