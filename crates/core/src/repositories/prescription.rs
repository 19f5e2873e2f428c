//! Prescription submission.
//!
//! A submission names a patient, a doctor, a prescription header and up to
//! [`MAX_MEDICAMENTS`] medicament lines. Processing runs in this order, and the first failing
//! step decides the rejection:
//!
//! 1. line count is checked against [`MAX_MEDICAMENTS`]
//! 2. every referenced medicament must already be in the catalogue
//! 3. the patient is looked up by id and created if absent
//! 4. the doctor is looked up by id and created if absent
//! 5. the due date must not precede the issue date
//! 6. the prescription and its lines are inserted
//!
//! Steps 2–6 share one transaction. A rejection at step 5, or any store failure, rolls back the
//! patient and doctor rows created earlier in the same submission.
//!
//! Existing patients and doctors are reused as stored. If the submitted names differ from the
//! stored record the difference is logged and otherwise ignored.

use crate::constants::MAX_MEDICAMENTS;
use crate::db::repository::{
    find_doctor, find_medicament, find_patient, find_prescription, insert_doctor, insert_patient,
    insert_prescription, insert_prescription_medicament, prescription_lines,
};
use crate::db::{Database, DatabaseError};
use crate::dto::{DoctorReq, MedicamentLineReq, PatientReq, SubmitPrescriptionReq};
use crate::models::{Doctor, Patient, Prescription, PrescriptionDetails, PrescriptionMedicament};
use crate::{PrescriptionError, PrescriptionResult};
use rusqlite::Connection;

/// Pure prescription data operations - no API concerns
#[derive(Clone, Debug)]
pub struct PrescriptionService {
    db: Database,
}

impl PrescriptionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validates and stores a prescription submission.
    ///
    /// # Errors
    ///
    /// - [`PrescriptionError::TooManyMedicaments`] if more than [`MAX_MEDICAMENTS`] lines are given
    /// - [`PrescriptionError::MedicamentNotFound`] for the first line naming an unknown medicament
    /// - [`PrescriptionError::DueDateBeforeDate`] if the due date precedes the issue date
    /// - [`PrescriptionError::Database`] for store failures, including a prescription id that is
    ///   already taken or the same medicament listed twice
    ///
    /// Nothing is persisted when an error is returned.
    pub fn submit(&self, req: &SubmitPrescriptionReq) -> PrescriptionResult<()> {
        if req.medicaments.len() > MAX_MEDICAMENTS {
            return Err(PrescriptionError::TooManyMedicaments {
                limit: MAX_MEDICAMENTS,
            });
        }

        self.db.with_connection(|conn| {
            let tx = conn.transaction()?;

            ensure_medicaments_exist(&tx, &req.medicaments)?;

            let id_patient = resolve_patient(&tx, &req.patient)?;
            let id_doctor = resolve_doctor(&tx, &req.doctor)?;

            if req.prescription.due_date < req.prescription.date {
                return Err(PrescriptionError::DueDateBeforeDate);
            }

            let prescription = Prescription {
                id_prescription: req.prescription.id_prescription,
                date: req.prescription.date,
                due_date: req.prescription.due_date,
                id_patient,
                id_doctor,
            };
            insert_prescription(&tx, &prescription)?;

            for line in &req.medicaments {
                insert_prescription_medicament(
                    &tx,
                    &PrescriptionMedicament {
                        id_medicament: line.id_medicament,
                        id_prescription: prescription.id_prescription,
                        dose: line.dose,
                        details: line.details.clone(),
                    },
                )?;
            }

            tx.commit()?;

            tracing::info!(
                id_prescription = prescription.id_prescription,
                id_patient,
                id_doctor,
                lines = req.medicaments.len(),
                "prescription added"
            );
            Ok(())
        })
    }

    /// Loads a stored prescription with its patient, doctor and lines.
    ///
    /// Returns `Ok(None)` if no prescription has the given id.
    pub fn prescription_details(
        &self,
        id_prescription: i32,
    ) -> PrescriptionResult<Option<PrescriptionDetails>> {
        self.db.with_connection(|conn| {
            let Some(prescription) = find_prescription(conn, id_prescription)? else {
                return Ok(None);
            };

            // Both rows are guaranteed by foreign keys.
            let patient = find_patient(conn, prescription.id_patient)?
                .ok_or(DatabaseError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;
            let doctor = find_doctor(conn, prescription.id_doctor)?
                .ok_or(DatabaseError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;
            let lines = prescription_lines(conn, id_prescription)?;

            Ok(Some(PrescriptionDetails {
                prescription,
                patient,
                doctor,
                lines,
            }))
        })
    }
}

fn ensure_medicaments_exist(
    conn: &Connection,
    lines: &[MedicamentLineReq],
) -> PrescriptionResult<()> {
    for line in lines {
        if find_medicament(conn, line.id_medicament)?.is_none() {
            return Err(PrescriptionError::MedicamentNotFound(line.id_medicament));
        }
    }
    Ok(())
}

fn resolve_patient(conn: &Connection, req: &PatientReq) -> PrescriptionResult<i32> {
    match find_patient(conn, req.id_patient)? {
        Some(existing) => {
            if existing.first_name != req.first_name || existing.last_name != req.last_name {
                tracing::warn!(
                    id_patient = existing.id_patient,
                    "submitted patient name differs from stored record; keeping stored record"
                );
            }
            Ok(existing.id_patient)
        }
        None => {
            let patient = Patient {
                id_patient: req.id_patient,
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                birthdate: req.birthdate,
            };
            insert_patient(conn, &patient)?;
            tracing::debug!(id_patient = patient.id_patient, "patient created");
            Ok(patient.id_patient)
        }
    }
}

fn resolve_doctor(conn: &Connection, req: &DoctorReq) -> PrescriptionResult<i32> {
    match find_doctor(conn, req.id_doctor)? {
        Some(existing) => {
            if existing.first_name != req.first_name
                || existing.last_name != req.last_name
                || existing.email != req.email
            {
                tracing::warn!(
                    id_doctor = existing.id_doctor,
                    "submitted doctor details differ from stored record; keeping stored record"
                );
            }
            Ok(existing.id_doctor)
        }
        None => {
            let doctor = Doctor {
                id_doctor: req.id_doctor,
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                email: req.email.clone(),
            };
            insert_doctor(conn, &doctor)?;
            tracing::debug!(id_doctor = doctor.id_doctor, "doctor created");
            Ok(doctor.id_doctor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{
        count_doctors, count_patients, count_prescription_medicaments, count_prescriptions,
    };
    use crate::dto::PrescriptionHeaderReq;
    use crate::models::Medicament;
    use crate::MedicamentService;
    use chrono::{NaiveDate, NaiveDateTime};

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn seeded_db(ids: &[i32]) -> Database {
        let db = Database::open_in_memory().unwrap();
        let catalogue = MedicamentService::new(db.clone());
        for &id in ids {
            catalogue
                .add(&Medicament {
                    id_medicament: id,
                    name: format!("Medicament {id}"),
                    description: String::new(),
                    kind: "tablet".into(),
                })
                .unwrap();
        }
        db
    }

    fn line(id: i32) -> MedicamentLineReq {
        MedicamentLineReq {
            id_medicament: id,
            dose: 2,
            details: "take with food".into(),
        }
    }

    fn submission(
        id_prescription: i32,
        medicaments: Vec<MedicamentLineReq>,
    ) -> SubmitPrescriptionReq {
        SubmitPrescriptionReq {
            patient: PatientReq {
                id_patient: 1,
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                birthdate: day(1990, 5, 17),
            },
            doctor: DoctorReq {
                id_doctor: 1,
                first_name: "Gregory".into(),
                last_name: "House".into(),
                email: "house@example.org".into(),
            },
            prescription: PrescriptionHeaderReq {
                id_prescription,
                date: day(2024, 1, 1),
                due_date: day(2024, 1, 10),
            },
            medicaments,
        }
    }

    #[derive(Debug, PartialEq)]
    struct Counts {
        patients: i64,
        doctors: i64,
        prescriptions: i64,
        lines: i64,
    }

    fn counts(db: &Database) -> Counts {
        db.with_connection(|conn| {
            Ok::<_, DatabaseError>(Counts {
                patients: count_patients(conn)?,
                doctors: count_doctors(conn)?,
                prescriptions: count_prescriptions(conn)?,
                lines: count_prescription_medicaments(conn)?,
            })
        })
        .unwrap()
    }

    const EMPTY: Counts = Counts {
        patients: 0,
        doctors: 0,
        prescriptions: 0,
        lines: 0,
    };

    #[test]
    fn stores_new_patient_doctor_prescription_and_line() {
        let db = seeded_db(&[5]);
        let service = PrescriptionService::new(db.clone());

        service.submit(&submission(1, vec![line(5)])).unwrap();

        assert_eq!(
            counts(&db),
            Counts {
                patients: 1,
                doctors: 1,
                prescriptions: 1,
                lines: 1
            }
        );

        let details = service.prescription_details(1).unwrap().unwrap();
        assert_eq!(details.patient.id_patient, 1);
        assert_eq!(details.doctor.email, "house@example.org");
        assert_eq!(details.prescription.date, day(2024, 1, 1));
        assert_eq!(details.prescription.due_date, day(2024, 1, 10));
        assert_eq!(details.lines.len(), 1);
        assert_eq!(details.lines[0].medicament.id_medicament, 5);
        assert_eq!(details.lines[0].dose, 2);
        assert_eq!(details.lines[0].details, "take with food");
    }

    #[test]
    fn more_than_ten_lines_is_rejected_without_writes() {
        let ids: Vec<i32> = (1..=11).collect();
        let db = seeded_db(&ids);
        let service = PrescriptionService::new(db.clone());

        let err = service
            .submit(&submission(1, ids.iter().map(|&id| line(id)).collect()))
            .unwrap_err();

        assert!(matches!(
            err,
            PrescriptionError::TooManyMedicaments { limit: 10 }
        ));
        assert_eq!(counts(&db), EMPTY);
    }

    #[test]
    fn exactly_ten_lines_is_accepted() {
        let ids: Vec<i32> = (1..=10).collect();
        let db = seeded_db(&ids);
        let service = PrescriptionService::new(db.clone());

        service
            .submit(&submission(1, ids.iter().map(|&id| line(id)).collect()))
            .unwrap();
        assert_eq!(counts(&db).lines, 10);
    }

    #[test]
    fn unknown_medicament_is_rejected_naming_the_first_missing_id() {
        let db = seeded_db(&[5]);
        let service = PrescriptionService::new(db.clone());

        let err = service
            .submit(&submission(1, vec![line(5), line(77), line(88)]))
            .unwrap_err();

        assert!(matches!(err, PrescriptionError::MedicamentNotFound(77)));
        assert_eq!(err.to_string(), "Medicament with ID 77 does not exist.");
        assert_eq!(counts(&db), EMPTY);
    }

    #[test]
    fn due_date_before_date_rolls_back_patient_and_doctor() {
        let db = seeded_db(&[5]);
        let service = PrescriptionService::new(db.clone());

        let mut req = submission(1, vec![line(5)]);
        req.prescription.due_date = day(2023, 12, 31);

        let err = service.submit(&req).unwrap_err();
        assert!(matches!(err, PrescriptionError::DueDateBeforeDate));
        assert_eq!(counts(&db), EMPTY);
    }

    #[test]
    fn line_cap_is_checked_before_catalogue_and_dates() {
        let db = seeded_db(&[1, 2, 3]);
        let service = PrescriptionService::new(db.clone());

        let mut req = submission(1, (1..=11).map(line).collect());
        req.prescription.due_date = day(2023, 12, 31);

        let err = service.submit(&req).unwrap_err();
        assert!(matches!(
            err,
            PrescriptionError::TooManyMedicaments { limit: 10 }
        ));
        assert_eq!(counts(&db), EMPTY);
    }

    #[test]
    fn unknown_medicament_is_reported_before_due_date() {
        let db = seeded_db(&[5]);
        let service = PrescriptionService::new(db.clone());

        let mut req = submission(1, vec![line(5), line(1)]);
        req.prescription.due_date = day(2023, 12, 31);

        let err = service.submit(&req).unwrap_err();
        assert!(matches!(err, PrescriptionError::MedicamentNotFound(1)));
        assert_eq!(counts(&db), EMPTY);
    }

    #[test]
    fn due_date_equal_to_date_is_accepted() {
        let db = seeded_db(&[5]);
        let service = PrescriptionService::new(db.clone());

        let mut req = submission(1, vec![line(5)]);
        req.prescription.due_date = req.prescription.date;

        service.submit(&req).unwrap();
        assert_eq!(counts(&db).prescriptions, 1);
    }

    #[test]
    fn existing_patient_and_doctor_are_reused() {
        let db = seeded_db(&[5]);
        let service = PrescriptionService::new(db.clone());

        service.submit(&submission(1, vec![line(5)])).unwrap();

        // Divergent names are ignored in favour of the stored record.
        let mut second = submission(2, vec![line(5)]);
        second.patient.first_name = "Augusta".into();
        second.doctor.email = "g.house@example.org".into();
        service.submit(&second).unwrap();

        assert_eq!(
            counts(&db),
            Counts {
                patients: 1,
                doctors: 1,
                prescriptions: 2,
                lines: 2
            }
        );
        let details = service.prescription_details(2).unwrap().unwrap();
        assert_eq!(details.patient.first_name, "Ada");
        assert_eq!(details.doctor.email, "house@example.org");
    }

    #[test]
    fn empty_medicament_list_is_allowed() {
        let db = seeded_db(&[]);
        let service = PrescriptionService::new(db.clone());

        service.submit(&submission(1, Vec::new())).unwrap();
        assert_eq!(
            counts(&db),
            Counts {
                patients: 1,
                doctors: 1,
                prescriptions: 1,
                lines: 0
            }
        );
    }

    #[test]
    fn duplicate_prescription_id_is_a_store_failure_and_rolls_back() {
        let db = seeded_db(&[5]);
        let service = PrescriptionService::new(db.clone());
        service.submit(&submission(1, vec![line(5)])).unwrap();

        let mut again = submission(1, vec![line(5)]);
        again.patient.id_patient = 2;
        again.doctor.id_doctor = 2;
        let err = service.submit(&again).unwrap_err();

        assert!(matches!(err, PrescriptionError::Database(_)));
        assert!(!err.is_rejection());
        assert_eq!(
            counts(&db),
            Counts {
                patients: 1,
                doctors: 1,
                prescriptions: 1,
                lines: 1
            }
        );
    }

    #[test]
    fn repeated_medicament_line_is_a_store_failure() {
        let db = seeded_db(&[5]);
        let service = PrescriptionService::new(db.clone());

        let err = service
            .submit(&submission(1, vec![line(5), line(5)]))
            .unwrap_err();
        assert!(matches!(err, PrescriptionError::Database(_)));
        assert_eq!(counts(&db), EMPTY);
    }

    #[test]
    fn unknown_prescription_has_no_details() {
        let service = PrescriptionService::new(seeded_db(&[]));
        assert_eq!(service.prescription_details(404).unwrap(), None);
    }
}
