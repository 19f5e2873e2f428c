use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::Patient;

pub fn find_patient(conn: &Connection, id_patient: i32) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            "SELECT id_patient, first_name, last_name, birthdate
             FROM patients WHERE id_patient = ?1",
            params![id_patient],
            patient_from_row,
        )
        .optional()?;
    Ok(patient)
}

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id_patient, first_name, last_name, birthdate)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            patient.id_patient,
            patient.first_name,
            patient.last_name,
            patient.birthdate,
        ],
    )?;
    Ok(())
}

pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?)
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id_patient: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        birthdate: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use chrono::NaiveDate;

    fn ada() -> Patient {
        Patient {
            id_patient: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            birthdate: NaiveDate::from_ymd_opt(1990, 5, 17)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn insert_then_find() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &ada()).unwrap();
        assert_eq!(find_patient(&conn, 1).unwrap(), Some(ada()));
        assert_eq!(count_patients(&conn).unwrap(), 1);
    }

    #[test]
    fn missing_patient_is_none() {
        let conn = open_memory_database().unwrap();
        assert_eq!(find_patient(&conn, 7).unwrap(), None);
    }

    #[test]
    fn duplicate_id_is_a_constraint_error() {
        let conn = open_memory_database().unwrap();
        insert_patient(&conn, &ada()).unwrap();
        let err = insert_patient(&conn, &ada()).unwrap_err();
        assert!(matches!(err, DatabaseError::Sqlite(_)));
    }
}
