use rusqlite::{params, Connection, OptionalExtension, Row};

use super::medicament::medicament_from_row;
use crate::db::DatabaseError;
use crate::models::{Prescription, PrescriptionLine, PrescriptionMedicament};

pub fn find_prescription(
    conn: &Connection,
    id_prescription: i32,
) -> Result<Option<Prescription>, DatabaseError> {
    let prescription = conn
        .query_row(
            "SELECT id_prescription, date, due_date, id_patient, id_doctor
             FROM prescriptions WHERE id_prescription = ?1",
            params![id_prescription],
            prescription_from_row,
        )
        .optional()?;
    Ok(prescription)
}

pub fn insert_prescription(
    conn: &Connection,
    prescription: &Prescription,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (id_prescription, date, due_date, id_patient, id_doctor)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            prescription.id_prescription,
            prescription.date,
            prescription.due_date,
            prescription.id_patient,
            prescription.id_doctor,
        ],
    )?;
    Ok(())
}

pub fn insert_prescription_medicament(
    conn: &Connection,
    line: &PrescriptionMedicament,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescription_medicaments (id_medicament, id_prescription, dose, details)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            line.id_medicament,
            line.id_prescription,
            line.dose,
            line.details,
        ],
    )?;
    Ok(())
}

/// Lines of a prescription joined with their catalogue entries, ordered by medicament id.
pub fn prescription_lines(
    conn: &Connection,
    id_prescription: i32,
) -> Result<Vec<PrescriptionLine>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT m.id_medicament, m.name, m.description, m.type, pm.dose, pm.details
         FROM prescription_medicaments pm
         JOIN medicaments m ON m.id_medicament = pm.id_medicament
         WHERE pm.id_prescription = ?1
         ORDER BY m.id_medicament",
    )?;
    let rows = stmt.query_map(params![id_prescription], |row| {
        Ok(PrescriptionLine {
            medicament: medicament_from_row(row)?,
            dose: row.get(4)?,
            details: row.get(5)?,
        })
    })?;

    let mut lines = Vec::new();
    for row in rows {
        lines.push(row?);
    }
    Ok(lines)
}

pub fn count_prescriptions(conn: &Connection) -> Result<i64, DatabaseError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM prescriptions", [], |row| row.get(0))?)
}

pub fn count_prescription_medicaments(conn: &Connection) -> Result<i64, DatabaseError> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM prescription_medicaments",
        [],
        |row| row.get(0),
    )?)
}

fn prescription_from_row(row: &Row<'_>) -> rusqlite::Result<Prescription> {
    Ok(Prescription {
        id_prescription: row.get(0)?,
        date: row.get(1)?,
        due_date: row.get(2)?,
        id_patient: row.get(3)?,
        id_doctor: row.get(4)?,
    })
}
