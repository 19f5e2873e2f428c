use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::Doctor;

pub fn find_doctor(conn: &Connection, id_doctor: i32) -> Result<Option<Doctor>, DatabaseError> {
    let doctor = conn
        .query_row(
            "SELECT id_doctor, first_name, last_name, email
             FROM doctors WHERE id_doctor = ?1",
            params![id_doctor],
            doctor_from_row,
        )
        .optional()?;
    Ok(doctor)
}

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id_doctor, first_name, last_name, email)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            doctor.id_doctor,
            doctor.first_name,
            doctor.last_name,
            doctor.email,
        ],
    )?;
    Ok(())
}

pub fn count_doctors(conn: &Connection) -> Result<i64, DatabaseError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))?)
}

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id_doctor: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
    })
}
