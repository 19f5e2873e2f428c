use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::Medicament;

pub fn find_medicament(
    conn: &Connection,
    id_medicament: i32,
) -> Result<Option<Medicament>, DatabaseError> {
    let medicament = conn
        .query_row(
            "SELECT id_medicament, name, description, type
             FROM medicaments WHERE id_medicament = ?1",
            params![id_medicament],
            medicament_from_row,
        )
        .optional()?;
    Ok(medicament)
}

pub fn insert_medicament(conn: &Connection, medicament: &Medicament) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicaments (id_medicament, name, description, type)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            medicament.id_medicament,
            medicament.name,
            medicament.description,
            medicament.kind,
        ],
    )?;
    Ok(())
}

pub fn list_medicaments(conn: &Connection) -> Result<Vec<Medicament>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id_medicament, name, description, type
         FROM medicaments ORDER BY id_medicament",
    )?;
    let rows = stmt.query_map([], medicament_from_row)?;

    let mut medicaments = Vec::new();
    for row in rows {
        medicaments.push(row?);
    }
    Ok(medicaments)
}

pub(crate) fn medicament_from_row(row: &Row<'_>) -> rusqlite::Result<Medicament> {
    Ok(Medicament {
        id_medicament: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        kind: row.get(3)?,
    })
}
