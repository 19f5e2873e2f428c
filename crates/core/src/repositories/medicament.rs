//! Medicament catalogue maintenance.
//!
//! The submission flow only ever reads the catalogue; entries are added here by operators
//! (see the `rx` CLI).

use crate::db::repository::{find_medicament, insert_medicament, list_medicaments};
use crate::db::Database;
use crate::models::Medicament;
use crate::{PrescriptionError, PrescriptionResult};

#[derive(Clone, Debug)]
pub struct MedicamentService {
    db: Database,
}

impl MedicamentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Adds a catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns [`PrescriptionError::InvalidInput`] if the name is blank, or a database error if
    /// the id is already taken.
    pub fn add(&self, medicament: &Medicament) -> PrescriptionResult<()> {
        if medicament.name.trim().is_empty() {
            return Err(PrescriptionError::InvalidInput(
                "medicament name cannot be empty".into(),
            ));
        }

        self.db.with_connection(|conn| {
            insert_medicament(conn, medicament)?;
            tracing::info!(id_medicament = medicament.id_medicament, "medicament added");
            Ok(())
        })
    }

    pub fn get(&self, id_medicament: i32) -> PrescriptionResult<Option<Medicament>> {
        self.db
            .with_connection(|conn| Ok(find_medicament(conn, id_medicament)?))
    }

    pub fn list(&self) -> PrescriptionResult<Vec<Medicament>> {
        self.db.with_connection(|conn| Ok(list_medicaments(conn)?))
    }
}
