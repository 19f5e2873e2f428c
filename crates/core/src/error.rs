use crate::db::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum PrescriptionError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("A prescription can contain no more than {limit} medicaments.")]
    TooManyMedicaments { limit: usize },
    #[error("Medicament with ID {0} does not exist.")]
    MedicamentNotFound(i32),
    #[error("DueDate must be greater than or equal to Date.")]
    DueDateBeforeDate,
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
}

impl PrescriptionError {
    /// Whether the error is a caller-facing rejection rather than a store failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, PrescriptionError::Database(_))
    }
}

impl From<rusqlite::Error> for PrescriptionError {
    fn from(err: rusqlite::Error) -> Self {
        PrescriptionError::Database(DatabaseError::Sqlite(err))
    }
}

pub type PrescriptionResult<T> = std::result::Result<T, PrescriptionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_MEDICAMENTS;

    #[test]
    fn rejection_messages_match_the_wire_contract() {
        assert_eq!(
            PrescriptionError::TooManyMedicaments {
                limit: MAX_MEDICAMENTS
            }
            .to_string(),
            "A prescription can contain no more than 10 medicaments."
        );
        assert_eq!(
            PrescriptionError::MedicamentNotFound(42).to_string(),
            "Medicament with ID 42 does not exist."
        );
        assert_eq!(
            PrescriptionError::DueDateBeforeDate.to_string(),
            "DueDate must be greater than or equal to Date."
        );
    }

    #[test]
    fn store_failures_are_not_rejections() {
        let err: PrescriptionError = DatabaseError::LockPoisoned.into();
        assert!(!err.is_rejection());
        assert!(PrescriptionError::DueDateBeforeDate.is_rejection());
    }
}
