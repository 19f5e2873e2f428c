use crate::dto::HealthRes;

/// Simple health service used by the REST API and any future front-end.
///
/// This service provides a standardised way to check the health status of the
/// prescription service.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Prescription service is alive".into(),
        }
    }
}
