use super::entity::{Build, Coordinate};
use crate::domain::{DomainError, DomainResult};

/// Validates all Build invariants
pub fn validate_build(build: &Build) -> DomainResult<()> {
    if let Some(name) = &build.name {
        if name.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Build name cannot be blank".to_string(),
            ));
        }
    }
    validate_points("coordinates", &build.coordinates)?;
    validate_points("buildAreaCoordinates", &build.build_area_coordinates)?;
    Ok(())
}

/// NaN and infinities do not survive a JSON round trip
fn validate_points(field: &str, points: &[Coordinate]) -> DomainResult<()> {
    if let Some(point) = points.iter().find(|p| !p.iter().all(|v| v.is_finite())) {
        return Err(DomainError::InvariantViolation(format!(
            "{} contains a non-finite point {:?}",
            field, point
        )));
    }
    Ok(())
}
