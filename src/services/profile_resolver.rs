// ProfileResolver - builds one flat profile from the profile row and its
// related tables. Only the profile row itself is required; every other lookup
// is best-effort and degrades to null fields.

use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    infrastructure::CampusDirectory,
    models::Related,
    services::profile_dto::{ClassPlacement, ProfessorProfileDto, StudentProfileDto},
};

#[derive(Clone)]
pub struct ProfileResolver {
    directory: Arc<dyn CampusDirectory>,
}

/// Validate the `user_id` query parameter.
pub fn parse_user_id(raw: Option<&str>) -> AppResult<Uuid> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation("Missing required parameter: user_id".to_string()))?;

    Uuid::parse_str(raw)
        .map_err(|_| AppError::Validation(format!("Invalid user_id '{}': expected a UUID", raw)))
}

/// Pick `user_id` out of raw query pairs. Repeats are fine only when they agree.
pub fn user_id_from_query(pairs: &[(String, String)]) -> AppResult<Uuid> {
    let mut values = pairs
        .iter()
        .filter(|(key, _)| key == "user_id")
        .map(|(_, value)| value.trim());

    let first = values.next();
    if let Some(first) = first {
        if values.any(|other| other != first) {
            return Err(AppError::Validation(
                "Conflicting values for parameter: user_id".to_string(),
            ));
        }
    }
    parse_user_id(first)
}

/// Absorb an enrichment failure: log it and carry on with nothing.
fn optional<T>(what: &str, key: Uuid, result: AppResult<Option<T>>) -> Option<T> {
    match result {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            debug!("No {} found for {}", what, key);
            None
        }
        Err(e) => {
            warn!("Skipping {} for {}: {}", what, key, e);
            None
        }
    }
}

/// Like `optional`, for lookups that return a row set standing in for a
/// single related row.
fn first_related<T>(what: &str, key: Uuid, result: AppResult<Vec<T>>) -> Option<T> {
    optional(what, key, result.map(|rows| Related::from(rows).into_single()))
}

/// Follow a nullable foreign key.
async fn follow_key<T, F, Fut>(what: &str, key: Option<Uuid>, fetch: F) -> Option<T>
where
    F: FnOnce(Uuid) -> Fut,
    Fut: Future<Output = AppResult<Option<T>>>,
{
    let key = key?;
    optional(what, key, fetch(key).await)
}

impl ProfileResolver {
    pub fn new(directory: Arc<dyn CampusDirectory>) -> Self {
        Self { directory }
    }

    pub async fn resolve_student(&self, user_id: Uuid) -> AppResult<StudentProfileDto> {
        let profile = self
            .directory
            .student_profile_by_user(user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Student profile not found for user {}", user_id))
            })?;

        let (user, placement, guardians, addresses) = futures::join!(
            self.directory.user_by_id(user_id),
            self.resolve_placement(profile.id),
            self.directory.guardians_for_student(profile.id),
            self.directory.primary_addresses_for_user(user_id),
        );

        let user = optional("user", user_id, user);
        let guardian = first_related("guardian", profile.id, guardians);
        let address = first_related("primary address", user_id, addresses);

        Ok(StudentProfileDto::assemble(profile, user, placement, guardian, address))
    }

    pub async fn resolve_professor(&self, user_id: Uuid) -> AppResult<ProfessorProfileDto> {
        let profile = self
            .directory
            .professor_profile_by_user(user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Professor profile not found for user {}", user_id))
            })?;

        let (user, department) = futures::join!(
            self.directory.user_by_id(user_id),
            follow_key("department", profile.department_id, |id| {
                self.directory.department_by_id(id)
            }),
        );
        let user = optional("user", user_id, user);

        Ok(ProfessorProfileDto::assemble(profile, user, department))
    }

    /// Active enrollment, its class, and the class's dimension rows.
    async fn resolve_placement(&self, student_id: Uuid) -> ClassPlacement {
        let enrollments = self.directory.active_enrollments(student_id).await;
        let Some(enrollment) = first_related("active enrollment", student_id, enrollments) else {
            return ClassPlacement::default();
        };

        let class = optional(
            "class",
            enrollment.class_id,
            self.directory.class_by_id(enrollment.class_id).await,
        );
        let Some(class) = class else {
            return ClassPlacement {
                enrollment: Some(enrollment),
                ..ClassPlacement::default()
            };
        };

        let (branch, batch, semester) = futures::join!(
            follow_key("branch", class.branch_id, |id| self.directory.branch_by_id(id)),
            follow_key("batch", class.batch_id, |id| self.directory.batch_by_id(id)),
            follow_key("semester", class.semester_id, |id| self.directory.semester_by_id(id)),
        );

        ClassPlacement {
            enrollment: Some(enrollment),
            class: Some(class),
            branch,
            batch,
            semester,
        }
    }
}
