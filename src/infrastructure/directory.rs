// Campus Directory - read access to the hosted database tables
// One client per process, shared by every request through AppState

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::models::{
    AddressRecord, BatchRecord, BranchRecord, ClassRecord, DepartmentRecord, EnrollmentRecord,
    GuardianRecord, ProfessorProfileRecord, SemesterRecord, StudentProfileRecord, UserRecord,
};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Lookups the profile endpoints need. Every method is a single read; none of
/// them mutate anything.
#[async_trait]
pub trait CampusDirectory: Send + Sync {
    /// Connectivity check used by readiness
    async fn ping(&self) -> AppResult<()>;

    async fn user_by_id(&self, user_id: Uuid) -> AppResult<Option<UserRecord>>;
    async fn student_profile_by_user(&self, user_id: Uuid)
        -> AppResult<Option<StudentProfileRecord>>;
    async fn professor_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<ProfessorProfileRecord>>;

    /// Enrollments of a student profile with `is_active = true`, newest first
    async fn active_enrollments(&self, student_id: Uuid) -> AppResult<Vec<EnrollmentRecord>>;
    async fn class_by_id(&self, class_id: Uuid) -> AppResult<Option<ClassRecord>>;
    async fn branch_by_id(&self, branch_id: Uuid) -> AppResult<Option<BranchRecord>>;
    async fn batch_by_id(&self, batch_id: Uuid) -> AppResult<Option<BatchRecord>>;
    async fn semester_by_id(&self, semester_id: Uuid) -> AppResult<Option<SemesterRecord>>;
    async fn department_by_id(&self, department_id: Uuid) -> AppResult<Option<DepartmentRecord>>;

    async fn guardians_for_student(&self, student_id: Uuid) -> AppResult<Vec<GuardianRecord>>;
    /// Addresses linked through `user_addresses` with `is_primary = true`
    async fn primary_addresses_for_user(&self, user_id: Uuid) -> AppResult<Vec<AddressRecord>>;
}

/// PostgreSQL implementation backed by a sqlx pool
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampusDirectory for PostgresDirectory {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("Database health check failed: {}", e)))?;
        Ok(())
    }

    async fn user_by_id(&self, user_id: Uuid) -> AppResult<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, full_name, phone, role::text AS role FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get user {}: {}", user_id, e)))
    }

    async fn student_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<StudentProfileRecord>> {
        sqlx::query_as::<_, StudentProfileRecord>(
            r#"
            SELECT id, user_id, roll_number, enrollment_number, gender, date_of_birth, admission_year
            FROM student_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to get student profile for {}: {}", user_id, e))
        })
    }

    async fn professor_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<ProfessorProfileRecord>> {
        sqlx::query_as::<_, ProfessorProfileRecord>(
            r#"
            SELECT id, user_id, employee_id, department_id, designation, qualification
            FROM professor_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to get professor profile for {}: {}", user_id, e))
        })
    }

    async fn active_enrollments(&self, student_id: Uuid) -> AppResult<Vec<EnrollmentRecord>> {
        sqlx::query_as::<_, EnrollmentRecord>(
            r#"
            SELECT student_id, class_id, is_active, joined_on
            FROM class_students
            WHERE student_id = $1 AND is_active = true
            ORDER BY joined_on DESC NULLS LAST
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to get enrollments for {}: {}", student_id, e))
        })
    }

    async fn class_by_id(&self, class_id: Uuid) -> AppResult<Option<ClassRecord>> {
        sqlx::query_as::<_, ClassRecord>(
            "SELECT id, class_label, batch_id, branch_id, section_id, semester_id FROM classes WHERE id = $1",
        )
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get class {}: {}", class_id, e)))
    }

    async fn branch_by_id(&self, branch_id: Uuid) -> AppResult<Option<BranchRecord>> {
        sqlx::query_as::<_, BranchRecord>(
            "SELECT id, branch_name, branch_code FROM branches WHERE id = $1",
        )
        .bind(branch_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get branch {}: {}", branch_id, e)))
    }

    async fn batch_by_id(&self, batch_id: Uuid) -> AppResult<Option<BatchRecord>> {
        sqlx::query_as::<_, BatchRecord>(
            "SELECT id, batch_name, start_year, end_year FROM batches WHERE id = $1",
        )
        .bind(batch_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get batch {}: {}", batch_id, e)))
    }

    async fn semester_by_id(&self, semester_id: Uuid) -> AppResult<Option<SemesterRecord>> {
        sqlx::query_as::<_, SemesterRecord>(
            "SELECT id, semester_number, semester_name FROM semesters WHERE id = $1",
        )
        .bind(semester_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to get semester {}: {}", semester_id, e))
        })
    }

    async fn department_by_id(&self, department_id: Uuid) -> AppResult<Option<DepartmentRecord>> {
        sqlx::query_as::<_, DepartmentRecord>(
            "SELECT id, department_name, department_code FROM departments WHERE id = $1",
        )
        .bind(department_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to get department {}: {}", department_id, e))
        })
    }

    async fn guardians_for_student(&self, student_id: Uuid) -> AppResult<Vec<GuardianRecord>> {
        sqlx::query_as::<_, GuardianRecord>(
            "SELECT id, student_id, full_name, relation, phone, email FROM guardians WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to get guardian for {}: {}", student_id, e))
        })
    }

    async fn primary_addresses_for_user(&self, user_id: Uuid) -> AppResult<Vec<AddressRecord>> {
        sqlx::query_as::<_, AddressRecord>(
            r#"
            SELECT a.id, a.address_line1, a.address_line2, a.city, a.state, a.postal_code, a.country
            FROM user_addresses ua
            JOIN addresses a ON a.id = ua.address_id
            WHERE ua.user_id = $1 AND ua.is_primary = true
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to get primary address for {}: {}", user_id, e))
        })
    }
}

/// Build the process-wide directory client. Called once at startup.
pub async fn connect_directory(config: &DatabaseConfig) -> AppResult<Arc<dyn CampusDirectory>> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.url)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to database: {}", e)))?;

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Database pool initialized"
    );

    Ok(Arc::new(PostgresDirectory::new(pool)))
}
