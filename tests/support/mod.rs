#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use college_erp::{
    api::{academic_router, admin_router},
    app_state::AppState,
    config::{Config, ServiceKind},
    infrastructure::{InMemoryDirectory, RateLimiter},
    models::{
        AddressRecord, BatchRecord, BranchRecord, ClassRecord, EnrollmentRecord, GuardianRecord,
        ProfessorProfileRecord, SemesterRecord, StudentProfileRecord, UserRecord,
    },
};

/// Ids of the seeded rows
pub struct Campus {
    pub student_user: Uuid,
    pub student_profile: Uuid,
    pub professor_user: Uuid,
    pub class: Uuid,
    pub branch: Uuid,
}

impl Campus {
    pub fn new() -> Self {
        Self {
            student_user: Uuid::new_v4(),
            student_profile: Uuid::new_v4(),
            professor_user: Uuid::new_v4(),
            class: Uuid::new_v4(),
            branch: Uuid::new_v4(),
        }
    }

    /// A student with a user row and profile, but no enrollment, guardian or
    /// address, plus a professor.
    pub fn people(&self) -> InMemoryDirectory {
        InMemoryDirectory::new()
            .with_user(UserRecord {
                id: self.student_user,
                email: Some("ananya.k@college.edu".into()),
                full_name: Some("Ananya Kulkarni".into()),
                phone: Some("+91-98200-00001".into()),
                role: Some("student".into()),
            })
            .with_student(StudentProfileRecord {
                id: self.student_profile,
                user_id: self.student_user,
                roll_number: Some("2024CSE001".into()),
                enrollment_number: Some("ENR2024001".into()),
                gender: Some("female".into()),
                date_of_birth: NaiveDate::from_ymd_opt(2006, 7, 21),
                admission_year: Some(2024),
            })
            .with_user(UserRecord {
                id: self.professor_user,
                email: Some("r.menon@college.edu".into()),
                full_name: Some("Dr. Ravi Menon".into()),
                phone: None,
                role: Some("professor".into()),
            })
            .with_professor(ProfessorProfileRecord {
                id: Uuid::new_v4(),
                user_id: self.professor_user,
                employee_id: Some("EMP-1001".into()),
                department_id: None,
                designation: Some("Assistant Professor".into()),
                qualification: Some("M.Tech".into()),
            })
    }

    /// `people` plus an enrollment in class 2024-CSE-A with every related
    /// row present. `active` controls the enrollment flag.
    pub fn enrolled(&self, active: bool) -> InMemoryDirectory {
        let batch = Uuid::new_v4();
        let semester = Uuid::new_v4();
        let address = Uuid::new_v4();

        self.people()
            .with_enrollment(EnrollmentRecord {
                student_id: self.student_profile,
                class_id: self.class,
                is_active: active,
                joined_on: NaiveDate::from_ymd_opt(2024, 8, 1),
            })
            .with_class(ClassRecord {
                id: self.class,
                class_label: Some("2024-CSE-A".into()),
                batch_id: Some(batch),
                branch_id: Some(self.branch),
                section_id: None,
                semester_id: Some(semester),
            })
            .with_branch(BranchRecord {
                id: self.branch,
                branch_name: Some("Computer Science".into()),
                branch_code: Some("CSE".into()),
            })
            .with_batch(BatchRecord {
                id: batch,
                batch_name: Some("2024-2028".into()),
                start_year: Some(2024),
                end_year: Some(2028),
            })
            .with_semester(SemesterRecord {
                id: semester,
                semester_number: Some(1),
                semester_name: Some("Semester 1".into()),
            })
            .with_guardian(GuardianRecord {
                id: Uuid::new_v4(),
                student_id: self.student_profile,
                full_name: Some("Suresh Kulkarni".into()),
                relation: Some("father".into()),
                phone: Some("+91-98200-00002".into()),
                email: None,
            })
            .with_address(
                self.student_user,
                AddressRecord {
                    id: address,
                    address_line1: Some("14 Shivaji Nagar".into()),
                    address_line2: None,
                    city: Some("Pune".into()),
                    state: Some("Maharashtra".into()),
                    postal_code: Some("411005".into()),
                    country: Some("India".into()),
                },
                "permanent",
                true,
            )
    }
}

pub fn test_config(kind: ServiceKind) -> Config {
    Config::from_map(kind, &HashMap::new()).unwrap()
}

pub fn academic_app(directory: InMemoryDirectory) -> Router {
    academic_app_with_limit(directory, 1000)
}

pub fn academic_app_with_limit(directory: InMemoryDirectory, max_requests: u32) -> Router {
    let state = AppState::with_directory(test_config(ServiceKind::Academic), Arc::new(directory));
    let limiter = Arc::new(RateLimiter::new(max_requests, std::time::Duration::from_secs(60)));
    academic_router(state, limiter)
}

pub fn admin_app() -> Router {
    admin_router(Arc::new(RateLimiter::new(1000, std::time::Duration::from_secs(60))))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send_json(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
