// Row types for the tables the backends read. The database owns these rows;
// nothing in this crate writes them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// admin / professor / student
    pub role: Option<String>,
}

/// `student_profiles`, one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentProfileRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub admission_year: Option<i32>,
}

/// `professor_profiles`, one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfessorProfileRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub employee_id: Option<String>,
    pub department_id: Option<Uuid>,
    pub designation: Option<String>,
    pub qualification: Option<String>,
}

/// `class_students`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EnrollmentRecord {
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub is_active: bool,
    pub joined_on: Option<NaiveDate>,
}

/// `classes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClassRecord {
    pub id: Uuid,
    pub class_label: Option<String>,
    pub batch_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    pub semester_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BranchRecord {
    pub id: Uuid,
    pub branch_name: Option<String>,
    pub branch_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BatchRecord {
    pub id: Uuid,
    pub batch_name: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SemesterRecord {
    pub id: Uuid,
    pub semester_number: Option<i32>,
    pub semester_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DepartmentRecord {
    pub id: Uuid,
    pub department_name: Option<String>,
    pub department_code: Option<String>,
}

/// `guardians`, zero or one per student profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GuardianRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub full_name: Option<String>,
    pub relation: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// `addresses`, reached through `user_addresses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AddressRecord {
    pub id: Uuid,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// `user_addresses` join row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserAddressRecord {
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub address_type: Option<String>,
    pub is_primary: bool,
}
