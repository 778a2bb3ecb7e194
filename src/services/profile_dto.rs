// Flattened profile payloads returned by the profile endpoints

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    AddressRecord, BatchRecord, BranchRecord, ClassRecord, DepartmentRecord, EnrollmentRecord,
    GuardianRecord, ProfessorProfileRecord, SemesterRecord, StudentProfileRecord, UserRecord,
};

/// Everything reachable from a student's active enrollment. Each part is
/// independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassPlacement {
    pub enrollment: Option<EnrollmentRecord>,
    pub class: Option<ClassRecord>,
    pub branch: Option<BranchRecord>,
    pub batch: Option<BatchRecord>,
    pub semester: Option<SemesterRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfileDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub roll_number: Option<String>,
    pub enrollment_number: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub admission_year: Option<i32>,
    pub class_id: Option<Uuid>,
    pub class_label: Option<String>,
    pub section_id: Option<Uuid>,
    pub joined_on: Option<NaiveDate>,
    /// Branch name
    pub department: Option<String>,
    pub branch_code: Option<String>,
    /// Batch name, e.g. "2024-2028"
    pub academic_year: Option<String>,
    pub batch_start_year: Option<i32>,
    pub batch_end_year: Option<i32>,
    /// Semester number
    pub semester: Option<i32>,
    pub semester_name: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_relation: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl StudentProfileDto {
    pub fn assemble(
        profile: StudentProfileRecord,
        user: Option<UserRecord>,
        placement: ClassPlacement,
        guardian: Option<GuardianRecord>,
        address: Option<AddressRecord>,
    ) -> Self {
        let user = user.unwrap_or_else(|| UserRecord::empty(profile.user_id));
        let ClassPlacement {
            enrollment,
            class,
            branch,
            batch,
            semester,
        } = placement;

        Self {
            id: profile.id,
            user_id: profile.user_id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            roll_number: profile.roll_number,
            enrollment_number: profile.enrollment_number,
            gender: profile.gender,
            date_of_birth: profile.date_of_birth,
            admission_year: profile.admission_year,
            class_id: enrollment.as_ref().map(|e| e.class_id),
            class_label: class.as_ref().and_then(|c| c.class_label.clone()),
            section_id: class.as_ref().and_then(|c| c.section_id),
            joined_on: enrollment.and_then(|e| e.joined_on),
            department: branch.as_ref().and_then(|b| b.branch_name.clone()),
            branch_code: branch.and_then(|b| b.branch_code),
            academic_year: batch.as_ref().and_then(|b| b.batch_name.clone()),
            batch_start_year: batch.as_ref().and_then(|b| b.start_year),
            batch_end_year: batch.and_then(|b| b.end_year),
            semester: semester.as_ref().and_then(|s| s.semester_number),
            semester_name: semester.and_then(|s| s.semester_name),
            guardian_name: guardian.as_ref().and_then(|g| g.full_name.clone()),
            guardian_relation: guardian.as_ref().and_then(|g| g.relation.clone()),
            guardian_phone: guardian.as_ref().and_then(|g| g.phone.clone()),
            guardian_email: guardian.and_then(|g| g.email),
            address_line1: address.as_ref().and_then(|a| a.address_line1.clone()),
            address_line2: address.as_ref().and_then(|a| a.address_line2.clone()),
            city: address.as_ref().and_then(|a| a.city.clone()),
            state: address.as_ref().and_then(|a| a.state.clone()),
            postal_code: address.as_ref().and_then(|a| a.postal_code.clone()),
            country: address.and_then(|a| a.country),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessorProfileDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub employee_id: Option<String>,
    pub department_id: Option<Uuid>,
    pub department: Option<String>,
    pub department_code: Option<String>,
    pub designation: Option<String>,
    pub qualification: Option<String>,
    /// No column backs this yet; always null.
    pub employment_type: Option<String>,
}

impl ProfessorProfileDto {
    pub fn assemble(
        profile: ProfessorProfileRecord,
        user: Option<UserRecord>,
        department: Option<DepartmentRecord>,
    ) -> Self {
        let user = user.unwrap_or_else(|| UserRecord::empty(profile.user_id));

        Self {
            id: profile.id,
            user_id: profile.user_id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            employee_id: profile.employee_id,
            department_id: profile.department_id,
            department: department.as_ref().and_then(|d| d.department_name.clone()),
            department_code: department.and_then(|d| d.department_code),
            designation: profile.designation,
            qualification: profile.qualification,
            employment_type: None,
        }
    }
}

impl UserRecord {
    fn empty(id: Uuid) -> Self {
        Self {
            id,
            email: None,
            full_name: None,
            phone: None,
            role: None,
        }
    }
}
