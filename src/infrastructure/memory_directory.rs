// In-memory CampusDirectory with seedable rows and per-table fault injection

use crate::error::{AppError, AppResult};
use crate::infrastructure::directory::CampusDirectory;
use crate::models::{
    AddressRecord, BatchRecord, BranchRecord, ClassRecord, DepartmentRecord, EnrollmentRecord,
    GuardianRecord, ProfessorProfileRecord, SemesterRecord, StudentProfileRecord,
    UserAddressRecord, UserRecord,
};
use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

/// Tables that can be made to fail with `fail_table`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryTable {
    Users,
    StudentProfiles,
    ProfessorProfiles,
    ClassStudents,
    Classes,
    Branches,
    Batches,
    Semesters,
    Departments,
    Guardians,
    Addresses,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectory {
    users: Vec<UserRecord>,
    students: Vec<StudentProfileRecord>,
    professors: Vec<ProfessorProfileRecord>,
    enrollments: Vec<EnrollmentRecord>,
    classes: Vec<ClassRecord>,
    branches: Vec<BranchRecord>,
    batches: Vec<BatchRecord>,
    semesters: Vec<SemesterRecord>,
    departments: Vec<DepartmentRecord>,
    guardians: Vec<GuardianRecord>,
    addresses: Vec<AddressRecord>,
    user_addresses: Vec<UserAddressRecord>,
    failing: HashSet<DirectoryTable>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: UserRecord) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_student(mut self, profile: StudentProfileRecord) -> Self {
        self.students.push(profile);
        self
    }

    pub fn with_professor(mut self, profile: ProfessorProfileRecord) -> Self {
        self.professors.push(profile);
        self
    }

    pub fn with_enrollment(mut self, enrollment: EnrollmentRecord) -> Self {
        self.enrollments.push(enrollment);
        self
    }

    pub fn with_class(mut self, class: ClassRecord) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_branch(mut self, branch: BranchRecord) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn with_batch(mut self, batch: BatchRecord) -> Self {
        self.batches.push(batch);
        self
    }

    pub fn with_semester(mut self, semester: SemesterRecord) -> Self {
        self.semesters.push(semester);
        self
    }

    pub fn with_department(mut self, department: DepartmentRecord) -> Self {
        self.departments.push(department);
        self
    }

    pub fn with_guardian(mut self, guardian: GuardianRecord) -> Self {
        self.guardians.push(guardian);
        self
    }

    /// Links `address` to `user_id` through a `user_addresses` row.
    pub fn with_address(
        mut self,
        user_id: Uuid,
        address: AddressRecord,
        address_type: &str,
        is_primary: bool,
    ) -> Self {
        self.user_addresses.push(UserAddressRecord {
            user_id,
            address_id: address.id,
            address_type: Some(address_type.to_string()),
            is_primary,
        });
        self.addresses.push(address);
        self
    }

    /// Every lookup against `table` returns a database error from now on.
    pub fn fail_table(mut self, table: DirectoryTable) -> Self {
        self.failing.insert(table);
        self
    }

    fn check(&self, table: DirectoryTable) -> AppResult<()> {
        if self.failing.contains(&table) {
            Err(AppError::DatabaseError(format!("{:?} lookup failed", table)))
        } else {
            Ok(())
        }
    }
}

fn find<T: Clone>(rows: &[T], pred: impl Fn(&T) -> bool) -> Option<T> {
    rows.iter().find(|row| pred(row)).cloned()
}

#[async_trait]
impl CampusDirectory for InMemoryDirectory {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn user_by_id(&self, user_id: Uuid) -> AppResult<Option<UserRecord>> {
        self.check(DirectoryTable::Users)?;
        Ok(find(&self.users, |u| u.id == user_id))
    }

    async fn student_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<StudentProfileRecord>> {
        self.check(DirectoryTable::StudentProfiles)?;
        Ok(find(&self.students, |s| s.user_id == user_id))
    }

    async fn professor_profile_by_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<ProfessorProfileRecord>> {
        self.check(DirectoryTable::ProfessorProfiles)?;
        Ok(find(&self.professors, |p| p.user_id == user_id))
    }

    async fn active_enrollments(&self, student_id: Uuid) -> AppResult<Vec<EnrollmentRecord>> {
        self.check(DirectoryTable::ClassStudents)?;
        let mut rows: Vec<EnrollmentRecord> = self
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id && e.is_active)
            .cloned()
            .collect();
        // Newest first, undated rows last
        rows.sort_by(|a, b| b.joined_on.cmp(&a.joined_on));
        Ok(rows)
    }

    async fn class_by_id(&self, class_id: Uuid) -> AppResult<Option<ClassRecord>> {
        self.check(DirectoryTable::Classes)?;
        Ok(find(&self.classes, |c| c.id == class_id))
    }

    async fn branch_by_id(&self, branch_id: Uuid) -> AppResult<Option<BranchRecord>> {
        self.check(DirectoryTable::Branches)?;
        Ok(find(&self.branches, |b| b.id == branch_id))
    }

    async fn batch_by_id(&self, batch_id: Uuid) -> AppResult<Option<BatchRecord>> {
        self.check(DirectoryTable::Batches)?;
        Ok(find(&self.batches, |b| b.id == batch_id))
    }

    async fn semester_by_id(&self, semester_id: Uuid) -> AppResult<Option<SemesterRecord>> {
        self.check(DirectoryTable::Semesters)?;
        Ok(find(&self.semesters, |s| s.id == semester_id))
    }

    async fn department_by_id(&self, department_id: Uuid) -> AppResult<Option<DepartmentRecord>> {
        self.check(DirectoryTable::Departments)?;
        Ok(find(&self.departments, |d| d.id == department_id))
    }

    async fn guardians_for_student(&self, student_id: Uuid) -> AppResult<Vec<GuardianRecord>> {
        self.check(DirectoryTable::Guardians)?;
        Ok(self
            .guardians
            .iter()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn primary_addresses_for_user(&self, user_id: Uuid) -> AppResult<Vec<AddressRecord>> {
        self.check(DirectoryTable::Addresses)?;
        Ok(self
            .user_addresses
            .iter()
            .filter(|link| link.user_id == user_id && link.is_primary)
            .filter_map(|link| find(&self.addresses, |a| a.id == link.address_id))
            .collect())
    }
}
