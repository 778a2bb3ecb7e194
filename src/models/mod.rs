// Domain models - database rows and the normalization helper used when merging them

pub mod records;
pub mod related;

pub use records::{
    AddressRecord, BatchRecord, BranchRecord, ClassRecord, DepartmentRecord, EnrollmentRecord,
    GuardianRecord, ProfessorProfileRecord, SemesterRecord, StudentProfileRecord,
    UserAddressRecord, UserRecord,
};
pub use related::Related;
