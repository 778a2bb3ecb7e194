// Services - request-scoped business logic above the directory

pub mod profile_dto;
pub mod profile_resolver;

pub use profile_dto::{ClassPlacement, ProfessorProfileDto, StudentProfileDto};
pub use profile_resolver::{parse_user_id, user_id_from_query, ProfileResolver};
