pub mod course_locks;
pub mod courses;
pub mod lessons;
pub mod roles;
pub mod saga;

pub use course_locks::CourseLocks;
pub use courses::CourseService;
pub use lessons::LessonService;
pub use roles::{RoleAuthority, RoleCatalog};
