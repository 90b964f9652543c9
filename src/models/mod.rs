pub mod common;
pub mod contents;
pub mod courses;
pub mod directory;
pub mod lessons;
pub mod roles;

pub use common::{ApiResponse, ErrorCode, PublicationState};
