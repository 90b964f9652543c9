pub mod error_code;
pub mod publication;
pub mod response;

pub use error_code::ErrorCode;
pub use publication::PublicationState;
pub use response::ApiResponse;
