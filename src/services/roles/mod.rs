//! 角色与授权

mod authority;
mod catalog;

pub use authority::RoleAuthority;
pub use catalog::RoleCatalog;
