use serde::{Deserialize, Serialize};

// 角色定义（来自配置）
//
// # 优先级
// 数值越小越资深：owner(1) < admin(2) < staff(3) < lecturer(4) ≈ student(4)
//
// # 权限继承
// `includes` 只在构建角色目录时展开一次，运行时按集合成员判断。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    pub priority: u32,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
}

// 内置角色名称
pub struct RoleName;

impl RoleName {
    pub const OWNER: &'static str = "owner";
    pub const ADMIN: &'static str = "admin";
    pub const STAFF: &'static str = "staff";
    pub const LECTURER: &'static str = "lecturer";
    pub const STUDENT: &'static str = "student";
}

// 内置权限
pub struct Permission;

impl Permission {
    pub const COURSE_CREATE: &'static str = "course.create";
    pub const COURSE_CLONE: &'static str = "course.clone";
}
