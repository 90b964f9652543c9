//! 角色目录
//!
//! 角色优先级与权限集合在构建时一次性确定，`includes` 在此展开，
//! 运行时只做集合成员判断。

use std::collections::{HashMap, HashSet};

use crate::errors::{AcademyError, Result};
use crate::models::roles::entities::{Permission, RoleDefinition, RoleName};

#[derive(Debug, Clone)]
struct CatalogEntry {
    priority: u32,
    permissions: HashSet<String>,
}

#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: HashMap<String, CatalogEntry>,
}

impl RoleCatalog {
    /// 内置角色定义
    pub fn builtin_definitions() -> Vec<RoleDefinition> {
        let role = |name: &str, priority: u32, permissions: &[&str], includes: &[&str]| {
            RoleDefinition {
                name: name.to_string(),
                priority,
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
                includes: includes.iter().map(|r| r.to_string()).collect(),
            }
        };

        vec![
            role(RoleName::OWNER, 1, &[], &[RoleName::ADMIN]),
            role(RoleName::ADMIN, 2, &[], &[RoleName::STAFF]),
            role(
                RoleName::STAFF,
                3,
                &[Permission::COURSE_CREATE, Permission::COURSE_CLONE],
                &[],
            ),
            role(RoleName::LECTURER, 4, &[], &[]),
            role(RoleName::STUDENT, 4, &[], &[]),
        ]
    }

    /// 从角色定义构建目录，展开 `includes`
    ///
    /// 重名角色、未知的 `includes`、循环包含以及缺少 `lecturer` 角色都会被拒绝。
    /// 课次管理按讲师身份授权，目录里没有 `lecturer` 时讲师规则永远不成立。
    pub fn from_definitions(definitions: &[RoleDefinition]) -> Result<Self> {
        let mut by_name: HashMap<&str, &RoleDefinition> = HashMap::new();
        for definition in definitions {
            if by_name.insert(definition.name.as_str(), definition).is_some() {
                return Err(AcademyError::validation(format!(
                    "Duplicate role definition: {}",
                    definition.name
                )));
            }
        }

        let mut roles = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            let mut permissions = HashSet::new();
            let mut visiting = Vec::new();
            collect_permissions(definition, &by_name, &mut visiting, &mut permissions)?;

            roles.insert(
                definition.name.clone(),
                CatalogEntry {
                    priority: definition.priority,
                    permissions,
                },
            );
        }

        if !roles.contains_key(RoleName::LECTURER) {
            return Err(AcademyError::validation(format!(
                "Role catalog must define the {} role",
                RoleName::LECTURER
            )));
        }

        Ok(Self { roles })
    }

    pub fn priority(&self, role: &str) -> Option<u32> {
        self.roles.get(role).map(|entry| entry.priority)
    }

    /// 角色集合中最资深（数值最小）的优先级，未知角色忽略
    pub fn best_priority<S: AsRef<str>>(&self, roles: &[S]) -> Option<u32> {
        roles
            .iter()
            .filter_map(|role| self.priority(role.as_ref()))
            .min()
    }

    pub fn permissions(&self, role: &str) -> Option<&HashSet<String>> {
        self.roles.get(role).map(|entry| &entry.permissions)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        // 内置定义无环且引用完整；万一展开失败则退化为空目录（拒绝一切管理操作）
        Self::from_definitions(&Self::builtin_definitions()).unwrap_or_else(|_| Self {
            roles: HashMap::new(),
        })
    }
}

fn collect_permissions<'a>(
    definition: &'a RoleDefinition,
    by_name: &HashMap<&str, &'a RoleDefinition>,
    visiting: &mut Vec<&'a str>,
    permissions: &mut HashSet<String>,
) -> Result<()> {
    if visiting.contains(&definition.name.as_str()) {
        return Err(AcademyError::validation(format!(
            "Cyclic role includes: {} -> {}",
            visiting.join(" -> "),
            definition.name
        )));
    }
    visiting.push(definition.name.as_str());

    permissions.extend(definition.permissions.iter().cloned());
    for included in &definition.includes {
        let child = by_name.get(included.as_str()).ok_or_else(|| {
            AcademyError::validation(format!(
                "Role {} includes unknown role {}",
                definition.name, included
            ))
        })?;
        collect_permissions(child, by_name, visiting, permissions)?;
    }

    visiting.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str, priority: u32, permissions: &[&str], includes: &[&str]) -> RoleDefinition {
        RoleDefinition {
            name: name.to_string(),
            priority,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            includes: includes.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_hierarchy() {
        let catalog = RoleCatalog::default();
        assert_eq!(catalog.priority(RoleName::OWNER), Some(1));
        assert_eq!(catalog.priority(RoleName::ADMIN), Some(2));
        assert_eq!(catalog.priority(RoleName::STAFF), Some(3));
        assert_eq!(catalog.priority(RoleName::LECTURER), Some(4));
        assert_eq!(catalog.priority(RoleName::STUDENT), Some(4));
    }

    #[test]
    fn test_includes_are_flattened() {
        let catalog = RoleCatalog::default();
        let owner = catalog.permissions(RoleName::OWNER).unwrap();
        assert!(owner.contains(Permission::COURSE_CREATE));
        assert!(owner.contains(Permission::COURSE_CLONE));
        assert!(catalog.permissions(RoleName::LECTURER).unwrap().is_empty());
    }

    #[test]
    fn test_best_priority_ignores_unknown_roles() {
        let catalog = RoleCatalog::default();
        assert_eq!(catalog.best_priority(&["ghost", "lecturer", "staff"]), Some(3));
        assert_eq!(catalog.best_priority(&["ghost"]), None);
        assert_eq!(catalog.best_priority::<&str>(&[]), None);
    }

    #[test]
    fn test_rejects_unknown_include() {
        let result = RoleCatalog::from_definitions(&[definition("admin", 2, &[], &["root"])]);
        assert!(matches!(result, Err(AcademyError::Validation(_))));
    }

    #[test]
    fn test_rejects_cyclic_include() {
        let result = RoleCatalog::from_definitions(&[
            definition("a", 1, &[], &["b"]),
            definition("b", 2, &[], &["a"]),
        ]);
        assert!(matches!(result, Err(AcademyError::Validation(_))));
    }

    #[test]
    fn test_rejects_duplicate_role() {
        let result = RoleCatalog::from_definitions(&[
            definition("admin", 2, &[], &[]),
            definition("admin", 3, &[], &[]),
        ]);
        assert!(matches!(result, Err(AcademyError::Validation(_))));
    }

    #[test]
    fn test_diamond_include_is_not_a_cycle() {
        let catalog = RoleCatalog::from_definitions(&[
            definition("top", 1, &[], &["left", "right"]),
            definition("left", 2, &["l"], &["base"]),
            definition("right", 2, &["r"], &["base"]),
            definition("base", 3, &["b"], &[]),
            definition("lecturer", 4, &[], &[]),
        ])
        .unwrap();
        let top = catalog.permissions("top").unwrap();
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn test_rejects_catalog_without_lecturer() {
        let result = RoleCatalog::from_definitions(&[
            definition("owner", 1, &[], &["staff"]),
            definition("staff", 3, &["course.create"], &[]),
            definition("instructor", 4, &[], &[]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            AcademyError::validation("Role catalog must define the lecturer role")
        );
    }
}
