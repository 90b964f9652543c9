use std::sync::Arc;

use tracing::debug;

use super::RoleCatalog;
use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::models::roles::entities::RoleName;
use crate::storage::Storage;

/// 基于优先级的角色授权
///
/// 优先级数值越小越资深，只有严格更资深才能管理对方。
#[derive(Clone)]
pub struct RoleAuthority {
    catalog: Arc<RoleCatalog>,
}

impl RoleAuthority {
    pub fn new(catalog: RoleCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// actor 角色集合是否严格资深于目标角色集合
    pub fn outranks<A: AsRef<str>, T: AsRef<str>>(&self, actor_roles: &[A], target_roles: &[T]) -> bool {
        match (
            self.catalog.best_priority(actor_roles),
            self.catalog.best_priority(target_roles),
        ) {
            (Some(actor), Some(target)) => actor < target,
            _ => false,
        }
    }

    /// 角色集合中任一角色拥有该权限
    pub fn has_permission<S: AsRef<str>>(&self, roles: &[S], permission: &str) -> bool {
        roles.iter().any(|role| {
            self.catalog
                .permissions(role.as_ref())
                .is_some_and(|set| set.contains(permission))
        })
    }

    /// actor 能否管理持有 target_roles 的对象
    pub async fn can_manage<T: AsRef<str> + Sync>(
        &self,
        storage: &dyn Storage,
        org_id: i64,
        actor_id: i64,
        target_roles: &[T],
    ) -> Result<bool> {
        let Some(actor) = storage.get_account(org_id, actor_id).await? else {
            debug!("Actor {} not found in org {}", actor_id, org_id);
            return Ok(false);
        };

        Ok(self.outranks(actor.roles.as_slice(), target_roles))
    }

    /// actor 能否管理课程：比讲师更资深，或者是该课程的讲师
    pub async fn can_manage_course(
        &self,
        storage: &dyn Storage,
        org_id: i64,
        actor_id: i64,
        course: &Course,
    ) -> Result<bool> {
        let Some(actor) = storage.get_account(org_id, actor_id).await? else {
            debug!("Actor {} not found in org {}", actor_id, org_id);
            return Ok(false);
        };

        if course.has_lecturer(actor.id) {
            return Ok(true);
        }

        Ok(self.outranks(actor.roles.as_slice(), &[RoleName::LECTURER]))
    }

    /// actor 是否拥有某项权限
    pub async fn actor_has_permission(
        &self,
        storage: &dyn Storage,
        org_id: i64,
        actor_id: i64,
        permission: &str,
    ) -> Result<bool> {
        Ok(storage
            .get_account(org_id, actor_id)
            .await?
            .is_some_and(|actor| self.has_permission(actor.roles.as_slice(), permission)))
    }
}
