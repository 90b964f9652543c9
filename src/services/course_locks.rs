//! 课程级写锁
//!
//! 同一课程的课次创建、修改、批量生成串行执行，
//! 保证冲突检查与写入之间不会插入其他写操作。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// (机构 ID, 课程 ID)
type CourseKey = (i64, i64);

/// 课程锁注册表
#[derive(Default)]
pub struct CourseLocks {
    locks: DashMap<CourseKey, Arc<Mutex<()>>>,
}

impl CourseLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取课程写锁，持有期间同一课程的其他写操作等待
    pub async fn acquire(&self, org_id: i64, course_id: i64) -> CourseGuard<'_> {
        let lock = self
            .locks
            .entry((org_id, course_id))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        CourseGuard {
            guard: Some(lock.lock_owned().await),
            key: (org_id, course_id),
            registry: self,
        }
    }

    /// 当前登记的课程锁数量
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn release(&self, key: CourseKey) {
        // 只有注册表自身还持有引用时才移除
        self.locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// 课程写锁守卫，释放时清理空闲的锁
pub struct CourseGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    key: CourseKey,
    registry: &'a CourseLocks,
}

impl Drop for CourseGuard<'_> {
    fn drop(&mut self) {
        // 先释放互斥锁（连同其持有的 Arc），再判断是否可以移除
        self.guard.take();
        self.registry.release(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_course_is_serialized() {
        let locks = Arc::new(CourseLocks::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let guard = locks.acquire(1, 10).await;

        let waiter = {
            let locks = locks.clone();
            let order = order.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(1, 10).await;
                order.lock().await.push("second");
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        order.lock().await.push("first");
        drop(guard);

        waiter.await.unwrap();
        assert_eq!(*order.lock().await, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_different_courses_do_not_block() {
        let locks = CourseLocks::new();
        let _a = locks.acquire(1, 10).await;
        let _b = tokio::time::timeout(Duration::from_millis(50), locks.acquire(1, 11))
            .await
            .expect("different course should not wait");
        let _c = tokio::time::timeout(Duration::from_millis(50), locks.acquire(2, 10))
            .await
            .expect("same course id in another org should not wait");
        assert_eq!(locks.len(), 3);
    }

    #[tokio::test]
    async fn test_idle_locks_are_removed() {
        let locks = CourseLocks::new();
        {
            let _guard = locks.acquire(1, 10).await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }
}
