//! 多步写入的补偿记录
//!
//! 批量生成课次、复制课程都由多次独立写入组成。每次写入成功后登记到
//! `WriteLedger`，中途失败时按相反顺序删除已写入的记录，再把原始错误返回给调用方。

use tracing::{error, warn};

use crate::errors::AcademyError;
use crate::storage::Storage;

/// 已写入的记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrittenRecord {
    Course(i64),
    Lesson(i64),
    ContentItem(i64),
}

#[derive(Debug)]
pub struct WriteLedger {
    org_id: i64,
    records: Vec<WrittenRecord>,
}

impl WriteLedger {
    pub fn new(org_id: i64) -> Self {
        Self {
            org_id,
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, record: WrittenRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[WrittenRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按写入的相反顺序删除全部记录
    ///
    /// 单条删除失败只记录日志并继续，返回未能删除的记录。
    pub async fn compensate(self, storage: &dyn Storage) -> Vec<WrittenRecord> {
        if self.records.is_empty() {
            return Vec::new();
        }

        warn!(
            "Compensating {} writes in org {}",
            self.records.len(),
            self.org_id
        );

        let mut leftovers = Vec::new();
        for record in self.records.into_iter().rev() {
            let result = match record {
                WrittenRecord::Course(id) => storage.delete_course(self.org_id, id).await,
                WrittenRecord::Lesson(id) => storage.delete_lesson(self.org_id, id).await,
                WrittenRecord::ContentItem(id) => {
                    storage.delete_content_item(self.org_id, id).await
                }
            };

            match result {
                Ok(true) => {}
                Ok(false) => warn!("Compensation target {:?} already gone", record),
                Err(e) => {
                    error!("Failed to compensate {:?}: {}", record, e);
                    leftovers.push(record);
                }
            }
        }

        leftovers
    }

    /// 补偿后返回原始错误
    pub async fn abort<T>(self, storage: &dyn Storage, err: AcademyError) -> Result<T, AcademyError> {
        let leftovers = self.compensate(storage).await;
        if !leftovers.is_empty() {
            error!(
                "{} writes could not be compensated after error: {}",
                leftovers.len(),
                err
            );
        }
        Err(err)
    }
}
