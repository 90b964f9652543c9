//! 预导入模块，方便使用

pub use super::academic_subjects::{
    ActiveModel as AcademicSubjectActiveModel, Entity as AcademicSubjects,
    Model as AcademicSubjectModel,
};
pub use super::accounts::{
    ActiveModel as AccountActiveModel, Entity as Accounts, Model as AccountModel,
};
pub use super::content_items::{
    ActiveModel as ContentItemActiveModel, Entity as ContentItems, Model as ContentItemModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::lessons::{ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel};
pub use super::org_offices::{
    ActiveModel as OrgOfficeActiveModel, Entity as OrgOffices, Model as OrgOfficeModel,
};
pub use super::orgs::{ActiveModel as OrgActiveModel, Entity as Orgs, Model as OrgModel};
