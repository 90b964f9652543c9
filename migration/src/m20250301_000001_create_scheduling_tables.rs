use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 外部目录 ====================
        manager
            .create_table(
                Table::create()
                    .table(Orgs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orgs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orgs::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::OrgId).big_integer().not_null())
                    .col(ColumnDef::new(Accounts::DisplayName).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::Roles)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Accounts::Table, Accounts::OrgId)
                            .to(Orgs::Table, Orgs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AcademicSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcademicSubjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AcademicSubjects::OrgId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AcademicSubjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(AcademicSubjects::PublicationState)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AcademicSubjects::Table, AcademicSubjects::OrgId)
                            .to(Orgs::Table, Orgs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrgOffices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrgOffices::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrgOffices::OrgId).big_integer().not_null())
                    .col(ColumnDef::new(OrgOffices::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrgOffices::Table, OrgOffices::OrgId)
                            .to(Orgs::Table, Orgs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 课程 ====================
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::OrgId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::Code).string().not_null())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(
                        ColumnDef::new(Courses::AcademicSubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Courses::OrgOfficeId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::LecturerIds).text().not_null())
                    .col(ColumnDef::new(Courses::StudentIds).text().not_null())
                    .col(ColumnDef::new(Courses::StartDate).string().not_null())
                    .col(
                        ColumnDef::new(Courses::TotalNumberOfLessons)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Courses::WeeklyPattern).text().not_null())
                    .col(ColumnDef::new(Courses::TuitionFee).double().null())
                    .col(ColumnDef::new(Courses::PublicationState).string().not_null())
                    .col(ColumnDef::new(Courses::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::OrgId)
                            .to(Orgs::Table, Orgs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 课次 ====================
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lessons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lessons::OrgId).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::StartTime).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::EndTime).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::Description).text().null())
                    .col(ColumnDef::new(Lessons::PublicationState).string().not_null())
                    .col(
                        ColumnDef::new(Lessons::AbsentStudentIds)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Lessons::LecturerComment).text().null())
                    .col(ColumnDef::new(Lessons::Content).text().not_null())
                    .col(ColumnDef::new(Lessons::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Lessons::Table, Lessons::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 教学内容 ====================
        manager
            .create_table(
                Table::create()
                    .table(ContentItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentItems::OrgId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ContentItems::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContentItems::Kind).string().not_null())
                    .col(ColumnDef::new(ContentItems::Title).string().not_null())
                    .col(ColumnDef::new(ContentItems::Description).text().null())
                    .col(
                        ColumnDef::new(ContentItems::PublicationState)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentItems::Attributes)
                            .text()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(ContentItems::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentItems::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ContentItems::Table, ContentItems::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        // 课程代码在机构内唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_org_code")
                    .table(Courses::Table)
                    .col(Courses::OrgId)
                    .col(Courses::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 冲突检查按课程扫描课次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_course_start")
                    .table(Lessons::Table)
                    .col(Lessons::CourseId)
                    .col(Lessons::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_content_items_course")
                    .table(ContentItems::Table)
                    .col(ContentItems::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ContentItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrgOffices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademicSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orgs::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Orgs {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    OrgId,
    DisplayName,
    Roles,
}

#[derive(DeriveIden)]
enum AcademicSubjects {
    Table,
    Id,
    OrgId,
    Name,
    PublicationState,
}

#[derive(DeriveIden)]
enum OrgOffices {
    Table,
    Id,
    OrgId,
    Name,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    OrgId,
    Code,
    Name,
    Description,
    AcademicSubjectId,
    OrgOfficeId,
    LecturerIds,
    StudentIds,
    StartDate,
    TotalNumberOfLessons,
    WeeklyPattern,
    TuitionFee,
    PublicationState,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lessons {
    Table,
    Id,
    OrgId,
    CourseId,
    StartTime,
    EndTime,
    Description,
    PublicationState,
    AbsentStudentIds,
    LecturerComment,
    Content,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContentItems {
    Table,
    Id,
    OrgId,
    CourseId,
    Kind,
    Title,
    Description,
    PublicationState,
    Attributes,
    CreatedBy,
    CreatedAt,
}
