use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(pk_auto(Companies::Id))
                    .col(string_len_uniq(Companies::CompanyCode, 20))
                    .col(date(Companies::Date))
                    .col(string_len(Companies::Portal, 100))
                    .col(string_null(Companies::OtherPortal))
                    .col(string(Companies::CompanyName))
                    .col(string(Companies::Spoc))
                    .col(string_len(Companies::Mobile, 15))
                    .col(string(Companies::Email))
                    .col(string(Companies::Location))
                    .col(string_null(Companies::OtherLocation))
                    .col(
                        ColumnDef::new(Companies::Progress)
                            .string_len(50)
                            .not_null()
                            .default("resume_shared"),
                    )
                    .col(integer_null(Companies::CreatedBy))
                    .col(timestamp_with_time_zone(Companies::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_created_by")
                            .from(Companies::Table, Companies::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Interviews::Table)
                    .if_not_exists()
                    .col(pk_auto(Interviews::Id))
                    .col(
                        ColumnDef::new(Interviews::Venue)
                            .string_len(20)
                            .not_null()
                            .default("offline"),
                    )
                    .col(integer(Interviews::CompanyId))
                    .col(string(Interviews::ApplyingRole))
                    .col(string_len(Interviews::InterviewRound, 50))
                    .col(
                        ColumnDef::new(Interviews::RoundNumber)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(integer_null(Interviews::ParentInterviewId))
                    .col(string(Interviews::Location))
                    .col(string_null(Interviews::OtherLocation))
                    .col(date(Interviews::InterviewDate))
                    .col(time(Interviews::InterviewTime))
                    .col(integer_null(Interviews::CreatedBy))
                    .col(timestamp_with_time_zone(Interviews::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interviews_company")
                            .from(Interviews::Table, Interviews::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interviews_parent")
                            .from(Interviews::Table, Interviews::ParentInterviewId)
                            .to(Interviews::Table, Interviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interviews_created_by")
                            .from(Interviews::Table, Interviews::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_interviews_company")
                    .table(Interviews::Table)
                    .col(Interviews::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InterviewCourses::Table)
                    .if_not_exists()
                    .col(integer(InterviewCourses::InterviewId))
                    .col(integer(InterviewCourses::CourseId))
                    .primary_key(
                        Index::create()
                            .col(InterviewCourses::InterviewId)
                            .col(InterviewCourses::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interview_courses_interview")
                            .from(InterviewCourses::Table, InterviewCourses::InterviewId)
                            .to(Interviews::Table, Interviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interview_courses_course")
                            .from(InterviewCourses::Table, InterviewCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InterviewStudents::Table)
                    .if_not_exists()
                    .col(pk_auto(InterviewStudents::Id))
                    .col(integer(InterviewStudents::InterviewId))
                    .col(integer(InterviewStudents::StudentId))
                    .col(
                        ColumnDef::new(InterviewStudents::Status)
                            .string_len(20)
                            .not_null()
                            .default("in_progress"),
                    )
                    .col(text_null(InterviewStudents::Reason))
                    .col(string_null(InterviewStudents::OfferLetter))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interview_students_interview")
                            .from(InterviewStudents::Table, InterviewStudents::InterviewId)
                            .to(Interviews::Table, Interviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interview_students_student")
                            .from(InterviewStudents::Table, InterviewStudents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_interview_students_interview")
                    .table(InterviewStudents::Table)
                    .col(InterviewStudents::InterviewId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InterviewStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InterviewCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Interviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    CompanyCode,
    Date,
    Portal,
    OtherPortal,
    CompanyName,
    Spoc,
    Mobile,
    Email,
    Location,
    OtherLocation,
    Progress,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Interviews {
    Table,
    Id,
    Venue,
    CompanyId,
    ApplyingRole,
    InterviewRound,
    RoundNumber,
    ParentInterviewId,
    Location,
    OtherLocation,
    InterviewDate,
    InterviewTime,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum InterviewCourses {
    Table,
    InterviewId,
    CourseId,
}

#[derive(DeriveIden)]
enum InterviewStudents {
    Table,
    Id,
    InterviewId,
    StudentId,
    Status,
    Reason,
    OfferLetter,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}
