use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trainers::Table)
                    .if_not_exists()
                    .col(pk_auto(Trainers::Id))
                    .col(string(Trainers::Name))
                    .col(string(Trainers::Email))
                    .col(string_len(Trainers::PhoneNumber, 15))
                    .col(string(Trainers::Location))
                    .col(
                        ColumnDef::new(Trainers::YearsOfExperience)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(string(Trainers::Availability))
                    .col(string(Trainers::Mode))
                    .col(string(Trainers::EmploymentType))
                    // JSON array of slot labels, e.g. ["10:00-12:00"]
                    .col(
                        ColumnDef::new(Trainers::TimingSlots)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(timestamp_with_time_zone(Trainers::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TrainerStacks::Table)
                    .if_not_exists()
                    .col(integer(TrainerStacks::TrainerId))
                    .col(integer(TrainerStacks::CourseId))
                    .primary_key(
                        Index::create()
                            .col(TrainerStacks::TrainerId)
                            .col(TrainerStacks::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trainer_stacks_trainer")
                            .from(TrainerStacks::Table, TrainerStacks::TrainerId)
                            .to(Trainers::Table, Trainers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trainer_stacks_course")
                            .from(TrainerStacks::Table, TrainerStacks::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_trainer_stacks_course")
                    .table(TrainerStacks::Table)
                    .col(TrainerStacks::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrainerStacks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trainers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Trainers {
    Table,
    Id,
    Name,
    Email,
    PhoneNumber,
    Location,
    YearsOfExperience,
    Availability,
    Mode,
    EmploymentType,
    TimingSlots,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TrainerStacks {
    Table,
    TrainerId,
    CourseId,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
}
