use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Todo: index on completed for status filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_todo_completed")
                    .table(Todo::Table)
                    .col(Todo::Completed)
                    .to_owned(),
            )
            .await?;

        // Todo: index on deadline_at for window filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_todo_deadline")
                    .table(Todo::Table)
                    .col(Todo::DeadlineAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_todo_completed").table(Todo::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_todo_deadline").table(Todo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Todo { Table, Completed, DeadlineAt }
