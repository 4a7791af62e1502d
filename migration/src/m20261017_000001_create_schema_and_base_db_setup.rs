use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS smart_resolve;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO smart_resolve, public;")
            .await?;

        // The service connects as this role for every query
        manager
            .get_connection()
            .execute_unprepared(r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE smart_resolve TO smart_resolve;
                    GRANT ALL ON SCHEMA smart_resolve TO smart_resolve;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA smart_resolve GRANT ALL ON TABLES TO smart_resolve;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA smart_resolve GRANT ALL ON SEQUENCES TO smart_resolve;
                END $$;
            "#)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA smart_resolve REVOKE ALL ON SEQUENCES FROM smart_resolve;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA smart_resolve REVOKE ALL ON TABLES FROM smart_resolve;
                    REVOKE ALL ON SCHEMA smart_resolve FROM smart_resolve;
                    REVOKE ALL PRIVILEGES ON DATABASE smart_resolve FROM smart_resolve;
                END $$;
            "#)
            .await?;

        // CASCADE removes every object in the schema
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS smart_resolve CASCADE;")
            .await?;

        Ok(())
    }
}
