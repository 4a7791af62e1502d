use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE smart_resolve.sentiment AS ENUM (
                    'positive',
                    'neutral',
                    'negative'
                )",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TYPE smart_resolve.sentiment OWNER TO smart_resolve")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE smart_resolve.summary_language AS ENUM (
                    'en',
                    'es',
                    'fr',
                    'de',
                    'pt',
                    'zh'
                )",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TYPE smart_resolve.summary_language OWNER TO smart_resolve",
            )
            .await?;

        let create_summaries_sql = r#"
            CREATE TABLE IF NOT EXISTS smart_resolve.summaries (
                id UUID PRIMARY KEY,
                complaint_id VARCHAR(255) NOT NULL,
                transcript TEXT NOT NULL,
                language smart_resolve.summary_language NOT NULL DEFAULT 'en',
                executive TEXT NOT NULL,
                detailed TEXT NOT NULL,
                key_metrics JSONB NOT NULL,
                sentiment smart_resolve.sentiment NOT NULL,
                confidence_score DOUBLE PRECISION NOT NULL,
                processing_time_ms BIGINT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                expires_at TIMESTAMPTZ NOT NULL DEFAULT NOW() + INTERVAL '90 days'
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_summaries_sql)
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE smart_resolve.summaries OWNER TO smart_resolve")
            .await?;

        // Secondary index backing the per-complaint listing, newest first
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_summaries_complaint_created
                 ON smart_resolve.summaries(complaint_id, created_at DESC)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_summaries_expires_at
                 ON smart_resolve.summaries(expires_at)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS smart_resolve.summaries")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS smart_resolve.summary_language")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS smart_resolve.sentiment")
            .await?;

        Ok(())
    }
}
