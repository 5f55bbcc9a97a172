//! Content repository for PostgreSQL

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::db::models::{ContentColumns, ContentRow, CONTENT_COLUMNS};
use crate::db::{ContentStore, ReplaceOutcome};
use crate::error::Result;
use crate::models::{CatalogStats, ContentFilter, ContentRecord, StatusFlag};

/// Escape LIKE metacharacters so user text is matched literally
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Append the WHERE clause for `filter`
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ContentFilter) {
    qb.push(" WHERE TRUE");

    if filter.match_nothing {
        qb.push(" AND FALSE");
        return;
    }
    if let Some(active) = filter.is_active {
        qb.push(" AND is_active = ").push_bind(active);
    }
    if let Some(language) = &filter.language {
        qb.push(" AND language = ").push_bind(language.clone());
    }
    if !filter.categories.is_empty() {
        qb.push(" AND category = ANY(")
            .push_bind(filter.categories.clone())
            .push(")");
    }
    if let Some(genre) = &filter.genre {
        qb.push(" AND ").push_bind(genre.clone()).push(" = ANY(genre)");
    }
    if let Some(year) = filter.year {
        qb.push(" AND year = ").push_bind(year);
    }
    if filter.trending_only {
        qb.push(" AND is_trending");
    }
    if filter.featured_only {
        qb.push(" AND is_featured");
    }
    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR description ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
}

/// LIMIT/OFFSET are BIGINT; a page far past the end just skips everything
fn bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn into_records(rows: Vec<ContentRow>) -> Result<Vec<ContentRecord>> {
    rows.into_iter().map(ContentRecord::try_from).collect()
}

/// PostgreSQL-backed content store
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn find(&self, filter: &ContentFilter, skip: u64, limit: u64) -> Result<Vec<ContentRecord>> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM content", CONTENT_COLUMNS));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(bigint(limit))
            .push(" OFFSET ")
            .push_bind(bigint(skip));

        let rows = qb
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await?;

        into_records(rows)
    }

    async fn count(&self, filter: &ContentFilter) -> Result<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM content");
        push_filter(&mut qb, filter);

        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;

        Ok(count.max(0) as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {} FROM content WHERE id = $1",
            CONTENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContentRecord::try_from).transpose()
    }

    async fn insert(&self, record: &ContentRecord) -> Result<()> {
        let columns = ContentColumns::from_record(record)?;

        sqlx::query(
            r#"
            INSERT INTO content (
                id, title, language, category, genre, year, poster_url, description,
                file_size, download_links, total_episodes, seasons, current_season, episodes,
                is_trending, is_featured, is_active, download_count, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(record.language.as_str())
        .bind(record.category().as_str())
        .bind(&columns.genre)
        .bind(record.year)
        .bind(&record.poster_url)
        .bind(&record.description)
        .bind(&columns.file_size)
        .bind(Json(&columns.download_links))
        .bind(columns.total_episodes)
        .bind(columns.seasons)
        .bind(columns.current_season)
        .bind(Json(&columns.episodes))
        .bind(record.is_trending)
        .bind(record.is_featured)
        .bind(record.is_active)
        .bind(record.download_count)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn replace(&self, record: &ContentRecord) -> Result<ReplaceOutcome> {
        let columns = ContentColumns::from_record(record)?;

        // download_count and created_at are owned by the store, never overwritten here
        let result = sqlx::query(
            r#"
            UPDATE content SET
                title = $2, language = $3, category = $4, genre = $5, year = $6,
                poster_url = $7, description = $8, file_size = $9, download_links = $10,
                total_episodes = $11, seasons = $12, current_season = $13, episodes = $14,
                is_trending = $15, is_featured = $16, is_active = $17,
                version = version + 1
            WHERE id = $1 AND version = $18
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(record.language.as_str())
        .bind(record.category().as_str())
        .bind(&columns.genre)
        .bind(record.year)
        .bind(&record.poster_url)
        .bind(&record.description)
        .bind(&columns.file_size)
        .bind(Json(&columns.download_links))
        .bind(columns.total_episodes)
        .bind(columns.seasons)
        .bind(columns.current_season)
        .bind(Json(&columns.episodes))
        .bind(record.is_trending)
        .bind(record.is_featured)
        .bind(record.is_active)
        .bind(record.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(ReplaceOutcome::Replaced);
        }

        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM content WHERE id = $1)")
            .bind(record.id)
            .fetch_one(&self.pool)
            .await?;

        Ok(if exists {
            ReplaceOutcome::Stale
        } else {
            ReplaceOutcome::Missing
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_downloads(&self, id: Uuid) -> Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            "UPDATE content SET download_count = download_count + 1 WHERE id = $1 RETURNING download_count",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(count,)| count))
    }

    async fn toggle_flag(&self, id: Uuid, flag: StatusFlag) -> Result<Option<ContentRecord>> {
        let column = flag.column();
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "UPDATE content SET {column} = NOT {column}, version = version + 1 WHERE id = $1 RETURNING {}",
            CONTENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContentRecord::try_from).transpose()
    }

    async fn related(&self, record: &ContentRecord, limit: u64) -> Result<Vec<ContentRecord>> {
        let genres: Vec<String> = record.genre.iter().map(|g| g.as_str().to_string()).collect();

        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            SELECT {} FROM content
            WHERE is_active AND id <> $1 AND (language = $2 OR genre && $3)
            ORDER BY created_at DESC
            LIMIT $4
            "#,
            CONTENT_COLUMNS
        ))
        .bind(record.id)
        .bind(record.language.as_str())
        .bind(&genres)
        .bind(bigint(limit))
        .fetch_all(&self.pool)
        .await?;

        into_records(rows)
    }

    async fn suggest(&self, query: &str, limit: u64) -> Result<Vec<ContentRecord>> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            SELECT {} FROM content
            WHERE is_active AND title ILIKE $1 ESCAPE '\'
            ORDER BY created_at DESC
            LIMIT $2
            "#,
            CONTENT_COLUMNS
        ))
        .bind(like_pattern(query))
        .bind(bigint(limit))
        .fetch_all(&self.pool)
        .await?;

        into_records(rows)
    }

    async fn category_stats(&self) -> Result<CatalogStats> {
        let mut stats = CatalogStats::default();

        let rows = sqlx::query(
            r#"
            SELECT category, COUNT(*) AS n, COALESCE(SUM(download_count), 0)::BIGINT AS downloads
            FROM content
            WHERE is_active
            GROUP BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for row in rows {
            let n: i64 = row.try_get("n")?;
            let downloads: i64 = row.try_get("downloads")?;
            stats.total += n as u64;
            stats.total_downloads += downloads;
            stats.by_category.insert(row.try_get("category")?, n as u64);
        }

        let rows = sqlx::query(
            "SELECT language, COUNT(*) AS n FROM content WHERE is_active GROUP BY language",
        )
        .fetch_all(&self.pool)
        .await?;

        for row in rows {
            let n: i64 = row.try_get("n")?;
            stats.by_language.insert(row.try_get("language")?, n as u64);
        }

        Ok(stats)
    }

    async fn ping(&self) -> bool {
        crate::db::health_check(&self.pool).await
    }
}
