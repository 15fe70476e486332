//! 山峰目录仓储

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::traits::PeakRepositoryTrait;
use crate::error::Result;
use crate::models::{Peak, PeakQuery};

const PEAK_COLUMNS: &str = r#"
    id, name,
    mountain_range AS region,
    height_m AS elevation_m,
    difficulty, main_trail_color, lat, lng, description
"#;

/// 山峰仓储
pub struct PeakRepository {
    pool: PgPool,
}

impl PeakRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 组装列表查询：过滤条件参数化绑定，排序列来自固定白名单
    fn build_list_query(query: &PeakQuery) -> QueryBuilder<'_, Postgres> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {PEAK_COLUMNS} FROM peaks"));

        let mut has_where = false;
        let mut clause = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(if has_where { " AND " } else { " WHERE " });
            has_where = true;
        };

        if let Some(difficulty) = query.difficulty {
            clause(&mut qb);
            qb.push("difficulty = ").push_bind(difficulty);
        }
        if let Some(color) = query.main_trail_color {
            clause(&mut qb);
            qb.push("main_trail_color = ").push_bind(color);
        }
        if let Some(range) = query.mountain_range.as_deref() {
            clause(&mut qb);
            qb.push("mountain_range = ").push_bind(range);
        }
        if let Some(search) = query.search.as_deref() {
            clause(&mut qb);
            qb.push("name ILIKE ").push_bind(format!("%{}%", search));
        }

        qb.push(format!(
            " ORDER BY {} {}, id ASC",
            query.sort.column(),
            query.direction().as_sql()
        ));
        qb.push(" LIMIT ").push_bind(query.limit);
        qb.push(" OFFSET ").push_bind(query.offset());

        qb
    }

    /// 按条件分页列出山峰
    pub async fn list_peaks(&self, query: &PeakQuery) -> Result<Vec<Peak>> {
        let peaks = Self::build_list_query(query)
            .build_query_as::<Peak>()
            .fetch_all(&self.pool)
            .await?;

        Ok(peaks)
    }

    /// 获取单个山峰
    pub async fn get_peak(&self, id: i64) -> Result<Option<Peak>> {
        let peak = sqlx::query_as::<_, Peak>(&format!(
            "SELECT {PEAK_COLUMNS} FROM peaks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(peak)
    }
}

#[async_trait]
impl PeakRepositoryTrait for PeakRepository {
    async fn list_peaks(&self, query: &PeakQuery) -> Result<Vec<Peak>> {
        self.list_peaks(query).await
    }

    async fn get_peak(&self, id: i64) -> Result<Option<Peak>> {
        self.get_peak(id).await
    }
}
