//! 仓储层数据库集成测试
//!
//! 需要可用的 PostgreSQL（TEST_DATABASE_URL），默认忽略：
//! `cargo test -p crownhike-core -- --ignored`

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use crownhike_core::{
    AscentRepository, AwardTimeZone, BadgeEngine, BadgeRepository, CoreError, HikeRepository,
    MarkPeak, NewHike, NewUser, PeakQuery, PeakRepository, RawPoint, TrackPoint, UserRepository,
    sanitize_track,
};
use crownhike_shared::database::Database;
use crownhike_shared::test_utils::{test_database_config, unique_email};

async fn setup() -> PgPool {
    let db = Database::connect(&test_database_config()).await.unwrap();
    db.run_migrations().await.unwrap();
    db.pool().clone()
}

async fn create_user(pool: &PgPool) -> i64 {
    UserRepository::new(pool.clone())
        .create_user(&NewUser {
            username: "Integration Hiker".to_string(),
            email: unique_email(),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .unwrap()
}

async fn peak_ids(pool: &PgPool, n: usize) -> Vec<i64> {
    let peaks = PeakRepository::new(pool.clone())
        .list_peaks(&PeakQuery::default().normalized())
        .await
        .unwrap();
    assert!(peaks.len() >= n, "seed catalogue has too few peaks");
    peaks.into_iter().take(n).map(|p| p.id).collect()
}

fn new_hike(peak_id: i64) -> NewHike {
    NewHike {
        peak_id,
        started_at: Utc::now(),
        duration_sec: 3600,
        track_distance_km: 4.2,
        straight_distance_km: None,
    }
}

async fn count(pool: &PgPool, sql: &str, id: i64) -> i64 {
    sqlx::query_scalar(sql).bind(id).fetch_one(pool).await.unwrap()
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_duplicate_ascent_rejected() {
    let pool = setup().await;
    let user_id = create_user(&pool).await;
    let peak_id = peak_ids(&pool, 1).await[0];
    let ascents = AscentRepository::new(pool.clone());

    ascents
        .insert_ascent(user_id, peak_id, &MarkPeak::default())
        .await
        .unwrap();
    let err = ascents
        .insert_ascent(user_id, peak_id, &MarkPeak::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::PeakAlreadyClimbed(id) if id == peak_id));

    let rows = count(&pool, "SELECT COUNT(*) FROM user_peaks WHERE user_id = $1", user_id).await;
    assert_eq!(rows, 1);
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_hike_keeps_only_finite_points() {
    let pool = setup().await;
    let user_id = create_user(&pool).await;
    let peak_id = peak_ids(&pool, 1).await[0];
    let hikes = HikeRepository::new(pool.clone());

    let raw = [
        RawPoint { lat: 49.20, lng: 19.90 },
        RawPoint { lat: f64::NAN, lng: 19.91 },
        RawPoint { lat: 49.22, lng: 19.92 },
    ];
    let hike_id = hikes
        .create_hike(user_id, &new_hike(peak_id), &sanitize_track(&raw))
        .await
        .unwrap();

    let track = hikes.list_track(hike_id).await.unwrap();
    assert_eq!(track.iter().map(|p| p.seq).collect::<Vec<_>>(), vec![0, 2]);
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_hike_keeps_out_of_range_finite_points() {
    let pool = setup().await;
    let user_id = create_user(&pool).await;
    let peak_id = peak_ids(&pool, 1).await[0];
    let hikes = HikeRepository::new(pool.clone());

    let raw = [
        RawPoint { lat: 49.2, lng: 19.9 },
        RawPoint { lat: f64::NAN, lng: 19.9 },
        RawPoint { lat: 95.0, lng: 19.9 },
    ];
    let hike_id = hikes
        .create_hike(user_id, &new_hike(peak_id), &sanitize_track(&raw))
        .await
        .unwrap();

    let track = hikes.list_track(hike_id).await.unwrap();
    assert_eq!(track.iter().map(|p| p.seq).collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(track[1].lat, 95.0);
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_hike_insert_is_atomic() {
    let pool = setup().await;
    let user_id = create_user(&pool).await;
    let peak_id = peak_ids(&pool, 1).await[0];
    let hikes = HikeRepository::new(pool.clone());

    // 重复的 seq 违反 (hike_id, seq) 唯一约束，此时记录头已写入
    let track = [
        TrackPoint { seq: 0, lat: 49.20, lng: 19.90 },
        TrackPoint { seq: 0, lat: 49.21, lng: 19.91 },
    ];
    let result = hikes.create_hike(user_id, &new_hike(peak_id), &track).await;
    assert!(result.is_err());

    let rows = count(&pool, "SELECT COUNT(*) FROM hikes WHERE user_id = $1", user_id).await;
    assert_eq!(rows, 0);
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_threshold_awards_are_idempotent() {
    let pool = setup().await;
    let user_id = create_user(&pool).await;
    let ascents = Arc::new(AscentRepository::new(pool.clone()));
    let engine = BadgeEngine::new(
        Arc::new(BadgeRepository::new(pool.clone())),
        ascents.clone(),
        AwardTimeZone::System,
    );

    for peak_id in peak_ids(&pool, 3).await {
        ascents
            .insert_ascent(user_id, peak_id, &MarkPeak::default())
            .await
            .unwrap();
    }

    let first = engine.award_threshold_badges(user_id).await.unwrap();
    let mut codes: Vec<_> = first.iter().map(|b| b.code.as_str()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["TATRA_1", "TATRA_3"]);

    let second = engine.award_threshold_badges(user_id).await.unwrap();
    assert!(second.is_empty());

    let held = count(&pool, "SELECT COUNT(*) FROM user_badges WHERE user_id = $1", user_id).await;
    assert_eq!(held, 2);
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_named_award_only_once() {
    let pool = setup().await;
    let user_id = create_user(&pool).await;
    let engine = BadgeEngine::new(
        Arc::new(BadgeRepository::new(pool.clone())),
        Arc::new(AscentRepository::new(pool.clone())),
        AwardTimeZone::System,
    );

    assert!(engine.award_by_code(user_id, "SAFETY_CARD_FILLED").await.unwrap());
    assert!(!engine.award_by_code(user_id, "SAFETY_CARD_FILLED").await.unwrap());
}

#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_delete_user_removes_dependents() {
    let pool = setup().await;
    let user_id = create_user(&pool).await;
    let peak_id = peak_ids(&pool, 1).await[0];

    AscentRepository::new(pool.clone())
        .insert_ascent(user_id, peak_id, &MarkPeak::default())
        .await
        .unwrap();
    HikeRepository::new(pool.clone())
        .create_hike(
            user_id,
            &new_hike(peak_id),
            &sanitize_track(&[RawPoint { lat: 49.2, lng: 19.9 }]),
        )
        .await
        .unwrap();

    let users = UserRepository::new(pool.clone());
    assert!(users.delete_user(user_id).await.unwrap());
    assert!(!users.delete_user(user_id).await.unwrap());

    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM user_peaks WHERE user_id = $1", user_id).await,
        0
    );
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM hikes WHERE user_id = $1", user_id).await,
        0
    );
}
