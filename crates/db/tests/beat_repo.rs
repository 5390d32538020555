//! Integration tests for the beat, comment and vocal order repositories.
//!
//! Exercises the repository layer against a real database:
//! - Insert with duration record
//! - Ownership-gated update and delete
//! - Closed toggling
//! - Category overlap filtering and ordering
//! - Cascade from beats to comments

use sqlx::PgPool;
use track1_db::models::account::CreateAccount;
use track1_db::models::beat::{CreateBeat, UpdateBeat};
use track1_db::models::comment::CreateComment;
use track1_db::models::vocal_order::{CreateVocalOrder, ORDER_TABLE_COMMENT};
use track1_db::repositories::{BeatRepo, CommentRepo, ProducerRepo, VocalOrderRepo, VocalRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn account(login_id: &str) -> CreateAccount {
    CreateAccount {
        login_id: login_id.to_string(),
        name: format!("{login_id} name"),
        profile_image: format!("https://img.example/{login_id}.png"),
    }
}

fn new_beat(producer_id: i64, title: &str, category: &[&str]) -> CreateBeat {
    CreateBeat {
        producer_id,
        title: title.to_string(),
        category: category.iter().map(|c| c.to_string()).collect(),
        introduce: Some("intro".to_string()),
        keyword: vec!["chill".to_string()],
        beat_file: format!("https://beats.example/{title}.wav"),
        beat_image: format!("https://beats.example/{title}.png"),
        duration: 90.5,
    }
}

async fn seed_producer(pool: &PgPool, login_id: &str) -> i64 {
    ProducerRepo::create(pool, &account(login_id)).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Beats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_beat_stores_duration_and_starts_open(pool: PgPool) {
    let producer_id = seed_producer(&pool, "p1").await;

    let beat = BeatRepo::create(&pool, &new_beat(producer_id, "first", &["hiphop"]))
        .await
        .unwrap()
        .expect("insert should return the row");

    assert!(!beat.is_closed);
    assert_eq!(beat.category, vec!["hiphop"]);
    assert_eq!(
        BeatRepo::find_duration(&pool, beat.id).await.unwrap(),
        Some(90.5)
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn toggle_closed_flips_each_time(pool: PgPool) {
    let producer_id = seed_producer(&pool, "p1").await;
    let beat = BeatRepo::create(&pool, &new_beat(producer_id, "b", &["pop"]))
        .await
        .unwrap()
        .unwrap();

    let once = BeatRepo::toggle_closed(&pool, beat.id).await.unwrap().unwrap();
    assert!(once.is_closed);
    let twice = BeatRepo::toggle_closed(&pool, beat.id).await.unwrap().unwrap();
    assert!(!twice.is_closed);

    assert!(BeatRepo::toggle_closed(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn update_owned_requires_matching_producer(pool: PgPool) {
    let owner = seed_producer(&pool, "owner").await;
    let other = seed_producer(&pool, "other").await;
    let beat = BeatRepo::create(&pool, &new_beat(owner, "b", &["pop"]))
        .await
        .unwrap()
        .unwrap();

    let patch = UpdateBeat {
        title: Some("renamed".to_string()),
        ..Default::default()
    };

    assert!(BeatRepo::update_owned(&pool, beat.id, other, &patch)
        .await
        .unwrap()
        .is_none());

    let updated = BeatRepo::update_owned(&pool, beat.id, owner, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.keyword, beat.keyword);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_owned_ignores_other_producers(pool: PgPool) {
    let owner = seed_producer(&pool, "owner").await;
    let other = seed_producer(&pool, "other").await;
    let beat = BeatRepo::create(&pool, &new_beat(owner, "b", &["pop"]))
        .await
        .unwrap()
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(BeatRepo::delete_owned(&mut conn, beat.id, other)
        .await
        .unwrap()
        .is_none());
    assert!(BeatRepo::exists(&pool, beat.id).await.unwrap());

    let deleted = BeatRepo::delete_owned(&mut conn, beat.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deleted.beat_file, beat.beat_file);
    assert!(!BeatRepo::exists(&pool, beat.id).await.unwrap());
    assert!(BeatRepo::find_duration(&pool, beat.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn category_filter_uses_overlap_and_skips_closed(pool: PgPool) {
    let producer_id = seed_producer(&pool, "p1").await;
    let pop = BeatRepo::create(&pool, &new_beat(producer_id, "pop", &["pop", "ballad"]))
        .await
        .unwrap()
        .unwrap();
    let rock = BeatRepo::create(&pool, &new_beat(producer_id, "rock", &["rock"]))
        .await
        .unwrap()
        .unwrap();
    let closed = BeatRepo::create(&pool, &new_beat(producer_id, "closed", &["ballad"]))
        .await
        .unwrap()
        .unwrap();
    BeatRepo::toggle_closed(&pool, closed.id).await.unwrap();

    let filter = vec!["ballad".to_string(), "jazz".to_string()];
    let rows = BeatRepo::list_open_by_categories(&pool, &filter, 10, 0)
        .await
        .unwrap();

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![pop.id]);
    assert!(!ids.contains(&rock.id));
    assert_eq!(rows[0].producer_name, "p1 name");
    assert_eq!(rows[0].duration, Some(90.5));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_summaries_orders_newest_first(pool: PgPool) {
    let producer_id = seed_producer(&pool, "p1").await;
    let mut created = Vec::new();
    for i in 0..3 {
        let beat = BeatRepo::create(&pool, &new_beat(producer_id, &format!("b{i}"), &["pop"]))
            .await
            .unwrap()
            .unwrap();
        created.push(beat.id);
    }

    let rows = BeatRepo::list_summaries(&pool, 10, 0).await.unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    created.reverse();
    assert_eq!(ids, created);

    let second_page = BeatRepo::list_summaries(&pool, 2, 2).await.unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].id, created[2]);
}

// ---------------------------------------------------------------------------
// Comments and vocal orders
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn comments_cascade_with_their_beat(pool: PgPool) {
    let producer_id = seed_producer(&pool, "p1").await;
    let vocal = VocalRepo::create(&pool, &account("v1")).await.unwrap();
    let beat = BeatRepo::create(&pool, &new_beat(producer_id, "b", &["pop"]))
        .await
        .unwrap()
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let comment = CommentRepo::create(
        &mut tx,
        &CreateComment {
            beat_id: beat.id,
            vocal_id: vocal.id,
            comment_file: "https://wav.example/c.wav".to_string(),
            content: Some("nice".to_string()),
            duration: 12.0,
        },
    )
    .await
    .unwrap()
    .unwrap();
    VocalOrderRepo::create(
        &mut tx,
        &CreateVocalOrder {
            vocal_id: vocal.id,
            order_standard_table_name: ORDER_TABLE_COMMENT.to_string(),
            order_standard_table_id: comment.id,
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    let listed = CommentRepo::list_for_beat(&pool, beat.id, 10, 0).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].vocal_name, "v1 name");
    assert_eq!(listed[0].duration, Some(12.0));

    let orders = VocalOrderRepo::list_for_vocal(&pool, vocal.id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_standard_table_id, comment.id);

    let mut conn = pool.acquire().await.unwrap();
    BeatRepo::delete_owned(&mut conn, beat.id, producer_id)
        .await
        .unwrap()
        .unwrap();
    assert!(CommentRepo::find_by_id(&pool, comment.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn comment_delete_requires_matching_vocal(pool: PgPool) {
    let producer_id = seed_producer(&pool, "p1").await;
    let owner = VocalRepo::create(&pool, &account("v1")).await.unwrap();
    let other = VocalRepo::create(&pool, &account("v2")).await.unwrap();
    let beat = BeatRepo::create(&pool, &new_beat(producer_id, "b", &["pop"]))
        .await
        .unwrap()
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let comment = CommentRepo::create(
        &mut conn,
        &CreateComment {
            beat_id: beat.id,
            vocal_id: owner.id,
            comment_file: "https://wav.example/c.wav".to_string(),
            content: None,
            duration: 3.0,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert!(CommentRepo::delete_owned(&mut conn, comment.id, other.id)
        .await
        .unwrap()
        .is_none());

    let deleted = CommentRepo::delete_owned(&mut conn, comment.id, owner.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deleted.beat_id, beat.id);
    assert_eq!(deleted.comment_file, "https://wav.example/c.wav");
}
