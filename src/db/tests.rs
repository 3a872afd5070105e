//! End-to-end tests for the persistence layer, run against a real database
//! file in a throwaway directory: backups and the size stat need an on-disk
//! file, not `:memory:`.

use std::fs;

use tempfile::TempDir;

use crate::config::AppPaths;
use crate::db::Database;

/// Fresh, seeded database in its own temp directory. The directory guard must
/// stay alive for the duration of the test.
fn open_test_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db = Database::new(AppPaths::for_data_dir(dir.path()));
    db.initialize().expect("failed to initialize database");
    (dir, db)
}

/// Database id of the hymn with the given number.
fn hymn_id(db: &Database, number: i64) -> i64 {
    db.fetch_hymn_by_number(number)
        .expect("lookup failed")
        .expect("hymn missing")
        .id
}

#[test]
fn initialization_creates_schema_and_seeds() {
    let (_dir, db) = open_test_db();

    assert!(db.paths().database_path().exists());

    let stats = db.database_stats().expect("stats failed");
    assert!(stats.total_hymns >= 3);
    assert!(stats.total_categories >= 10);
    assert_eq!(stats.total_favorites, 0);
    assert_eq!(stats.database_version, "1.0.0");
    assert!(stats.database_size_bytes > 0);
}

#[test]
fn initialize_again_does_not_reseed() {
    let (_dir, db) = open_test_db();

    db.set_setting("theme", "dark").expect("set failed");
    let before = db.database_stats().expect("stats failed");

    db.initialize().expect("re-initialize failed");

    let after = db.database_stats().expect("stats failed");
    assert_eq!(before.total_hymns, after.total_hymns);
    assert_eq!(before.total_categories, after.total_categories);
    // A re-seed would have restored the default theme.
    assert_eq!(
        db.fetch_setting("theme").expect("get failed").as_deref(),
        Some("dark")
    );
}

#[test]
fn fetch_hymn_by_number_returns_seeded_hymn() {
    let (_dir, db) = open_test_db();

    let hymn = db
        .fetch_hymn_by_number(1)
        .expect("lookup failed")
        .expect("hymn 1 missing");
    assert_eq!(hymn.number, 1);
    assert_eq!(hymn.title, "Holy, Holy, Holy");
    assert_eq!(hymn.author.as_deref(), Some("Reginald Heber"));
    assert_eq!(hymn.category_name.as_deref(), Some("Worship and Praise"));
    assert_eq!(hymn.verse_list().len(), 4);

    assert!(db
        .fetch_hymn_by_number(9999)
        .expect("lookup failed")
        .is_none());
}

#[test]
fn search_finds_amazing_grace() {
    let (_dir, db) = open_test_db();

    let results = db.search_hymns("grace").expect("search failed");
    assert!(!results.is_empty());
    assert!(results.iter().any(|h| h.title.contains("Amazing Grace")));

    let numbers: Vec<i64> = results.iter().map(|h| h.number).collect();
    let mut sorted = numbers.clone();
    sorted.sort_unstable();
    assert_eq!(numbers, sorted, "results must be ordered by number");
}

#[test]
fn search_tolerates_blank_and_hostile_input() {
    let (_dir, db) = open_test_db();

    assert!(db.search_hymns("").expect("blank search failed").is_empty());
    assert!(db.search_hymns("   ").expect("spaces failed").is_empty());
    // FTS5 operators and stray quotes are treated as literal text.
    db.search_hymns("\"grace OR (").expect("quoted search failed");
    assert!(db
        .search_hymns("NEAR(")
        .expect("operator search failed")
        .is_empty());
}

#[test]
fn search_observes_writes_immediately() {
    let (_dir, db) = open_test_db();

    let conn = db.connect().expect("connect failed");
    conn.execute(
        "INSERT INTO hymns (number, title, verses) VALUES (901, 'Zarephath Evening', 'down by zarephath we sang')",
        [],
    )
    .expect("insert failed");

    let results = db.search_hymns("zarephath").expect("search failed");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].number, 901);

    conn.execute(
        "UPDATE hymns SET verses = 'a different town entirely' WHERE number = 901",
        [],
    )
    .expect("update failed");
    assert!(db
        .search_hymns("zarephath")
        .expect("search failed")
        .is_empty());
    assert_eq!(db.search_hymns("entirely").expect("search failed").len(), 1);

    conn.execute("DELETE FROM hymns WHERE number = 901", [])
        .expect("delete failed");
    assert!(db
        .search_hymns("entirely")
        .expect("search failed")
        .is_empty());
}

#[test]
fn fetch_all_hymns_orders_and_caps() {
    let (_dir, db) = open_test_db();

    let all = db.fetch_all_hymns(None).expect("listing failed");
    assert_eq!(all.len(), 3);
    assert_eq!(
        all.iter().map(|h| h.number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let capped = db.fetch_all_hymns(Some(2)).expect("capped listing failed");
    assert_eq!(capped.len(), 2);
    assert_eq!(capped[0].number, 1);
}

#[test]
fn favorite_round_trip() {
    let (_dir, db) = open_test_db();
    let id = hymn_id(&db, 1);

    assert!(db.add_favorite(id).expect("add failed"), "newly added");
    assert!(db.is_favorite(id).expect("check failed"));

    let favorites = db.fetch_favorites().expect("listing failed");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].number, 1);

    assert!(db.remove_favorite(id).expect("remove failed"));
    assert!(!db.is_favorite(id).expect("check failed"));
}

#[test]
fn re_adding_a_favorite_is_a_no_op() {
    let (_dir, db) = open_test_db();
    let id = hymn_id(&db, 2);

    assert!(db.add_favorite(id).expect("add failed"));
    assert!(!db.add_favorite(id).expect("re-add failed"), "already there");

    let stats = db.database_stats().expect("stats failed");
    assert_eq!(stats.total_favorites, 1);
}

#[test]
fn removing_an_absent_favorite_reports_false() {
    let (_dir, db) = open_test_db();
    assert!(!db.remove_favorite(hymn_id(&db, 3)).expect("remove failed"));
}

#[test]
fn favorites_list_most_recent_first() {
    let (_dir, db) = open_test_db();

    for number in [1, 2, 3] {
        db.add_favorite(hymn_id(&db, number)).expect("add failed");
    }

    let favorites = db.fetch_favorites().expect("listing failed");
    assert_eq!(
        favorites.iter().map(|h| h.number).collect::<Vec<_>>(),
        vec![3, 2, 1]
    );
}

#[test]
fn viewing_updates_log_and_counters_together() {
    let (_dir, db) = open_test_db();
    let first = hymn_id(&db, 1);
    let second = hymn_id(&db, 2);

    db.add_recently_viewed(first).expect("view failed");
    db.add_recently_viewed(second).expect("view failed");

    let recent = db.fetch_recently_viewed(10).expect("listing failed");
    assert!(recent.len() >= 2);
    assert_eq!(recent[0].number, 2, "most recent view comes first");

    for id in [first, second] {
        let stat = db
            .usage_stat(id)
            .expect("stat lookup failed")
            .expect("stat row missing");
        assert_eq!(stat.view_count, 1);
        assert!(stat.last_viewed.is_some());
    }
}

#[test]
fn repeat_views_increment_one_counter_row() {
    let (_dir, db) = open_test_db();
    let id = hymn_id(&db, 1);

    db.add_recently_viewed(id).expect("view failed");
    db.add_recently_viewed(id).expect("view failed");

    let stat = db
        .usage_stat(id)
        .expect("stat lookup failed")
        .expect("stat row missing");
    assert_eq!(stat.view_count, 2);

    // Two log rows, one distinct hymn.
    let recent = db.fetch_recently_viewed(10).expect("listing failed");
    assert_eq!(recent.iter().filter(|h| h.id == id).count(), 1);

    let conn = db.connect().expect("connect failed");
    let log_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM recently_viewed WHERE hymn_id = ?1",
            [id],
            |row| row.get(0),
        )
        .expect("count failed");
    assert_eq!(log_rows, 2);
}

#[test]
fn recently_viewed_respects_limit() {
    let (_dir, db) = open_test_db();

    for number in [1, 2, 3] {
        db.add_recently_viewed(hymn_id(&db, number))
            .expect("view failed");
    }

    let recent = db.fetch_recently_viewed(2).expect("listing failed");
    assert_eq!(
        recent.iter().map(|h| h.number).collect::<Vec<_>>(),
        vec![3, 2]
    );
}

#[test]
fn popular_hymns_rank_by_view_count() {
    let (_dir, db) = open_test_db();
    let first = hymn_id(&db, 1);
    let second = hymn_id(&db, 2);

    db.add_recently_viewed(first).expect("view failed");
    db.add_recently_viewed(second).expect("view failed");
    db.add_recently_viewed(second).expect("view failed");

    let popular = db.fetch_popular_hymns(10).expect("listing failed");
    assert_eq!(popular[0].number, 2);

    assert!(db
        .usage_stat(hymn_id(&db, 3))
        .expect("stat lookup failed")
        .is_none());
}

#[test]
fn settings_round_trip() {
    let (_dir, db) = open_test_db();

    assert_eq!(
        db.fetch_setting("theme").expect("get failed").as_deref(),
        Some("light"),
        "seeded default"
    );

    db.set_setting("theme", "dark").expect("set failed");
    assert_eq!(
        db.fetch_setting("theme").expect("get failed").as_deref(),
        Some("dark")
    );

    assert!(db
        .fetch_setting("no_such_key")
        .expect("get failed")
        .is_none());
}

#[test]
fn category_counts_match_their_hymns() {
    let (_dir, db) = open_test_db();

    let categories = db.fetch_categories().expect("listing failed");
    assert!(categories.len() >= 10);

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted, "categories must be ordered by name");

    for category in &categories {
        let hymns = db
            .fetch_hymns_by_category(category.id)
            .expect("category listing failed");
        assert_eq!(
            hymns.len() as i64,
            category.hymn_count,
            "count mismatch for {}",
            category.name
        );
    }

    let worship = categories
        .iter()
        .find(|c| c.name == "Worship and Praise")
        .expect("seeded category missing");
    assert_eq!(worship.hymn_count, 1);
}

#[test]
fn backup_produces_identical_copy() {
    let (_dir, db) = open_test_db();

    let backup_path = db.backup_database().expect("backup failed");
    assert!(backup_path.exists());
    assert!(backup_path.starts_with(db.paths().backup_dir()));

    let original = fs::read(db.paths().database_path()).expect("read original");
    let copy = fs::read(&backup_path).expect("read backup");
    assert_eq!(original, copy, "backup must be a byte-identical copy");
}

#[test]
fn stats_size_tracks_the_file() {
    let (_dir, db) = open_test_db();

    let stats = db.database_stats().expect("stats failed");
    let on_disk = fs::metadata(db.paths().database_path())
        .expect("stat failed")
        .len();
    assert_eq!(stats.database_size_bytes, on_disk);
}

#[test]
fn favoriting_an_unknown_hymn_fails_loudly() {
    let (_dir, db) = open_test_db();
    // Foreign keys are on: the error is a constraint violation, not a silent
    // false.
    assert!(db.add_favorite(999_999).is_err());
}
