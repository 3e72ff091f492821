use predicates::prelude::*;
use predicates::str::contains;

mod common;
use common::{poppy, setup_test_db};

/// poppy command isolated from the user's home and environment.
fn cmd(home: &std::path::Path, db: &str) -> assert_cmd::Command {
    let mut c = poppy();
    c.env("HOME", home)
        .env_remove("POPPY_DATABASE")
        .env_remove("POPPY_BIND")
        .env_remove("POPPY_LOG")
        .args(["--db", db, "--test"]);
    c
}

fn init(home: &std::path::Path, db: &str) {
    cmd(home, db)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized"));
}

#[test]
fn test_add_prints_saved_line() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args(["add", "--kind", "note", "Remember the milk"])
        .assert()
        .success()
        .stdout(contains("Saved #1 [note] Remember the milk"));

    cmd(dir.path(), &db)
        .args(["add", "--kind", "idea", "Second one"])
        .assert()
        .success()
        .stdout(contains("Saved #2 [idea] Second one"));
}

#[test]
fn test_add_rejects_invalid_input_with_exit_code_2() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args(["add", "--kind", "note", ""])
        .assert()
        .code(2)
        .stderr(contains("text must not be empty"));

    cmd(dir.path(), &db)
        .args(["add", "--kind", "chore", "sweep"])
        .assert()
        .code(2)
        .stderr(contains("chore"));

    cmd(dir.path(), &db)
        .args(["add", "--kind", "IDEA", "shouting"])
        .assert()
        .code(2)
        .stderr(contains("unknown kind 'IDEA'"));

    cmd(dir.path(), &db)
        .args(["add", "--kind", "meeting", "standup"])
        .assert()
        .code(2)
        .stderr(contains("due date"));

    cmd(dir.path(), &db)
        .args(["add", "--kind", "note", "with meta", "--meta", "[1, 2]"])
        .assert()
        .code(2)
        .stderr(contains("--meta must be a JSON object"));

    // nothing was stored
    cmd(dir.path(), &db)
        .arg("week")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_add_with_tags_meta_and_due_date() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args([
            "add",
            "--kind",
            "meeting",
            "Quarterly review",
            "--tags",
            "work",
            "--tags",
            "q3",
            "--meta",
            r#"{"room": "B2"}"#,
            "--due-at",
            "2030-01-15 10:00",
        ])
        .assert()
        .success()
        .stdout(contains("Saved #1 [meeting] Quarterly review"));
}

#[test]
fn test_week_shows_why() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args(["add", "--kind", "decision", "Use SQLite", "--why", "it is one file"])
        .assert()
        .success();

    cmd(dir.path(), &db)
        .arg("week")
        .assert()
        .success()
        .stdout(contains("[decision]  Use SQLite because it is one file"));
}

#[test]
fn test_todo_vs_todo_all() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args(["add", "--kind", "action", "Pay rent", "--due-at", "2030-01-01"])
        .assert()
        .success();
    cmd(dir.path(), &db)
        .args(["add", "--kind", "action", "Someday maybe"])
        .assert()
        .success();
    cmd(dir.path(), &db)
        .args(["add", "--kind", "note", "Not an action"])
        .assert()
        .success();

    cmd(dir.path(), &db)
        .arg("todo")
        .assert()
        .success()
        .stdout(contains("Pay rent"))
        .stdout(contains("Someday maybe").not())
        .stdout(contains("Not an action").not());

    cmd(dir.path(), &db)
        .args(["todo", "--all"])
        .assert()
        .success()
        .stdout(contains("Pay rent"))
        .stdout(contains("Someday maybe"))
        .stdout(contains("Not an action").not());
}

#[test]
fn test_todo_split_groups_by_week() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args(["todo", "--split"])
        .assert()
        .success()
        .stdout(contains("No pending todos."));

    cmd(dir.path(), &db)
        .args(["add", "--kind", "action", "Call plumber", "--due-at", "2030-01-01"])
        .assert()
        .success();

    cmd(dir.path(), &db)
        .args(["todo", "--split"])
        .assert()
        .success()
        .stdout(contains("Created this week"))
        .stdout(contains("Older"))
        .stdout(contains("Call plumber"));
}

#[test]
fn test_done_missing_id_fails() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args(["done", "99"])
        .assert()
        .code(1)
        .stderr(contains("not found"));
}

#[test]
fn test_done_removes_from_pending_todos() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args(["add", "--kind", "action", "Book flights", "--due-at", "2030-06-01"])
        .assert()
        .success();

    cmd(dir.path(), &db)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(contains("Completed #1"));

    cmd(dir.path(), &db)
        .arg("todo")
        .assert()
        .success()
        .stdout(contains("Book flights").not())
        .stdout(contains("No pending todos."));

    cmd(dir.path(), &db)
        .args(["todo", "--all"])
        .assert()
        .success()
        .stdout(contains("Book flights"))
        .stdout(contains("(done "));
}

#[test]
fn test_db_info_and_log() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args(["add", "--kind", "paper", "Attention is all you need"])
        .assert()
        .success();

    cmd(dir.path(), &db)
        .args(["db", "--check"])
        .assert()
        .success();

    cmd(dir.path(), &db)
        .args(["db", "--info"])
        .assert()
        .success()
        .stdout(contains("paper"));

    cmd(dir.path(), &db)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("add"));
}

#[test]
fn test_add_completed_at_writes_once() {
    let (dir, db) = setup_test_db();
    init(dir.path(), &db);

    cmd(dir.path(), &db)
        .args([
            "add",
            "--kind",
            "action",
            "Filed the report",
            "--due-at",
            "2030-01-01",
            "--completed-at",
            "2026-10-14 16:30",
        ])
        .assert()
        .success()
        .stdout(contains("Saved #1 [action] Filed the report"));

    cmd(dir.path(), &db)
        .args(["todo", "--all"])
        .assert()
        .success()
        .stdout(contains("(done 2026-10-14T16:30+00:00)"));

    cmd(dir.path(), &db)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("completed at 2026-10-14T16:30:00Z"))
        .stdout(contains("complete ").not());
}
