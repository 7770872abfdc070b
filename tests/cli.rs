use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn rolodex(database_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("rolodex-api").unwrap();
    cmd.env_remove("STORAGE_CHOICE")
        .env_remove("ROLODEX_ADDR")
        .env("DATABASE_URL", database_url)
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn adding_users() {
    let dir = tempdir().unwrap();
    let db_url = format!("sqlite://{}", dir.path().join("contacts.db").display());

    rolodex(&db_url)
        .args(["add-user", "--username", "gabitodev1", "--password", "hola.123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User created with id 1"));

    rolodex(&db_url)
        .args(["add-user", "--username", "carolgar01", "--password", "jaja.123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User created with id 2"));

    // Attempt to add a duplicate username
    rolodex(&db_url)
        .args(["add-user", "--username", "gabitodev1", "--password", "otra"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username 'gabitodev1' already exists"));
}

#[test]
fn invalid_inputs() {
    let dir = tempdir().unwrap();
    let db_url = format!("sqlite://{}", dir.path().join("contacts.db").display());

    // INVALID COMMAND
    rolodex(&db_url)
        .args(["and"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));

    // UNKNOWN STORAGE
    rolodex(&db_url)
        .args(["--storage-choice", "json", "add-user", "--username", "a", "--password", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a recognized storage medium"));

    // MEMORY STORAGE CANNOT PROVISION USERS
    rolodex(&db_url)
        .args(["--storage-choice", "mem", "add-user", "--username", "a", "--password", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("add-user needs persistent storage"));

    // MALFORMED SEED USER IS REJECTED BEFORE BINDING
    rolodex(&db_url)
        .args(["--storage-choice", "mem", "serve", "--seed-user", "gabitodev1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid seed user"));
}

#[test]
fn help_lists_subcommands() {
    let dir = tempdir().unwrap();
    let db_url = format!("sqlite://{}", dir.path().join("contacts.db").display());

    rolodex(&db_url)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("add-user"));
}
