//! Integration tests for import/export batches.

use std::fs;
use std::path::{Path, PathBuf};

use pwdvault::errors::PwdVaultError;
use pwdvault::transfer::{
    export_one, plan_export, plan_import, BatchOutcome, BatchState, Direction, Resolution,
    EXPORT_DIR_NAME,
};
use pwdvault::vault::VaultRepository;
use tempfile::TempDir;

/// Helper: a vault with the given entries plus an empty "outside" directory.
fn setup(entries: &[(&str, &str)]) -> (TempDir, VaultRepository, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let mut repo = VaultRepository::open(&dir.path().join("vault")).expect("open vault");
    for (name, content) in entries {
        repo.create(name, content, false).unwrap();
    }
    let outside = dir.path().join("outside");
    fs::create_dir_all(&outside).unwrap();
    (dir, repo, outside)
}

fn write(dir: &Path, file: &str, content: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, content).unwrap();
    path
}

fn assert_accounted(outcome: &BatchOutcome) {
    assert_eq!(
        outcome.copied()
            + outcome.skipped()
            + outcome.unknown_type()
            + outcome.failed()
            + outcome.pending(),
        outcome.total()
    );
}

fn assert_settled(outcome: &BatchOutcome) {
    assert_accounted(outcome);
    assert_eq!(outcome.pending(), 0);
    assert_eq!(
        outcome.failed(),
        outcome.total() - outcome.copied() - outcome.skipped() - outcome.unknown_type()
    );
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[test]
fn import_new_and_colliding_then_accept() {
    let (_dir, mut repo, outside) = setup(&[("X", "old")]);
    let sources = vec![write(&outside, "Y.pwd", "why"), write(&outside, "X.pwd", "new")];

    let mut batch = plan_import(&repo, &sources).unwrap();
    assert_eq!(batch.state(), BatchState::Planned);
    assert_eq!(batch.direct_tasks().len(), 1);
    assert_eq!(batch.collisions().len(), 1);
    assert_eq!(batch.collisions()[0].name, "X");

    let after_direct = batch.copy_direct().unwrap().clone();
    assert_eq!(after_direct.copied(), 1);
    assert_eq!(after_direct.pending(), 1);
    assert_accounted(&after_direct);
    assert_eq!(batch.state(), BatchState::AwaitingResolution);

    let outcome = batch.apply_resolutions(Resolution::AcceptAll).unwrap();
    assert_eq!(outcome.direction(), Direction::Import);
    assert_eq!(outcome.copied(), 2);
    assert_eq!(outcome.skipped(), 0);
    assert_settled(&outcome);
    assert_eq!(batch.state(), BatchState::Applied);

    repo.note_added(outcome.copied_names());
    assert_eq!(repo.list().names(), ["X", "Y"]);
    assert_eq!(repo.read("X").unwrap().ciphertext, "new");
}

#[test]
fn import_new_and_colliding_then_reject() {
    let (_dir, mut repo, outside) = setup(&[("X", "old")]);
    let sources = vec![write(&outside, "Y.pwd", "why"), write(&outside, "X.pwd", "new")];

    let batch = plan_import(&repo, &sources).unwrap();
    let outcome = batch.finish(Resolution::Cancel).unwrap();

    assert_eq!(outcome.copied(), 1);
    assert_eq!(outcome.skipped(), 1);
    assert_settled(&outcome);
    assert_eq!(repo.read("X").unwrap().ciphertext, "old");
    assert_eq!(outcome.summary(), "Successfully imported 1 password(s).\nChose not to import 1 password(s).");
}

#[test]
fn collision_matches_any_letter_case_and_keeps_stored_spelling() {
    let (_dir, repo, outside) = setup(&[("Bank", "old")]);
    let sources = vec![write(&outside, "bank.pwd", "new")];

    let batch = plan_import(&repo, &sources).unwrap();
    assert_eq!(batch.collisions().len(), 1);
    assert_eq!(batch.collisions()[0].destination, repo.entry_path("Bank"));

    let outcome = batch.finish(Resolution::AcceptAll).unwrap();
    assert_eq!(outcome.copied(), 1);
    assert_eq!(repo.names_on_disk().unwrap(), vec!["Bank".to_string()]);
}

#[test]
fn per_item_resolution_settles_each_collision() {
    let (_dir, repo, outside) = setup(&[("a", "1"), ("b", "2")]);
    let sources = vec![write(&outside, "a.pwd", "A"), write(&outside, "b.pwd", "B")];

    let outcome = plan_import(&repo, &sources)
        .unwrap()
        .finish(Resolution::PerItem(vec![false, true]))
        .unwrap();

    assert_eq!(outcome.copied(), 1);
    assert_eq!(outcome.skipped(), 1);
    assert_eq!(outcome.copied_names(), ["b"]);
    assert_eq!(fs::read_to_string(repo.entry_path("a")).unwrap(), "1");
    assert_eq!(fs::read_to_string(repo.entry_path("b")).unwrap(), "B");
}

#[test]
fn unknown_types_and_missing_sources_are_counted() {
    let (_dir, repo, outside) = setup(&[]);
    let sources = vec![
        write(&outside, "notes.txt", "hello"),
        write(&outside, "good.pwd", "ok"),
        outside.join("missing.pwd"),
    ];

    let outcome = plan_import(&repo, &sources)
        .unwrap()
        .finish(Resolution::Cancel)
        .unwrap();

    assert_eq!(outcome.total(), 3);
    assert_eq!(outcome.unknown_type(), 1);
    assert_eq!(outcome.copied(), 1);
    assert_eq!(outcome.failed(), 1);
    assert_settled(&outcome);
    assert!(!repo.entry_path("missing").exists());
}

#[test]
fn nothing_to_import() {
    let (_dir, repo, _outside) = setup(&[]);
    let outcome = plan_import(&repo, &[]).unwrap().finish(Resolution::Cancel).unwrap();
    assert_eq!(outcome.total(), 0);
    assert_eq!(outcome.summary(), "Nothing to import.");
}

#[test]
fn failed_overwrite_keeps_the_stored_entry() {
    let (_dir, mut repo, outside) = setup(&[("X", "precious")]);
    // A directory named like an entry file can't be read as one.
    let source = outside.join("X.pwd");
    fs::create_dir(&source).unwrap();

    let batch = plan_import(&repo, &[source]).unwrap();
    assert_eq!(batch.collisions().len(), 1);
    let outcome = batch.finish(Resolution::AcceptAll).unwrap();

    assert_eq!(outcome.copied(), 0);
    assert_eq!(outcome.failed(), 1);
    assert_settled(&outcome);
    assert_eq!(repo.read("X").unwrap().ciphertext, "precious");
}

#[test]
fn importing_an_entry_onto_itself_is_skipped() {
    let (_dir, mut repo, _outside) = setup(&[("X", "precious")]);

    let batch = plan_import(&repo, &[repo.entry_path("X")]).unwrap();
    assert!(batch.collisions().is_empty());
    assert!(batch.direct_tasks().is_empty());

    let outcome = batch.finish(Resolution::AcceptAll).unwrap();
    assert_eq!(outcome.total(), 1);
    assert_eq!(outcome.copied(), 0);
    assert_eq!(outcome.skipped(), 1);
    assert_settled(&outcome);
    assert_eq!(repo.read("X").unwrap().ciphertext, "precious");
}

// ---------------------------------------------------------------------------
// Protocol misuse
// ---------------------------------------------------------------------------

#[test]
fn resolving_before_copying_is_a_state_error() {
    let (_dir, repo, outside) = setup(&[("X", "old")]);
    let mut batch = plan_import(&repo, &[write(&outside, "X.pwd", "new")]).unwrap();

    assert!(matches!(
        batch.apply_resolutions(Resolution::AcceptAll),
        Err(PwdVaultError::InvalidBatchState(_))
    ));
}

#[test]
fn copying_twice_is_a_state_error() {
    let (_dir, repo, outside) = setup(&[]);
    let mut batch = plan_import(&repo, &[write(&outside, "n.pwd", "x")]).unwrap();

    batch.copy_direct().unwrap();
    assert!(matches!(
        batch.copy_direct(),
        Err(PwdVaultError::InvalidBatchState(_))
    ));
}

#[test]
fn wrong_number_of_decisions_is_rejected() {
    let (_dir, repo, outside) = setup(&[("X", "old")]);
    let mut batch = plan_import(&repo, &[write(&outside, "X.pwd", "new")]).unwrap();
    batch.copy_direct().unwrap();

    assert!(matches!(
        batch.apply_resolutions(Resolution::PerItem(vec![true, true])),
        Err(PwdVaultError::Validation(_))
    ));
    assert_eq!(batch.state(), BatchState::AwaitingResolution);
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_copies_everything_into_passwords_dir() {
    let (_dir, repo, outside) = setup(&[("a", "1"), ("B", "2")]);

    let outcome = plan_export(&repo, &outside)
        .unwrap()
        .finish(Resolution::Cancel)
        .unwrap();

    assert_eq!(outcome.direction(), Direction::Export);
    assert_eq!(outcome.copied(), 2);
    assert_settled(&outcome);
    let export_dir = outside.join(EXPORT_DIR_NAME);
    assert_eq!(fs::read_to_string(export_dir.join("a.pwd")).unwrap(), "1");
    assert_eq!(fs::read_to_string(export_dir.join("B.pwd")).unwrap(), "2");
}

#[test]
fn export_over_existing_files_waits_for_a_decision() {
    let (_dir, repo, outside) = setup(&[("a", "1"), ("b", "2")]);
    let export_dir = outside.join(EXPORT_DIR_NAME);
    fs::create_dir_all(&export_dir).unwrap();
    fs::write(export_dir.join("a.pwd"), "stale").unwrap();

    let mut batch = plan_export(&repo, &outside).unwrap();
    assert_eq!(batch.collisions().len(), 1);
    batch.copy_direct().unwrap();

    let outcome = batch.apply_resolutions(Resolution::Cancel).unwrap();
    assert_eq!(outcome.copied(), 1);
    assert_eq!(outcome.skipped(), 1);
    assert_eq!(fs::read_to_string(export_dir.join("a.pwd")).unwrap(), "stale");
}

#[test]
fn export_refuses_a_file_named_passwords() {
    let (_dir, repo, outside) = setup(&[("a", "1")]);
    write(&outside, EXPORT_DIR_NAME, "in the way");

    assert!(matches!(
        plan_export(&repo, &outside),
        Err(PwdVaultError::Validation(_))
    ));
}

#[test]
fn export_one_asks_before_overwriting() {
    let (_dir, repo, outside) = setup(&[("mail", "secret")]);

    let exported = export_one(&repo, "MAIL", &outside, false).unwrap();
    assert_eq!(exported.name, "mail");
    assert_eq!(exported.destination, outside.join(EXPORT_DIR_NAME).join("mail.pwd"));

    assert!(matches!(
        export_one(&repo, "Mail", &outside, false),
        Err(PwdVaultError::Collision(_))
    ));
    assert!(export_one(&repo, "mail", &outside, true).is_ok());
}

#[test]
fn export_one_missing_entry_is_not_found() {
    let (_dir, repo, outside) = setup(&[]);
    assert!(matches!(
        export_one(&repo, "ghost", &outside, false),
        Err(PwdVaultError::NotFound(_))
    ));
}
