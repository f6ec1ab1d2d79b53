//! End-to-end synchronizer tests.
//!
//! Covers the core scenarios: initial mirror into an empty destination,
//! orphan removal, idempotence under both policies, single-file sources,
//! verbosity filtering, and streaming/batch delivery parity.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use treesync::{sync, Message, MessageLevel, SyncError, SyncOptions, SyncPolicy, Synchronizer};

fn run(source: &Path, dest: &Path, policy: SyncPolicy) -> Vec<Message> {
    sync(source, dest, &[], policy, MessageLevel::Debug).expect("sync run should succeed")
}

fn has_message(messages: &[Message], level: MessageLevel, fragment: &str) -> bool {
    messages
        .iter()
        .any(|m| m.level == level && m.text.contains(fragment))
}

#[test]
fn test_full_sync_into_empty_destination() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    fs::create_dir_all(src.path().join("sub")).expect("create nested source dir");
    fs::write(src.path().join("a.txt"), b"x").expect("write a.txt");
    fs::write(src.path().join("sub/b.txt"), b"y").expect("write sub/b.txt");

    let dest_root = dst.path().join("mirror");
    let messages = run(src.path(), &dest_root, SyncPolicy::Full);

    assert_eq!(
        fs::read(dest_root.join("a.txt")).expect("read copied a.txt"),
        b"x"
    );
    assert_eq!(
        fs::read(dest_root.join("sub/b.txt")).expect("read copied sub/b.txt"),
        b"y"
    );

    assert!(has_message(&messages, MessageLevel::FileIo, "Created directory"));
    assert!(has_message(&messages, MessageLevel::FileIo, "a.txt"));
    assert!(has_message(&messages, MessageLevel::FileIo, "b.txt"));
    assert!(has_message(&messages, MessageLevel::FileIo, "Synced directory"));
}

#[test]
fn test_differential_skips_identical_and_deletes_stale() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    fs::write(src.path().join("a.txt"), b"x").expect("write source a.txt");
    fs::write(dst.path().join("a.txt"), b"x").expect("write destination a.txt");
    fs::write(dst.path().join("stale.txt"), b"z").expect("write destination stale.txt");

    let messages = run(src.path(), dst.path(), SyncPolicy::Differential);

    assert!(
        has_message(&messages, MessageLevel::Information, "binary equal"),
        "identical file should be reported as skipped"
    );
    assert!(has_message(&messages, MessageLevel::FileIo, "Deleted file"));

    assert_eq!(
        fs::read(dst.path().join("a.txt")).expect("read kept file"),
        b"x"
    );
    assert!(!dst.path().join("stale.txt").exists(), "stale file removed");
}

#[test]
fn test_orphan_directory_removed_recursively() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    fs::write(src.path().join("keep.txt"), b"k").expect("write source file");
    fs::create_dir_all(dst.path().join("old/deeper")).expect("create orphan tree");
    fs::write(dst.path().join("old/one.txt"), b"1").expect("write orphan file");
    fs::write(dst.path().join("old/deeper/two.txt"), b"2").expect("write nested orphan file");

    let messages = run(src.path(), dst.path(), SyncPolicy::Differential);

    assert!(!dst.path().join("old").exists(), "orphan subtree removed");
    assert!(has_message(&messages, MessageLevel::FileIo, "Deleted directory"));
    assert!(
        messages
            .iter()
            .filter(|m| m.text.contains("Deleted file"))
            .count()
            >= 2,
        "each contained file reports its own delete"
    );
}

#[test]
fn test_differential_second_run_changes_nothing() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    fs::create_dir_all(src.path().join("sub")).expect("create source dir");
    fs::write(src.path().join("a.txt"), b"alpha").expect("write a.txt");
    fs::write(src.path().join("sub/b.txt"), b"beta").expect("write b.txt");

    run(src.path(), dst.path(), SyncPolicy::Differential);
    let second = run(src.path(), dst.path(), SyncPolicy::Differential);

    assert!(
        !second.iter().any(|m| m.text.contains("Synced file")
            || m.text.contains("Created directory")
            || m.text.contains("Deleted")),
        "second run must not create, copy, or delete anything"
    );
}

#[test]
fn test_full_policy_recopies_every_file() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    fs::write(src.path().join("a.txt"), b"alpha").expect("write a.txt");
    fs::write(src.path().join("b.txt"), b"beta").expect("write b.txt");

    run(src.path(), dst.path(), SyncPolicy::Full);
    let second = run(src.path(), dst.path(), SyncPolicy::Full);

    let copies = second
        .iter()
        .filter(|m| m.text.contains("Synced file"))
        .count();
    assert_eq!(copies, 2, "full policy copies unconditionally");

    assert_eq!(
        fs::read(dst.path().join("a.txt")).expect("read a.txt"),
        b"alpha"
    );
    assert_eq!(
        fs::read(dst.path().join("b.txt")).expect("read b.txt"),
        b"beta"
    );
}

#[test]
fn test_single_file_source() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    let src_file = src.path().join("only.txt");
    let dst_file = dst.path().join("copy.txt");
    fs::write(&src_file, b"payload").expect("write source file");

    let messages = run(&src_file, &dst_file, SyncPolicy::Differential);

    assert_eq!(fs::read(&dst_file).expect("read copied file"), b"payload");
    assert!(has_message(&messages, MessageLevel::FileIo, "Synced file"));

    let second = run(&src_file, &dst_file, SyncPolicy::Differential);
    assert!(
        has_message(&second, MessageLevel::Information, "binary equal"),
        "second run skips the identical file"
    );
}

#[test]
fn test_missing_source_fails_with_not_found() {
    let dst = TempDir::new().expect("create dst tempdir");
    let missing = dst.path().join("does-not-exist");

    let result = sync(
        &missing,
        dst.path(),
        &[],
        SyncPolicy::Differential,
        MessageLevel::Debug,
    );

    assert!(matches!(result, Err(SyncError::NotFound { .. })));
}

#[test]
fn test_verbosity_suppresses_lower_levels() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    fs::write(src.path().join("a.txt"), b"x").expect("write source file");

    let messages = sync(
        src.path(),
        dst.path(),
        &[],
        SyncPolicy::Full,
        MessageLevel::Error,
    )
    .expect("sync run should succeed");

    assert!(messages.is_empty(), "clean run emits nothing above Error");
    assert!(dst.path().join("a.txt").exists(), "filtering never skips work");
}

#[test]
fn test_streaming_and_batch_agree() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    fs::create_dir_all(src.path().join("sub")).expect("create source dir");
    fs::write(src.path().join("a.txt"), b"x").expect("write a.txt");
    fs::write(src.path().join("sub/b.txt"), b"y").expect("write b.txt");

    let synchronizer = Synchronizer::new(SyncOptions::default()).expect("build synchronizer");

    let streamed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let streamed_ref = Arc::clone(&streamed);
    let callback = move |message: &Message| {
        streamed_ref
            .lock()
            .expect("lock streamed")
            .push(message.text.clone());
    };

    let batch = synchronizer
        .sync_with(src.path(), dst.path(), Some(&callback))
        .expect("sync run should succeed");

    let streamed_texts = streamed.lock().expect("lock streamed snapshot").clone();
    let batch_texts: Vec<String> = batch.iter().map(|m| m.text.clone()).collect();
    assert_eq!(streamed_texts, batch_texts, "same messages, same order");
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_warns_and_siblings_continue() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    std::os::unix::fs::symlink("missing-target", src.path().join("dangling"))
        .expect("create broken symlink");
    fs::write(src.path().join("real.txt"), b"still-copied").expect("write source file");

    let messages = run(src.path(), dst.path(), SyncPolicy::Full);

    assert!(
        has_message(&messages, MessageLevel::Warning, "not a regular file"),
        "broken symlink is reported, not fatal"
    );
    assert_eq!(
        fs::read(dst.path().join("real.txt")).expect("read sibling file"),
        b"still-copied"
    );
}

#[cfg(unix)]
#[test]
fn test_symlink_to_file_is_content_copied() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    fs::write(src.path().join("target.txt"), b"pointed-at").expect("write target");
    std::os::unix::fs::symlink("target.txt", src.path().join("link.txt"))
        .expect("create symlink");

    run(src.path(), dst.path(), SyncPolicy::Full);

    let copied = dst.path().join("link.txt");
    let metadata = fs::symlink_metadata(&copied).expect("stat copied entry");
    assert!(
        metadata.file_type().is_file(),
        "destination holds plain content, not a link"
    );
    assert_eq!(fs::read(&copied).expect("read copied content"), b"pointed-at");
}
