//! The recursive tree synchronizer
//!
//! Walks source and destination in lock-step, one directory level at a
//! time: ensure the destination directory exists, recurse into source
//! subdirectories, delete destination-orphan directories, sync files,
//! delete destination-orphan files, then report the level as synced.
//! Orphan detection runs after the source-side passes so it always sees
//! the up-to-date state of both sides.
//!
//! Every filesystem call is individually error-isolated: a failure
//! produces exactly one `Error`-level message naming the operation, the
//! path, and the cause, and processing continues with the next sibling.
//! Only a missing source path aborts the run.

pub mod copy;

use crate::config::SyncOptions;
use crate::guard;
use crate::hash;
use crate::pattern::ExclusionSet;
use crate::sink::{MessageCallback, MessageSink};
use crate::types::{Message, MessageLevel, SyncError, SyncPolicy};
use std::fs;
use std::path::Path;

/// One-way tree synchronizer bound to a set of options.
///
/// Construction compiles the exclusion patterns once; the instance is
/// stateless across runs and may be reused for any number of syncs.
pub struct Synchronizer {
    options: SyncOptions,
    patterns: ExclusionSet,
}

impl Synchronizer {
    /// Compile the exclusion set and build a synchronizer.
    pub fn new(options: SyncOptions) -> Result<Self, SyncError> {
        let patterns = ExclusionSet::compile(&options.exclude)?;
        Ok(Self { options, patterns })
    }

    /// Synchronize `dest` with `source`, returning the ordered message
    /// buffer after the run completes (batch mode).
    ///
    /// Fails with [`SyncError::NotFound`] if `source` is neither an
    /// existing file nor an existing directory; all other failures are
    /// absorbed into `Error`-level messages.
    pub fn sync(&self, source: &Path, dest: &Path) -> Result<Vec<Message>, SyncError> {
        self.sync_with(source, dest, None)
    }

    /// Synchronize `dest` with `source`, delivering each message to
    /// `on_message` synchronously as it is produced (streaming mode).
    /// The full buffer is returned as well; both deliveries observe the
    /// same order.
    pub fn sync_with(
        &self,
        source: &Path,
        dest: &Path,
        on_message: Option<&MessageCallback>,
    ) -> Result<Vec<Message>, SyncError> {
        let mut sink = MessageSink::new(self.options.verbosity, on_message);

        if source.is_dir() {
            self.sync_directory(source, dest, &mut sink);
        } else if source.is_file() {
            self.sync_file(source, dest, &mut sink);
        } else {
            return Err(SyncError::NotFound {
                path: source.to_path_buf(),
            });
        }

        Ok(sink.into_messages())
    }

    /// Synchronize one directory pair, then its children recursively.
    fn sync_directory(&self, src: &Path, dst: &Path, sink: &mut MessageSink) {
        if let Some(pattern) = self.patterns.first_match(src) {
            sink.emit(
                MessageLevel::Debug,
                format!(
                    "'{}' matched pattern '{}' -- skipping directory.",
                    src.display(),
                    pattern.raw()
                ),
            );
            return;
        }

        if !dst.is_dir() {
            if let Err(e) = fs::create_dir_all(dst) {
                sink.emit(
                    MessageLevel::Error,
                    format!("Failed to create directory '{}': {}", dst.display(), e),
                );
                return;
            }
            sink.emit(
                MessageLevel::FileIo,
                format!("Created directory '{}'.", dst.display()),
            );
        }

        // Source subdirectories; each recursive call is error-isolated.
        match list_dir(src) {
            Ok(entries) => {
                for entry in entries {
                    match entry.file_type() {
                        Ok(file_type) if file_type.is_dir() => {
                            self.sync_directory(&entry.path(), &dst.join(entry.file_name()), sink);
                        }
                        Ok(_) => {} // files and special entries handled below
                        Err(e) => sink.emit(
                            MessageLevel::Error,
                            format!(
                                "Failed to read entry '{}': {}",
                                entry.path().display(),
                                e
                            ),
                        ),
                    }
                }
            }
            Err(e) => sink.emit(
                MessageLevel::Error,
                format!("Failed to list directory '{}': {}", src.display(), e),
            ),
        }

        // Destination-orphan directories.
        match list_dir(dst) {
            Ok(entries) => {
                for entry in entries {
                    let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    if !is_dir || src.join(entry.file_name()).is_dir() {
                        continue;
                    }

                    let orphan = entry.path();
                    if let Some(pattern) = self.patterns.first_match(&orphan) {
                        sink.emit(
                            MessageLevel::Debug,
                            format!(
                                "'{}' matched pattern '{}' -- skipping delete.",
                                orphan.display(),
                                pattern.raw()
                            ),
                        );
                        continue;
                    }

                    self.remove_dir_tree(&orphan, sink);
                }
            }
            Err(e) => sink.emit(
                MessageLevel::Error,
                format!("Failed to list directory '{}': {}", dst.display(), e),
            ),
        }

        // Source files.
        match list_dir(src) {
            Ok(entries) => {
                for entry in entries {
                    match entry.file_type() {
                        Ok(file_type) if file_type.is_dir() => {}
                        Ok(file_type) => {
                            let child_src = entry.path();
                            // Symlinks resolving to regular files get a
                            // plain content copy; anything else is skipped.
                            if file_type.is_file()
                                || (file_type.is_symlink() && child_src.is_file())
                            {
                                self.sync_file(&child_src, &dst.join(entry.file_name()), sink);
                            } else {
                                sink.emit(
                                    MessageLevel::Warning,
                                    format!(
                                        "'{}' is not a regular file -- skipping.",
                                        child_src.display()
                                    ),
                                );
                            }
                        }
                        Err(e) => sink.emit(
                            MessageLevel::Error,
                            format!(
                                "Failed to read entry '{}': {}",
                                entry.path().display(),
                                e
                            ),
                        ),
                    }
                }
            }
            Err(e) => sink.emit(
                MessageLevel::Error,
                format!("Failed to list directory '{}': {}", src.display(), e),
            ),
        }

        // Destination-orphan files.
        match list_dir(dst) {
            Ok(entries) => {
                for entry in entries {
                    let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    if is_dir || src.join(entry.file_name()).is_file() {
                        continue;
                    }

                    let orphan = entry.path();
                    if let Some(pattern) = self.patterns.first_match(&orphan) {
                        sink.emit(
                            MessageLevel::Debug,
                            format!(
                                "'{}' matched pattern '{}' -- skipping delete.",
                                orphan.display(),
                                pattern.raw()
                            ),
                        );
                        continue;
                    }

                    self.remove_file(&orphan, sink);
                }
            }
            Err(e) => sink.emit(
                MessageLevel::Error,
                format!("Failed to list directory '{}': {}", dst.display(), e),
            ),
        }

        sink.emit(
            MessageLevel::FileIo,
            format!("Synced directory '{}' => '{}'.", src.display(), dst.display()),
        );
    }

    /// Synchronize one file pair according to the overwrite policy.
    fn sync_file(&self, src: &Path, dst: &Path, sink: &mut MessageSink) {
        if let Some(pattern) = self.patterns.first_match(src) {
            sink.emit(
                MessageLevel::Information,
                format!(
                    "'{}' matched pattern '{}' -- skipping file.",
                    src.display(),
                    pattern.raw()
                ),
            );
            return;
        }

        if dst.is_file() && self.options.policy == SyncPolicy::Differential {
            match hash::files_identical(src, dst) {
                Ok(true) => {
                    sink.emit(
                        MessageLevel::Information,
                        format!(
                            "'{}' is binary equal to '{}' -- skipping file.",
                            src.display(),
                            dst.display()
                        ),
                    );
                    return;
                }
                Ok(false) => {}
                Err(e) => {
                    // Indeterminate comparison: do not overwrite on
                    // ambiguous state.
                    sink.emit(
                        MessageLevel::Error,
                        format!(
                            "Failed to compare '{}' and '{}': {}",
                            src.display(),
                            dst.display(),
                            e
                        ),
                    );
                    return;
                }
            }
        }

        match copy::copy_file(src, dst) {
            Ok(_bytes) => sink.emit(
                MessageLevel::FileIo,
                format!("Synced file '{}' => '{}'.", src.display(), dst.display()),
            ),
            Err(e) => sink.emit(
                MessageLevel::Error,
                format!(
                    "Failed to sync file '{}' => '{}': {}",
                    src.display(),
                    dst.display(),
                    e
                ),
            ),
        }
    }

    /// Recursively delete a destination directory, bottom-up.
    ///
    /// The guard runs before any filesystem access, and again for every
    /// contained entry; one refused or failed delete does not stop the
    /// remaining siblings.
    fn remove_dir_tree(&self, path: &Path, sink: &mut MessageSink) {
        if guard::is_protected(path) {
            sink.emit(
                MessageLevel::Error,
                format!(
                    "Refusing to delete '{}': path is under a protected system location.",
                    path.display()
                ),
            );
            return;
        }

        if !path.is_dir() {
            return;
        }

        match list_dir(path) {
            Ok(entries) => {
                for entry in entries {
                    let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    if is_dir {
                        self.remove_dir_tree(&entry.path(), sink);
                    } else {
                        self.remove_file(&entry.path(), sink);
                    }
                }
            }
            Err(e) => {
                sink.emit(
                    MessageLevel::Error,
                    format!("Failed to list directory '{}': {}", path.display(), e),
                );
                return;
            }
        }

        match fs::remove_dir(path) {
            Ok(()) => sink.emit(
                MessageLevel::FileIo,
                format!("Deleted directory '{}'.", path.display()),
            ),
            Err(e) => sink.emit(
                MessageLevel::Error,
                format!("Failed to delete directory '{}': {}", path.display(), e),
            ),
        }
    }

    /// Delete a single destination file, guarded.
    fn remove_file(&self, path: &Path, sink: &mut MessageSink) {
        if guard::is_protected(path) {
            sink.emit(
                MessageLevel::Error,
                format!(
                    "Refusing to delete '{}': path is under a protected system location.",
                    path.display()
                ),
            );
            return;
        }

        match fs::remove_file(path) {
            Ok(()) => sink.emit(
                MessageLevel::FileIo,
                format!("Deleted file '{}'.", path.display()),
            ),
            Err(e) => sink.emit(
                MessageLevel::Error,
                format!("Failed to delete file '{}': {}", path.display(), e),
            ),
        }
    }
}

/// Synchronize `dest` with `source` in one call (batch mode).
///
/// Convenience wrapper over [`Synchronizer`] for callers that do not need
/// to reuse the compiled exclusion set.
pub fn sync(
    source: &Path,
    dest: &Path,
    exclude: &[String],
    policy: SyncPolicy,
    verbosity: MessageLevel,
) -> Result<Vec<Message>, SyncError> {
    let synchronizer = Synchronizer::new(SyncOptions {
        policy,
        verbosity,
        exclude: exclude.to_vec(),
    })?;
    synchronizer.sync(source, dest)
}

/// List a directory's entries sorted by name, for deterministic pass and
/// message order.
fn list_dir(path: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        entries.push(entry?);
    }
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}
