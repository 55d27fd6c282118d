//! Source-text builders and atomic file output.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Context, Result};

/// Banner line placed in every generated file.
pub const GENERATED_BANNER: &str = "AUTOMATICALLY GENERATED.  DO NOT EDIT.";

/// Accumulates a generated Rust source file.
pub struct RustFile {
    /// The file contents so far.
    pub buf: String,
}

impl RustFile {
    /// Starts a file whose module doc comment is `module_doc`.
    ///
    /// Continuation lines of `module_doc` must carry their own `//!` prefix.
    pub fn new(module_doc: &str) -> Self {
        let mut buf = String::with_capacity(64 * 1024);
        buf.push_str("//! ");
        buf.push_str(module_doc);
        buf.push('\n');
        buf.push('\n');
        Self { buf }
    }

    /// Appends one line.
    pub fn line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Appends a top-level `///` doc line (empty text gives a bare `///`).
    pub fn doc_comment(&mut self, text: &str) {
        if text.is_empty() {
            self.line("///");
        } else {
            self.buf.push_str("/// ");
            self.line(text);
        }
    }

    /// Appends a `///` doc line indented one level.
    pub fn indented_doc_comment(&mut self, text: &str) {
        self.buf.push_str("    ");
        self.doc_comment(text);
    }

    /// Returns the finished contents.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Formats a word list as `[a, b]` using `word` for each element.
pub fn word_list(words: &[u64], open: &str, close: &str, word: fn(u64) -> String) -> String {
    let body: Vec<String> = words.iter().map(|&w| word(w)).collect();
    format!("{open}{}{close}", body.join(", "))
}

static SIDE_FILE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique sibling of `path` named `<name>.<pid>-<seq>.<ext>`.
fn side_path(path: &Path, ext: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    let seq = SIDE_FILE_SEQ.fetch_add(1, Ordering::Relaxed);
    name.push(format!(".{}-{seq}.{ext}", process::id()));
    path.with_file_name(name)
}

/// A file written to its temporary sibling and not yet renamed into place.
#[derive(Debug)]
struct Staged {
    tmp: PathBuf,
    target: PathBuf,
}

/// A target replaced during [`FileBatch::commit`]; `backup` holds the
/// previous file, if there was one.
#[derive(Debug)]
struct Replaced {
    target: PathBuf,
    backup: Option<PathBuf>,
}

/// A set of files that are written together or not at all.
///
/// [`FileBatch::stage`] writes and syncs each file to a uniquely named
/// temporary sibling. [`FileBatch::commit`] renames them into place,
/// moving any previous file aside first; if a rename fails, every target
/// already replaced is restored. Temporary files still staged when the
/// batch is dropped are removed.
#[derive(Debug, Default)]
pub struct FileBatch {
    staged: Vec<Staged>,
}

impl FileBatch {
    /// An empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `content` to a temporary sibling of `path`, creating parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is a directory, a parent directory cannot
    /// be created, or the temporary file cannot be written or synced.
    pub fn stage(&mut self, path: &Path, content: &str) -> Result<()> {
        if path.is_dir() {
            bail!("Output path is a directory: {}", path.display());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let tmp = side_path(path, "tmp");
        let written = write_synced(&tmp, content);
        // Track the temp file even on failure so drop removes a partial write.
        self.staged.push(Staged {
            tmp,
            target: path.to_path_buf(),
        });
        written
    }

    /// Renames every staged file into place.
    ///
    /// # Errors
    ///
    /// Returns an error if any rename fails; targets already replaced by
    /// this call are rolled back first.
    pub fn commit(mut self) -> Result<()> {
        let mut replaced: Vec<Replaced> = Vec::with_capacity(self.staged.len());
        for staged in &self.staged {
            match replace(staged) {
                Ok(done) => replaced.push(done),
                Err(e) => {
                    rollback(&replaced);
                    return Err(e);
                }
            }
        }
        for done in replaced {
            if let Some(backup) = done.backup {
                let _ = fs::remove_file(backup);
            }
        }
        self.staged.clear();
        Ok(())
    }
}

impl Drop for FileBatch {
    fn drop(&mut self) {
        for staged in &self.staged {
            let _ = fs::remove_file(&staged.tmp);
        }
    }
}

fn write_synced(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync {}", path.display()))
}

fn replace(staged: &Staged) -> Result<Replaced> {
    let target = &staged.target;
    let backup = if target.exists() {
        let backup = side_path(target, "bak");
        fs::rename(target, &backup)
            .with_context(|| format!("Failed to move aside {}", target.display()))?;
        Some(backup)
    } else {
        None
    };
    if let Err(e) = fs::rename(&staged.tmp, target) {
        if let Some(backup) = &backup {
            let _ = fs::rename(backup, target);
        }
        return Err(e).with_context(|| {
            format!(
                "Failed to move {} to {}",
                staged.tmp.display(),
                target.display()
            )
        });
    }
    Ok(Replaced {
        target: target.clone(),
        backup,
    })
}

fn rollback(replaced: &[Replaced]) {
    for done in replaced.iter().rev() {
        match &done.backup {
            Some(backup) => {
                let _ = fs::rename(backup, &done.target);
            }
            None => {
                let _ = fs::remove_file(&done.target);
            }
        }
    }
}

/// Writes a single file through a one-entry [`FileBatch`].
///
/// # Errors
///
/// Returns an error if the file cannot be staged or committed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let mut batch = FileBatch::new();
    batch.stage(path, content)?;
    batch.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "fingerprint-codegen-{name}-{}",
            std::process::id()
        ))
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn rust_file_lines() {
        let mut f = RustFile::new("Doc.");
        f.doc_comment("Item.");
        f.doc_comment("");
        f.line("pub const A: u8 = 1;");
        f.blank();
        f.indented_doc_comment("Field.");
        assert_eq!(
            f.finish(),
            "//! Doc.\n\n/// Item.\n///\npub const A: u8 = 1;\n\n    /// Field.\n"
        );
    }

    #[test]
    fn word_list_formats() {
        let hex = |w: u64| format!("{w:#x}");
        assert_eq!(word_list(&[1, 255], "[", "]", hex), "[0x1, 0xff]");
        assert_eq!(word_list(&[], "{", "}", hex), "{}");
    }

    #[test]
    fn side_paths_are_unique_siblings() {
        let path = Path::new("out/tables.rs");
        let a = side_path(path, "tmp");
        let b = side_path(path, "tmp");
        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(Path::new("out")));
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(&format!("tables.rs.{}-", process::id())));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn write_file_creates_dirs_and_replaces() {
        let dir = scratch_dir("write");
        let path = dir.join("nested").join("t.rs");
        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(entries(&dir.join("nested")), ["t.rs"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_file_to_directory_fails_cleanly() {
        let dir = scratch_dir("fail");
        let target = dir.join("occupied");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        assert!(write_file(&target, "data").is_err());
        assert_eq!(entries(&dir), ["occupied"]);
        assert_eq!(entries(&target), ["keep"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_rename_restores_earlier_targets() {
        let dir = scratch_dir("rollback");
        fs::create_dir_all(&dir).unwrap();
        let first = dir.join("a.rs");
        let second = dir.join("b.rs");
        fs::write(&first, "old").unwrap();

        let mut batch = FileBatch::new();
        batch.stage(&first, "new a").unwrap();
        batch.stage(&second, "new b").unwrap();
        // Losing the second temp file makes its rename fail after the
        // first target has already been replaced.
        fs::remove_file(&batch.staged[1].tmp).unwrap();
        assert!(batch.commit().is_err());

        assert_eq!(fs::read_to_string(&first).unwrap(), "old");
        assert!(!second.exists());
        assert_eq!(entries(&dir), ["a.rs"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn dropped_batch_removes_temp_files() {
        let dir = scratch_dir("drop");
        let mut batch = FileBatch::new();
        batch.stage(&dir.join("x.rs"), "x").unwrap();
        drop(batch);
        assert!(entries(&dir).is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }
}
