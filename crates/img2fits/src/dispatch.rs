//! Target resolution and fan-out to the converter.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::codec::Codecs;
use crate::convert::{ConversionReport, Converter};
use crate::error::{Error, Result};
use crate::options::{ConvertOptions, ExtensionSet};

/// A resolved conversion target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Directory(PathBuf),
}

impl Target {
    /// Classify an existing path. Anything that is neither a regular file nor
    /// a directory (after following symlinks) is [`Error::InvalidTarget`].
    pub fn classify(path: &Path) -> Result<Self> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(Target::File(path.to_path_buf())),
            Ok(meta) if meta.is_dir() => Ok(Target::Directory(path.to_path_buf())),
            _ => Err(Error::InvalidTarget(path.to_path_buf())),
        }
    }
}

/// Expand `~`, make absolute against the working directory and normalize
/// `.`/`..` lexically. Symlinks are not resolved.
pub fn resolve_target(raw: &str) -> Result<PathBuf> {
    let expanded = expand_home(raw);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map_err(|e| Error::io(".", e))?
            .join(expanded)
    };
    Ok(normalize(&absolute))
}

/// `~` and `~/...` become the home directory. Other forms, or an unknown
/// home, are left as typed.
fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Regular files directly inside `dir` whose names match `extensions`,
/// sorted by name.
pub fn scan_directory(dir: &Path, extensions: &ExtensionSet) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        if !extensions.matches(&name) {
            debug!(name = %name.to_string_lossy(), "not an image extension, skipping");
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches)
}

/// Everything converted by one run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<ConversionReport>,
}

impl RunSummary {
    pub fn files_written(&self) -> usize {
        self.reports.iter().map(|r| r.written.len()).sum()
    }
}

pub struct Dispatcher<'a> {
    codecs: &'a Codecs,
    options: ConvertOptions,
}

impl<'a> Dispatcher<'a> {
    pub fn new(codecs: &'a Codecs, options: ConvertOptions) -> Self {
        Dispatcher { codecs, options }
    }

    /// Resolve `raw` and convert what it names.
    pub fn run(&self, raw: &str) -> Result<RunSummary> {
        let resolved = resolve_target(raw)?;
        debug!(raw, resolved = %resolved.display(), "resolved target");
        let target = Target::classify(&resolved)?;
        self.dispatch(&target)
    }

    /// A file is converted whatever its extension; a directory contributes
    /// its matching entries. The first error stops the run.
    pub fn dispatch(&self, target: &Target) -> Result<RunSummary> {
        let converter = Converter::new(self.codecs, &self.options);
        let mut summary = RunSummary::default();

        match target {
            Target::File(path) => {
                summary.reports.push(converter.convert(path)?);
            }
            Target::Directory(dir) => {
                let sources = scan_directory(dir, &self.options.extensions)?;
                info!(dir = %dir.display(), images = sources.len(), "scanning directory");
                for source in sources {
                    summary.reports.push(converter.convert(&source)?);
                }
            }
        }

        Ok(summary)
    }
}

/// Register codecs and convert `raw` with default options.
pub fn run(raw: &str) -> Result<RunSummary> {
    let codecs = Codecs::register();
    Dispatcher::new(&codecs, ConvertOptions::default()).run(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_dot_and_pops_dotdot() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn resolve_relative_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = resolve_target("some/dir/../img.png").unwrap();
        assert_eq!(resolved, cwd.join("some/img.png"));
        assert_eq!(resolve_target(".").unwrap(), normalize(&cwd));
    }

    #[test]
    fn resolve_absolute_is_kept() {
        assert_eq!(
            resolve_target("/srv/images/./a.jpg").unwrap(),
            PathBuf::from("/srv/images/a.jpg")
        );
    }

    #[test]
    fn resolve_expands_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(resolve_target("~").unwrap(), normalize(&home));
        assert_eq!(
            resolve_target("~/pics/a.png").unwrap(),
            normalize(&home.join("pics/a.png"))
        );
    }

    #[test]
    fn tilde_user_form_is_not_expanded() {
        assert_eq!(expand_home("~bob/x"), PathBuf::from("~bob/x"));
        assert_eq!(expand_home("a/~/b"), PathBuf::from("a/~/b"));
    }

    #[test]
    fn classify_file_dir_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.png");
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(Target::classify(&file).unwrap(), Target::File(file.clone()));
        assert_eq!(
            Target::classify(dir.path()).unwrap(),
            Target::Directory(dir.path().to_path_buf())
        );
        let missing = dir.path().join("missing");
        assert!(matches!(
            Target::classify(&missing),
            Err(Error::InvalidTarget(p)) if p == missing
        ));
    }

    #[test]
    fn scan_selects_matching_files_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.heic", "a.png", "notes.txt", "c.bmp", "D.JPG"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("folder.png")).unwrap();

        let found = scan_directory(dir.path(), &ExtensionSet::default()).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("a.png"), dir.path().join("b.heic")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn scan_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.png");
        std::fs::write(dir.path().join(name), b"").unwrap();

        let found = scan_directory(dir.path(), &ExtensionSet::default()).unwrap();
        assert_eq!(found, vec![dir.path().join(name)]);
    }

    #[test]
    fn scan_with_all_supported_includes_bmp() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "c.bmp", "g.gif"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let found = scan_directory(dir.path(), &ExtensionSet::all_supported()).unwrap();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn scan_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_directory(&dir.path().join("gone"), &ExtensionSet::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
