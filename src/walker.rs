use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};

/// Collect INI files under `paths`, respecting gitignore.
///
/// Paths given directly are always returned; files found by walking a
/// directory must have one of `extensions`.
pub fn walk_paths(paths: &[String], extensions: &[String]) -> impl Iterator<Item = io::Result<PathBuf>> {
    let mut found = vec![];

    for path in paths {
        let walker = WalkBuilder::new(path)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                    if is_file && (entry.depth() == 0 || has_extension(entry.path(), extensions)) {
                        found.push(Ok(entry.into_path()));
                    }
                }
                Err(e) => found.push(Err(io::Error::other(e.to_string()))),
            }
        }
    }

    found.into_iter()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}
