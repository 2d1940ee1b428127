use codegraph_syntax::read_package_clause;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory → package name, from package clauses only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMap {
    packages: BTreeMap<PathBuf, String>,
}

impl PackageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the package clause of every file
    ///
    /// Unreadable files and files without a clause are skipped. When files of
    /// one directory disagree, the last one wins.
    pub fn discover<P: AsRef<Path>>(files: &[P]) -> Self {
        let mut map = Self::new();
        for file in files {
            let file = file.as_ref();
            match read_package_clause(file) {
                Ok(package) => map.record(file, package),
                Err(e) => log::warn!("Skipping {} during package discovery: {e}", file.display()),
            }
        }
        log::info!("Discovered {} package directories", map.len());
        map
    }

    /// Record the package of the directory containing `file`
    pub fn record(&mut self, file: &Path, package: impl Into<String>) {
        let dir = file.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        let package = package.into();
        if let Some(previous) = self.packages.insert(dir, package.clone()) {
            if previous != package {
                log::debug!(
                    "{} declares package {package}, replacing {previous}",
                    file.display()
                );
            }
        }
    }

    /// Package of the directory containing `file`
    pub fn package_for(&self, file: &Path) -> Option<&str> {
        let dir = file.parent().unwrap_or_else(|| Path::new(""));
        self.packages.get(dir).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn maps_directories_to_packages_and_skips_broken_files() {
        let temp = TempDir::new().unwrap();
        let bank = temp.path().join("bank");
        fs::create_dir(&bank).unwrap();

        let main = temp.path().join("main.go");
        let account = bank.join("account.go");
        let broken = bank.join("broken.go");
        fs::write(&main, "package main\n\nfunc main() {}\n").unwrap();
        fs::write(&account, "// Package bank.\npackage bank\n").unwrap();
        fs::write(&broken, "func nope() {}\n").unwrap();

        let map = PackageMap::discover(&[main.clone(), account.clone(), broken]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.package_for(&main), Some("main"));
        assert_eq!(map.package_for(&account), Some("bank"));
        assert_eq!(map.package_for(&bank.join("other.go")), Some("bank"));
    }

    #[test]
    fn last_file_in_directory_wins() {
        let mut map = PackageMap::new();
        map.record(Path::new("/p/a.go"), "first");
        map.record(Path::new("/p/b.go"), "second");

        assert_eq!(map.package_for(Path::new("/p/c.go")), Some("second"));
    }
}
