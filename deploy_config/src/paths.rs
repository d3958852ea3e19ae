use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTRACTS_DIRECTORY: &str = "./src/contracts/";
pub const DEFAULT_CONTRACTS_BUILD_DIRECTORY: &str = "./src/abis/";

/// Where contract sources are read from and compiled artifacts are written to,
/// both relative to the project root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    pub contracts_directory: PathBuf,
    pub contracts_build_directory: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            contracts_directory: PathBuf::from(DEFAULT_CONTRACTS_DIRECTORY),
            contracts_build_directory: PathBuf::from(DEFAULT_CONTRACTS_BUILD_DIRECTORY),
        }
    }
}

impl PathConfig {
    pub fn contracts_dir_in(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.contracts_directory)
    }

    pub fn build_dir_in(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.contracts_build_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_are_independent() {
        let mut paths = PathConfig::default();
        paths.contracts_directory = PathBuf::from("./contracts/");

        assert_eq!(paths.contracts_directory, PathBuf::from("./contracts/"));
        assert_eq!(
            paths.contracts_build_directory,
            PathBuf::from(DEFAULT_CONTRACTS_BUILD_DIRECTORY)
        );
    }

    #[test]
    fn test_directories_resolve_against_project_root() {
        let paths = PathConfig::default();
        let root = Path::new("/work/token");

        assert_eq!(
            paths.contracts_dir_in(root),
            PathBuf::from("/work/token/./src/contracts/")
        );
        assert_eq!(
            paths.build_dir_in(root),
            PathBuf::from("/work/token/./src/abis/")
        );
    }
}
