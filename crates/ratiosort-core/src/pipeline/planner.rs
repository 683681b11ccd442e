//! Destination path planning.
//!
//! Matched files land at `<root>/Ratio_<label>/<tier>/<original name>`.
//! When that name is taken, a numeric suffix is inserted before the
//! extension.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::classify::ResolutionTier;

/// What to do when the planned file name already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Try `name_1`, `name_2`, ... until a free name is found
    #[default]
    #[serde(rename = "increment")]
    Increment,
    /// Try `name_1` once and use it even if it is also taken
    #[serde(rename = "single")]
    SingleSuffix,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Increment => write!(f, "increment"),
            CollisionPolicy::SingleSuffix => write!(f, "single"),
        }
    }
}

/// Directory a matched file is sorted into.
pub fn destination_dir(dest_root: &Path, ratio_label: &str, tier: ResolutionTier) -> PathBuf {
    dest_root
        .join(format!("Ratio_{ratio_label}"))
        .join(tier.as_str())
}

/// Plan the destination path for `file_name`.
///
/// `exists` is the only filesystem access; inject a closure in tests.
pub fn plan<F>(
    dest_root: &Path,
    ratio_label: &str,
    tier: ResolutionTier,
    file_name: &Path,
    policy: CollisionPolicy,
    exists: F,
) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    let dir = destination_dir(dest_root, ratio_label, tier);
    let candidate = dir.join(file_name);
    if !exists(&candidate) {
        return candidate;
    }

    let mut index: u32 = 1;
    loop {
        let renamed = dir.join(suffixed_name(file_name, index));
        if policy == CollisionPolicy::SingleSuffix || !exists(&renamed) {
            if index > 1 {
                tracing::debug!(
                    "Resolved name collision for {:?} after {} tries",
                    file_name,
                    index
                );
            }
            return renamed;
        }
        index += 1;
    }
}

/// `photo.jpg` -> `photo_<n>.jpg`; `README` -> `README_<n>`.
///
/// The extension is whatever follows the last dot, with its case preserved.
fn suffixed_name(file_name: &Path, index: u32) -> OsString {
    let stem = file_name
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let mut name = stem;
    name.push(format!("_{index}"));
    if let Some(ext) = file_name.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn taken(paths: &[&str]) -> HashSet<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_plain_destination() {
        let path = plan(
            Path::new("/out"),
            "16x9",
            ResolutionTier::Uhd4k,
            Path::new("Sunset.JPG"),
            CollisionPolicy::Increment,
            |_| false,
        );
        assert_eq!(path, PathBuf::from("/out/Ratio_16x9/4K_UHD/Sunset.JPG"));
    }

    #[test]
    fn test_first_collision_gets_suffix() {
        let existing = taken(&["/out/Ratio_16x9/QHD_2K/a.png"]);
        for policy in [CollisionPolicy::Increment, CollisionPolicy::SingleSuffix] {
            let path = plan(
                Path::new("/out"),
                "16x9",
                ResolutionTier::Qhd2k,
                Path::new("a.png"),
                policy,
                |p| existing.contains(p),
            );
            assert_eq!(path, PathBuf::from("/out/Ratio_16x9/QHD_2K/a_1.png"));
        }
    }

    #[test]
    fn test_single_suffix_does_not_resolve_second_collision() {
        let existing = taken(&[
            "/out/Ratio_16x9/QHD_2K/a.png",
            "/out/Ratio_16x9/QHD_2K/a_1.png",
        ]);
        let path = plan(
            Path::new("/out"),
            "16x9",
            ResolutionTier::Qhd2k,
            Path::new("a.png"),
            CollisionPolicy::SingleSuffix,
            |p| existing.contains(p),
        );
        assert_eq!(path, PathBuf::from("/out/Ratio_16x9/QHD_2K/a_1.png"));
    }

    #[test]
    fn test_increment_finds_free_name() {
        let existing = taken(&[
            "/out/Ratio_32x9/QHD_2K/a.png",
            "/out/Ratio_32x9/QHD_2K/a_1.png",
            "/out/Ratio_32x9/QHD_2K/a_2.png",
        ]);
        let path = plan(
            Path::new("/out"),
            "32x9",
            ResolutionTier::Qhd2k,
            Path::new("a.png"),
            CollisionPolicy::Increment,
            |p| existing.contains(p),
        );
        assert_eq!(path, PathBuf::from("/out/Ratio_32x9/QHD_2K/a_3.png"));
    }

    #[test]
    fn test_suffix_goes_before_last_extension() {
        assert_eq!(suffixed_name(Path::new("archive.tar.gz"), 1), "archive.tar_1.gz");
        assert_eq!(suffixed_name(Path::new("README"), 2), "README_2");
        assert_eq!(suffixed_name(Path::new(".hidden"), 1), ".hidden_1");
    }

    #[test]
    fn test_destination_dir_layout() {
        assert_eq!(
            destination_dir(Path::new("Sorted_Images"), "1.778", ResolutionTier::Standard),
            PathBuf::from("Sorted_Images/Ratio_1.778/Standard_Res")
        );
    }

    #[test]
    fn test_policy_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            collision: CollisionPolicy,
        }
        let w: Wrapper = toml::from_str("collision = \"single\"").unwrap();
        assert_eq!(w.collision, CollisionPolicy::SingleSuffix);
        assert_eq!(CollisionPolicy::Increment.to_string(), "increment");
    }
}
