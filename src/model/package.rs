//! Packages and package set comparison.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GbpError, Result};

// category/name-version, with Gentoo's version grammar anchored at the end
static ATOM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<key>[^/\s]+/\S+?)-(?P<version>\d+(\.\d+)*[a-z]?(_(alpha|beta|pre|rc|p)\d*)*(-r\d+)?)$",
    )
    .expect("atom regex is valid")
});

/// A package atom (`category/name-version`) included in a build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Package {
    atom: String,
}

impl Package {
    /// Validate a package atom. Empty atoms are rejected.
    pub fn new(atom: impl Into<String>) -> Result<Self> {
        let atom = atom.into();
        let atom = atom.trim();
        if atom.is_empty() {
            return Err(GbpError::invalid("package atom must not be empty"));
        }
        Ok(Self {
            atom: atom.to_string(),
        })
    }

    /// The full atom string.
    pub fn atom(&self) -> &str {
        &self.atom
    }

    /// The versionless `category/name` part of the atom.
    ///
    /// Atoms without a recognisable version are their own key.
    pub fn key(&self) -> &str {
        ATOM_REGEX
            .captures(&self.atom)
            .and_then(|caps| caps.name("key"))
            .map_or(self.atom.as_str(), |m| m.as_str())
    }

    /// The version part of the atom, if present.
    pub fn version(&self) -> Option<&str> {
        ATOM_REGEX
            .captures(&self.atom)
            .and_then(|caps| caps.name("version"))
            .map(|m| m.as_str())
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.atom)
    }
}

/// A package whose version differs between two builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageChange {
    /// The versionless `category/name`.
    pub key: String,
    /// Atoms only in the left build.
    pub from: BTreeSet<Package>,
    /// Atoms only in the right build.
    pub to: BTreeSet<Package>,
}

/// Comparison of two builds' package sets.
///
/// `added`, `removed` and `changed` never share a package key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDiff {
    /// Packages whose key only exists in the right build.
    pub added: BTreeSet<Package>,
    /// Packages whose key only exists in the left build.
    pub removed: BTreeSet<Package>,
    /// Packages present in both builds with different versions.
    pub changed: Vec<PackageChange>,
}

impl PackageDiff {
    /// Compare two package sets.
    pub fn between(left: &[Package], right: &[Package]) -> Self {
        let left = group_by_key(left);
        let right = group_by_key(right);
        let keys: BTreeSet<&str> = left.keys().chain(right.keys()).copied().collect();
        let empty = BTreeSet::new();

        let mut diff = Self::default();
        for key in keys {
            let l = left.get(key).unwrap_or(&empty);
            let r = right.get(key).unwrap_or(&empty);
            let only_left: BTreeSet<Package> = l.difference(r).map(|p| (*p).clone()).collect();
            let only_right: BTreeSet<Package> = r.difference(l).map(|p| (*p).clone()).collect();

            match (only_left.is_empty(), only_right.is_empty()) {
                (true, true) => {}
                (false, true) => diff.removed.extend(only_left),
                (true, false) => diff.added.extend(only_right),
                (false, false) => diff.changed.push(PackageChange {
                    key: key.to_string(),
                    from: only_left,
                    to: only_right,
                }),
            }
        }

        diff
    }

    /// True when both package sets are identical.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

fn group_by_key(packages: &[Package]) -> BTreeMap<&str, BTreeSet<&Package>> {
    let mut groups: BTreeMap<&str, BTreeSet<&Package>> = BTreeMap::new();
    for package in packages {
        groups.entry(package.key()).or_default().insert(package);
    }
    groups
}
