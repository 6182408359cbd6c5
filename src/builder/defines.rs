//! CMake cache definitions (`-D<KEY>=<VALUE>`).

use std::collections::BTreeMap;

use anyhow::{bail, Result};

/// Build type used when nothing else sets `CMAKE_BUILD_TYPE`.
pub const DEFAULT_BUILD_TYPE: &str = "RelWithDebInfo";

/// A set of CMake defines, rendered in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defines(BTreeMap<String, String>);

impl Defines {
    pub fn new() -> Self {
        Defines::default()
    }

    /// The lowest-precedence layer applied to every configure.
    pub fn defaults() -> Self {
        let mut defines = Defines::new();
        defines.set("CMAKE_BUILD_TYPE", DEFAULT_BUILD_TYPE);
        defines
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn extend(&mut self, other: &Defines) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Merge layers in order, later layers overriding earlier ones.
    pub fn layered<'a>(layers: impl IntoIterator<Item = &'a Defines>) -> Defines {
        let mut merged = Defines::new();
        for layer in layers {
            merged.extend(layer);
        }
        merged
    }

    /// Render as command-line arguments.
    pub fn to_args(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|(k, v)| format!("-D{}={}", k, v))
            .collect()
    }
}

impl From<BTreeMap<String, String>> for Defines {
    fn from(map: BTreeMap<String, String>) -> Self {
        Defines(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Defines {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Defines(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a `KEY=VALUE` pair as given on the command line.
///
/// The value may be empty or contain further `=` characters.
pub fn parse_define(s: &str) -> Result<(String, String)> {
    let Some((key, value)) = s.split_once('=') else {
        bail!("invalid define `{}`: expected KEY=VALUE", s);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("invalid define `{}`: empty key", s);
    }
    Ok((key.to_string(), value.to_string()))
}
