use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region-name match rule: a literal name or the `*` wildcard
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionPattern {
    Any,
    Exact(String),
}

impl RegionPattern {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            RegionPattern::Any => true,
            RegionPattern::Exact(n) => n == name,
        }
    }
}

impl From<&str> for RegionPattern {
    fn from(value: &str) -> Self {
        if value == "*" {
            RegionPattern::Any
        } else {
            RegionPattern::Exact(value.to_string())
        }
    }
}

impl From<String> for RegionPattern {
    fn from(value: String) -> Self {
        if value == "*" {
            RegionPattern::Any
        } else {
            RegionPattern::Exact(value)
        }
    }
}

impl From<RegionPattern> for String {
    fn from(pattern: RegionPattern) -> Self {
        pattern.to_string()
    }
}

impl FromStr for RegionPattern {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RegionPattern::from(s))
    }
}

impl fmt::Display for RegionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionPattern::Any => f.write_str("*"),
            RegionPattern::Exact(n) => f.write_str(n),
        }
    }
}

/// Settings for one resolution call
///
/// Passed explicitly to [`resolve`](super::resolve) so one resolver can serve
/// calls with different settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    pub include: Vec<RegionPattern>,
    pub exclude: Vec<RegionPattern>,
    /// Copy parent exports into child regions
    pub inheritance_enabled: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            include: vec![RegionPattern::Any],
            exclude: Vec::new(),
            inheritance_enabled: true,
        }
    }
}

impl ResolveConfig {
    pub fn with_include<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RegionPattern>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<RegionPattern>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inheritance(mut self, enabled: bool) -> Self {
        self.inheritance_enabled = enabled;
        self
    }

    /// A region is included when an include pattern matches it and no
    /// exclude pattern names it exactly
    pub fn is_region_included(&self, name: &str) -> bool {
        let included = self.include.iter().any(|p| p.matches(name));
        included
            && !self
                .exclude
                .iter()
                .any(|p| matches!(p, RegionPattern::Exact(n) if n == name))
    }
}

/// Classpath filter glob for a package
///
/// `com.example.api` becomes `*/com/example/api/*` (strict) or
/// `**/com/example/api/*`.
pub fn package_to_scanner_filter(package: &str, strict: bool) -> String {
    format!(
        "{}/{}/*",
        if strict { "*" } else { "**" },
        package.replace('.', "/")
    )
}
