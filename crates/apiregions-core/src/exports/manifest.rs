//! JAR manifest main-section reader.
//!
//! Only the main section is read; per-entry sections after the first blank
//! line are ignored. Lines longer than 72 bytes are continued on the next
//! line, which starts with a single space.

use crate::errors::{ApiRegionsError, Result};

/// Header naming the packages a bundle exports
pub const EXPORT_PACKAGE: &str = "Export-Package";

/// Main attributes of a JAR manifest, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: Vec<(String, String)>,
}

impl Manifest {
    /// Parse manifest text
    ///
    /// `location` is only used for error messages.
    ///
    /// # Errors
    /// * `MalformedManifest` - a line without `:` separator, a continuation
    ///   line with nothing to continue, or an empty attribute name
    pub fn parse(text: &str, location: &str) -> Result<Self> {
        let malformed = |line_no: usize, reason: &str| ApiRegionsError::MalformedManifest {
            location: location.to_string(),
            reason: format!("line {}: {}", line_no, reason),
        };

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut attributes: Vec<(String, String)> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.is_empty() {
                break;
            }

            if let Some(rest) = line.strip_prefix(' ') {
                match attributes.last_mut() {
                    Some((_, value)) => value.push_str(rest),
                    None => return Err(malformed(idx + 1, "continuation without header")),
                }
                continue;
            }

            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| malformed(idx + 1, "missing ':' separator"))?;
            if name.is_empty() {
                return Err(malformed(idx + 1, "empty attribute name"));
            }
            let value = value.strip_prefix(' ').unwrap_or(value);
            attributes.push((name.to_string(), value.to_string()));
        }

        Ok(Self { attributes })
    }

    /// Attribute value by name; names compare case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `Export-Package` header, if present
    pub fn export_package(&self) -> Option<&str> {
        self.get(EXPORT_PACKAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_main_section() {
        let text = "Manifest-Version: 1.0\r\nBundle-SymbolicName: com.example.a\r\nExport-Package: com.example.a;version=\"1.0\"\r\n\r\nName: foo/Bar.class\r\nExport-Package: ignored\r\n";
        let mf = Manifest::parse(text, "a.jar").unwrap();
        assert_eq!(mf.get("bundle-symbolicname"), Some("com.example.a"));
        assert_eq!(mf.export_package(), Some("com.example.a;version=\"1.0\""));
    }

    #[test]
    fn test_continuation_lines() {
        let text = "Export-Package: com.example.a,com.exa\n mple.b;version=2\nBundle-Version: 2\n";
        let mf = Manifest::parse(text, "b.jar").unwrap();
        assert_eq!(
            mf.export_package(),
            Some("com.example.a,com.example.b;version=2")
        );
        assert_eq!(mf.get("Bundle-Version"), Some("2"));
    }

    #[test]
    fn test_missing_header() {
        let mf = Manifest::parse("Manifest-Version: 1.0\n", "c.jar").unwrap();
        assert!(mf.export_package().is_none());
    }

    #[test]
    fn test_malformed_lines() {
        assert!(Manifest::parse(" dangling\n", "d.jar").is_err());
        assert!(Manifest::parse("no separator here\n", "d.jar").is_err());
    }
}
