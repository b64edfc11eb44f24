//! Line-oriented properties file parsing.
//!
//! File markers (`file:/etc/deploy.env@environment`) point at small text files
//! of `key=value` lines. This module reads them.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// Parses properties files into a map.
///
/// # Supported Formats
///
/// - Equals separator: `environment=L2`
/// - Colon separator: `environment: L2`
/// - Whitespace separator: `environment L2`
/// - Comments: `# comment` or `! comment`
/// - Continuation: an odd run of trailing `\` joins the next line
/// - Empty: `environment=`
///
/// # Example
///
/// ```
/// use hostenv::resolver::PropertiesFileParser;
///
/// let content = r#"
/// # Deployment marker
/// environment=L2
/// unit: L1
/// "#;
///
/// let props = PropertiesFileParser::parse(content);
/// assert_eq!(props.get("environment"), Some(&"L2".to_string()));
/// assert_eq!(props.get("unit"), Some(&"L1".to_string()));
/// ```
pub struct PropertiesFileParser;

impl PropertiesFileParser {
    /// Parse properties content into a map. Later keys override earlier ones.
    pub fn parse(content: &str) -> HashMap<String, String> {
        let mut props = HashMap::new();
        let mut pending = String::new();

        for line in content.lines() {
            let line = line.trim_start();

            // Skip empty lines and comments, unless continuing a value
            if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
            {
                continue;
            }

            if continues(line) {
                pending.push_str(&line[..line.len() - 1]);
                continue;
            }

            pending.push_str(line);
            if let Some((key, value)) = Self::parse_line(&pending) {
                props.insert(key, value);
            }
            pending.clear();
        }

        if let Some((key, value)) = Self::parse_line(&pending) {
            props.insert(key, value);
        }

        props
    }

    /// Parse a single logical line.
    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let split = line
            .find(|c: char| c == '=' || c == ':' || c.is_whitespace())
            .unwrap_or(line.len());
        let key = line[..split].trim_end().to_string();

        let rest = line[split..].trim_start();
        let value = rest
            .strip_prefix('=')
            .or_else(|| rest.strip_prefix(':'))
            .unwrap_or(rest)
            .trim()
            .to_string();

        Some((key, value))
    }

    /// Load and parse a properties file from a path.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }
}

/// A line continues only when it ends in an odd number of backslashes;
/// an even run is escaped backslashes.
fn continues(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_simple_file() {
        let props = PropertiesFileParser::parse("environment=L2\n");
        assert_eq!(props.get("environment"), Some(&"L2".to_string()));
    }

    #[test]
    fn parses_each_separator() {
        let content = "a=1\nb: 2\nc 3\nd = 4\n";
        let props = PropertiesFileParser::parse(content);

        assert_eq!(props.get("a"), Some(&"1".to_string()));
        assert_eq!(props.get("b"), Some(&"2".to_string()));
        assert_eq!(props.get("c"), Some(&"3".to_string()));
        assert_eq!(props.get("d"), Some(&"4".to_string()));
    }

    #[test]
    fn skips_comments() {
        let content = r#"
# hash comment
! bang comment
environment=L3
"#;
        let props = PropertiesFileParser::parse(content);

        assert_eq!(props.len(), 1);
        assert_eq!(props.get("environment"), Some(&"L3".to_string()));
    }

    #[test]
    fn handles_empty_values_and_bare_keys() {
        let props = PropertiesFileParser::parse("empty=\nbare\n");
        assert_eq!(props.get("empty"), Some(&"".to_string()));
        assert_eq!(props.get("bare"), Some(&"".to_string()));
    }

    #[test]
    fn values_keep_later_separators() {
        let props = PropertiesFileParser::parse("url=https://example.com?a=b\n");
        assert_eq!(
            props.get("url"),
            Some(&"https://example.com?a=b".to_string())
        );
    }

    #[test]
    fn joins_continuation_lines() {
        let content = "hosts=alpha,\\\n    beta\nnext=1\n";
        let props = PropertiesFileParser::parse(content);

        assert_eq!(props.get("hosts"), Some(&"alpha,beta".to_string()));
        assert_eq!(props.get("next"), Some(&"1".to_string()));
    }

    #[test]
    fn escaped_trailing_backslash_does_not_continue() {
        let content = "path=C:\\\\\nnext=1\nodd=a\\\\\\\n  b\n";
        let props = PropertiesFileParser::parse(content);

        assert_eq!(props.get("path"), Some(&"C:\\\\".to_string()));
        assert_eq!(props.get("next"), Some(&"1".to_string()));
        assert_eq!(props.get("odd"), Some(&"a\\\\b".to_string()));
    }

    #[test]
    fn later_keys_override() {
        let props = PropertiesFileParser::parse("environment=L1\nenvironment=L2\n");
        assert_eq!(props.get("environment"), Some(&"L2".to_string()));
    }

    #[test]
    fn load_reads_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deploy.env");
        fs::write(&path, "unit=L1\nint=L2\n").unwrap();

        let props = PropertiesFileParser::load(&path).unwrap();
        assert_eq!(props.get("int"), Some(&"L2".to_string()));
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(PropertiesFileParser::load(Path::new("/nonexistent/deploy.env")).is_err());
    }
}
