//! Source-control provider resolution
//!
//! Classifies a repository URL by its host so the matching status driver
//! can be picked, and extracts the `org/repo` path providers address
//! repositories by.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Result, TrackerError, UrlError};

/// Hosted providers matched out of the box
const KNOWN_HOSTS: &[(&str, Driver)] = &[
    ("github.com", Driver::Github),
    ("gitlab.com", Driver::Gitlab),
    ("bitbucket.org", Driver::Bitbucket),
];

/// Provider-specific status driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Github,
    Gitlab,
    Bitbucket,
}

impl Driver {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Bitbucket => "bitbucket",
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(Self::Github),
            "gitlab" => Ok(Self::Gitlab),
            "bitbucket" => Ok(Self::Bitbucket),
            other => Err(TrackerError::InvalidConfig(format!(
                "unknown driver {:?}, expected one of github, gitlab, bitbucket",
                other
            ))),
        }
    }
}

/// Exact-domain lookup table from host to driver
///
/// Hosts match only when the whole lower-cased host equals a registered
/// domain; `gitlab`, `gitlab.org2` and `gitlab.a.b` never match `gitlab.com`.
#[derive(Debug, Clone)]
pub struct DriverTable {
    hosts: HashMap<String, Driver>,
}

impl DriverTable {
    /// An empty table
    pub fn empty() -> Self {
        Self {
            hosts: HashMap::new(),
        }
    }

    /// Register a fully-qualified domain, replacing any previous mapping
    pub fn with_host(mut self, domain: impl AsRef<str>, driver: Driver) -> Self {
        self.hosts
            .insert(domain.as_ref().trim().to_ascii_lowercase(), driver);
        self
    }

    /// Number of registered domains
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Resolve the driver for a repository URL
    ///
    /// # Errors
    /// - `MalformedUrl` if the URL does not parse
    /// - `UnknownHost` if the host is missing or not registered
    pub fn resolve(&self, repo_url: &str) -> Result<Driver> {
        let parsed = parse_url(repo_url)?;
        parsed
            .host_str()
            .map(str::to_ascii_lowercase)
            .and_then(|host| self.hosts.get(&host).copied())
            .ok_or_else(|| TrackerError::UnknownHost(repo_url.to_string()))
    }
}

impl Default for DriverTable {
    fn default() -> Self {
        KNOWN_HOSTS
            .iter()
            .fold(Self::empty(), |table, (domain, driver)| {
                table.with_host(domain, *driver)
            })
    }
}

/// Resolve the driver for a repository URL against the built-in table
pub fn resolve_driver(repo_url: &str) -> Result<Driver> {
    DriverTable::default().resolve(repo_url)
}

/// Extract the repository path (`org/repo`, `org/group/repo`) from a URL
///
/// The path is taken as written and percent-decoded once; dot segments are
/// not resolved.
///
/// # Errors
/// - `MalformedUrl` if the URL does not parse
/// - `NoRepoPath` if the URL has no hierarchical path, or it is empty or `/`
pub fn extract_repo_path(repo_url: &str) -> Result<String> {
    let parsed = parse_url(repo_url)?;
    if parsed.cannot_be_a_base() {
        return Err(TrackerError::NoRepoPath(repo_url.to_string()));
    }

    let path = raw_path(repo_url);
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Err(TrackerError::NoRepoPath(repo_url.to_string()));
    }

    Ok(percent_decode_str(path).decode_utf8_lossy().into_owned())
}

fn parse_url(repo_url: &str) -> Result<Url> {
    let parsed = Url::parse(repo_url).map_err(|e| TrackerError::malformed_url(repo_url, e))?;
    check_escapes(repo_url).map_err(|e| TrackerError::malformed_url(repo_url, e))?;
    Ok(parsed)
}

/// Reject malformed `%` escapes before the query, and any escape in a host name
///
/// Bracketed IPv6 literals are exempt so zone ids (`%25eth0`) still pass.
fn check_escapes(repo_url: &str) -> std::result::Result<(), UrlError> {
    let end = repo_url.find(['?', '#']).unwrap_or(repo_url.len());
    let head = &repo_url[..end];
    let bytes = head.as_bytes();
    for (i, _) in head.match_indices('%') {
        let valid = matches!(
            bytes.get(i + 1..i + 3),
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
        );
        if !valid {
            return Err(UrlError::InvalidEscape(escape_at(head, i)));
        }
    }

    if let Some(authority) = raw_authority(repo_url) {
        let host = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host)| host);
        if !host.starts_with('[') {
            if let Some(i) = host.find('%') {
                return Err(UrlError::InvalidEscape(escape_at(host, i)));
            }
        }
    }

    Ok(())
}

fn escape_at(s: &str, i: usize) -> String {
    s[i..].chars().take(3).collect()
}

/// Split `scheme:` off the trimmed input, returning what follows it
fn after_scheme(repo_url: &str) -> &str {
    let s = repo_url.trim_matches(|c: char| c <= ' ');
    s.split_once(':').map_or(s, |(_, rest)| rest)
}

/// The `//authority` component as written, if present
fn raw_authority(repo_url: &str) -> Option<&str> {
    let rest = after_scheme(repo_url).strip_prefix("//")?;
    let end = rest.find(['/', '\\', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// The path component as written, without query or fragment
fn raw_path(repo_url: &str) -> &str {
    let mut rest = after_scheme(repo_url);
    if let Some(authority) = raw_authority(repo_url) {
        rest = &rest[2 + authority.len()..];
    }
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_driver() {
        let cases = [
            ("http://github.com/", Driver::Github),
            ("http://github.com/foo/bar", Driver::Github),
            ("https://githuB.com/foo/bar.git", Driver::Github),
            ("http://githuB.com/foo/bar", Driver::Github),
            ("http://gitlab.com/foo/bar.git2", Driver::Gitlab),
            ("https://bitbucket.org/team/repo", Driver::Bitbucket),
        ];

        for (url, want) in cases {
            assert_eq!(resolve_driver(url).unwrap(), want, "{}", url);
        }
    }

    #[test]
    fn test_resolve_driver_requires_exact_domain() {
        let urls = [
            "http://gitlab/foo/bar/",
            "https://gitlab.a.b/foo/bar/bar",
            "https://gitlab.org2/f.b/bar.git",
            "https://github.com.evil.example/foo/bar",
            "https://api.github.com/foo/bar",
        ];

        for url in urls {
            let err = resolve_driver(url).unwrap_err();
            assert!(matches!(err, TrackerError::UnknownHost(_)), "{}", url);
            assert_eq!(
                err.to_string(),
                format!("unable to determine type of Git host from: {}", url)
            );
        }
    }

    #[test]
    fn test_resolve_driver_without_host() {
        let err = resolve_driver("file:///srv/git/repo.git").unwrap_err();
        assert!(matches!(err, TrackerError::UnknownHost(_)));
    }

    #[test]
    fn test_resolve_driver_malformed_url() {
        let err = resolve_driver("github.com/foo/bar").unwrap_err();
        assert!(matches!(err, TrackerError::MalformedUrl { .. }));
    }

    #[test]
    fn test_custom_hosts() {
        let table = DriverTable::default().with_host("GitLab.Example.COM", Driver::Gitlab);
        assert_eq!(table.len(), 4);

        assert_eq!(
            table.resolve("https://gitlab.example.com/org/repo").unwrap(),
            Driver::Gitlab
        );
        assert_eq!(
            table.resolve("https://github.com/tektoncd/triggers").unwrap(),
            Driver::Github
        );
        assert!(table.resolve("https://example.com/org/repo").is_err());
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = DriverTable::empty();
        assert!(table.is_empty());
        assert!(matches!(
            table.resolve("https://github.com/foo/bar"),
            Err(TrackerError::UnknownHost(_))
        ));
    }

    #[test]
    fn test_driver_from_str() {
        assert_eq!("github".parse::<Driver>().unwrap(), Driver::Github);
        assert_eq!("GitLab".parse::<Driver>().unwrap(), Driver::Gitlab);
        assert!("gitea".parse::<Driver>().is_err());
        assert_eq!(Driver::Bitbucket.to_string(), "bitbucket");
    }

    #[test]
    fn test_extract_repo_path() {
        let cases = [
            ("https://github.com/tektoncd/triggers", "tektoncd/triggers"),
            ("https://gitlab.com/org/group/repo", "org/group/repo"),
            ("https://github.com/tektoncd/triggers.git", "tektoncd/triggers.git"),
            ("https://gitlab.com/org/repo/", "org/repo/"),
        ];

        for (url, want) in cases {
            assert_eq!(extract_repo_path(url).unwrap(), want, "{}", url);
        }
    }

    #[test]
    fn test_extract_repo_path_keeps_path_as_written() {
        let cases = [
            ("https://github.com/org/./x/../repo", "org/./x/../repo"),
            ("https://github.com/org/my%20repo", "org/my repo"),
            ("https://github.com/org/my repo", "org/my repo"),
            ("https://github.com/org/repo?ref=main#readme", "org/repo"),
            ("https://user@github.com:443/org/repo", "org/repo"),
        ];

        for (url, want) in cases {
            assert_eq!(extract_repo_path(url).unwrap(), want, "{}", url);
        }
    }

    #[test]
    fn test_extract_repo_path_without_path() {
        for url in ["https://github.com/", "https://github.com"] {
            let err = extract_repo_path(url).unwrap_err();
            assert!(matches!(err, TrackerError::NoRepoPath(_)), "{}", url);
            assert_eq!(
                err.to_string(),
                format!("could not determine repo from URL: {}", url)
            );
        }
    }

    #[test]
    fn test_extract_repo_path_opaque_url() {
        let err = extract_repo_path("mailto:foo").unwrap_err();
        assert!(matches!(err, TrackerError::NoRepoPath(_)));
        assert_eq!(
            err.to_string(),
            "could not determine repo from URL: mailto:foo"
        );
    }

    #[test]
    fn test_extract_repo_path_invalid_url() {
        for url in ["http://192.168.0.%zz/test/repo", "http://[::1/test/repo"] {
            let parse_error = Url::parse(url).unwrap_err();

            let err = extract_repo_path(url).unwrap_err();
            assert!(matches!(err, TrackerError::MalformedUrl { .. }), "{}", url);

            let msg = err.to_string();
            assert!(msg.starts_with("failed to parse repo URL"));
            assert!(msg.contains(&parse_error.to_string()));
        }
    }

    #[test]
    fn test_extract_repo_path_escape_in_host() {
        let url = "http://192.168.0.%31/test/repo";

        let err = extract_repo_path(url).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::MalformedUrl {
                source: UrlError::InvalidEscape(_),
                ..
            }
        ));
        assert!(err.to_string().contains(r#"invalid URL escape "%31""#));

        assert!(matches!(
            resolve_driver(url),
            Err(TrackerError::MalformedUrl { .. })
        ));
    }

    #[test]
    fn test_extract_repo_path_bad_escape_in_path() {
        let err = extract_repo_path("https://github.com/org/re%zzpo").unwrap_err();
        assert!(matches!(
            err,
            TrackerError::MalformedUrl {
                source: UrlError::InvalidEscape(ref escape),
                ..
            } if escape == "%zz"
        ));
    }
}
