//! Typed, read-only view over the process environment.
//!
//! [`Environment`] is built once per invocation and never mutated. Every
//! accessor comes in up to two flavours:
//!
//! - *required* (`as_int`, `as_url`, ...) returns an [`AccessorError`] naming
//!   the key, the attempted [`ValueKind`] and the parse diagnostic when the
//!   variable is missing or malformed;
//! - *defaulted* (`as_int_or`, ...) substitutes the caller's default for any
//!   lookup or parse problem and never fails.
//!
//! # Examples
//!
//! ```
//! use envtpl::core::environment::Environment;
//!
//! let env = Environment::from_entries(["PORT=8080", "DEBUG=yes", "BROKEN"]);
//! assert_eq!(env.as_port("PORT").unwrap(), 8080);
//! assert!(env.as_bool("DEBUG").unwrap());
//! assert_eq!(env.as_int_or("WORKERS", 4), 4);
//! assert!(env.get("BROKEN").is_none());
//! ```

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::str::FromStr;
use tracing::{debug, warn};
use url::Url;

use super::error::{AccessorError, ValueKind};

/// Spellings accepted as `true`, compared case-insensitively
pub const TRUE_WORDS: [&str; 6] = ["true", "1", "yes", "on", "enable", "enabled"];

/// Spellings accepted as `false`, compared case-insensitively
pub const FALSE_WORDS: [&str; 6] = ["false", "0", "no", "off", "disable", "disabled"];

/// Scheme prepended to host:port values so they parse as URLs
const HOST_PORT_SCHEME: &str = "http://";

/// Immutable mapping from variable name to raw value.
///
/// Serializes as a plain JSON object so it can serve directly as a template
/// data context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Builds an environment from `KEY=VALUE` strings.
    ///
    /// Entries are split on the first `=`, so values may contain `=`.
    /// Entries without `=` or with an empty key are dropped; the last
    /// occurrence of a repeated key wins.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vars: HashMap<String, String> = entries
            .into_iter()
            .filter_map(|entry| {
                let (key, value) = entry.as_ref().split_once('=')?;
                (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
            })
            .collect();
        debug!(variables = vars.len(), "Built environment from entries");
        Self { vars }
    }

    /// Captures the environment of the current process.
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Builds an environment from OS-level pairs, skipping any entry that
    /// is not valid UTF-8.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) if !key.is_empty() => Some((key, value)),
                (Ok(key), Ok(_)) => {
                    debug!(key = %key, "Skipping environment entry with empty key");
                    None
                }
                (key, _) => {
                    warn!(key = ?key, "Skipping environment entry that is not valid UTF-8");
                    None
                }
            })
            .collect();
        debug!(variables = vars.len(), "Captured process environment");
        Self { vars }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Raw value of `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    fn lookup(&self, key: &str, expected: ValueKind) -> Result<&str, AccessorError> {
        self.get(key).ok_or_else(|| AccessorError::NotFound {
            key: key.to_string(),
            expected,
        })
    }

    /// The whole mapping.
    pub fn all(&self) -> &HashMap<String, String> {
        &self.vars
    }

    /// The whole mapping with keys in ascending lexical order.
    pub fn sort_all(&self) -> BTreeMap<&str, &str> {
        self.vars
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    pub fn as_string(&self, key: &str) -> Result<String, AccessorError> {
        self.lookup(key, ValueKind::String).map(str::to_string)
    }

    pub fn as_string_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Splits the value on every occurrence of `delimiter`, keeping order.
    pub fn as_string_slice(&self, key: &str, delimiter: &str) -> Result<Vec<String>, AccessorError> {
        let value = self.lookup(key, ValueKind::StringSlice)?;
        Ok(split(value, delimiter).map(str::to_string).collect())
    }

    /// Like [`as_string_slice`](Self::as_string_slice), removing any
    /// character of `cutset` from both ends of every element.
    pub fn as_string_slice_trim(
        &self,
        key: &str,
        delimiter: &str,
        cutset: &str,
    ) -> Result<Vec<String>, AccessorError> {
        let value = self.lookup(key, ValueKind::StringSlice)?;
        Ok(split(value, delimiter)
            .map(|element| element.trim_matches(|c: char| cutset.contains(c)).to_string())
            .collect())
    }

    pub fn as_bool(&self, key: &str) -> Result<bool, AccessorError> {
        let value = self.lookup(key, ValueKind::Bool)?;
        parse_bool(value).ok_or_else(|| {
            malformed(key, value, ValueKind::Bool, "unrecognized boolean spelling")
        })
    }

    pub fn as_bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(parse_bool).unwrap_or(default)
    }

    pub fn as_int(&self, key: &str) -> Result<i64, AccessorError> {
        self.parse_scalar(key, ValueKind::Int)
    }

    pub fn as_int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }

    /// Splits on `delimiter` and parses every whitespace-trimmed element.
    /// A single bad element fails the whole call.
    pub fn as_int_slice(&self, key: &str, delimiter: &str) -> Result<Vec<i64>, AccessorError> {
        self.parse_slice(key, delimiter, ValueKind::IntSlice)
    }

    pub fn as_float(&self, key: &str) -> Result<f64, AccessorError> {
        self.parse_scalar(key, ValueKind::Float)
    }

    pub fn as_float_or(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }

    pub fn as_float_slice(&self, key: &str, delimiter: &str) -> Result<Vec<f64>, AccessorError> {
        self.parse_slice(key, delimiter, ValueKind::FloatSlice)
    }

    /// Absolute URL with a non-empty scheme, normalized by the URL parser.
    pub fn as_url(&self, key: &str) -> Result<String, AccessorError> {
        let value = self.lookup(key, ValueKind::Url)?;
        let url = Url::parse(value)
            .map_err(|err| malformed(key, value, ValueKind::Url, err))?;
        if url.scheme().is_empty() {
            return Err(malformed(key, value, ValueKind::Url, "missing scheme"));
        }
        Ok(serialize_url(value, &url))
    }

    /// `host:port` pair as written; the port must be explicit and within
    /// 1-65535.
    pub fn as_host_port(&self, key: &str) -> Result<String, AccessorError> {
        let value = self.lookup(key, ValueKind::HostPort)?;
        let url = Url::parse(&format!("{HOST_PORT_SCHEME}{value}"))
            .map_err(|err| malformed(key, value, ValueKind::HostPort, err))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(malformed(key, value, ValueKind::HostPort, "missing host"));
        }
        explicit_port(value)
            .and_then(checked_port)
            .ok_or_else(|| AccessorError::PortOutOfRange {
                key: key.to_string(),
                value: value.to_string(),
                expected: ValueKind::HostPort,
            })?;
        Ok(authority(value).to_string())
    }

    pub fn as_port(&self, key: &str) -> Result<u16, AccessorError> {
        let value = self.lookup(key, ValueKind::Port)?;
        let port: i64 = value
            .parse()
            .map_err(|err| malformed(key, value, ValueKind::Port, err))?;
        checked_port(port).ok_or_else(|| AccessorError::PortOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
            expected: ValueKind::Port,
        })
    }

    /// Port with fallback. The default is validated before the lookup and
    /// is the only way this accessor can fail.
    pub fn as_port_or(&self, key: &str, default: i64) -> Result<u16, AccessorError> {
        let default =
            checked_port(default).ok_or(AccessorError::DefaultPortOutOfRange { port: default })?;
        Ok(self
            .get(key)
            .and_then(|value| value.parse::<i64>().ok())
            .and_then(checked_port)
            .unwrap_or(default))
    }

    fn parse_scalar<T>(&self, key: &str, expected: ValueKind) -> Result<T, AccessorError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.lookup(key, expected)?;
        value
            .parse()
            .map_err(|err| malformed(key, value, expected, err))
    }

    fn parse_slice<T>(
        &self,
        key: &str,
        delimiter: &str,
        expected: ValueKind,
    ) -> Result<Vec<T>, AccessorError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.lookup(key, expected)?;
        split(value, delimiter)
            .map(str::trim)
            .map(|element| {
                element
                    .parse::<T>()
                    .map_err(|err| malformed(key, element, expected, err))
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

fn malformed(key: &str, value: &str, expected: ValueKind, reason: impl ToString) -> AccessorError {
    AccessorError::Malformed {
        key: key.to_string(),
        value: value.to_string(),
        expected,
        reason: reason.to_string(),
    }
}

/// Splits on every occurrence of `delimiter`; an empty delimiter yields the
/// individual characters.
fn split<'a>(value: &'a str, delimiter: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    if delimiter.is_empty() {
        Box::new(
            value
                .char_indices()
                .map(move |(idx, c)| &value[idx..idx + c.len_utf8()]),
        )
    } else {
        Box::new(value.split(delimiter))
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    let lower = value.to_lowercase();
    if TRUE_WORDS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn checked_port(port: i64) -> Option<u16> {
    u16::try_from(port).ok().filter(|port| *port != 0)
}

/// The `host:port` part of `value`, without user info, path, query or
/// fragment.
fn authority(value: &str) -> &str {
    let authority = value.split(['/', '?', '#']).next().unwrap_or(value);
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port)
}

/// Port written after the host in a `host:port` value, if any.
///
/// Read from the raw text because the URL parser hides ports equal to the
/// scheme default.
fn explicit_port(value: &str) -> Option<i64> {
    let host_port = authority(value);
    let after_host = host_port
        .rfind(']')
        .map_or(host_port, |idx| &host_port[idx + 1..]);
    let (_, port) = after_host.rsplit_once(':')?;
    port.parse().ok()
}

/// The parser appends `/` to path-less URLs; keep the value as written.
fn serialize_url(raw: &str, url: &Url) -> String {
    let serialized = url.as_str();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() && !raw.ends_with('/')
    {
        serialized.trim_end_matches('/').to_string()
    } else {
        serialized.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_from_entries_drops_malformed() {
        let env = Environment::from_entries(["NAME=World", "INVALID_ENTRY", "=VALUE_WITHOUT_KEY"]);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("NAME"), Some("World"));
    }

    #[test]
    fn test_from_entries_splits_on_first_equals() {
        let env = Environment::from_entries(["DSN=postgres://u:p@db/app?sslmode=disable", "EMPTY="]);
        assert_eq!(env.get("DSN"), Some("postgres://u:p@db/app?sslmode=disable"));
        assert_eq!(env.get("EMPTY"), Some(""));
    }

    #[test]
    fn test_from_entries_last_wins() {
        let env = Environment::from_entries(["A=1", "A=2"]);
        assert_eq!(env.get("A"), Some("2"));
    }

    #[test]
    fn test_from_os_vars_skips_empty_key() {
        let env = Environment::from_os_vars([
            (OsString::from("HOME"), OsString::from("/root")),
            (OsString::from(""), OsString::from("orphan")),
        ]);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("HOME"), Some("/root"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let env = env(&[("Key", "value")]);
        assert!(env.as_string("KEY").is_err());
        assert_eq!(env.as_string("Key").unwrap(), "value");
    }

    #[test]
    fn test_as_string() {
        let env = env(&[("KEY", "value")]);
        assert_eq!(env.as_string("KEY").unwrap(), "value");
        assert_eq!(
            env.as_string("NONEXISTENT").unwrap_err(),
            AccessorError::NotFound {
                key: "NONEXISTENT".to_string(),
                expected: ValueKind::String,
            }
        );
        assert_eq!(env.as_string_or("KEY", "default"), "value");
        assert_eq!(env.as_string_or("NONEXISTENT", "default"), "default");
    }

    #[test]
    fn test_as_string_slice() {
        let env = env(&[("COMMA_LIST", "a,b,c"), ("COLON_LIST", "x:y:z"), ("EMPTY", "")]);
        assert_eq!(env.as_string_slice("COMMA_LIST", ",").unwrap(), ["a", "b", "c"]);
        assert_eq!(env.as_string_slice("COLON_LIST", ":").unwrap(), ["x", "y", "z"]);
        assert_eq!(env.as_string_slice("EMPTY", ",").unwrap(), [""]);
        assert_eq!(env.as_string_slice("COMMA_LIST", "").unwrap(), ["a", ",", "b", ",", "c"]);
        assert!(env.as_string_slice("NONEXISTENT", ",").is_err());
    }

    #[test]
    fn test_as_string_slice_trim() {
        let env = env(&[("SPACES", " a , b ,c "), ("QUOTES", r#""x","y","z""#)]);
        assert_eq!(env.as_string_slice_trim("SPACES", ",", " ").unwrap(), ["a", "b", "c"]);
        assert_eq!(env.as_string_slice_trim("QUOTES", ",", "\"").unwrap(), ["x", "y", "z"]);
        assert!(env.as_string_slice_trim("NONEXISTENT", ",", " ").is_err());
    }

    #[test]
    fn test_as_bool_spellings() {
        for word in TRUE_WORDS.iter().chain(&["TRUE", "Yes", "ON", "Enabled"]) {
            let env = env(&[("FLAG", *word)]);
            assert!(env.as_bool("FLAG").unwrap(), "{word} should be true");
            assert!(env.as_bool_or("FLAG", false), "{word} should be true");
        }
        for word in FALSE_WORDS.iter().chain(&["FALSE", "No", "OFF", "Disabled"]) {
            let env = env(&[("FLAG", *word)]);
            assert!(!env.as_bool("FLAG").unwrap(), "{word} should be false");
            assert!(!env.as_bool_or("FLAG", true), "{word} should be false");
        }
    }

    #[test]
    fn test_as_bool_invalid() {
        let env = env(&[("INVALID", "maybe")]);
        let err = env.as_bool("INVALID").unwrap_err();
        assert!(matches!(err, AccessorError::Malformed { expected: ValueKind::Bool, .. }));
        assert!(env.as_bool("NONEXISTENT").is_err());
        assert!(env.as_bool_or("INVALID", true));
        assert!(!env.as_bool_or("NONEXISTENT", false));
    }

    #[test]
    fn test_as_int() {
        let env = env(&[("POSITIVE", "123"), ("NEGATIVE", "-42"), ("ZERO", "0"), ("INVALID", "abc")]);
        assert_eq!(env.as_int("POSITIVE").unwrap(), 123);
        assert_eq!(env.as_int("NEGATIVE").unwrap(), -42);
        assert_eq!(env.as_int("ZERO").unwrap(), 0);

        let err = env.as_int("INVALID").unwrap_err();
        assert_eq!(err.key(), Some("INVALID"));
        assert_eq!(err.expected(), ValueKind::Int);
        assert!(err.to_string().contains("invalid digit"));
        assert!(env.as_int("NONEXISTENT").is_err());
    }

    #[test]
    fn test_as_int_or() {
        let env = env(&[("VALID", "123"), ("INVALID", "12.5")]);
        assert_eq!(env.as_int_or("VALID", 999), 123);
        assert_eq!(env.as_int_or("INVALID", 999), 999);
        assert_eq!(env.as_int_or("NONEXISTENT", 999), 999);
    }

    #[test]
    fn test_as_int_slice() {
        let env = env(&[("VALID", "1,2,3"), ("SPACES", " 4, 5 ,6 "), ("MIXED", "7, invalid, 9")]);
        assert_eq!(env.as_int_slice("VALID", ",").unwrap(), [1, 2, 3]);
        assert_eq!(env.as_int_slice("SPACES", ",").unwrap(), [4, 5, 6]);

        let err = env.as_int_slice("MIXED", ",").unwrap_err();
        assert!(matches!(
            err,
            AccessorError::Malformed { ref value, expected: ValueKind::IntSlice, .. } if value == "invalid"
        ));
        assert!(env.as_int_slice("NONEXISTENT", ",").is_err());
    }

    #[test]
    fn test_as_float() {
        let env = env(&[("POSITIVE", "123.123"), ("NEGATIVE", "-42.24"), ("ZERO", "0"), ("INVALID", "abc")]);
        assert_eq!(env.as_float("POSITIVE").unwrap(), 123.123);
        assert_eq!(env.as_float("NEGATIVE").unwrap(), -42.24);
        assert_eq!(env.as_float("ZERO").unwrap(), 0.0);
        assert!(env.as_float("INVALID").is_err());
        assert!(env.as_float("NONEXISTENT").is_err());

        assert_eq!(env.as_float_or("POSITIVE", 999.1), 123.123);
        assert_eq!(env.as_float_or("INVALID", 999.1), 999.1);
        assert_eq!(env.as_float_or("NONEXISTENT", 999.1), 999.1);
    }

    #[test]
    fn test_as_float_slice() {
        let env = env(&[("VALID", "1.1,2.2,3.3"), ("SPACES", " 4.4 , 5.5,6.6"), ("MIXED", "1.0,x")]);
        assert_eq!(env.as_float_slice("VALID", ",").unwrap(), [1.1, 2.2, 3.3]);
        assert_eq!(env.as_float_slice("SPACES", ",").unwrap(), [4.4, 5.5, 6.6]);
        assert!(env.as_float_slice("MIXED", ",").is_err());
        assert!(env.as_float_slice("NONEXISTENT", ",").is_err());
    }

    #[test]
    fn test_as_url() {
        let env = env(&[
            ("VALID_URL", "http://example.com"),
            ("WITH_PATH", "https://example.com/api/v1?x=1"),
            ("TRAILING", "http://example.com/"),
            ("INVALID_URL", "invalid-url"),
        ]);
        assert_eq!(env.as_url("VALID_URL").unwrap(), "http://example.com");
        assert_eq!(env.as_url("WITH_PATH").unwrap(), "https://example.com/api/v1?x=1");
        assert_eq!(env.as_url("TRAILING").unwrap(), "http://example.com/");

        let err = env.as_url("INVALID_URL").unwrap_err();
        assert!(matches!(err, AccessorError::Malformed { expected: ValueKind::Url, .. }));
        assert!(env.as_url("NONEXISTENT").is_err());
    }

    #[test]
    fn test_as_host_port() {
        let env = env(&[
            ("VALID", "localhost:8080"),
            ("DEFAULT_HTTP", "example.com:80"),
            ("IPV6", "[::1]:5432"),
            ("TOO_LARGE", "invalid-host-port:999999"),
            ("SPECIAL", "inva lid:80"),
            ("NO_PORT", "localhost"),
            ("ZERO_PORT", "localhost:0"),
            ("AS_WRITTEN", "EXAMPLE.com:0080"),
            ("WITH_EXTRAS", "user@db.internal:5432/app"),
        ]);
        assert_eq!(env.as_host_port("VALID").unwrap(), "localhost:8080");
        assert_eq!(env.as_host_port("DEFAULT_HTTP").unwrap(), "example.com:80");
        assert_eq!(env.as_host_port("IPV6").unwrap(), "[::1]:5432");
        assert_eq!(env.as_host_port("AS_WRITTEN").unwrap(), "EXAMPLE.com:0080");
        assert_eq!(env.as_host_port("WITH_EXTRAS").unwrap(), "db.internal:5432");
        assert!(env.as_host_port("TOO_LARGE").is_err());
        assert!(env.as_host_port("SPECIAL").is_err());
        assert!(matches!(
            env.as_host_port("NO_PORT").unwrap_err(),
            AccessorError::PortOutOfRange { expected: ValueKind::HostPort, .. }
        ));
        assert!(env.as_host_port("ZERO_PORT").is_err());
        assert!(env.as_host_port("NONEXISTENT").is_err());
    }

    #[test]
    fn test_as_port() {
        let env = env(&[
            ("VALID_PORT", "8080"),
            ("MIN", "1"),
            ("MAX", "65535"),
            ("INVALID_PORT1", "http"),
            ("INVALID_PORT2", "65536"),
            ("ZERO", "0"),
            ("NEGATIVE", "-1"),
        ]);
        assert_eq!(env.as_port("VALID_PORT").unwrap(), 8080);
        assert_eq!(env.as_port("MIN").unwrap(), 1);
        assert_eq!(env.as_port("MAX").unwrap(), 65535);
        assert!(matches!(
            env.as_port("INVALID_PORT1").unwrap_err(),
            AccessorError::Malformed { .. }
        ));
        for key in ["INVALID_PORT2", "ZERO", "NEGATIVE"] {
            assert!(matches!(
                env.as_port(key).unwrap_err(),
                AccessorError::PortOutOfRange { .. }
            ));
        }
        assert!(env.as_port("NONEXISTENT").is_err());
    }

    #[test]
    fn test_as_port_or() {
        let env = env(&[("VALID_PORT", "8080"), ("INVALID_PORT", "http"), ("OUT_OF_RANGE", "70000")]);
        assert_eq!(env.as_port_or("VALID_PORT", 999).unwrap(), 8080);
        assert_eq!(env.as_port_or("INVALID_PORT", 999).unwrap(), 999);
        assert_eq!(env.as_port_or("OUT_OF_RANGE", 999).unwrap(), 999);
        assert_eq!(env.as_port_or("NONEXISTENT", 999).unwrap(), 999);
    }

    #[test]
    fn test_as_port_or_rejects_bad_default() {
        let env = env(&[("VALID_PORT", "8080")]);
        for default in [0, -1, 65536] {
            assert_eq!(
                env.as_port_or("VALID_PORT", default).unwrap_err(),
                AccessorError::DefaultPortOutOfRange { port: default }
            );
        }
    }

    #[test]
    fn test_sort_all() {
        let env = env(&[("B", "2"), ("A", "1"), ("C", "3")]);
        let keys: Vec<&str> = env.sort_all().into_keys().collect();
        assert_eq!(keys, ["A", "B", "C"]);
        assert_eq!(env.all().len(), 3);
    }

    #[test]
    fn test_accessors_do_not_mutate() {
        let env = env(&[("A", "1"), ("B", "x")]);
        let before = env.clone();
        let _ = env.as_int("B");
        let _ = env.as_port_or("A", 0);
        let _ = env.as_string_slice("A", ",");
        assert_eq!(env, before);
    }

    #[test]
    fn test_serializes_as_object() {
        let env = env(&[("NAME", "World")]);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json, serde_json::json!({"NAME": "World"}));
    }
}
