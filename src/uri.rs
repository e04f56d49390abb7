//! Generic URI decomposition and serialization.
//!
//! Splits `scheme:[//[user[:pass]@]host[:port]][/path][?query][#fragment]`
//! into its components, or `scheme:opaque[?query][#fragment]` when the text
//! after the scheme does not start with `/`.

use std::borrow::Cow;

use percent_encoding::{
    AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};

use crate::error::{DburlError, DburlResult};

/// Characters escaped inside userinfo (everything but RFC 3986 unreserved).
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Characters escaped inside a path.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside a registered host name.
const HOST: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']');

/// Username and optional password of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    /// The username (may be empty).
    pub username: String,
    /// The password, if one was given.
    pub password: Option<String>,
}

impl UserInfo {
    /// Create userinfo with a username only.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: None,
        }
    }

    /// Create userinfo with a username and password.
    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
        }
    }
}

/// How a password is written when a URL is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PasswordEncoding {
    /// Escaped once, for handing to a driver.
    Driver,
    /// Escaped so that the double decode of [`escape_password`] restores it.
    Reparse,
}

/// The decomposed components of a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Parts {
    /// Scheme as written, including any `+transport` suffix.
    pub scheme: String,
    pub user: Option<UserInfo>,
    /// Decoded host; IPv6 literals keep their brackets.
    pub host: String,
    pub port: Option<u16>,
    /// Decoded path.
    pub path: String,
    /// Raw opaque segment.
    pub opaque: String,
    pub raw_query: String,
    /// Raw fragment.
    pub fragment: Option<String>,
}

impl Parts {
    /// Host without IPv6 brackets.
    pub fn hostname(&self) -> &str {
        self.host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host)
    }

    /// Port as a string, empty when absent.
    pub fn port_str(&self) -> String {
        self.port.map(|p| p.to_string()).unwrap_or_default()
    }

    /// `host[:port]`.
    pub fn host_port(&self) -> String {
        join_host_port(&self.host, &self.port_str())
    }

    /// Serialize under `scheme`; an empty scheme omits the `scheme:` prefix.
    pub fn serialize_as(&self, scheme: &str, encoding: PasswordEncoding) -> String {
        let mut out = String::new();
        if !scheme.is_empty() {
            out.push_str(scheme);
            out.push(':');
        }

        if !self.opaque.is_empty() {
            out.push_str(&self.opaque);
        } else {
            let host_port = join_host_port(&encode_host(&self.host), &self.port_str());
            if !host_port.is_empty() || !self.path.is_empty() || self.user.is_some() {
                out.push_str("//");
            }
            if let Some(user) = &self.user {
                out.push_str(&encode_userinfo(&user.username));
                if let Some(pass) = &user.password {
                    out.push(':');
                    match encoding {
                        PasswordEncoding::Driver => out.push_str(&encode_userinfo(pass)),
                        PasswordEncoding::Reparse => {
                            out.push_str(&encode_password_for_reparse(pass))
                        }
                    }
                }
                out.push('@');
            }
            out.push_str(&host_port);
            if !self.path.is_empty() && !self.path.starts_with('/') && !host_port.is_empty() {
                out.push('/');
            }
            out.push_str(&encode_path(&self.path));
        }

        if !self.raw_query.is_empty() {
            out.push('?');
            out.push_str(&self.raw_query);
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

/// Decompose a URL per the generic URI grammar.
pub(crate) fn decompose(raw: &str) -> DburlResult<Parts> {
    let (rest, fragment) = match raw.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment.to_string())),
        None => (raw, None),
    };

    let (scheme, rest) = split_scheme(rest).ok_or(DburlError::InvalidScheme)?;
    let (rest, raw_query) = rest.split_once('?').unwrap_or((rest, ""));

    let mut parts = Parts {
        scheme: scheme.to_string(),
        raw_query: raw_query.to_string(),
        fragment,
        ..Parts::default()
    };

    if !rest.starts_with('/') {
        parts.opaque = rest.to_string();
        return Ok(parts);
    }

    let raw_path = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find('/').unwrap_or(after.len());
            parse_authority(&after[..end], &mut parts)?;
            &after[end..]
        }
        None => rest,
    };
    parts.path = unescape(raw_path, "path")?;

    Ok(parts)
}

/// Split off a scheme, returning `None` when the input does not start with one.
pub(crate) fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let colon = raw.find(':')?;
    let scheme = &raw[..colon];
    let mut chars = scheme.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some((scheme, &raw[colon + 1..]))
}

fn parse_authority(authority: &str, parts: &mut Parts) -> DburlResult<()> {
    let host_port = match authority.rfind('@') {
        Some(at) => {
            let userinfo = &authority[..at];
            parts.user = Some(match userinfo.split_once(':') {
                Some((user, pass)) => {
                    UserInfo::with_password(unescape(user, "user")?, unescape(pass, "password")?)
                }
                None => UserInfo::new(unescape(userinfo, "user")?),
            });
            &authority[at + 1..]
        }
        None => authority,
    };

    let (host, port) = if host_port.starts_with('[') {
        let close = host_port
            .find(']')
            .ok_or_else(|| DburlError::Syntax("missing ']' in host".to_string()))?;
        let after = &host_port[close + 1..];
        let port = match after {
            "" => "",
            _ => after
                .strip_prefix(':')
                .ok_or_else(|| DburlError::Syntax(format!("invalid host '{}'", host_port)))?,
        };
        (&host_port[..=close], port)
    } else {
        match host_port.rfind(':') {
            Some(colon) => (&host_port[..colon], &host_port[colon + 1..]),
            None => (host_port, ""),
        }
    };

    parts.host = unescape(host, "host")?;
    parts.port = parse_port(port)?;
    Ok(())
}

fn parse_port(port: &str) -> DburlResult<Option<u16>> {
    if port.is_empty() {
        return Ok(None);
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DburlError::InvalidPort(port.to_string()));
    }
    port.parse()
        .map(Some)
        .map_err(|_| DburlError::InvalidPort(port.to_string()))
}

/// Strict percent-decoding: every `%` must start a valid escape.
fn unescape(s: &str, what: &str) -> DburlResult<String> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(DburlError::Syntax(format!("invalid escape in {}", what)));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    decode_utf8(s, what)
}

/// Percent-decode without validating escapes; the bytes must be UTF-8.
fn decode_utf8(s: &str, what: &str) -> DburlResult<String> {
    percent_decode_str(s)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DburlError::Syntax(format!("invalid UTF-8 in {}", what)))
}

/// Rewrite the password of `user:password@` credentials so that reserved
/// characters survive decomposition.
///
/// The credentials run up to the last `@` before the first `?` or `#`. The
/// password is percent-decoded twice and re-escaped once; the username is
/// left as written. Input without a password is returned unchanged.
pub(crate) fn escape_password(raw: &str) -> DburlResult<Cow<'_, str>> {
    let Some((scheme, _)) = split_scheme(raw) else {
        return Ok(Cow::Borrowed(raw));
    };
    let mut head = scheme.len() + 1;
    if raw[head..].starts_with("//") {
        head += 2;
    }

    let rest = &raw[head..];
    let region = rest.find(['?', '#']).unwrap_or(rest.len());
    let Some(at) = rest[..region].rfind('@') else {
        return Ok(Cow::Borrowed(raw));
    };
    let Some((user, password)) = rest[..at].split_once(':') else {
        return Ok(Cow::Borrowed(raw));
    };
    if user.contains('/') {
        return Ok(Cow::Borrowed(raw));
    }

    let decoded = decode_utf8(&decode_utf8(password, "password")?, "password")?;
    let escaped = encode_userinfo(&decoded);
    if escaped == password {
        return Ok(Cow::Borrowed(raw));
    }

    Ok(Cow::Owned(format!(
        "{}{}:{}@{}",
        &raw[..head],
        user,
        escaped,
        &rest[at + 1..]
    )))
}

pub(crate) fn encode_userinfo(s: &str) -> String {
    utf8_percent_encode(s, USERINFO).to_string()
}

fn encode_password_for_reparse(s: &str) -> String {
    s.split('%')
        .map(encode_userinfo)
        .collect::<Vec<_>>()
        .join("%2525")
}

/// Escape a host for serialization; IPv6 literals are written as is.
pub(crate) fn encode_host(host: &str) -> Cow<'_, str> {
    if host.starts_with('[') && host.ends_with(']') {
        return Cow::Borrowed(host);
    }
    utf8_percent_encode(host, HOST).into()
}

pub(crate) fn encode_path(s: &str) -> String {
    utf8_percent_encode(s, PATH).to_string()
}

pub(crate) fn join_host_port(host: &str, port: &str) -> String {
    if port.is_empty() {
        host.to_string()
    } else {
        format!("{}:{}", host, port)
    }
}
