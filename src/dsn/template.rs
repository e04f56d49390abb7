//! URL-shaped DSNs: passthrough and template merge.

use crate::error::DburlResult;
use crate::query::Query;
use crate::uri::{self, Parts, PasswordEncoding};
use crate::url::Url;

/// A base URL whose components act as defaults.
///
/// ```rust
/// use dburl::dsn::Template;
///
/// let t = Template::parse("postgres://localhost:26257/?sslmode=disable").unwrap();
/// assert_eq!(t.scheme(), "postgres");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    parts: Parts,
}

impl Template {
    /// Parse a template URL.
    pub fn parse(raw: &str) -> DburlResult<Self> {
        let parts = uri::decompose(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    /// The template as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Scheme written in generated DSNs.
    pub fn scheme(&self) -> &str {
        &self.parts.scheme
    }

    /// Overlay the components present in `url` onto the template.
    ///
    /// Query keys are overridden one by one; repeated input values for a
    /// key are joined with a space.
    pub(crate) fn merge(&self, url: &Url) -> String {
        let input = &url.parts;
        let mut merged = self.parts.clone();

        if !input.opaque.is_empty() {
            merged.opaque = input.opaque.clone();
        }
        if input.user.is_some() {
            merged.user = input.user.clone();
        }
        if !input.host.is_empty() {
            merged.host = input.host.clone();
        }
        if input.port.is_some() {
            merged.port = input.port;
        }
        if !input.path.is_empty() {
            merged.path = input.path.clone();
        }

        let mut query = Query::parse(&self.parts.raw_query);
        let overrides = url.query();
        for key in overrides.sorted_keys() {
            query.set(key, overrides.get_all(key).collect::<Vec<_>>().join(" "));
        }
        merged.raw_query = query.encode();

        if input.fragment.is_some() {
            merged.fragment = input.fragment.clone();
        }

        merged.serialize_as(&self.parts.scheme, PasswordEncoding::Driver)
    }
}

/// Re-serialize `url` under `scheme`.
pub(crate) fn passthrough(url: &Url, scheme: &str) -> String {
    url.parts.serialize_as(scheme, PasswordEncoding::Driver)
}
