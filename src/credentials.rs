//! Credential lookup interface.
//!
//! Credential stores (pass files, keychains, secret managers) live outside
//! this crate. They plug in through [`CredentialSource`], keyed by the
//! `driver:host:port:database:user` string from [`Url::normalize`].
//!
//! ```rust
//! use dburl::credentials::Credentials;
//! use dburl::{Parser, Registry, Url};
//!
//! let source = |_: &Url, key: &str| {
//!     (key == "postgres:localhost::app:").then(|| Credentials::new("app", "hunter2"))
//! };
//!
//! let parser = Parser::new(Registry::base().unwrap());
//! let url = parser.parse_with_credentials("pg://localhost/app", &source).unwrap();
//! assert_eq!(url.dsn(), "dbname=app host=localhost password=hunter2 user=app");
//! ```

use crate::url::Url;

/// A username and password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Source of credentials for parsed URLs.
pub trait CredentialSource {
    /// Find credentials for `url`, whose normalized key is `key`.
    fn lookup(&self, url: &Url, key: &str) -> Option<Credentials>;
}

impl<F> CredentialSource for F
where
    F: Fn(&Url, &str) -> Option<Credentials>,
{
    fn lookup(&self, url: &Url, key: &str) -> Option<Credentials> {
        self(url, key)
    }
}
