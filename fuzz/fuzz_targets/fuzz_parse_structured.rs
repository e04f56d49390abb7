//! Structured fuzzing for the URL parser.
//!
//! Builds URLs from registered schemes and arbitrary components so that
//! most inputs reach the DSN generators.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_parse_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

const SCHEMES: &[&str] = &[
    "pg", "my", "mymy", "ms", "ora", "gr", "sq", "file", "dk", "ado", "oo", "odbc", "sy", "fb",
    "yql", "volt", "cr", "ch", "sap", "ql", "mq", "vt",
];

const TRANSPORTS: &[&str] = &["", "tcp", "udp", "unix", "mysql", "postgres"];

/// A generated database URL.
#[derive(Debug, Arbitrary)]
struct FuzzUrl {
    scheme: u8,
    transport: u8,
    opaque: bool,
    user: Option<String>,
    password: Option<String>,
    host: String,
    port: Option<u16>,
    path: String,
    query: Vec<(String, String)>,
}

impl FuzzUrl {
    fn render(&self) -> String {
        let mut s = SCHEMES[self.scheme as usize % SCHEMES.len()].to_string();
        let transport = TRANSPORTS[self.transport as usize % TRANSPORTS.len()];
        if !transport.is_empty() {
            s.push('+');
            s.push_str(transport);
        }
        s.push(':');
        if self.opaque {
            s.push_str(&self.path);
            return s;
        }
        s.push_str("//");
        if let Some(user) = &self.user {
            s.push_str(user);
            if let Some(password) = &self.password {
                s.push(':');
                s.push_str(password);
            }
            s.push('@');
        }
        s.push_str(&self.host);
        if let Some(port) = self.port {
            s.push_str(&format!(":{}", port));
        }
        if !self.path.starts_with('/') {
            s.push('/');
        }
        s.push_str(&self.path);
        for (i, (k, v)) in self.query.iter().enumerate() {
            s.push(if i == 0 { '?' } else { '&' });
            s.push_str(k);
            s.push('=');
            s.push_str(v);
        }
        s
    }
}

fuzz_target!(|input: FuzzUrl| {
    if let Ok(url) = dburl::parse(&input.render()) {
        let _ = url.dsn();
        let _ = url.short();
        let _ = url.normalize("/", "-", 0);
    }
});
