//! Separator-joined DSNs.

use crate::error::{Component, DburlError, DburlResult};
use crate::uri::{Parts, PasswordEncoding};
use crate::url::Url;

use super::PositionalStyle;

pub(crate) fn generate(style: PositionalStyle, url: &Url) -> DburlResult<String> {
    match style {
        PositionalStyle::Oracle => oracle(url),
        PositionalStyle::Godror => Ok(godror(url)),
        PositionalStyle::Firebird => Ok(firebird(url)),
        PositionalStyle::Yql => yql(url),
        PositionalStyle::VoltDb => Ok(voltdb(url)),
    }
}

/// `user[/pass]`, or `None` for an absent or empty username.
fn slash_userinfo(url: &Url) -> Option<String> {
    let user = url.user().filter(|u| !u.username.is_empty())?;
    Some(match &user.password {
        Some(pass) => format!("{}/{}", user.username, pass),
        None => user.username.clone(),
    })
}

fn oracle(url: &Url) -> DburlResult<String> {
    let userinfo = slash_userinfo(url).ok_or(DburlError::Missing(Component::User))?;
    if url.host().is_empty() {
        return Err(DburlError::Missing(Component::Host));
    }
    Ok(format!("{}@{}{}", userinfo, url.parts.host_port(), url.path()))
}

/// Oracle Easy Connect: `user/pass@//host:port/service/instance`.
fn godror(url: &Url) -> String {
    let service = url.path().trim_start_matches('/');
    let (service, instance) = service.split_once('/').unwrap_or((service, ""));

    let mut dsn = url.parts.host_port();
    if let Some(userinfo) = slash_userinfo(url) {
        dsn = format!("{}@//{}", userinfo, dsn);
    }
    for segment in [service, instance] {
        if !segment.is_empty() {
            dsn.push('/');
            dsn.push_str(segment);
        }
    }
    dsn
}

fn firebird(url: &Url) -> String {
    let parts = Parts {
        user: url.parts.user.clone(),
        host: url.parts.host.clone(),
        port: url.parts.port,
        path: url.parts.path.clone(),
        raw_query: url.parts.raw_query.clone(),
        fragment: url.parts.fragment.clone(),
        ..Parts::default()
    };
    let dsn = parts.serialize_as("", PasswordEncoding::Driver);
    dsn.strip_prefix("//").map(str::to_string).unwrap_or(dsn)
}

fn yql(url: &Url) -> DburlResult<String> {
    let mut dsn = String::new();
    if let Some(user) = url.user() {
        let pass = user
            .password
            .as_deref()
            .ok_or_else(|| DburlError::unsupported(url.driver(), "missing password"))?;
        dsn = format!("{}|{}", user.username, pass);
    }
    if !url.host().is_empty() {
        if dsn.is_empty() {
            dsn.push('|');
        }
        dsn.push_str("|store://");
        dsn.push_str(&url.parts.host_port());
        dsn.push_str(url.path());
    }
    Ok(dsn)
}

fn voltdb(url: &Url) -> String {
    let host = match url.hostname() {
        "" => "localhost",
        h => h,
    };
    let port = url.port().unwrap_or(21212);
    format!("{}:{}", host, port)
}
