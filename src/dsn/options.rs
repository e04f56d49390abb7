//! Option-string builders shared by the key/value generators.

use crate::query::Query;

/// Punctuation used when joining options into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OptionStyle {
    /// Prefix written before the first option.
    pub joiner: &'static str,
    /// Between a key and its value.
    pub assign: &'static str,
    /// Between options.
    pub sep: &'static str,
    /// Between multiple values of one key.
    pub value_sep: &'static str,
    /// Drop keys whose joined value is empty.
    pub skip_empty: bool,
}

/// `Key=value;Key=value`, as used by ODBC and OLE DB.
pub(crate) const ODBC: OptionStyle = OptionStyle {
    joiner: "",
    assign: "=",
    sep: ";",
    value_sep: ",",
    skip_empty: true,
};

/// `key=value key=value`, as used by libpq.
pub(crate) const LIBPQ: OptionStyle = OptionStyle {
    joiner: "",
    assign: "=",
    sep: " ",
    value_sep: ",",
    skip_empty: true,
};

/// `,key=value,flag`, as used by mymysql.
pub(crate) const MYMYSQL: OptionStyle = OptionStyle {
    joiner: ",",
    assign: "=",
    sep: ",",
    value_sep: " ",
    skip_empty: false,
};

/// Join the query into an option string with keys in byte order.
///
/// Keys starting with one of `ignore_prefixes` (compared case-insensitively)
/// are left out. Keys with an empty value are written bare unless the style
/// skips them.
pub(crate) fn gen_options(q: &Query, style: &OptionStyle, ignore_prefixes: &[&str]) -> String {
    let opts: Vec<String> = q
        .sorted_keys()
        .into_iter()
        .filter(|k| !ignore_prefixes.iter().any(|p| has_prefix_ignore_case(k, p)))
        .filter_map(|k| {
            let value = q.get_all(k).collect::<Vec<_>>().join(style.value_sep);
            match (value.is_empty(), style.skip_empty) {
                (true, true) => None,
                (true, false) => Some(k.to_string()),
                (false, _) => Some(format!("{}{}{}", k, style.assign, value)),
            }
        })
        .collect();

    if opts.is_empty() {
        String::new()
    } else {
        format!("{}{}", style.joiner, opts.join(style.sep))
    }
}

fn has_prefix_ignore_case(key: &str, prefix: &str) -> bool {
    key.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Replace every value equal to `from` with `to`.
pub(crate) fn convert_values(q: &Query, from: &str, to: &str) -> Query {
    q.map_values(|v| if v == from { to.to_string() } else { v.to_string() })
}
