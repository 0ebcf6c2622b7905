//! Option mini-language used in field tags.
//!
//! A tag looks like `column,insert,type:timestamp`. Everything after the first
//! comma is the option string handled here: comma-separated `key` or
//! `key:value` pairs.
//!
//! ```
//! use ormx::options::parse_options;
//!
//! let opts = parse_options("insert,type:timestamp");
//! assert_eq!(opts.get("insert").map(String::as_str), Some(""));
//! assert_eq!(opts.get("type").map(String::as_str), Some("timestamp"));
//! ```

use std::collections::BTreeMap;

/// Parsed `key -> value` view of an option string. Keys without a value map to `""`.
pub type OptionMap = BTreeMap<String, String>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stage {
    Key,
    Value,
}

/// Parse `k1:v1,k2,k3:v3` into an [`OptionMap`].
///
/// - `:` switches the current pair from key to value.
/// - `,` ends the current pair; `\,` is a literal comma.
/// - Pairs with an empty key are dropped.
///
/// Always returns a map, empty for an empty input.
pub fn parse_options(s: &str) -> OptionMap {
    let mut options = OptionMap::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut stage = Stage::Key;

    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        let buf = match stage {
            Stage::Key => &mut key,
            Stage::Value => &mut value,
        };
        match c {
            '\\' if chars.peek() == Some(&',') => {
                chars.next();
                buf.push(',');
            }
            ':' => stage = Stage::Value,
            ',' => {
                flush(&mut options, &mut key, &mut value);
                stage = Stage::Key;
            }
            _ => buf.push(c),
        }
    }
    flush(&mut options, &mut key, &mut value);

    options
}

fn flush(options: &mut OptionMap, key: &mut String, value: &mut String) {
    if !key.is_empty() {
        options.insert(std::mem::take(key), std::mem::take(value));
    } else {
        value.clear();
    }
}
