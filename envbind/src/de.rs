//! Coercion of environment variable text into field values

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::str::FromStr;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::EnvError;
use crate::field::EnvField;
use crate::loader::Loader;

/// Parse `text` with `FromStr`, reporting failures as [`EnvError::Parse`].
pub fn parse_value<T>(text: &str) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| EnvError::parse_error::<T>(text, e))
}

/// Parse a boolean.
///
/// Accepts `1`, `t`, `true`, `0`, `f` and `false`, ignoring case.
pub fn parse_bool(text: &str) -> Result<bool, EnvError> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(EnvError::parse_error::<bool>(text, "invalid syntax")),
    }
}

/// Parse a duration literal such as `300ms`, `5s` or `1h30m`.
///
/// A literal is a sequence of decimal numbers, each with an optional
/// fraction and a mandatory unit: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
/// A bare `0` needs no unit. Negative durations other than zero are rejected.
pub fn parse_duration(text: &str) -> Result<Duration, EnvError> {
    let invalid = |message: &str| EnvError::parse_error::<Duration>(text, message);

    let (negative, mut rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("invalid duration"));
    }

    let mut nanos: u128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("invalid duration"));
        }

        let unit_len = tail
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            "" => return Err(invalid("missing unit in duration")),
            _ => return Err(invalid(&format!("unknown unit {unit:?} in duration"))),
        };

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .map_err(|_| invalid("invalid duration"))?
        };

        // Digits beyond 20 do not affect the result at nanosecond precision.
        let fraction = &fraction[..fraction.len().min(20)];
        let fraction_value = if fraction.is_empty() {
            0
        } else {
            let digits: u128 = fraction
                .parse()
                .map_err(|_| invalid("invalid duration"))?;
            digits * scale / 10u128.pow(fraction.len() as u32)
        };

        nanos = whole_value
            .checked_mul(scale)
            .and_then(|v| v.checked_add(fraction_value))
            .and_then(|v| v.checked_add(nanos))
            .ok_or_else(|| invalid("invalid duration"))?;
        rest = tail;
    }

    if negative && nanos != 0 {
        return Err(invalid("negative durations are not supported"));
    }

    let secs = u64::try_from(nanos / 1_000_000_000).map_err(|_| invalid("invalid duration"))?;
    Ok(Duration::new(secs, (nanos % 1_000_000_000) as u32))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Split a sequence value on `separator`.
///
/// An empty separator splits after each character, so empty text yields no
/// parts at all.
pub fn split_sequence<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }
    text.split(separator).collect()
}

impl EnvField for String {
    fn assign(&mut self, text: &str, _loader: &Loader) -> Result<bool, EnvError> {
        text.clone_into(self);
        Ok(true)
    }
}

impl EnvField for bool {
    fn assign(&mut self, text: &str, _loader: &Loader) -> Result<bool, EnvError> {
        *self = parse_bool(text)?;
        Ok(true)
    }
}

impl EnvField for Duration {
    fn assign(&mut self, text: &str, _loader: &Loader) -> Result<bool, EnvError> {
        *self = parse_duration(text)?;
        Ok(true)
    }
}

macro_rules! impl_numeric_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvField for $ty {
                fn assign(&mut self, text: &str, _loader: &Loader) -> Result<bool, EnvError> {
                    *self = parse_value::<$ty>(text)?;
                    Ok(true)
                }
            }
        )*
    };
}

impl_numeric_field!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T> EnvField for Vec<T>
where
    T: EnvField + Default,
{
    fn assign(&mut self, text: &str, loader: &Loader) -> Result<bool, EnvError> {
        let parts = split_sequence(text, loader.array_separator());
        if parts.is_empty() {
            return Ok(true);
        }

        let mut items = Vec::with_capacity(parts.len());
        for (index, part) in parts.into_iter().enumerate() {
            let mut item = T::default();
            item.assign(part, loader)
                .map_err(|source| EnvError::SliceElement {
                    index,
                    source: Box::new(source),
                })?;
            items.push(item);
        }

        *self = items;
        Ok(true)
    }
}

/// Parse a JSON literal into a map, `null` meaning no entries.
fn parse_map_literal<M: DeserializeOwned>(text: &str) -> Result<Option<M>, EnvError> {
    serde_json::from_str::<Option<M>>(text).map_err(|e| EnvError::parse_error::<M>(text, e))
}

impl<K, V, S> EnvField for HashMap<K, V, S>
where
    K: DeserializeOwned + Eq + Hash,
    V: DeserializeOwned,
    S: BuildHasher + Default,
{
    fn assign(&mut self, text: &str, _loader: &Loader) -> Result<bool, EnvError> {
        if let Some(entries) = parse_map_literal::<HashMap<K, V>>(text)? {
            self.extend(entries);
        }
        Ok(true)
    }
}

impl<K, V> EnvField for BTreeMap<K, V>
where
    K: DeserializeOwned + Ord,
    V: DeserializeOwned,
{
    fn assign(&mut self, text: &str, _loader: &Loader) -> Result<bool, EnvError> {
        if let Some(entries) = parse_map_literal::<BTreeMap<K, V>>(text)? {
            self.extend(entries);
        }
        Ok(true)
    }
}

/// `Option<T>` is allocated on demand.
///
/// A `None` field becomes `Some(T::default())` before text is assigned into
/// it. When descending, the allocation is kept only if something beneath it
/// was found.
impl<T> EnvField for Option<T>
where
    T: EnvField + Default,
{
    fn assign(&mut self, text: &str, loader: &Loader) -> Result<bool, EnvError> {
        let fresh = self.is_none();
        let handled = self.get_or_insert_with(T::default).assign(text, loader)?;
        if !handled && fresh {
            *self = None;
        }
        Ok(handled)
    }

    fn descend(&mut self, loader: &Loader, segments: &[String]) -> Result<bool, EnvError> {
        if let Some(inner) = self {
            return inner.descend(loader, segments);
        }

        let mut inner = T::default();
        let found = inner.descend(loader, segments)?;
        if found {
            *self = Some(inner);
        }
        Ok(found)
    }
}
