use std::env;

/// Replace `$VAR` and `${VAR}` with values from the process environment.
///
/// Unset variables expand to the empty string.
pub fn expand_env(text: &str) -> String {
    expand(text, |name| env::var(name).unwrap_or_default())
}

/// Replace `$VAR` and `${VAR}` using `lookup`.
///
/// Names are ASCII alphanumerics and underscores, or a single special
/// character (`*#$@!?-` or a digit). A `$` not followed by a name is kept
/// as-is; an unterminated `${` is dropped.
pub fn expand(text: &str, mut lookup: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, consumed) = reference_name(after);

        if !name.is_empty() {
            out.push_str(&lookup(name));
        } else if consumed == 0 {
            out.push('$');
        }

        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

/// Name referenced right after a `$`, and how many bytes it spans.
fn reference_name(s: &str) -> (&str, usize) {
    let bytes = s.as_bytes();

    if bytes.first() == Some(&b'{') {
        if bytes.len() > 2 && is_special(bytes[1]) && bytes[2] == b'}' {
            return (&s[1..2], 3);
        }
        return match bytes.iter().position(|&b| b == b'}') {
            Some(1) => ("", 2),
            Some(end) => (&s[1..end], end + 1),
            None => ("", 1),
        };
    }

    if bytes.first().is_some_and(|&b| is_special(b)) {
        return (&s[..1], 1);
    }

    let end = bytes
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_'))
        .unwrap_or(bytes.len());
    (&s[..end], end)
}

fn is_special(b: u8) -> bool {
    matches!(b, b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-') || b.is_ascii_digit()
}
