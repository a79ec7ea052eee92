//! Field naming strategies
//!
//! A naming strategy maps a field's declared identifier to the base segment
//! of its environment variable name. [`upper_snake_case`] is the default.

/// Returns the identifier unchanged.
///
/// Useful with [`Loader::with_key_transformer`](crate::Loader::with_key_transformer)
/// to keep field names exactly as declared.
pub fn void_transformer(key: &str) -> String {
    key.to_string()
}

/// Transforms PascalCase or snake_case identifiers into UPPER_SNAKE_CASE.
///
/// - `DBConnection` => `DB_CONNECTION`
/// - `AKey` => `A_KEY`
/// - `KeyA` => `KEY_A`
/// - `ThisISMyKey` => `THIS_IS_MY_KEY`
/// - `database_url` => `DATABASE_URL`
///
/// An uppercase letter starts a new word when it follows a lowercase letter,
/// or when it is followed by one (the last capital of an acronym).
pub fn upper_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let n = chars.len();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        let word_start = i > 0
            && c.is_uppercase()
            && chars[i - 1] != '_'
            && ((i < n - 1 && can_upper(chars[i + 1])) || can_upper(chars[i - 1]));

        if word_start {
            out.push('_');
            out.push(c);
        } else {
            out.extend(c.to_uppercase());
        }
    }

    out
}

fn can_upper(c: char) -> bool {
    !c.to_uppercase().eq(std::iter::once(c))
}
