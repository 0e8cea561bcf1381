//! String inflection used to turn URL segments into identifier segments.
//!
//! ```text
//! "blog-post"  → underscore → "blog_post" → camelize → "BlogPost"
//! "BlogPost"   → underscore → "blog_post" → camelize → "BlogPost"
//! "HTMLPage"   → underscore → "h_t_m_l_page" → camelize → "HTMLPage"
//! ```
//!
//! `camelize` is idempotent: `camelize(camelize(s)) == camelize(s)`.

/// Converts a token to its underscore-separated lowercase form.
///
/// An underscore is inserted before every uppercase letter that follows a
/// word character; hyphens and spaces become underscores.
pub fn underscore(token: &str) -> String {
    let mut out = String::with_capacity(token.len() + 4);
    let mut prev: Option<char> = None;

    for c in token.chars() {
        match c {
            '-' | ' ' | '_' => out.push('_'),
            c if c.is_uppercase() => {
                if prev.is_some_and(|p| p.is_alphanumeric()) {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            }
            c => out.extend(c.to_lowercase()),
        }
        prev = Some(c);
    }

    out
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a token to its CamelCase form.
///
/// The token is first underscored, then each non-empty piece is title-cased
/// and the pieces are joined without separator.
pub fn camelize(token: &str) -> String {
    underscore(token)
        .split('_')
        .filter(|piece| !piece.is_empty())
        .map(capitalize)
        .collect()
}

/// Builds the action token for an HTTP method: `GET` → `GetMethod`.
pub fn method_token(method: &str) -> String {
    format!("{}Method", capitalize(&method.to_lowercase()))
}
