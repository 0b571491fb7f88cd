//! Naming helpers for qualified type names.

/// Lowercase the leading run of capitals (e.g., "URLConfig" -> "urlConfig")
///
/// When the run is followed by more text, its last capital starts the next
/// word and is kept. A name that is all capitals is lowercased entirely.
pub fn lower_first_word(s: &str) -> String {
    let run = s.chars().take_while(|c| c.is_uppercase()).count();
    let total = s.chars().count();

    let keep_from = match run {
        0 => return s.to_string(),
        1 => 1,
        n if n == total => n,
        n => n - 1,
    };

    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if i < keep_from {
                c.to_lowercase().collect::<String>()
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// Uppercase the first character (e.g., "model" -> "Model")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Text after the last dot, with nested type markers shown as dots
/// (e.g., "com.x.Foo$Builder" -> "Foo.Builder")
pub fn simple_name(qualified: &str) -> String {
    let last = qualified.rsplit_once('.').map_or(qualified, |(_, s)| s);
    last.replace('$', ".")
}

/// Package of the outer-most type (e.g., "com.x.Foo$Builder" -> "com.x")
pub fn package_name(qualified: &str) -> &str {
    let outer = qualified.split_once('$').map_or(qualified, |(o, _)| o);
    outer.rsplit_once('.').map_or("", |(p, _)| p)
}
