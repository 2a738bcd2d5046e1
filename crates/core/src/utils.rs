//! Identifier helpers.

/// Convert a property name into a provider attribute identifier.
///
/// `camelCase`, `PascalCase`, `kebab-case` and dotted names all become
/// `snake_case`. Runs of capitals are treated as one word, so `nestedURLValue`
/// becomes `nested_url_value`. A leading digit gets an `_` prefix. Only ASCII
/// letters and digits survive; `None` when nothing is left.
pub fn terraform_identifier(name: &str) -> Option<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                None => false,
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                // end of an acronym: "URLValue" splits before "V"
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                Some(_) => false,
            };
            if starts_word && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() {
            result.push(c);
        } else if !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
    }

    while result.ends_with('_') {
        result.pop();
    }
    if result.is_empty() {
        return None;
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    Some(result)
}
