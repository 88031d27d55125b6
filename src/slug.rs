/// Comparison key for division names and route parameters.
/// Lower-cases and drops everything outside `[a-z0-9]`.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub fn normalize_opt(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}

/// Hyphenated slug used for navigation paths ("Light Heavyweight" -> "light-heavyweight").
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_space = false;
    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            out.push(c);
        }
    }
    out
}

pub fn route_path(name: &str) -> String {
    format!("/{}", slugify(name))
}

pub fn route_param(path: &str) -> &str {
    path.trim().trim_start_matches('/')
}
