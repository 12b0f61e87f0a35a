//! Case conversion for route segments derived from entity names.

/// Convert a PascalCase or camelCase identifier to kebab-case.
/// e.g. "TsunamiSource" -> "tsunami-source", "quake" -> "quake"
pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else if c == '_' || c == ' ' {
            out.push('-');
        } else {
            out.push(c);
        }
    }
    out
}

/// Route segment for an entity: kebab-case plural. e.g. "TsunamiRunup" -> "tsunami-runups"
pub fn plural_path_segment(entity_name: &str) -> String {
    let kebab = to_kebab_case(entity_name);
    if kebab.ends_with('s') {
        format!("{}es", kebab)
    } else {
        format!("{}s", kebab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case() {
        assert_eq!(to_kebab_case("Quake"), "quake");
        assert_eq!(to_kebab_case("TsunamiSource"), "tsunami-source");
        assert_eq!(to_kebab_case("tsunamiRunup"), "tsunami-runup");
        assert_eq!(to_kebab_case("snake_case"), "snake-case");
    }

    #[test]
    fn plural_segments() {
        assert_eq!(plural_path_segment("Quake"), "quakes");
        assert_eq!(plural_path_segment("TsunamiSource"), "tsunami-sources");
        assert_eq!(plural_path_segment("TsunamiRunup"), "tsunami-runups");
        assert_eq!(plural_path_segment("Status"), "statuses");
    }
}
