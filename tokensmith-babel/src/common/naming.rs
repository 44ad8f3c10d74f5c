//! Names derived from token paths
//!
//! | path                          | kebab                  | android               | camel                |
//! |-------------------------------|------------------------|-----------------------|----------------------|
//! | `color, brand, 500`           | `color-brand-500`      | `color_brand_500`     | `colorBrand500`      |
//! | `shadow, modern-mockup, lg`   | `shadow-modern-mockup-lg` | `shadow_modern_mockup_lg` | `shadowModernMockupLg` |
//! | `radius, 2xl`                 | `radius-2xl`           | `radius_2xl`          | `radius2xl`          |

/// Kotlin hard keywords, which can only be used as names when backquoted.
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Full path joined with `-`, as used by CSS custom properties.
pub fn kebab_name(path: &[String]) -> String {
    path.join("-")
}

/// Android resource name: lowercase, `[a-z0-9_]` only.
pub fn android_name(path: &[String]) -> String {
    path.join("_")
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Kotlin identifier in camelCase. Segments are also split on `-`, `_` and spaces.
pub fn camel_name(path: &[String]) -> String {
    let mut name = String::new();
    let words = path
        .iter()
        .flat_map(|segment| segment.split(['-', '_', ' ']))
        .filter(|word| !word.is_empty());

    for (i, word) in words.enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                name.extend(first.to_lowercase());
            } else {
                name.extend(first.to_uppercase());
            }
            name.push_str(chars.as_str());
        }
    }

    let mut name: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if KOTLIN_KEYWORDS.contains(&name.as_str()) {
        return format!("`{name}`");
    }
    name
}
