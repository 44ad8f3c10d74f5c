//! Token classification
//!
//! Every token maps to at most one [`Category`]. Rules are checked in a fixed order and the
//! first match wins:
//!
//! | rule                                      | category        | key                          |
//! |-------------------------------------------|-----------------|------------------------------|
//! | type `color`, path starts with `color`    | `colors`        | nested, path after `color`   |
//! | type `fontFamily`                         | `fontFamily`    | last segment                 |
//! | type `fontSize`                           | `fontSize`      | path after first, `-` joined |
//! | type `lineHeight`                         | `lineHeight`    | path minus first and last    |
//! | type `letterSpacing`                      | `letterSpacing` | path minus first and last    |
//! | type `borderRadius`                       | `borderRadius`  | last segment                 |
//! | type `boxShadow`, path starts with `shadow` | `boxShadow`   | path after first, `-` joined |
//! | type `animation`                          | `animation`     | path after first, `-` joined |
//! | path starts with `breakpoint`             | `screens`       | second segment               |
//! | path starts with `max`, `width`           | `spacing`       | `max-<third segment>`        |
//!
//! Type rules come before the two path-only rules, so a `fontSize` token living under
//! `breakpoint` still lands in `fontSize`. The path-only rules take any known type; a token
//! with an unknown type tag never gets a category.

use crate::error::TreeConflict;
use crate::token::{Token, TokenType};
use std::fmt;

/// Output grouping of the theme, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Colors,
    FontFamily,
    FontSize,
    LineHeight,
    LetterSpacing,
    BorderRadius,
    BoxShadow,
    Animation,
    Screens,
    Spacing,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Colors,
        Category::FontFamily,
        Category::FontSize,
        Category::LineHeight,
        Category::LetterSpacing,
        Category::BorderRadius,
        Category::BoxShadow,
        Category::Animation,
        Category::Screens,
        Category::Spacing,
    ];

    /// Key of this category under `theme.extend`.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Colors => "colors",
            Category::FontFamily => "fontFamily",
            Category::FontSize => "fontSize",
            Category::LineHeight => "lineHeight",
            Category::LetterSpacing => "letterSpacing",
            Category::BorderRadius => "borderRadius",
            Category::BoxShadow => "boxShadow",
            Category::Animation => "animation",
            Category::Screens => "screens",
            Category::Spacing => "spacing",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Picks the category a token belongs to, `None` when no rule matches.
pub fn classify(token: &Token) -> Option<Category> {
    let path = token.path();
    let first = path.first().map(String::as_str);

    let by_type = match token.token_type() {
        TokenType::Color if first == Some("color") => Some(Category::Colors),
        TokenType::FontFamily => Some(Category::FontFamily),
        TokenType::FontSize => Some(Category::FontSize),
        TokenType::LineHeight => Some(Category::LineHeight),
        TokenType::LetterSpacing => Some(Category::LetterSpacing),
        TokenType::BorderRadius => Some(Category::BorderRadius),
        TokenType::BoxShadow if first == Some("shadow") => Some(Category::BoxShadow),
        TokenType::Animation => Some(Category::Animation),
        _ => None,
    };
    if by_type.is_some() || !token.token_type().is_known() {
        return by_type;
    }

    match path {
        [first, ..] if first == "breakpoint" => Some(Category::Screens),
        [first, second, ..] if first == "max" && second == "width" => Some(Category::Spacing),
        _ => None,
    }
}

/// Computes the category-relative key path of `token`.
///
/// Flat categories always yield a single segment. A rule that leaves nothing to key on
/// (for example `fontSize` with a one-segment path) is a [`TreeConflict::EmptyKey`].
pub fn key_for(category: Category, token: &Token) -> Result<Vec<String>, TreeConflict> {
    let path = token.path();
    let key = match category {
        Category::Colors => path.get(1..).unwrap_or_default().to_vec(),
        Category::FontFamily | Category::BorderRadius => path.last().cloned().into_iter().collect(),
        Category::FontSize | Category::BoxShadow | Category::Animation => {
            joined(path.get(1..).unwrap_or_default())
        }
        Category::LineHeight | Category::LetterSpacing => {
            let inner: &[String] = if path.len() > 2 {
                &path[1..path.len() - 1]
            } else {
                &[]
            };
            joined(inner)
        }
        Category::Screens => path.get(1).cloned().into_iter().collect(),
        Category::Spacing => path
            .get(2)
            .map(|third| format!("max-{third}"))
            .into_iter()
            .collect(),
    };

    if key.is_empty() {
        Err(TreeConflict::EmptyKey)
    } else {
        Ok(key)
    }
}

fn joined(segments: &[String]) -> Vec<String> {
    if segments.is_empty() {
        Vec::new()
    } else {
        vec![segments.join("-")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(path: &[&str], tag: &str) -> Token {
        Token::new(path.iter().copied(), tag, "v")
    }

    #[test]
    fn test_color_requires_color_prefix() {
        assert_eq!(
            classify(&token(&["color", "brand", "500"], "color")),
            Some(Category::Colors)
        );
        assert_eq!(classify(&token(&["bg", "primary"], "color")), None);
    }

    #[test]
    fn test_box_shadow_requires_shadow_prefix() {
        assert_eq!(
            classify(&token(&["shadow", "sm"], "boxShadow")),
            Some(Category::BoxShadow)
        );
        assert_eq!(classify(&token(&["drop", "shadow"], "boxShadow")), None);
    }

    #[test]
    fn test_path_rules_apply_to_any_known_type() {
        assert_eq!(
            classify(&token(&["breakpoint", "md"], "dimension")),
            Some(Category::Screens)
        );
        assert_eq!(
            classify(&token(&["max", "width", "container"], "maxWidth")),
            Some(Category::Spacing)
        );
        assert_eq!(
            classify(&token(&["breakpoint", "md"], "spacing")),
            Some(Category::Screens)
        );
    }

    #[test]
    fn test_unknown_types_skip_path_rules() {
        assert_eq!(classify(&token(&["breakpoint", "md"], "somethingNew")), None);
        assert_eq!(
            classify(&token(&["max", "width", "container"], "futureType")),
            None
        );
    }

    #[test]
    fn test_type_rules_win_over_path_rules() {
        assert_eq!(
            classify(&token(&["breakpoint", "md"], "fontSize")),
            Some(Category::FontSize)
        );
    }

    #[test]
    fn test_unplaced_tokens_are_ignored() {
        assert_eq!(classify(&token(&["spacing", "4"], "spacing")), None);
        assert_eq!(classify(&token(&["max"], "dimension")), None);
        assert_eq!(classify(&token(&["weight", "bold"], "fontWeight")), None);
    }

    #[test]
    fn test_colors_key_nests() {
        let key = key_for(Category::Colors, &token(&["color", "brand", "500"], "color")).unwrap();
        assert_eq!(key, ["brand", "500"]);
    }

    #[test]
    fn test_line_height_drops_first_and_last() {
        let key = key_for(
            Category::LineHeight,
            &token(&["text", "display", "2xl", "lineHeight"], "lineHeight"),
        )
        .unwrap();
        assert_eq!(key, ["display-2xl"]);
    }

    #[test]
    fn test_short_paths_yield_empty_keys() {
        assert_eq!(
            key_for(Category::FontSize, &token(&["fontSize"], "fontSize")),
            Err(TreeConflict::EmptyKey)
        );
        assert_eq!(
            key_for(Category::LineHeight, &token(&["lh", "md"], "lineHeight")),
            Err(TreeConflict::EmptyKey)
        );
        assert_eq!(
            key_for(Category::Screens, &token(&["breakpoint"], "dimension")),
            Err(TreeConflict::EmptyKey)
        );
        assert_eq!(
            key_for(Category::Spacing, &token(&["max", "width"], "dimension")),
            Err(TreeConflict::EmptyKey)
        );
        assert_eq!(
            key_for(Category::Colors, &token(&["color"], "color")),
            Err(TreeConflict::EmptyKey)
        );
    }

    #[test]
    fn test_category_keys() {
        let keys: Vec<_> = Category::ALL.iter().map(Category::key).collect();
        assert_eq!(
            keys,
            [
                "colors",
                "fontFamily",
                "fontSize",
                "lineHeight",
                "letterSpacing",
                "borderRadius",
                "boxShadow",
                "animation",
                "screens",
                "spacing"
            ]
        );
        assert_eq!(Category::from_key("screens"), Some(Category::Screens));
        assert_eq!(Category::from_key("nope"), None);
    }
}
