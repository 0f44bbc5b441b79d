use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// A single catalog entry. Items are immutable once loaded; `name` is the
/// identifying key and everything else is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub weather: Option<Vec<String>>,
    #[serde(default)]
    pub level: Option<u32>,
}

/// Loads the catalog for a category. A file in `override_dir` takes
/// precedence over the built-in data; any load failure yields an empty list
/// rather than an error.
pub fn load(category: Category, override_dir: Option<&Path>) -> Vec<Collectible> {
    if let Some(dir) = override_dir {
        let path = dir.join(category.catalog_file());
        if path.exists() {
            return match fs::read_to_string(&path) {
                Ok(raw) => parse_items(&raw),
                Err(_) => Vec::new(),
            };
        }
    }
    parse_items(builtin(category))
}

pub fn parse_items(raw: &str) -> Vec<Collectible> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn builtin(category: Category) -> &'static str {
    match category {
        Category::Fish => include_str!("../data/fish.json"),
        Category::Bugs => include_str!("../data/bugs.json"),
        Category::Birds => include_str!("../data/birds.json"),
    }
}

/// Distinct locations across a catalog, sorted case-insensitively.
pub fn locations(items: &[Collectible]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let Some(location) = &item.location else {
            continue;
        };
        if location.is_empty() {
            continue;
        }
        if !out.iter().any(|known| known == location) {
            out.push(location.clone());
        }
    }
    out.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_yields_empty_list() {
        assert!(parse_items("not json").is_empty());
        assert!(parse_items("{\"name\":\"object not array\"}").is_empty());
    }

    #[test]
    fn optional_fields_and_unknown_keys_are_tolerated() {
        let raw = r#"[
            {"name": "Carp", "location": "Sunrise Lake", "level": 3, "rarity": "common"},
            {"name": "Mystery"}
        ]"#;
        let items = parse_items(raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].level, Some(3));
        assert!(items[1].location.is_none());
        assert!(items[1].time.is_none());
        assert!(items[1].weather.is_none());
        assert!(items[1].level.is_none());
    }

    #[test]
    fn builtin_catalogs_parse() {
        for category in crate::category::ALL {
            assert!(!load(category, None).is_empty(), "{category:?}");
        }
    }

    #[test]
    fn locations_are_distinct_and_sorted() {
        let items = parse_items(
            r#"[
                {"name": "a", "location": "Willow Creek"},
                {"name": "b", "location": "Amber Coast"},
                {"name": "c", "location": "Willow Creek"},
                {"name": "d"}
            ]"#,
        );
        assert_eq!(locations(&items), vec!["Amber Coast", "Willow Creek"]);
    }
}
