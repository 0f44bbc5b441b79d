use crate::category::Category;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

pub const MAX_STARS: u8 = 5;

const CHECKLIST_FILE: &str = "checklist.json";

/// Persisted completion state: one star rating per `category:name` key,
/// plus the hide-collected view flag. Saved after every mutation; last
/// write wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub entries: HashMap<String, Rating>,
    #[serde(default)]
    pub hide_collected: bool,
}

/// Older saves stored a plain checkbox instead of a star count. A legacy
/// `true` reads as one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Stars(u8),
    Legacy(bool),
}

impl Rating {
    pub fn stars(self) -> u8 {
        match self {
            Rating::Stars(value) => value.min(MAX_STARS),
            Rating::Legacy(true) => 1,
            Rating::Legacy(false) => 0,
        }
    }
}

impl Checklist {
    pub fn load_or_create(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CHECKLIST_FILE);
        if path.exists() {
            let raw = fs::read_to_string(&path).context("read checklist")?;
            return Ok(Self::from_raw(&raw));
        }
        let checklist = Checklist::default();
        checklist.save(data_dir)?;
        Ok(checklist)
    }

    /// Malformed state is treated as empty rather than an error.
    pub fn from_raw(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir).context("create app data dir")?;
        let path = data_dir.join(CHECKLIST_FILE);
        let raw = serde_json::to_string_pretty(self).context("serialize checklist")?;
        fs::write(path, raw).context("write checklist")?;
        Ok(())
    }

    pub fn key(category: Category, name: &str) -> String {
        format!("{}:{name}", category.as_str())
    }

    pub fn stars(&self, category: Category, name: &str) -> u8 {
        self.entries
            .get(&Self::key(category, name))
            .map(|rating| rating.stars())
            .unwrap_or(0)
    }

    pub fn is_complete(&self, category: Category, name: &str) -> bool {
        self.stars(category, name) >= MAX_STARS
    }

    pub fn set_stars(&mut self, category: Category, name: &str, stars: u8) {
        self.entries
            .insert(Self::key(category, name), Rating::Stars(stars.min(MAX_STARS)));
    }

    pub fn clear_category(&mut self, category: Category) {
        let prefix = format!("{}:", category.as_str());
        self.entries.retain(|key, _| !key.starts_with(&prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_booleans_normalize_to_stars() {
        let checklist = Checklist::from_raw(
            r#"{"entries": {"fish:Carp": true, "fish:Perch": false, "bugs:Ant": 4}}"#,
        );
        assert_eq!(checklist.stars(Category::Fish, "Carp"), 1);
        assert_eq!(checklist.stars(Category::Fish, "Perch"), 0);
        assert_eq!(checklist.stars(Category::Bugs, "Ant"), 4);
        assert!(!checklist.is_complete(Category::Fish, "Carp"));
    }

    #[test]
    fn malformed_state_reads_as_empty() {
        let checklist = Checklist::from_raw("{broken");
        assert!(checklist.entries.is_empty());
        assert!(!checklist.hide_collected);
    }

    #[test]
    fn out_of_range_ratings_clamp() {
        let mut checklist = Checklist::default();
        checklist.set_stars(Category::Birds, "Robin", 9);
        assert_eq!(checklist.stars(Category::Birds, "Robin"), 5);
        assert!(checklist.is_complete(Category::Birds, "Robin"));

        let persisted = Checklist::from_raw(r#"{"entries": {"birds:Robin": 99}}"#);
        assert_eq!(persisted.stars(Category::Birds, "Robin"), 5);
    }

    #[test]
    fn keys_are_namespaced_per_category() {
        let mut checklist = Checklist::default();
        checklist.set_stars(Category::Fish, "Carp", 5);
        checklist.set_stars(Category::Bugs, "Carp", 2);
        assert!(checklist.is_complete(Category::Fish, "Carp"));
        assert!(!checklist.is_complete(Category::Bugs, "Carp"));
    }

    #[test]
    fn clear_category_leaves_other_categories_alone() {
        let mut checklist = Checklist::default();
        checklist.set_stars(Category::Fish, "Carp", 5);
        checklist.set_stars(Category::Birds, "Robin", 3);
        checklist.clear_category(Category::Fish);
        assert_eq!(checklist.stars(Category::Fish, "Carp"), 0);
        assert_eq!(checklist.stars(Category::Birds, "Robin"), 3);
    }

    #[test]
    fn hide_collected_round_trips() {
        let mut checklist = Checklist::default();
        checklist.hide_collected = true;
        let raw = serde_json::to_string(&checklist).unwrap();
        assert!(Checklist::from_raw(&raw).hide_collected);
    }
}
