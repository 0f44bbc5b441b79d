use crate::{availability, catalog::Collectible, category::Category, state::Checklist};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Default,
    Level,
    Location,
    Name,
}

/// Per-category sort and filter state. Transient; owned by the app, one
/// instance per category, and reset on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    pub mode: SortMode,
    pub location_filter: Option<String>,
    pub secondary_level: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            mode: SortMode::Default,
            location_filter: None,
            secondary_level: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSelection {
    None,
    GroupByLocation,
    Location(String),
}

impl SortConfig {
    pub fn select_location(&mut self, selection: LocationSelection) {
        match selection {
            LocationSelection::None => {
                self.location_filter = None;
                self.mode = SortMode::Default;
                self.secondary_level = false;
            }
            LocationSelection::GroupByLocation => {
                self.location_filter = None;
                self.mode = SortMode::Location;
            }
            LocationSelection::Location(location) => {
                // a filtered list sorts by level until toggled back
                self.location_filter = Some(location);
                self.mode = SortMode::Level;
                self.secondary_level = false;
            }
        }
    }

    pub fn toggle_level(&mut self) {
        if self.location_filter.is_some() {
            self.mode = if self.mode == SortMode::Level {
                SortMode::Default
            } else {
                SortMode::Level
            };
            self.secondary_level = false;
        } else if self.mode == SortMode::Location {
            // grouping already sorts by level within each location; the flag
            // only drives the active indicator
            self.secondary_level = !self.secondary_level;
        } else {
            self.mode = if self.mode == SortMode::Level {
                SortMode::Default
            } else {
                SortMode::Level
            };
            self.secondary_level = false;
        }
    }

    pub fn level_active(&self) -> bool {
        self.mode == SortMode::Level || self.secondary_level
    }
}

pub fn compare(mode: SortMode, a: &Collectible, b: &Collectible) -> Ordering {
    match mode {
        SortMode::Default => cmp_level(a, b)
            .then_with(|| cmp_ci(location_of(a), location_of(b)))
            .then_with(|| cmp_ci(&a.name, &b.name)),
        SortMode::Level => cmp_level(a, b).then_with(|| cmp_ci(&a.name, &b.name)),
        SortMode::Location => cmp_ci(location_of(a), location_of(b))
            .then_with(|| cmp_level(a, b))
            .then_with(|| cmp_ci(&a.name, &b.name)),
        SortMode::Name => cmp_ci(&a.name, &b.name),
    }
}

/// Sorts a catalog by the configured mode, then applies the availability and
/// location filters, then stably moves completed items behind the rest when
/// `hide_collected` is set.
pub fn sort_and_filter<'a>(
    items: &'a [Collectible],
    config: &SortConfig,
    checklist: &Checklist,
    category: Category,
    show_available_only: bool,
    hide_collected: bool,
    now: u16,
) -> Vec<&'a Collectible> {
    let mut rows: Vec<&Collectible> = items.iter().collect();
    rows.sort_by(|a, b| compare(config.mode, a, b));

    rows.retain(|item| {
        if show_available_only && !availability::is_available(item, now) {
            return false;
        }
        if let Some(filter) = &config.location_filter {
            return item.location.as_deref() == Some(filter.as_str());
        }
        true
    });

    if hide_collected {
        let (open, done): (Vec<&Collectible>, Vec<&Collectible>) = rows
            .into_iter()
            .partition(|item| !checklist.is_complete(category, &item.name));
        rows = open;
        rows.extend(done);
    }
    rows
}

// Absent levels sort after every real level.
fn cmp_level(a: &Collectible, b: &Collectible) -> Ordering {
    let la = a.level.unwrap_or(u32::MAX);
    let lb = b.level.unwrap_or(u32::MAX);
    la.cmp(&lb)
}

fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn location_of(item: &Collectible) -> &str {
    item.location.as_deref().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, location: Option<&str>, level: Option<u32>) -> Collectible {
        Collectible {
            name: name.to_string(),
            location: location.map(str::to_string),
            time: None,
            weather: None,
            level,
        }
    }

    fn timed(name: &str, time: &str) -> Collectible {
        Collectible {
            name: name.to_string(),
            location: None,
            time: Some(time.to_string()),
            weather: None,
            level: None,
        }
    }

    fn names(rows: &[&Collectible]) -> Vec<String> {
        rows.iter().map(|item| item.name.clone()).collect()
    }

    #[test]
    fn default_mode_sorts_absent_levels_last() {
        let items = vec![
            item("B", None, Some(2)),
            item("A", None, Some(1)),
            item("C", None, None),
        ];
        let rows = sort_and_filter(
            &items,
            &SortConfig::default(),
            &Checklist::default(),
            Category::Fish,
            false,
            false,
            0,
        );
        assert_eq!(names(&rows), vec!["A", "B", "C"]);
    }

    #[test]
    fn default_mode_breaks_level_ties_by_location_then_name() {
        let items = vec![
            item("Zander", Some("Willow Creek"), Some(1)),
            item("Bream", Some("willow creek"), Some(1)),
            item("Perch", Some("Amber Coast"), Some(1)),
        ];
        let mut rows: Vec<&Collectible> = items.iter().collect();
        rows.sort_by(|a, b| compare(SortMode::Default, a, b));
        assert_eq!(names(&rows), vec!["Perch", "Bream", "Zander"]);
    }

    #[test]
    fn location_mode_groups_then_levels_then_names() {
        let items = vec![
            item("Deep Carp", Some("Sunrise Lake"), Some(8)),
            item("Minnow", Some("Amber Coast"), Some(2)),
            item("Eel", Some("Sunrise Lake"), Some(1)),
            item("Crab", Some("Amber Coast"), Some(2)),
        ];
        let mut rows: Vec<&Collectible> = items.iter().collect();
        rows.sort_by(|a, b| compare(SortMode::Location, a, b));
        assert_eq!(names(&rows), vec!["Crab", "Minnow", "Eel", "Deep Carp"]);
    }

    #[test]
    fn location_filter_is_exact_and_case_sensitive() {
        let items = vec![
            item("A", Some("Forest"), Some(2)),
            item("B", Some("forest"), Some(1)),
            item("C", Some("Forest"), Some(1)),
            item("D", None, Some(1)),
        ];
        let mut config = SortConfig::default();
        config.select_location(LocationSelection::Location("Forest".to_string()));
        let rows = sort_and_filter(
            &items,
            &config,
            &Checklist::default(),
            Category::Bugs,
            false,
            false,
            0,
        );
        // filter forces level-then-name order on the filtered subset
        assert_eq!(names(&rows), vec!["C", "A"]);
    }

    #[test]
    fn available_only_drops_out_of_window_items() {
        let items = vec![
            timed("Night Moth", "10 PM - 4 AM"),
            timed("Noon Fly", "11 AM - 1 PM"),
        ];
        let rows = sort_and_filter(
            &items,
            &SortConfig::default(),
            &Checklist::default(),
            Category::Bugs,
            true,
            false,
            12 * 60,
        );
        assert_eq!(names(&rows), vec!["Noon Fly"]);
    }

    #[test]
    fn hide_collected_partitions_without_resorting() {
        let items = vec![
            item("X", None, Some(1)),
            item("Y", None, Some(2)),
            item("Z", None, Some(3)),
        ];
        let mut checklist = Checklist::default();
        checklist.set_stars(Category::Fish, "Y", 5);
        let rows = sort_and_filter(
            &items,
            &SortConfig::default(),
            &checklist,
            Category::Fish,
            false,
            true,
            0,
        );
        assert_eq!(names(&rows), vec!["X", "Z", "Y"]);
    }

    #[test]
    fn selecting_a_location_forces_level_mode() {
        let mut config = SortConfig {
            mode: SortMode::Location,
            location_filter: None,
            secondary_level: true,
        };
        config.select_location(LocationSelection::Location("Forest".to_string()));
        assert_eq!(config.mode, SortMode::Level);
        assert_eq!(config.location_filter.as_deref(), Some("Forest"));
        assert!(!config.secondary_level);
    }

    #[test]
    fn selecting_none_resets_everything() {
        let mut config = SortConfig {
            mode: SortMode::Level,
            location_filter: Some("Forest".to_string()),
            secondary_level: true,
        };
        config.select_location(LocationSelection::None);
        assert_eq!(config, SortConfig::default());
    }

    #[test]
    fn toggle_level_flips_between_level_and_default() {
        let mut config = SortConfig::default();
        config.toggle_level();
        assert_eq!(config.mode, SortMode::Level);
        config.toggle_level();
        assert_eq!(config.mode, SortMode::Default);
    }

    #[test]
    fn toggle_level_with_filter_keeps_the_filter() {
        let mut config = SortConfig::default();
        config.select_location(LocationSelection::Location("Forest".to_string()));
        config.toggle_level();
        assert_eq!(config.mode, SortMode::Default);
        assert_eq!(config.location_filter.as_deref(), Some("Forest"));
        config.toggle_level();
        assert_eq!(config.mode, SortMode::Level);
    }

    #[test]
    fn toggle_level_while_grouping_flips_the_secondary_flag() {
        let mut config = SortConfig::default();
        config.select_location(LocationSelection::GroupByLocation);
        config.toggle_level();
        assert_eq!(config.mode, SortMode::Location);
        assert!(config.secondary_level);
        assert!(config.level_active());
        config.toggle_level();
        assert!(!config.secondary_level);
    }
}
