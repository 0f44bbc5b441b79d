use crate::{
    availability,
    catalog::{self, Collectible},
    category::{Category, ALL},
    config::{self, AppConfig},
    gametime::{self, GameClock},
    sorting::{self, LocationSelection, SortConfig},
    state::{Checklist, MAX_STARS},
};
use anyhow::Result;
use serde::Serialize;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

const CLOCK_REFRESH: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Fish,
    Bugs,
    Birds,
    All,
}

impl Tab {
    pub fn category(self) -> Option<Category> {
        match self {
            Tab::Fish => Some(Category::Fish),
            Tab::Bugs => Some(Category::Bugs),
            Tab::Birds => Some(Category::Birds),
            Tab::All => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Fish => "Fish",
            Tab::Bugs => "Bugs",
            Tab::Birds => "Birds",
            Tab::All => "All",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Fish => Tab::Bugs,
            Tab::Bugs => Tab::Birds,
            Tab::Birds => Tab::All,
            Tab::All => Tab::Fish,
        }
    }

    pub fn prev(self) -> Tab {
        match self {
            Tab::Fish => Tab::All,
            Tab::Bugs => Tab::Fish,
            Tab::Birds => Tab::Bugs,
            Tab::All => Tab::Birds,
        }
    }
}

/// One render-ready line for the view layer.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub name: String,
    pub location: Option<String>,
    pub level: Option<u32>,
    pub meta: String,
    pub stars: u8,
    pub complete: bool,
    pub available: bool,
}

#[derive(Debug, Clone)]
pub struct PickerOption {
    pub selection: LocationSelection,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct LocationPicker {
    pub category: Category,
    pub options: Vec<PickerOption>,
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub enum Dialog {
    ClearCategory(Category),
}

pub struct App {
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub checklist: Checklist,
    pub clock: GameClock,
    pub sort: [SortConfig; 3],
    pub show_available_only: bool,
    pub active_tab: Tab,
    pub selected: usize,
    pub status: String,
    pub should_quit: bool,
    pub picker: Option<LocationPicker>,
    pub dialog: Option<Dialog>,
    catalogs: [Vec<Collectible>; 3],
    now_minutes: u16,
    last_clock_refresh: Instant,
}

impl App {
    pub fn initialize() -> Result<Self> {
        let data_dir = config::data_dir()?;
        let config = AppConfig::load_or_create()?;
        let checklist = Checklist::load_or_create(&data_dir)?;
        let clock = GameClock::new(config.clock_offset_minutes);
        let catalog_dir = config.catalog_dir.as_deref();
        let catalogs = [
            catalog::load(Category::Fish, catalog_dir),
            catalog::load(Category::Bugs, catalog_dir),
            catalog::load(Category::Birds, catalog_dir),
        ];
        let now_minutes = clock.minutes_now();

        Ok(Self {
            config,
            data_dir,
            checklist,
            clock,
            sort: [
                SortConfig::default(),
                SortConfig::default(),
                SortConfig::default(),
            ],
            show_available_only: false,
            active_tab: Tab::All,
            selected: 0,
            status: String::new(),
            should_quit: false,
            picker: None,
            dialog: None,
            catalogs,
            now_minutes,
            last_clock_refresh: Instant::now(),
        })
    }

    pub fn items(&self, category: Category) -> &[Collectible] {
        &self.catalogs[category.index()]
    }

    pub fn sort_config(&self, category: Category) -> &SortConfig {
        &self.sort[category.index()]
    }

    pub fn now_minutes(&self) -> u16 {
        self.now_minutes
    }

    pub fn clock_label(&self) -> String {
        format!("Heartopia {}", gametime::format_minutes(self.now_minutes))
    }

    /// Refreshes the in-game clock at most once per minute. Availability
    /// follows along on the next draw.
    pub fn tick(&mut self) {
        if self.last_clock_refresh.elapsed() >= CLOCK_REFRESH {
            self.now_minutes = self.clock.minutes_now();
            self.last_clock_refresh = Instant::now();
        }
    }

    pub fn visible_rows(&self, category: Category) -> Vec<Row> {
        let ordered = sorting::sort_and_filter(
            self.items(category),
            self.sort_config(category),
            &self.checklist,
            category,
            self.show_available_only,
            self.checklist.hide_collected,
            self.now_minutes,
        );
        ordered
            .into_iter()
            .map(|item| self.row_for(category, item))
            .collect()
    }

    fn row_for(&self, category: Category, item: &Collectible) -> Row {
        let mut parts: Vec<String> = Vec::new();
        if let Some(location) = &item.location {
            parts.push(location.clone());
        }
        if let Some(time) = &item.time {
            parts.push(time.clone());
        }
        if let Some(weather) = &item.weather {
            if availability::any_weather(item) {
                parts.push("Any Weather".to_string());
            } else {
                parts.push(weather.join(", "));
            }
        }
        if let Some(level) = item.level {
            parts.push(format!("Level {level}"));
        }
        Row {
            name: item.name.clone(),
            location: item.location.clone(),
            level: item.level,
            meta: parts.join(" • "),
            stars: self.checklist.stars(category, &item.name),
            complete: self.checklist.is_complete(category, &item.name),
            available: availability::is_available(item, self.now_minutes),
        }
    }

    /// Rates the named item; rating it at its current value clears it back
    /// to zero. Persists immediately.
    pub fn rate(&mut self, category: Category, name: &str, stars: u8) -> Result<()> {
        let current = self.checklist.stars(category, name);
        let next = if current == stars { 0 } else { stars.min(MAX_STARS) };
        self.checklist.set_stars(category, name, next);
        self.checklist.save(&self.data_dir)?;
        self.status = if next == 0 {
            format!("Cleared {name}")
        } else {
            format!("{name}: {next}/{MAX_STARS} stars")
        };
        Ok(())
    }

    pub fn rate_selected(&mut self, stars: u8) -> Result<()> {
        let Some(category) = self.active_tab.category() else {
            return Ok(());
        };
        let rows = self.visible_rows(category);
        let Some(row) = rows.get(self.selected) else {
            return Ok(());
        };
        let name = row.name.clone();
        self.rate(category, &name, stars)
    }

    pub fn toggle_available_only(&mut self) {
        self.show_available_only = !self.show_available_only;
        self.status = if self.show_available_only {
            "Showing available items only".to_string()
        } else {
            "Showing all items".to_string()
        };
    }

    pub fn toggle_hide_collected(&mut self) -> Result<()> {
        self.checklist.hide_collected = !self.checklist.hide_collected;
        self.checklist.save(&self.data_dir)?;
        self.status = if self.checklist.hide_collected {
            "Completed items moved to the bottom".to_string()
        } else {
            "Completed items shown in place".to_string()
        };
        Ok(())
    }

    pub fn toggle_level_sort(&mut self) {
        let Some(category) = self.active_tab.category() else {
            return;
        };
        self.sort[category.index()].toggle_level();
    }

    pub fn select_location(&mut self, category: Category, selection: LocationSelection) {
        self.sort[category.index()].select_location(selection);
        self.selected = 0;
    }

    pub fn open_location_picker(&mut self) {
        let Some(category) = self.active_tab.category() else {
            return;
        };
        let config = self.sort_config(category);
        let mut options = vec![
            PickerOption {
                selection: LocationSelection::None,
                label: "None".to_string(),
            },
            PickerOption {
                selection: LocationSelection::GroupByLocation,
                label: "Group by location".to_string(),
            },
        ];
        for location in catalog::locations(self.items(category)) {
            let label = if self.location_complete(category, &location) {
                format!("{location} ✓")
            } else {
                location.clone()
            };
            options.push(PickerOption {
                selection: LocationSelection::Location(location),
                label,
            });
        }

        let current = match (&config.location_filter, config.mode) {
            (Some(filter), _) => options
                .iter()
                .position(|option| {
                    matches!(&option.selection, LocationSelection::Location(l) if l == filter)
                })
                .unwrap_or(0),
            (None, sorting::SortMode::Location) => 1,
            _ => 0,
        };

        self.picker = Some(LocationPicker {
            category,
            options,
            selected: current,
        });
    }

    pub fn location_complete(&self, category: Category, location: &str) -> bool {
        let mut any = false;
        for item in self.items(category) {
            if item.location.as_deref() != Some(location) {
                continue;
            }
            any = true;
            if !self.checklist.is_complete(category, &item.name) {
                return false;
            }
        }
        any
    }

    /// (completed, total) for a category.
    pub fn progress(&self, category: Category) -> (usize, usize) {
        let items = self.items(category);
        let completed = items
            .iter()
            .filter(|item| self.checklist.is_complete(category, &item.name))
            .count();
        (completed, items.len())
    }

    pub fn overall_progress(&self) -> (usize, usize) {
        let mut completed = 0;
        let mut total = 0;
        for category in ALL {
            let (c, t) = self.progress(category);
            completed += c;
            total += t;
        }
        (completed, total)
    }

    pub fn request_clear_category(&mut self) {
        let Some(category) = self.active_tab.category() else {
            return;
        };
        if self.config.confirm_clear {
            self.dialog = Some(Dialog::ClearCategory(category));
        } else if let Err(err) = self.clear_category(category) {
            self.status = format!("Clear failed: {err}");
        }
    }

    pub fn clear_category(&mut self, category: Category) -> Result<()> {
        self.checklist.clear_category(category);
        self.checklist.save(&self.data_dir)?;
        self.status = format!("Cleared all {} progress", category.display_name());
        Ok(())
    }

    pub fn clamp_selection(&mut self) {
        let len = match self.active_tab.category() {
            Some(category) => self.visible_rows(category).len(),
            None => 0,
        };
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
