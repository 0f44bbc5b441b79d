use crate::{catalog::Collectible, gametime};

/// Whether an item can be obtained at the given in-game minute.
///
/// Items without a time constraint are always available. A weather list
/// naming sunny, rainy and rainbow together marks the item as obtainable in
/// any weather, which in the game's data also means any time. An item whose
/// time text yields no parseable ranges is treated as never available.
pub fn is_available(item: &Collectible, now: u16) -> bool {
    let Some(time_text) = item.time.as_deref() else {
        return true;
    };
    if any_weather(item) {
        return true;
    }
    let text = time_text.trim();
    if mentions_all_day(text) {
        return true;
    }

    for range in text.split([',', '/']) {
        let range = range.trim();
        if range.is_empty() {
            continue;
        }
        let parts: Vec<&str> = range.split('-').collect();
        if parts.len() != 2 {
            continue;
        }
        let Ok(start) = gametime::parse_clock(parts[0]) else {
            continue;
        };
        let Ok(end) = gametime::parse_clock(parts[1]) else {
            continue;
        };
        if start < end {
            if now >= start && now < end {
                return true;
            }
        } else {
            // window crosses midnight
            if now >= start || now < end {
                return true;
            }
        }
    }
    false
}

/// True when the weather list names sunny, rainy and rainbow all at once.
/// Partial weather lists are deliberately not treated as always-available.
pub fn any_weather(item: &Collectible) -> bool {
    let Some(weather) = &item.weather else {
        return false;
    };
    let mut sunny = false;
    let mut rainy = false;
    let mut rainbow = false;
    for entry in weather {
        match entry.trim().to_ascii_lowercase().as_str() {
            "sunny" => sunny = true,
            "rainy" => rainy = true,
            "rainbow" => rainbow = true,
            _ => {}
        }
    }
    sunny && rainy && rainbow
}

fn mentions_all_day(text: &str) -> bool {
    // matches "all day" anywhere in the text, any internal whitespace
    let collapsed: String = text
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("");
    collapsed.contains("allday")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(time: Option<&str>, weather: Option<&[&str]>) -> Collectible {
        Collectible {
            name: "test".to_string(),
            location: None,
            time: time.map(str::to_string),
            weather: weather.map(|w| w.iter().map(|s| s.to_string()).collect()),
            level: None,
        }
    }

    #[test]
    fn no_time_constraint_is_always_available() {
        assert!(is_available(&item(None, None), 0));
        assert!(is_available(&item(None, None), 1439));
    }

    #[test]
    fn all_day_text_is_always_available() {
        assert!(is_available(&item(Some("All Day"), None), 300));
        assert!(is_available(&item(Some("all  day"), None), 300));
        assert!(is_available(&item(Some("ALLDAY"), None), 300));
    }

    #[test]
    fn plain_window_is_end_exclusive() {
        let it = item(Some("9 AM - 5 PM"), None);
        assert!(is_available(&it, 12 * 60));
        assert!(is_available(&it, 9 * 60));
        assert!(!is_available(&it, 17 * 60));
        assert!(!is_available(&it, 8 * 60));
    }

    #[test]
    fn midnight_crossing_window() {
        let it = item(Some("10 PM - 4 AM"), None);
        assert!(is_available(&it, 23 * 60));
        assert!(is_available(&it, 2 * 60));
        assert!(is_available(&it, 22 * 60));
        assert!(!is_available(&it, 5 * 60));
        assert!(!is_available(&it, 12 * 60));
    }

    #[test]
    fn multiple_ranges_match_any() {
        let it = item(Some("6 AM - 8 AM, 4 PM - 9 PM"), None);
        assert!(is_available(&it, 7 * 60));
        assert!(is_available(&it, 18 * 60));
        assert!(!is_available(&it, 12 * 60));

        let slashed = item(Some("6 AM - 8 AM / 4 PM - 9 PM"), None);
        assert!(is_available(&slashed, 18 * 60));
    }

    #[test]
    fn unparseable_ranges_are_skipped() {
        // one bad range, one good
        let it = item(Some("whenever, 4 PM - 9 PM"), None);
        assert!(is_available(&it, 18 * 60));
        assert!(!is_available(&it, 10 * 60));
    }

    #[test]
    fn fully_unparseable_time_is_never_available() {
        let it = item(Some("dusk till dawn"), None);
        assert!(!is_available(&it, 0));
        assert!(!is_available(&it, 720));
    }

    #[test]
    fn full_weather_set_overrides_time() {
        let it = item(Some("9 AM - 10 AM"), Some(&["Sunny", "Rainy", "Rainbow"]));
        assert!(is_available(&it, 3 * 60));
        assert!(is_available(&it, 20 * 60));
        // trimming and case do not matter
        let messy = item(Some("9 AM - 10 AM"), Some(&[" sunny ", "RAINY", "Rainbow"]));
        assert!(is_available(&messy, 3 * 60));
    }

    #[test]
    fn partial_weather_set_does_not_override() {
        let it = item(Some("9 AM - 10 AM"), Some(&["Sunny", "Rainy"]));
        assert!(!is_available(&it, 3 * 60));
        assert!(is_available(&it, 9 * 60 + 30));
    }
}
