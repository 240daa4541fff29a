//! Country name normalization (common variant → standard form)

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    /// Lowercase alias → canonical country name
    static ref COUNTRY_ALIASES: HashMap<&'static str, &'static str> = {
        let table: [(&str, &[&str]); 8] = [
            (
                "United States",
                &[
                    "us", "usa", "u.s.", "u.s.a.", "u.s", "u.s.a",
                    "united states", "united states of america",
                ],
            ),
            (
                "United Kingdom",
                &["uk", "u.k.", "u.k", "united kingdom", "great britain"],
            ),
            ("Netherlands", &["the netherlands", "holland", "netherlands"]),
            ("Brazil", &["brasil", "brazil"]),
            ("South Korea", &["republic of korea", "south korea"]),
            ("China", &["prc", "people's republic of china", "china"]),
            ("Germany", &["deutschland", "germany"]),
            ("Mexico", &["m\u{e9}xico", "mexico"]),
        ];
        let mut map = HashMap::new();
        for (canonical, aliases) in table {
            for alias in aliases {
                map.insert(*alias, canonical);
            }
        }
        map
    };
}

/// Resolve a country through the alias table, returning the trimmed input when
/// no alias matches.
pub fn normalize_country(country: &str) -> String {
    let trimmed = country.trim();
    COUNTRY_ALIASES
        .get(trimmed.to_lowercase().as_str())
        .map(|canonical| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
