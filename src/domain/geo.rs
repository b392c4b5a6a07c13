//! Finite set of `(state, city)` pairs available for vendor profiles and
//! search filters.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StateCities {
    pub state: &'static str,
    pub cities: &'static [&'static str],
}

const LOCATIONS: &[StateCities] = &[
    StateCities {
        state: "Arizona",
        cities: &["Phoenix", "Scottsdale", "Tucson"],
    },
    StateCities {
        state: "California",
        cities: &["Los Angeles", "Sacramento", "San Diego", "San Francisco", "San Jose"],
    },
    StateCities {
        state: "Colorado",
        cities: &["Boulder", "Colorado Springs", "Denver"],
    },
    StateCities {
        state: "Florida",
        cities: &["Jacksonville", "Miami", "Orlando", "Tampa"],
    },
    StateCities {
        state: "Georgia",
        cities: &["Atlanta", "Savannah"],
    },
    StateCities {
        state: "Illinois",
        cities: &["Chicago", "Naperville", "Springfield"],
    },
    StateCities {
        state: "New York",
        cities: &["Albany", "Brooklyn", "Buffalo", "New York City"],
    },
    StateCities {
        state: "Tennessee",
        cities: &["Memphis", "Nashville"],
    },
    StateCities {
        state: "Texas",
        cities: &["Austin", "Dallas", "Houston", "San Antonio"],
    },
    StateCities {
        state: "Washington",
        cities: &["Seattle", "Spokane", "Tacoma"],
    },
];

/// All states in alphabetical order.
pub fn states() -> impl Iterator<Item = &'static str> {
    LOCATIONS.iter().map(|l| l.state)
}

/// Cities of a state, matched case-insensitively. Unknown states yield an
/// empty slice.
pub fn cities(state: &str) -> &'static [&'static str] {
    find_state(state).map(|l| l.cities).unwrap_or(&[])
}

/// Canonical spelling of a `(state, city)` pair, if the pair is known.
pub fn canonical(state: &str, city: &str) -> Option<(&'static str, &'static str)> {
    let location = find_state(state)?;
    let city = location
        .cities
        .iter()
        .find(|c| c.eq_ignore_ascii_case(city.trim()))?;
    Some((location.state, city))
}

pub fn contains(state: &str, city: &str) -> bool {
    canonical(state, city).is_some()
}

fn find_state(state: &str) -> Option<&'static StateCities> {
    let state = state.trim();
    LOCATIONS.iter().find(|l| l.state.eq_ignore_ascii_case(state))
}
