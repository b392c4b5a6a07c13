use serde::Serialize;

use crate::domain::types::CategoryId;

/// Static catalogue entry classifying vendors and services.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub icon: &'static str,
}

const CATEGORIES: &[Category] = &[
    Category {
        id: "venues",
        name: "Venues",
        description: Some("Halls, gardens, ballrooms and other event spaces."),
        icon: "building",
    },
    Category {
        id: "caterers",
        name: "Caterers",
        description: Some("Full-service catering, food trucks and private chefs."),
        icon: "utensils",
    },
    Category {
        id: "photographers",
        name: "Photographers",
        description: Some("Event, portrait and wedding photography."),
        icon: "camera",
    },
    Category {
        id: "videographers",
        name: "Videographers",
        description: Some("Event films, highlight reels and live streaming."),
        icon: "video",
    },
    Category {
        id: "djs",
        name: "DJs",
        description: Some("DJs and MCs for parties, weddings and corporate events."),
        icon: "headphones",
    },
    Category {
        id: "bands",
        name: "Bands & Musicians",
        description: Some("Live bands, soloists and ensembles."),
        icon: "music",
    },
    Category {
        id: "florists",
        name: "Florists",
        description: Some("Bouquets, centerpieces and floral installations."),
        icon: "flower",
    },
    Category {
        id: "planners",
        name: "Event Planners",
        description: Some("Full planning, day-of coordination and design."),
        icon: "clipboard",
    },
    Category {
        id: "decorators",
        name: "Decorators",
        description: Some("Themed decor, draping and balloon design."),
        icon: "sparkles",
    },
    Category {
        id: "bakeries",
        name: "Cakes & Desserts",
        description: Some("Custom cakes, dessert tables and pastry."),
        icon: "cake",
    },
    Category {
        id: "rentals",
        name: "Rentals",
        description: Some("Tables, chairs, tents, linens and equipment."),
        icon: "box",
    },
    Category {
        id: "hair-makeup",
        name: "Hair & Makeup",
        description: Some("Stylists and makeup artists."),
        icon: "brush",
    },
    Category {
        id: "officiants",
        name: "Officiants",
        description: None,
        icon: "book",
    },
    Category {
        id: "transportation",
        name: "Transportation",
        description: Some("Limousines, shuttles and vintage cars."),
        icon: "car",
    },
    Category {
        id: "lighting",
        name: "Lighting & AV",
        description: Some("Stage lighting, sound systems and projection."),
        icon: "lightbulb",
    },
];

/// Read-only lookup over a set of categories.
///
/// [`CategoryRegistry::default`] serves the built-in catalogue; tests can
/// build a registry over their own slice.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRegistry {
    categories: &'static [Category],
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            categories: CATEGORIES,
        }
    }
}

impl CategoryRegistry {
    pub const fn new(categories: &'static [Category]) -> Self {
        Self { categories }
    }

    /// All categories in catalogue order.
    pub fn all(&self) -> &'static [Category] {
        self.categories
    }

    pub fn by_id(&self, id: &str) -> Option<&'static Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Exact, case-sensitive name lookup.
    pub fn by_name(&self, name: &str) -> Option<&'static Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Display name for a category id, if the id is known.
    pub fn name_for(&self, id: &CategoryId) -> Option<&'static str> {
        self.by_id(id.as_str()).map(|c| c.name)
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.by_id(id.as_str()).is_some()
    }
}
