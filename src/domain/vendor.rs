use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::service::Service;
use crate::domain::types::{
    CategoryId, CityName, ContactEmail, ImageUrl, PhoneNumber, Rating, ReviewsCount, StateName,
    Tagline, TypeConstraintError, VendorDescription, VendorId, VendorName, VendorSlug, WebsiteUrl,
};

/// Public vendor profile owned by one vendor user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vendor {
    pub id: VendorId,
    pub name: VendorName,
    pub slug: VendorSlug,
    pub tagline: Option<Tagline>,
    pub description: VendorDescription,
    pub state: StateName,
    pub city: CityName,
    /// Ordered category ids; names are resolved through the registry.
    pub category_ids: Vec<CategoryId>,
    pub profile_image: ImageUrl,
    pub banner_image: Option<ImageUrl>,
    pub rating: Option<Rating>,
    pub reviews_count: Option<ReviewsCount>,
    pub contact_email: Option<ContactEmail>,
    pub phone_number: Option<PhoneNumber>,
    pub website: Option<WebsiteUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A vendor together with every service it owns.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VendorListing {
    pub vendor: Vendor,
    pub services: Vec<Service>,
}

/// Profile fields written when a vendor sets up or edits its profile.
///
/// The slug is not part of the payload; the repository derives it from the
/// name when the profile is saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorProfile {
    pub id: VendorId,
    pub name: VendorName,
    pub tagline: Option<Tagline>,
    pub description: VendorDescription,
    pub state: StateName,
    pub city: CityName,
    pub category_ids: Vec<CategoryId>,
    /// `None` keeps the stored image on update. Required on creation.
    pub profile_image: Option<ImageUrl>,
    /// `None` keeps the stored banner on update.
    pub banner_image: Option<ImageUrl>,
    pub contact_email: Option<ContactEmail>,
    pub phone_number: Option<PhoneNumber>,
    pub website: Option<WebsiteUrl>,
}

/// ASCII spelling of common accented Latin letters.
fn fold_ascii(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        _ => return None,
    };
    Some(folded)
}

/// Derives the base slug for a vendor name.
///
/// Letters are lowercased and accented Latin letters folded to ASCII;
/// whitespace runs become a single `-`. Any other character outside
/// `[a-z0-9-]` is dropped.
pub fn slugify(name: &str) -> Result<VendorSlug, TypeConstraintError> {
    let mut slug = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        let mut part = String::with_capacity(word.len());
        for c in word.chars().flat_map(char::to_lowercase) {
            if c.is_ascii_alphanumeric() || c == '-' {
                part.push(c);
            } else if let Some(folded) = fold_ascii(c) {
                part.push_str(folded);
            }
        }
        if part.is_empty() {
            continue;
        }
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&part);
    }
    VendorSlug::new(slug)
}

/// Picks the first free slug: `base`, then `base-2`, `base-3`, ...
pub fn unique_slug<F>(base: &VendorSlug, mut is_taken: F) -> Result<VendorSlug, TypeConstraintError>
where
    F: FnMut(&str) -> bool,
{
    if !is_taken(base.as_str()) {
        return Ok(base.clone());
    }
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !is_taken(&candidate) {
            return VendorSlug::new(candidate);
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Spin  Doctors DJ").unwrap(), "spin-doctors-dj");
        assert_eq!(slugify("Café Olé").unwrap(), "cafe-ole");
        assert_eq!(slugify("Bread & Butter Co.").unwrap(), "bread-butter-co");
    }

    #[test]
    fn slugify_keeps_only_ascii() {
        assert_eq!(slugify("Straße Bänd 東京").unwrap(), "strasse-band");
        assert!(slugify("東京").is_err());
    }

    #[test]
    fn slugify_rejects_names_without_slug_characters() {
        assert!(slugify("&&& !!!").is_err());
    }

    #[test]
    fn unique_slug_appends_smallest_free_suffix() {
        let base = slugify("Spin Doctors").unwrap();
        let taken = ["spin-doctors", "spin-doctors-2"];
        let slug = unique_slug(&base, |s| taken.contains(&s)).unwrap();
        assert_eq!(slug, "spin-doctors-3");

        let free = unique_slug(&base, |_| false).unwrap();
        assert_eq!(free, "spin-doctors");
    }
}
