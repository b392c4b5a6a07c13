use std::collections::{HashMap, HashSet};

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::types::{VendorId, VendorSlug};
use crate::domain::vendor::{Vendor, VendorListing, VendorProfile, slugify, unique_slug};
use crate::models::service::Service as DbService;
use crate::models::vendor::{
    NewVendor, Vendor as DbVendor, VendorCategory, VendorProfileChangeset, location_key,
};
use crate::repository::service::hydrate_services;
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, VendorReader, VendorSearchQuery,
    VendorWriter,
};

/// Ordered category ids for each vendor in `vendor_ids`.
fn load_category_ids(
    conn: &mut SqliteConnection,
    vendor_ids: Vec<&str>,
) -> RepositoryResult<HashMap<String, Vec<String>>> {
    use crate::schema::vendor_categories;

    let rows = vendor_categories::table
        .filter(vendor_categories::vendor_id.eq_any(vendor_ids))
        .order((
            vendor_categories::vendor_id.asc(),
            vendor_categories::position.asc(),
        ))
        .select(VendorCategory::as_select())
        .load::<VendorCategory>(conn)?;

    let mut by_vendor: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        by_vendor
            .entry(row.vendor_id)
            .or_default()
            .push(row.category_id);
    }
    Ok(by_vendor)
}

fn hydrate_vendors(
    conn: &mut SqliteConnection,
    rows: Vec<DbVendor>,
) -> RepositoryResult<Vec<Vendor>> {
    let ids: Vec<&str> = rows.iter().map(|v| v.id.as_str()).collect();
    let mut categories = load_category_ids(conn, ids)?;

    rows.into_iter()
        .map(|row| -> RepositoryResult<Vendor> {
            let category_ids = categories.remove(&row.id).unwrap_or_default();
            Ok(row.into_domain(category_ids)?)
        })
        .collect()
}

fn hydrate_listings(
    conn: &mut SqliteConnection,
    vendors: Vec<Vendor>,
) -> RepositoryResult<Vec<VendorListing>> {
    use crate::schema::services;

    let ids: Vec<&str> = vendors.iter().map(|v| v.id.as_str()).collect();
    let rows = services::table
        .filter(services::vendor_id.eq_any(ids))
        .order(services::id.asc())
        .select(DbService::as_select())
        .load::<DbService>(conn)?;

    let mut by_vendor: HashMap<String, Vec<_>> = HashMap::new();
    for service in hydrate_services(conn, rows)? {
        by_vendor
            .entry(service.vendor_id.as_str().to_string())
            .or_default()
            .push(service);
    }

    Ok(vendors
        .into_iter()
        .map(|vendor| {
            let services = by_vendor.remove(vendor.id.as_str()).unwrap_or_default();
            VendorListing { vendor, services }
        })
        .collect())
}

/// Picks a slug for `profile` that no other vendor uses.
fn resolve_slug(
    conn: &mut SqliteConnection,
    profile: &VendorProfile,
) -> RepositoryResult<VendorSlug> {
    use crate::schema::vendors;

    let base = slugify(&profile.name)?;
    let taken: HashSet<String> = vendors::table
        .filter(vendors::slug.like(format!("{base}%")))
        .filter(vendors::id.ne(profile.id.as_str()))
        .select(vendors::slug)
        .load::<String>(conn)?
        .into_iter()
        .collect();

    Ok(unique_slug(&base, |candidate| taken.contains(candidate))?)
}

fn replace_categories(
    conn: &mut SqliteConnection,
    profile: &VendorProfile,
) -> RepositoryResult<()> {
    use crate::schema::vendor_categories;

    diesel::delete(
        vendor_categories::table.filter(vendor_categories::vendor_id.eq(profile.id.as_str())),
    )
    .execute(conn)?;

    let rows: Vec<VendorCategory> = profile
        .category_ids
        .iter()
        .enumerate()
        .map(|(position, category_id)| VendorCategory {
            vendor_id: profile.id.as_str().to_string(),
            category_id: category_id.as_str().to_string(),
            position: position as i32,
        })
        .collect();

    if rows.is_empty() {
        return Ok(());
    }

    diesel::insert_into(vendor_categories::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

impl VendorReader for DieselRepository {
    fn get_vendor_by_id(&self, id: &VendorId) -> RepositoryResult<Option<Vendor>> {
        use crate::schema::vendors;

        let mut conn = self.conn()?;

        let row = vendors::table
            .find(id.as_str())
            .select(DbVendor::as_select())
            .first::<DbVendor>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(hydrate_vendors(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn get_vendor_by_slug(&self, slug: &VendorSlug) -> RepositoryResult<Option<VendorListing>> {
        use crate::schema::vendors;

        let mut conn = self.conn()?;

        let row = vendors::table
            .filter(vendors::slug.eq(slug.as_str()))
            .select(DbVendor::as_select())
            .first::<DbVendor>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };
        let vendors = hydrate_vendors(&mut conn, vec![row])?;
        Ok(hydrate_listings(&mut conn, vendors)?.pop())
    }

    fn get_vendors_by_ids(&self, ids: &[VendorId]) -> RepositoryResult<Vec<Vendor>> {
        use crate::schema::vendors;

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.conn()?;

        let ids: Vec<&str> = ids.iter().map(VendorId::as_str).collect();
        let rows = vendors::table
            .filter(vendors::id.eq_any(ids))
            .select(DbVendor::as_select())
            .load::<DbVendor>(&mut conn)?;

        hydrate_vendors(&mut conn, rows)
    }

    fn list_search_candidates(
        &self,
        query: VendorSearchQuery,
    ) -> RepositoryResult<Vec<VendorListing>> {
        use crate::schema::vendors;

        let mut conn = self.conn()?;

        let mut items = vendors::table
            .select(DbVendor::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(state) = query.state.as_deref().map(location_key).filter(|s| !s.is_empty()) {
            items = items.filter(vendors::state_key.eq(state));
        }
        if let Some(city) = query.city.as_deref().map(location_key).filter(|c| !c.is_empty()) {
            items = items.filter(vendors::city_key.eq(city));
        }

        let rows = items
            .order(vendors::name.asc())
            .load::<DbVendor>(&mut conn)?;

        let vendors = hydrate_vendors(&mut conn, rows)?;
        hydrate_listings(&mut conn, vendors)
    }
}

impl VendorWriter for DieselRepository {
    fn save_vendor_profile(&self, profile: &VendorProfile) -> RepositoryResult<Vendor> {
        use crate::schema::vendors;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let exists = vendors::table
                .find(profile.id.as_str())
                .select(vendors::id)
                .first::<String>(conn)
                .optional()?
                .is_some();

            let slug = resolve_slug(conn, profile)?;
            let now = Utc::now().naive_utc();

            if exists {
                diesel::update(vendors::table.find(profile.id.as_str()))
                    .set(VendorProfileChangeset {
                        name: profile.name.as_str(),
                        slug: slug.as_str(),
                        tagline: profile.tagline.as_deref(),
                        description: profile.description.as_str(),
                        state: profile.state.as_str(),
                        city: profile.city.as_str(),
                        state_key: location_key(&profile.state),
                        city_key: location_key(&profile.city),
                        contact_email: profile.contact_email.as_deref(),
                        phone_number: profile.phone_number.as_deref(),
                        website: profile.website.as_deref(),
                        updated_at: now,
                    })
                    .execute(conn)?;

                if let Some(image) = &profile.profile_image {
                    diesel::update(vendors::table.find(profile.id.as_str()))
                        .set(vendors::profile_image.eq(image.as_str()))
                        .execute(conn)?;
                }
                if let Some(banner) = &profile.banner_image {
                    diesel::update(vendors::table.find(profile.id.as_str()))
                        .set(vendors::banner_image.eq(banner.as_str()))
                        .execute(conn)?;
                }
            } else {
                let profile_image = profile.profile_image.as_ref().ok_or_else(|| {
                    RepositoryError::ValidationError("profile image is required".to_string())
                })?;

                diesel::insert_into(vendors::table)
                    .values(NewVendor {
                        id: profile.id.as_str(),
                        name: profile.name.as_str(),
                        slug: slug.as_str(),
                        tagline: profile.tagline.as_deref(),
                        description: profile.description.as_str(),
                        state: profile.state.as_str(),
                        city: profile.city.as_str(),
                        state_key: location_key(&profile.state),
                        city_key: location_key(&profile.city),
                        profile_image: profile_image.as_str(),
                        banner_image: profile.banner_image.as_deref(),
                        contact_email: profile.contact_email.as_deref(),
                        phone_number: profile.phone_number.as_deref(),
                        website: profile.website.as_deref(),
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)?;
            }

            replace_categories(conn, profile)?;

            let row = vendors::table
                .find(profile.id.as_str())
                .select(DbVendor::as_select())
                .first::<DbVendor>(conn)?;
            hydrate_vendors(conn, vec![row])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }
}
