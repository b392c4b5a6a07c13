use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::service::{NewService, Service, ServiceUpdate, check_photo_count};
use crate::domain::types::{ServiceId, VendorId};
use crate::models::service::{
    NewService as DbNewService, NewServicePhoto, Service as DbService, ServiceChangeset,
    ServicePhoto,
};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, ServiceReader, ServiceWriter,
};

/// Attaches photos to service rows, preserving the order of `rows`.
pub(crate) fn hydrate_services(
    conn: &mut SqliteConnection,
    rows: Vec<DbService>,
) -> RepositoryResult<Vec<Service>> {
    use crate::schema::service_photos;

    let ids: Vec<i32> = rows.iter().map(|s| s.id).collect();
    let photos = service_photos::table
        .filter(service_photos::service_id.eq_any(ids))
        .order((service_photos::service_id.asc(), service_photos::position.asc()))
        .select(ServicePhoto::as_select())
        .load::<ServicePhoto>(conn)?;

    let mut by_service: HashMap<i32, Vec<String>> = HashMap::new();
    for photo in photos {
        by_service.entry(photo.service_id).or_default().push(photo.url);
    }

    rows.into_iter()
        .map(|row| -> RepositoryResult<Service> {
            let photos = by_service.remove(&row.id).unwrap_or_default();
            Ok(row.into_domain(photos)?)
        })
        .collect()
}

impl ServiceReader for DieselRepository {
    fn list_services(&self, vendor_id: &VendorId) -> RepositoryResult<Vec<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let rows = services::table
            .filter(services::vendor_id.eq(vendor_id.as_str()))
            .order(services::id.asc())
            .select(DbService::as_select())
            .load::<DbService>(&mut conn)?;

        hydrate_services(&mut conn, rows)
    }

    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let row = services::table
            .find(id.get())
            .select(DbService::as_select())
            .first::<DbService>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(hydrate_services(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn get_services_by_ids(&self, ids: &[ServiceId]) -> RepositoryResult<Vec<Service>> {
        use crate::schema::services;

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.conn()?;

        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let rows = services::table
            .filter(services::id.eq_any(ids))
            .select(DbService::as_select())
            .load::<DbService>(&mut conn)?;

        hydrate_services(&mut conn, rows)
    }
}

impl ServiceWriter for DieselRepository {
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service> {
        use crate::schema::{service_photos, services};

        check_photo_count(service.photos.len())?;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let now = Utc::now().naive_utc();
            let row = diesel::insert_into(services::table)
                .values(DbNewService {
                    vendor_id: service.vendor_id.as_str(),
                    name: service.name.as_str(),
                    description: service.description.as_str(),
                    category_id: service.category_id.as_str(),
                    price_range: service.price_range.as_deref(),
                    created_at: now,
                    updated_at: now,
                })
                .returning(DbService::as_returning())
                .get_result::<DbService>(conn)?;

            let photos: Vec<NewServicePhoto> = service
                .photos
                .iter()
                .enumerate()
                .map(|(position, url)| NewServicePhoto {
                    service_id: row.id,
                    position: position as i32,
                    url: url.as_str(),
                })
                .collect();

            diesel::insert_into(service_photos::table)
                .values(&photos)
                .execute(conn)?;

            hydrate_services(conn, vec![row])?
                .pop()
                .ok_or(RepositoryError::NotFound)
        })
    }

    fn update_service(
        &self,
        id: ServiceId,
        vendor_id: &VendorId,
        update: &ServiceUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            services::table
                .filter(services::id.eq(id.get()))
                .filter(services::vendor_id.eq(vendor_id.as_str())),
        )
        .set(ServiceChangeset {
            name: update.name.as_str(),
            description: update.description.as_str(),
            category_id: update.category_id.as_str(),
            price_range: update.price_range.as_deref(),
            updated_at: Utc::now().naive_utc(),
        })
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_service(&self, id: ServiceId, vendor_id: &VendorId) -> RepositoryResult<usize> {
        use crate::schema::{service_photos, services};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            let owned = services::table
                .filter(services::id.eq(id.get()))
                .filter(services::vendor_id.eq(vendor_id.as_str()))
                .select(services::id)
                .first::<i32>(conn)
                .optional()?;

            let Some(service_id) = owned else {
                return Ok(0);
            };

            diesel::delete(service_photos::table.filter(service_photos::service_id.eq(service_id)))
                .execute(conn)?;
            Ok(diesel::delete(services::table.find(service_id)).execute(conn)?)
        })?;

        Ok(affected)
    }
}
