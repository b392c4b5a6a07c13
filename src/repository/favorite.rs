use chrono::Utc;
use diesel::prelude::*;

use crate::domain::favorites::FavoriteRef;
use crate::domain::types::UserId;
use crate::repository::{DieselRepository, FavoriteReader, FavoriteWriter, RepositoryResult};

impl FavoriteReader for DieselRepository {
    fn list_client_favorites(&self, client_id: &UserId) -> RepositoryResult<Vec<String>> {
        use crate::schema::client_favorites;

        let mut conn = self.conn()?;

        let references = client_favorites::table
            .filter(client_favorites::client_id.eq(client_id.as_str()))
            .order((
                client_favorites::created_at.asc(),
                client_favorites::reference.asc(),
            ))
            .select(client_favorites::reference)
            .load::<String>(&mut conn)?;

        Ok(references)
    }
}

impl FavoriteWriter for DieselRepository {
    fn add_client_favorite(
        &self,
        client_id: &UserId,
        reference: &FavoriteRef,
    ) -> RepositoryResult<usize> {
        use crate::schema::client_favorites;

        let mut conn = self.conn()?;

        let affected = diesel::insert_or_ignore_into(client_favorites::table)
            .values((
                client_favorites::client_id.eq(client_id.as_str()),
                client_favorites::reference.eq(reference.to_string()),
                client_favorites::created_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn remove_client_favorite(
        &self,
        client_id: &UserId,
        reference: &str,
    ) -> RepositoryResult<usize> {
        use crate::schema::client_favorites;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            client_favorites::table
                .filter(client_favorites::client_id.eq(client_id.as_str()))
                .filter(client_favorites::reference.eq(reference)),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
