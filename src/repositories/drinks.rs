//! Drinks repository.
//!
//! CRUD over the `drinks` table. The recipe column stores the serialized
//! ingredient list and every read parses it back into the typed model, so
//! malformed rows surface as errors instead of leaking through.
//!
//! All queries use parameterized statements. Each operation is a single
//! independent statement; no multi-statement transaction spans a request.

use crate::errors::ApiError;
use crate::models::{Drink, Ingredient};
use sqlx::SqlitePool;
use tracing::instrument;

/// Raw drink row as stored.
#[derive(Debug, sqlx::FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl DrinkRow {
    fn into_drink(self) -> Result<Drink, ApiError> {
        let recipe: Vec<Ingredient> = serde_json::from_str(&self.recipe).map_err(|e| {
            ApiError::Database(format!("stored recipe for drink {} is corrupt: {}", self.id, e))
        })?;
        Ok(Drink {
            id: self.id,
            title: self.title,
            recipe,
        })
    }
}

fn serialize_recipe(recipe: &[Ingredient]) -> Result<String, ApiError> {
    serde_json::to_string(recipe).map_err(|_| ApiError::Unprocessable)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Repository for drink persistence operations.
pub struct DrinksRepository;

impl DrinksRepository {
    /// List every drink on the menu, ordered by id.
    #[instrument(skip_all)]
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Drink>, ApiError> {
        let rows: Vec<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drinks ORDER BY id")
                .fetch_all(pool)
                .await?;

        rows.into_iter().map(DrinkRow::into_drink).collect()
    }

    /// Look up a single drink by id.
    #[instrument(skip_all, fields(drink_id = %id))]
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Drink>, ApiError> {
        let row: Option<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drinks WHERE id = ?")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        row.map(DrinkRow::into_drink).transpose()
    }

    /// Insert a new drink.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unprocessable` when the insert cannot commit,
    /// including a duplicate title (unique constraint violation).
    #[instrument(skip_all, fields(title = %title))]
    pub async fn create(
        pool: &SqlitePool,
        title: &str,
        recipe: &[Ingredient],
    ) -> Result<Drink, ApiError> {
        let recipe_json = serialize_recipe(recipe)?;

        let row: DrinkRow = sqlx::query_as(
            "INSERT INTO drinks (title, recipe) VALUES (?, ?) RETURNING id, title, recipe",
        )
        .bind(title)
        .bind(&recipe_json)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::debug!(target: "menu.repo.drinks", title = %title, "Duplicate drink title");
            } else {
                tracing::debug!(target: "menu.repo.drinks", error = %e, "Insert rejected");
            }
            ApiError::Unprocessable
        })?;

        tracing::info!(target: "menu.repo.drinks", drink_id = row.id, "Drink created");
        row.into_drink()
    }

    /// Update a drink's title and/or recipe.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when no drink with `id` exists and
    /// `ApiError::Unprocessable` when the update cannot commit (e.g.
    /// renaming to a title that already exists).
    #[instrument(skip_all, fields(drink_id = %id))]
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Drink, ApiError> {
        let existing = Self::find_by_id(pool, id)
            .await?
            .ok_or(ApiError::NotFound)?;

        let new_title = title.unwrap_or(&existing.title);
        let new_recipe = match recipe {
            Some(r) => serialize_recipe(r)?,
            None => serialize_recipe(&existing.recipe)?,
        };

        let row: DrinkRow = sqlx::query_as(
            "UPDATE drinks SET title = ?, recipe = ? WHERE id = ? RETURNING id, title, recipe",
        )
        .bind(new_title)
        .bind(&new_recipe)
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            tracing::debug!(target: "menu.repo.drinks", error = %e, "Update rejected");
            ApiError::Unprocessable
        })?;

        tracing::info!(target: "menu.repo.drinks", drink_id = id, "Drink updated");
        row.into_drink()
    }

    /// Delete a drink by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when no drink with `id` exists and
    /// `ApiError::Unprocessable` when the delete cannot commit.
    #[instrument(skip_all, fields(drink_id = %id))]
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                tracing::debug!(target: "menu.repo.drinks", error = %e, "Delete rejected");
                ApiError::Unprocessable
            })?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound);
        }

        tracing::info!(target: "menu.repo.drinks", drink_id = id, "Drink deleted");
        Ok(())
    }
}
