//! Wine repository.
//!
//! Queries use the runtime sqlx API; enum columns are checked TEXT and get
//! parsed during row conversion.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use wine_cellar_core::{
    ContactDetails, Wine, WineId, WineTaste, WineType, Winery, WineryId,
};

use super::RepositoryError;
use crate::stats::StatRecord;

/// Columns selected for a wine joined with its (optional) winery.
const WINE_SELECT: &str = r"
    SELECT w.id, w.name, w.winery_id, w.art, w.taste, w.year, w.land, w.region,
           w.price, w.bottles_amount, w.available_at_year, w.image_url,
           w.description, w.hidden_for_guests, w.created_at, w.updated_at,
           wy.name       AS winery_name,
           wy.address    AS winery_address,
           wy.post       AS winery_post,
           wy.city       AS winery_city,
           wy.land       AS winery_land,
           wy.phone      AS winery_phone,
           wy.email      AS winery_email,
           wy.website    AS winery_website,
           wy.created_at AS winery_created_at,
           wy.updated_at AS winery_updated_at
    FROM wine w
    LEFT JOIN winery wy ON wy.id = w.winery_id
";

/// Internal row type for wine queries with the winery join.
#[derive(Debug, sqlx::FromRow)]
struct WineRow {
    id: i32,
    name: String,
    winery_id: Option<i32>,
    art: String,
    taste: String,
    year: i32,
    land: String,
    region: Option<String>,
    price: Decimal,
    bottles_amount: i32,
    available_at_year: Option<i32>,
    image_url: Option<String>,
    description: Option<String>,
    hidden_for_guests: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    winery_name: Option<String>,
    winery_address: Option<String>,
    winery_post: Option<String>,
    winery_city: Option<String>,
    winery_land: Option<String>,
    winery_phone: Option<String>,
    winery_email: Option<String>,
    winery_website: Option<String>,
    winery_created_at: Option<DateTime<Utc>>,
    winery_updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<WineRow> for Wine {
    type Error = RepositoryError;

    fn try_from(row: WineRow) -> Result<Self, Self::Error> {
        let art = WineType::parse(&row.art).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("invalid wine type in database: {}", row.art))
        })?;
        let taste = WineTaste::parse(&row.taste).ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "invalid wine taste in database: {}",
                row.taste
            ))
        })?;

        let winery = match (row.winery_id, row.winery_name) {
            (Some(id), Some(name)) => Some(Winery {
                id: WineryId::new(id),
                name,
                contact: ContactDetails {
                    address: row.winery_address,
                    post: row.winery_post,
                    city: row.winery_city,
                    land: row.winery_land,
                    phone: row.winery_phone,
                    email: row.winery_email,
                    website: row.winery_website,
                },
                wine_count: None,
                created_at: row.winery_created_at.ok_or_else(|| {
                    RepositoryError::DataCorruption("winery join missing created_at".to_owned())
                })?,
                updated_at: row.winery_updated_at.ok_or_else(|| {
                    RepositoryError::DataCorruption("winery join missing updated_at".to_owned())
                })?,
            }),
            _ => None,
        };

        Ok(Self {
            id: WineId::new(row.id),
            name: row.name,
            winery_id: row.winery_id.map(WineryId::new),
            winery,
            art,
            taste,
            year: row.year,
            land: row.land,
            region: row.region,
            price: row.price,
            bottles_amount: row.bottles_amount,
            available_at_year: row.available_at_year,
            image_url: row.image_url,
            description: row.description,
            hidden_for_guests: row.hidden_for_guests,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Validated wine fields for create and update.
#[derive(Debug, Clone)]
pub struct WineInput {
    pub name: String,
    pub winery_id: Option<WineryId>,
    pub art: WineType,
    pub taste: WineTaste,
    pub year: i32,
    pub land: String,
    pub region: Option<String>,
    pub price: Decimal,
    pub bottles_amount: i32,
    pub available_at_year: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub hidden_for_guests: bool,
}

/// Optional guest catalog filters; `None` passes everything.
#[derive(Debug, Clone, Default)]
pub struct GuestWineFilter {
    pub art: Option<WineType>,
    pub taste: Option<WineTaste>,
    pub country: Option<String>,
}

/// Repository for wine database operations.
pub struct WineRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WineRepository<'a> {
    /// Create a new wine repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog (hidden wines included), newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if stored data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Wine>, RepositoryError> {
        let rows: Vec<WineRow> =
            sqlx::query_as(&format!("{WINE_SELECT} ORDER BY w.created_at DESC"))
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List guest-visible wines, cheapest first, with optional filters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_visible(
        &self,
        filter: &GuestWineFilter,
    ) -> Result<Vec<Wine>, RepositoryError> {
        let rows: Vec<WineRow> = sqlx::query_as(&format!(
            r"{WINE_SELECT}
            WHERE w.hidden_for_guests = FALSE
              AND ($1::text IS NULL OR w.art = $1)
              AND ($2::text IS NULL OR w.taste = $2)
              AND ($3::text IS NULL OR w.land = $3)
            ORDER BY w.price ASC
            "
        ))
        .bind(filter.art.map(WineType::as_str))
        .bind(filter.taste.map(WineTaste::as_str))
        .bind(filter.country.as_deref())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a single wine with its winery.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: WineId) -> Result<Option<Wine>, RepositoryError> {
        let row: Option<WineRow> = sqlx::query_as(&format!("{WINE_SELECT} WHERE w.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get several wines by id, with wineries, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[WineId]) -> Result<Vec<Wine>, RepositoryError> {
        let raw_ids: Vec<i32> = ids.iter().map(WineId::as_i32).collect();
        let rows: Vec<WineRow> = sqlx::query_as(&format!("{WINE_SELECT} WHERE w.id = ANY($1)"))
            .bind(&raw_ids)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Insert a wine and return it joined with its winery.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &WineInput) -> Result<Wine, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO wine
                (name, winery_id, art, taste, year, land, region, price,
                 bottles_amount, available_at_year, image_url, description,
                 hidden_for_guests)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            ",
        )
        .bind(&input.name)
        .bind(input.winery_id)
        .bind(input.art.as_str())
        .bind(input.taste.as_str())
        .bind(input.year)
        .bind(&input.land)
        .bind(input.region.as_deref())
        .bind(input.price)
        .bind(input.bottles_amount)
        .bind(input.available_at_year)
        .bind(input.image_url.as_deref())
        .bind(input.description.as_deref())
        .bind(input.hidden_for_guests)
        .fetch_one(self.pool)
        .await?;

        self.get(WineId::new(id)).await?.ok_or_else(|| {
            RepositoryError::DataCorruption("inserted wine row disappeared".to_owned())
        })
    }

    /// Update a wine. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: WineId,
        input: &WineInput,
    ) -> Result<Option<Wine>, RepositoryError> {
        let updated: Option<(i32,)> = sqlx::query_as(
            r"
            UPDATE wine
            SET name = $2, winery_id = $3, art = $4, taste = $5, year = $6,
                land = $7, region = $8, price = $9, bottles_amount = $10,
                available_at_year = $11, image_url = $12, description = $13,
                hidden_for_guests = $14, updated_at = now()
            WHERE id = $1
            RETURNING id
            ",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.winery_id)
        .bind(input.art.as_str())
        .bind(input.taste.as_str())
        .bind(input.year)
        .bind(&input.land)
        .bind(input.region.as_deref())
        .bind(input.price)
        .bind(input.bottles_amount)
        .bind(input.available_at_year)
        .bind(input.image_url.as_deref())
        .bind(input.description.as_deref())
        .bind(input.hidden_for_guests)
        .fetch_optional(self.pool)
        .await?;

        match updated {
            Some((id,)) => self.get(WineId::new(id)).await,
            None => Ok(None),
        }
    }

    /// Delete a wine. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: WineId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM wine WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Project the statistics columns of every wine, in primary-key order
    /// so repeated aggregation runs see an identical sequence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` for unknown enum values.
    pub async fn stat_records(&self) -> Result<Vec<StatRecord>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct StatRow {
            art: String,
            taste: String,
            land: String,
            price: Decimal,
            bottles_amount: i32,
        }

        let rows: Vec<StatRow> = sqlx::query_as(
            "SELECT art, taste, land, price, bottles_amount FROM wine ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let art = WineType::parse(&row.art).ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "invalid wine type in database: {}",
                        row.art
                    ))
                })?;
                let taste = WineTaste::parse(&row.taste).ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "invalid wine taste in database: {}",
                        row.taste
                    ))
                })?;
                Ok(StatRecord {
                    art,
                    taste,
                    land: row.land,
                    price: row.price,
                    bottles: row.bottles_amount,
                })
            })
            .collect()
    }
}
