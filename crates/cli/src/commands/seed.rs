//! Database seeding command.
//!
//! Creates the default local admin account and, when the catalog is
//! empty, a small sample catalog to develop against. Safe to run twice.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use rust_decimal_macros::dec;
use sqlx::PgPool;

use wine_cellar_core::{ContactDetails, Email, WineTaste, WineType, WineryId};
use wine_cellar_server::db::{WineInput, WineRepository, WineryInput, WineryRepository};

use super::{CliError, admin};

const DEFAULT_ADMIN_EMAIL: &str = "admin@winecellar.local";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Seed the database.
///
/// # Errors
///
/// Returns an error when the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    seed_admin(&pool).await?;
    seed_catalog(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_admin(pool: &PgPool) -> Result<(), CliError> {
    let email = Email::parse(DEFAULT_ADMIN_EMAIL)
        .map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    match admin::create_in(pool, &email, "Admin", DEFAULT_ADMIN_PASSWORD).await {
        Ok(id) => {
            tracing::info!(
                "Default admin created (id {id}): {DEFAULT_ADMIN_EMAIL} / {DEFAULT_ADMIN_PASSWORD}"
            );
            Ok(())
        }
        Err(CliError::UserExists(_)) => {
            tracing::info!("Default admin already exists: {DEFAULT_ADMIN_EMAIL}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn seed_catalog(pool: &PgPool) -> Result<(), CliError> {
    let wines = WineRepository::new(pool);
    if !wines.list_all().await?.is_empty() {
        tracing::info!("Catalog already has wines, skipping sample data");
        return Ok(());
    }

    let winery = WineryRepository::new(pool)
        .create(&WineryInput {
            name: "Weingut Sommer".to_owned(),
            contact: ContactDetails {
                address: Some("Hauptstrasse 43".to_owned()),
                post: Some("7051".to_owned()),
                city: Some("Grosshoeflein".to_owned()),
                land: Some("Austria".to_owned()),
                phone: None,
                email: Some("office@weingut-sommer.example".to_owned()),
                website: Some("https://weingut-sommer.example".to_owned()),
            },
        })
        .await?;
    let winery_id = winery.id;

    for input in sample_wines(winery_id) {
        let wine = wines.create(&input).await?;
        tracing::info!("Seeded wine: {} ({})", wine.name, wine.art.as_str());
    }

    Ok(())
}

fn sample_wines(winery_id: WineryId) -> Vec<WineInput> {
    let base = |name: &str, art, taste, year, price, bottles| WineInput {
        name: name.to_owned(),
        winery_id: Some(winery_id),
        art,
        taste,
        year,
        land: "Austria".to_owned(),
        region: Some("Burgenland".to_owned()),
        price,
        bottles_amount: bottles,
        available_at_year: None,
        image_url: None,
        description: None,
        hidden_for_guests: false,
    };

    let mut wines = vec![
        base("Blaufraenkisch Classic", WineType::Red, WineTaste::Dry, 2021, dec!(12.90), 24),
        base("Gruener Veltliner", WineType::White, WineTaste::Dry, 2023, dec!(9.50), 36),
        base("Rose vom Zweigelt", WineType::Rose, WineTaste::SemiDry, 2023, dec!(8.90), 18),
        base("Beerenauslese", WineType::Dessert, WineTaste::Sweet, 2020, dec!(24.00), 6),
    ];

    // One hidden wine and one coming-soon wine for exercising guest rules.
    let mut cellar_reserve = base(
        "Cellar Reserve",
        WineType::Red,
        WineTaste::Dry,
        2019,
        dec!(45.00),
        3,
    );
    cellar_reserve.hidden_for_guests = true;
    wines.push(cellar_reserve);

    let mut next_vintage = base(
        "Blaufraenkisch Reserve",
        WineType::Red,
        WineTaste::Dry,
        2024,
        dec!(19.90),
        0,
    );
    next_vintage.available_at_year = Some(2027);
    wines.push(next_vintage);

    wines
}
