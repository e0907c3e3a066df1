//! Seed the catalog with sample data for local development.
//!
//! Inserts a handful of rows into each of the three catalog
//! collections. Skips any collection that already has rows, so the
//! command is safe to re-run.

use sqlx::PgPool;
use tracing::info;

/// Seed all three catalog collections.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    let products = seed_products(&pool).await?;
    let top_sellers = seed_top_sellers(&pool).await?;
    let dress_styles = seed_dress_styles(&pool).await?;

    info!("Seeding complete!");
    info!("  Products inserted: {products}");
    info!("  Top sellers inserted: {top_sellers}");
    info!("  Dress styles inserted: {dress_styles}");

    Ok(())
}

async fn is_empty(pool: &PgPool, table: &str) -> Result<bool, sqlx::Error> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {table})");
    let exists: bool = sqlx::query_scalar(&sql).fetch_one(pool).await?;
    Ok(!exists)
}

async fn seed_products(pool: &PgPool) -> Result<u64, sqlx::Error> {
    if !is_empty(pool, "product").await? {
        info!("product already seeded, skipping");
        return Ok(0);
    }

    let rows = [
        (
            "Gradient Graphic T-shirt",
            "Soft cotton tee with a gradient print.",
            "145.00",
            "/images/gradient-tee.png",
        ),
        (
            "Checkered Shirt",
            "Relaxed-fit flannel in classic check.",
            "180.00",
            "/images/checkered-shirt.png",
        ),
        (
            "Skinny Fit Jeans",
            "Stretch denim with a tapered leg.",
            "240.00",
            "/images/skinny-jeans.png",
        ),
        (
            "Sleeve Striped T-shirt",
            "Crew neck tee with contrast sleeve stripes.",
            "130.00",
            "/images/striped-tee.png",
        ),
    ];

    let mut inserted = 0;
    for (name, description, price, image) in rows {
        sqlx::query(
            "INSERT INTO product (name, description, price, image) VALUES ($1, $2, $3::numeric, $4)",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image)
        .execute(pool)
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}

async fn seed_top_sellers(pool: &PgPool) -> Result<u64, sqlx::Error> {
    if !is_empty(pool, "top_seller").await? {
        info!("top_seller already seeded, skipping");
        return Ok(0);
    }

    let rows = [
        (
            "Vertical Striped Shirt",
            "Best-selling button-down in vertical stripes.",
            "/images/vertical-striped-shirt.png",
        ),
        (
            "Courage Graphic T-shirt",
            "Statement graphic tee, orange colorway.",
            "/images/courage-tee.png",
        ),
        (
            "Loose Fit Bermuda Shorts",
            "Lightweight shorts for warm weather.",
            "/images/bermuda-shorts.png",
        ),
    ];

    let mut inserted = 0;
    for (name, description, image) in rows {
        sqlx::query("INSERT INTO top_seller (name, description, image) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(description)
            .bind(image)
            .execute(pool)
            .await?;
        inserted += 1;
    }
    Ok(inserted)
}

async fn seed_dress_styles(pool: &PgPool) -> Result<u64, sqlx::Error> {
    if !is_empty(pool, "dress_style").await? {
        info!("dress_style already seeded, skipping");
        return Ok(0);
    }

    let rows = [
        (
            "Casual",
            "Everyday staples for any occasion.",
            "95.00",
            "/images/style-casual.png",
        ),
        (
            "Formal",
            "Tailored pieces for dressier days.",
            "210.00",
            "/images/style-formal.png",
        ),
        (
            "Party",
            "Bold looks for nights out.",
            "160.00",
            "/images/style-party.png",
        ),
        (
            "Gym",
            "Breathable activewear basics.",
            "85.00",
            "/images/style-gym.png",
        ),
    ];

    let mut inserted = 0;
    for (name, description, price, image) in rows {
        sqlx::query(
            "INSERT INTO dress_style (name, description, price, image) VALUES ($1, $2, $3::numeric, $4)",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image)
        .execute(pool)
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}
