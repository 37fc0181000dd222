//! Demo-catalog seeding.

use serde_json::json;

use verdant_admin::db::{categories, pages, products, sliders, widgets};
use verdant_core::{Slug, WidgetKind};

use super::CliError;

/// Insert a small demo catalog.
///
/// Not idempotent: seeding an already-seeded database fails on the first
/// duplicate slug, which is the signal to stop.
///
/// # Errors
///
/// Returns an error on a database failure or duplicate content.
#[allow(clippy::print_stdout, clippy::too_many_lines)]
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    let seeds = categories::CategoryInput {
        name: "Seeds".to_string(),
        slug: Slug::generate("Seeds", &[]),
        parent_id: None,
        sort_order: 0,
        is_active: true,
    };
    let seeds = categories::create(&pool, &seeds)
        .await
        .map_err(|e| CliError::Invalid(e.to_string()))?;

    let tools = categories::CategoryInput {
        name: "Tools".to_string(),
        slug: Slug::generate("Tools", &[]),
        parent_id: None,
        sort_order: 1,
        is_active: true,
    };
    let tools = categories::create(&pool, &tools)
        .await
        .map_err(|e| CliError::Invalid(e.to_string()))?;

    let vegetable_seeds = categories::CategoryInput {
        name: "Vegetable Seeds".to_string(),
        slug: Slug::generate("Vegetable Seeds", &[]),
        parent_id: Some(seeds.id),
        sort_order: 0,
        is_active: true,
    };
    categories::create(&pool, &vegetable_seeds)
        .await
        .map_err(|e| CliError::Invalid(e.to_string()))?;

    let demo_products = [
        products::ProductInput {
            name: "Heirloom Tomato Seeds".to_string(),
            slug: Slug::generate("Heirloom Tomato Seeds", &[]),
            description: "A mix of five heirloom tomato varieties for home growing.".to_string(),
            category_id: Some(seeds.id),
            images: vec![],
            is_active: true,
            is_premium: false,
            tags: vec!["tomato".to_string(), "vegetable".to_string(), "heirloom".to_string()],
        },
        products::ProductInput {
            name: "Copper Hand Trowel".to_string(),
            slug: Slug::generate("Copper Hand Trowel", &[]),
            description: "Hand-forged copper trowel with an ash handle.".to_string(),
            category_id: Some(tools.id),
            images: vec![],
            is_active: true,
            is_premium: true,
            tags: vec!["tool".to_string(), "trowel".to_string()],
        },
        products::ProductInput {
            name: "Wildflower Meadow Mix".to_string(),
            slug: Slug::generate("Wildflower Meadow Mix", &[]),
            description: "Pollinator-friendly wildflower blend for 20 square meters.".to_string(),
            category_id: Some(seeds.id),
            images: vec![],
            is_active: true,
            is_premium: false,
            tags: vec!["wildflower".to_string(), "pollinator".to_string()],
        },
    ];

    for input in &demo_products {
        products::create(&pool, input)
            .await
            .map_err(|e| CliError::Invalid(e.to_string()))?;
    }

    let about = pages::PageInput {
        title: "About Us".to_string(),
        slug: Slug::generate("About Us", &[]),
        content: "<h1>About Verdant Garden Supply</h1><p>Growing with you since 2012.</p>"
            .to_string(),
        template: "default".to_string(),
        is_active: true,
    };
    pages::create(&pool, &about)
        .await
        .map_err(|e| CliError::Invalid(e.to_string()))?;

    let hero = widgets::WidgetInput {
        kind: WidgetKind::Hero,
        title: "Spring hero".to_string(),
        settings: json!({
            "headline": "Everything your garden needs",
            "cta_href": "/products",
        }),
        position: 0,
        is_active: true,
    };
    widgets::create(&pool, &hero)
        .await
        .map_err(|e| CliError::Invalid(e.to_string()))?;

    let slider = sliders::SliderInput {
        title: "Homepage carousel".to_string(),
        slides: json!([
            { "image_url": "/media/placeholder-1.jpg", "caption": "New season arrivals", "href": "/products" },
            { "image_url": "/media/placeholder-2.jpg", "caption": "Premium tools", "href": "/products?premium=true" },
        ]),
        position: 0,
        is_active: true,
    };
    sliders::create(&pool, &slider)
        .await
        .map_err(|e| CliError::Invalid(e.to_string()))?;

    println!("Seeded demo catalog: 3 categories, 3 products, 1 page, 1 widget, 1 slider");
    Ok(())
}
