mod models;

use std::path::Path;

use chrono::{Duration, TimeZone, Utc};
use tracing::{info, warn};

pub use models::{Banner, Catalog, CatalogItem};

impl Catalog {
    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Err(crate::Error::CatalogNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&content)?;

        if catalog.banners.is_empty() && catalog.items.is_empty() {
            warn!("Catalog '{}' is empty", path.display());
        } else {
            info!(
                "Loaded catalog '{}': {} banners, {} items",
                path.display(),
                catalog.banners.len(),
                catalog.items.len()
            );
        }

        Ok(catalog)
    }

    /// Load from `path` when given, otherwise fall back to the built-in sample storefront
    pub fn load_or_sample(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::sample()),
        }
    }

    /// Newest items first; items without a listing date go last in catalog order
    pub fn latest_items(&self, limit: usize) -> Vec<CatalogItem> {
        let mut items = self.items.clone();
        // Stable sort keeps catalog order among equal dates
        items.sort_by(|a, b| b.listed_at.cmp(&a.listed_at));
        items.truncate(limit);
        items
    }

    /// A small demo storefront used when no catalog is configured
    pub fn sample() -> Self {
        let base = Utc.with_ymd_and_hms(2024, 11, 1, 9, 0, 0).single();

        let banners = [
            ("spring-sale", "Spring sale: up to 40% off"),
            ("new-vendors", "Meet this week's new vendors"),
            ("free-shipping", "Free shipping on orders over $50"),
        ]
        .into_iter()
        .map(|(id, headline)| Banner {
            id: id.to_string(),
            image_url: format!("/banners/{}.jpg", id),
            headline: Some(headline.to_string()),
            link: Some(format!("/promo/{}", id)),
        })
        .collect();

        let items = [
            ("Ceramic pour-over set", 3400, "Kiln & Co"),
            ("Linen tote bag", 1800, "Fieldwork"),
            ("Walnut cutting board", 5200, "Grain Studio"),
            ("Beeswax candle trio", 2400, "Hive Goods"),
            ("Merino beanie", 2900, "Fieldwork"),
            ("Enamel camp mug", 1500, "Kiln & Co"),
            ("Brass desk lamp", 8900, "Lumen Works"),
            ("Cotton throw blanket", 6400, "Loom House"),
            ("Cast iron skillet", 4500, "Forge Kitchen"),
            ("Leather card wallet", 3900, "Hide & Stitch"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, price_cents, vendor))| CatalogItem {
            id: format!("sku-{:03}", i + 1),
            name: name.to_string(),
            image_url: format!("/items/sku-{:03}.jpg", i + 1),
            price_cents: Some(price_cents),
            vendor: Some(vendor.to_string()),
            listed_at: base.map(|b| b + Duration::hours(i as i64 * 6)),
        })
        .collect();

        Self { banners, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.banners.len(), 3);
        assert_eq!(catalog.items.len(), 10);
        assert!(catalog.items.iter().all(|i| i.display_price().is_some()));
    }

    #[test]
    fn test_latest_items_newest_first() {
        let catalog = Catalog::sample();
        let latest = catalog.latest_items(4);

        assert_eq!(latest.len(), 4);
        assert_eq!(latest[0].id, "sku-010");
        assert_eq!(latest[3].id, "sku-007");
        assert!(latest.windows(2).all(|w| w[0].listed_at >= w[1].listed_at));
    }

    #[test]
    fn test_latest_items_undated_last() {
        let mut catalog = Catalog::sample();
        catalog.items[0].listed_at = None;

        let latest = catalog.latest_items(100);
        assert_eq!(latest.len(), 10);
        assert_eq!(latest.last().map(|i| i.id.as_str()), Some("sku-001"));
    }

    #[test]
    fn test_load_json_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "banners": [{ "id": "b1", "image_url": "/b1.jpg" }],
                "items": [
                    { "id": "i1", "name": "Kettle", "image_url": "/i1.jpg", "price_cents": 2500 },
                    { "id": "i2", "name": "Teapot", "image_url": "/i2.jpg",
                      "listed_at": "2024-05-01T10:00:00Z" }
                ]
            }"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.banners[0].headline, None);
        assert_eq!(catalog.items.len(), 2);
        assert_eq!(catalog.latest_items(1)[0].id, "i2");
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Catalog::load(&missing),
            Err(crate::Error::CatalogNotFound(_))
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(Catalog::load(&broken), Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_load_or_sample_without_path() {
        let catalog = Catalog::load_or_sample(None).unwrap();
        assert_eq!(catalog, Catalog::sample());
    }
}
