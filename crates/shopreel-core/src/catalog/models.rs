use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A whole-slide hero banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub headline: Option<String>,
    /// Where clicking the banner leads
    #[serde(default)]
    pub link: Option<String>,
}

/// A product card shown in the latest items ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// Price in minor currency units
    #[serde(default)]
    pub price_cents: Option<u64>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub listed_at: Option<DateTime<Utc>>,
}

impl CatalogItem {
    /// Price formatted for display, e.g. "$12.50"
    pub fn display_price(&self) -> Option<String> {
        self.price_cents
            .map(|cents| format!("${}.{:02}", cents / 100, cents % 100))
    }
}

/// Everything the storefront front page displays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub banners: Vec<Banner>,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_price() {
        let mut item = CatalogItem {
            id: "sku-1".to_string(),
            name: "Mug".to_string(),
            image_url: "/img/mug.png".to_string(),
            price_cents: Some(1250),
            vendor: None,
            listed_at: None,
        };
        assert_eq!(item.display_price().as_deref(), Some("$12.50"));

        item.price_cents = Some(7);
        assert_eq!(item.display_price().as_deref(), Some("$0.07"));

        item.price_cents = None;
        assert_eq!(item.display_price(), None);
    }
}
