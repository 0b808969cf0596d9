// Public marketing pages. No guards; reachability is governed by the
// globalNavigation toggle section alone.

use serde_json::json;

use crate::registry::{ExtensionDef, MatchStrategy, PageView, RouteDef, ViewFuture};
use crate::toggles::ToggleSection;

pub fn extension() -> ExtensionDef {
    ExtensionDef {
        id: "marketing",
        title: "Marketing",
        toggle_section: ToggleSection::GlobalNavigation,
        feature_flag: None,
        routes: vec![
            RouteDef {
                description: Some("Plans and pricing for all Nimbus products"),
                ..RouteDef::page("/pricing", "Pricing", pricing_view)
            },
            RouteDef {
                match_strategy: MatchStrategy::StartsWith,
                description: Some("Product marketing pages"),
                ..RouteDef::page("/products", "Products", products_view)
            },
        ],
    }
}

fn pricing_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "marketing.pricing".to_string(),
            title: "Pricing".to_string(),
            payload: json!({
                "tiers": [
                    { "name": "Starter", "price_eur": 0, "seats": 3 },
                    { "name": "Team", "price_eur": 29, "seats": 25 },
                    { "name": "Enterprise", "price_eur": null, "seats": null }
                ]
            }),
        })
    })
}

fn products_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "marketing.products".to_string(),
            title: "Products".to_string(),
            payload: json!({
                "products": [
                    { "slug": "mail", "name": "Nimbus Mail", "tagline": "Tenant-scoped mail for teams" },
                    { "slug": "cloud", "name": "Nimbus Cloud IaC", "tagline": "Infrastructure catalogs with GitOps" },
                    { "slug": "workshop", "name": "Nimbus Workshop", "tagline": "Markdown publishing for product teams" }
                ]
            }),
        })
    })
}
