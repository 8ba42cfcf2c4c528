//! Shared fixtures: a rule snapshot built from its on-disk JSON form and a
//! typical host-rendered head.

use linkhead_core::RuleSnapshot;
use serde_json::json;

pub const HOME: &str = "https://old.test";

/// Head markup as the host renders it before any rewriting.
pub const HOST_HEAD: &str = concat!(
    "<meta charset=\"UTF-8\" />\n",
    "<title>About</title>\n",
    "<link rel=\"canonical\" href=\"https://old.test/about/\" />\n",
    "<link rel=\"alternate\" hreflang=\"en\" href=\"https://old.test/en/about/\" />\n",
    "<link rel=\"alternate\" hreflang=\"it\" href=\"https://old.test/it/about/\" />\n",
    "<link rel=\"alternate\" type=\"application/rss+xml\" title=\"Feed\" href=\"https://old.test/feed/\" />\n",
    "<link rel=\"stylesheet\" href=\"https://old.test/style.css\" />\n",
);

/// Global origin with `en`/`fr` alternates, entity 42 with its own
/// canonical and `es` alternate, attachment 7, and a search override.
pub fn site_snapshot() -> RuleSnapshot {
    serde_json::from_value(json!({
        "canonical": { "baseUrl": "https://example.com", "preserveDefaultPath": true },
        "alternates": [
            { "hreflang": "en", "hrefBaseUrl": "https://example.com/" },
            { "hreflang": "fr", "hrefBaseUrl": "https://example.fr/", "preserveDefaultPath": "1" }
        ],
        "entities": {
            "42": {
                "postType": "post",
                "publiclyQueryable": true,
                "canonical": {
                    "baseUrl": "https://es.example.com/noticias/",
                    "preserveDefaultPath": false
                },
                "alternates": [
                    { "hreflang": "es", "hrefBaseUrl": "https://es.example.com/" }
                ]
            },
            "7": {
                "postType": "attachment",
                "canonical": { "baseUrl": "https://media.example.com/", "preserveDefaultPath": false }
            }
        },
        "dynamic": {
            "search": { "baseUrl": "https://example.com/search/", "preserveDefaultPath": false }
        }
    }))
    .expect("fixture snapshot")
}
