//! Crawler policy (robots.txt) generation.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerRule {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerPolicy {
    pub rules: Vec<CrawlerRule>,
    pub sitemap: String,
}

impl CrawlerPolicy {
    /// Default policy for a site: everything is crawlable except API routes,
    /// the admin area and framework internals.
    pub fn for_site(site_url: &str) -> Self {
        let base = site_url.trim().trim_end_matches('/');
        Self {
            rules: vec![CrawlerRule {
                user_agent: "*".to_string(),
                allow: vec!["/".to_string()],
                disallow: vec![
                    "/api/".to_string(),
                    "/admin/".to_string(),
                    "/_next/".to_string(),
                ],
            }],
            sitemap: format!("{base}/sitemap.xml"),
        }
    }

    /// Render as robots.txt.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&format!("User-agent: {}\n", rule.user_agent));
            for path in &rule.allow {
                out.push_str(&format!("Allow: {path}\n"));
            }
            for path in &rule.disallow {
                out.push_str(&format!("Disallow: {path}\n"));
            }
            out.push('\n');
        }
        out.push_str(&format!("Sitemap: {}\n", self.sitemap));
        out
    }
}
