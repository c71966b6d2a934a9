//! Integration tests for config, crawler policy and auth diagnostics

use std::fs;

use flagkit::config::AppConfig;
use flagkit::diagnostics::{inspect_auth, FileTokenStore};
use flagkit::robots::CrawlerPolicy;

#[test]
fn config_file_drives_resolver_and_allow_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "flag_cdn_base": "https://flags.example.net/",
            "site_url": "https://shop.example.com",
            "remote_image_hosts": [
                { "hostname": "flags.example.net" }
            ]
        }"#,
    )
    .unwrap();

    let config = AppConfig::load(Some(&path)).unwrap();
    config.validate().unwrap();

    let image = config.resolver().unwrap().resolve("GH", flagkit::ProviderWidth::W20);
    assert_eq!(image.url, "https://flags.example.net/w20/gh.png");
    assert!(config.is_trusted_image(&image.url));
    assert!(config.is_trusted_image(&image.high_density_url));
    assert!(!config.is_trusted_image("https://flagcdn.com/w20/gh.png"));
}

#[test]
fn robots_uses_configured_site_url() {
    let config = AppConfig {
        site_url: "https://shop.example.com".to_string(),
        ..AppConfig::default()
    };
    let text = CrawlerPolicy::for_site(&config.site_url).render();
    assert!(text.starts_with("User-agent: *\n"));
    assert!(text.ends_with("Sitemap: https://shop.example.com/sitemap.xml\n"));
}

#[test]
fn auth_status_from_configured_token_path() {
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("token");
    let config = AppConfig {
        token_path: Some(token_path.clone()),
        ..AppConfig::default()
    };

    let store = FileTokenStore::new(config.token_path());
    assert!(!inspect_auth(&store).unwrap().present);

    fs::write(&token_path, "eyJhbGciOiJIUzI1NiJ9.payload.sig").unwrap();
    let status = inspect_auth(&store).unwrap();
    assert!(status.present);
    assert_eq!(status.preview.as_deref(), Some("eyJh…"));
    assert!(!status.summary().contains("payload"));
}
