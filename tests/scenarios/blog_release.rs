//! A blog goes out, then ships a new fingerprinted bundle.

use std::fs;
use std::path::Path;

use siteship::application::DeployOptions;
use siteship::config::Config;
use siteship::infrastructure::store::ObjectIndex;
use siteship::presentation::create_deploy_use_case;
use siteship::rewrite_uri;
use tempfile::TempDir;

use crate::common::{BLOG_SITE, LONG_CACHE, NO_CACHE};

fn write_site(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
}

fn blog_config() -> Config {
    let mut config = Config::default();
    config.deploy.key_prefix = "blog".to_string();
    config
}

fn index(dest: &Path) -> ObjectIndex {
    let content = fs::read_to_string(dest.join(".siteship/objects.toml")).unwrap();
    toml::from_str(&content).unwrap()
}

#[test]
fn first_release_then_bundle_update() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("public");
    let dest = dir.path().join("bucket");
    write_site(&site, BLOG_SITE);

    let use_case = create_deploy_use_case(&blog_config(), &dest).unwrap();
    let report = use_case.execute(&DeployOptions::new(&site)).unwrap();

    assert!(report.is_success());
    assert_eq!(report.asset_count, 4);
    assert_eq!(
        report.succeeded(),
        vec!["SiteCleanup", "SiteLongCache", "SiteNoCache"]
    );

    let objects = index(&dest).objects;
    assert_eq!(objects.len(), 4);
    assert_eq!(objects["blog/app.js"].cache_control.as_deref(), Some(LONG_CACHE));
    assert_eq!(
        objects["blog/posts/my-post/index.html"].cache_control.as_deref(),
        Some(NO_CACHE)
    );

    // the edge function maps the clean route onto the uploaded key
    let key = format!("blog{}", rewrite_uri("/posts/my-post"));
    assert!(dest.join(&key).exists(), "{key} missing");

    // second release: bundle renamed, a page edited
    fs::remove_file(site.join("app.js")).unwrap();
    write_site(
        &site,
        &[
            ("app.9c1e.js", "console.log('v2');"),
            ("index.html", "<h1>Blog v2</h1>"),
        ],
    );
    let report = use_case.execute(&DeployOptions::new(&site)).unwrap();
    assert!(report.is_success());

    let cleanup = report.unit("SiteCleanup").unwrap().report.clone().unwrap();
    assert_eq!(cleanup.deleted, vec!["blog/app.js"]);
    assert!(cleanup.uploaded.contains(&"blog/app.9c1e.js".to_string()));
    assert!(cleanup.unchanged.contains(&"blog/app.css".to_string()));

    let objects = index(&dest).objects;
    assert!(!objects.contains_key("blog/app.js"));
    assert!(!dest.join("blog/app.js").exists());
    assert_eq!(
        objects["blog/app.9c1e.js"].cache_control.as_deref(),
        Some(LONG_CACHE)
    );
    assert_eq!(
        fs::read_to_string(dest.join("blog/index.html")).unwrap(),
        "<h1>Blog v2</h1>"
    );
    // app.css kept its long-cache header through the headerless cleanup pass
    assert_eq!(objects["blog/app.css"].cache_control.as_deref(), Some(LONG_CACHE));
}

#[test]
fn unchanged_redeploy_uploads_nothing() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("public");
    let dest = dir.path().join("bucket");
    write_site(&site, BLOG_SITE);

    let use_case = create_deploy_use_case(&blog_config(), &dest).unwrap();
    use_case.execute(&DeployOptions::new(&site)).unwrap();
    let report = use_case
        .execute(&DeployOptions::new(&site).with_parallel(false))
        .unwrap();

    for unit in &report.units {
        let r = unit.report.as_ref().unwrap();
        assert!(r.uploaded.is_empty(), "{} re-uploaded {:?}", unit.unit, r.uploaded);
        assert!(r.deleted.is_empty());
    }
}
