//! `siteship plan` CLI tests

mod common;

use common::*;

#[test]
fn plan_lists_cleanup_then_tiers() {
    let env = TestEnv::builder()
        .with_site(BLOG_SITE)
        .with_project_config(BLOG_CONFIG)
        .build();

    let result = env.run(&["plan"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.starts_with("Plan: 3 units, 4 assets, prefix blog\n"));
    let cleanup = result.stdout.find("SiteCleanup [cleanup] prune").unwrap();
    let long = result.stdout.find("SiteLongCache [long-cache] after SiteCleanup").unwrap();
    let no = result.stdout.find("SiteNoCache [no-cache] after SiteCleanup").unwrap();
    assert!(cleanup < long && long < no);
    assert!(result.stdout.contains(LONG_CACHE));
    assert!(result.stdout.contains(NO_CACHE));
}

#[test]
fn plan_verbose_lists_assets() {
    let env = TestEnv::builder().with_site(BLOG_SITE).build();

    let result = env.run(&["plan", "-v"]);

    assert!(result.is_success());
    assert!(result.stdout.contains("    posts/my-post/index.html"));
}

#[test]
fn plan_json_emits_units() {
    let env = TestEnv::builder()
        .with_site(BLOG_SITE)
        .with_project_config(BLOG_CONFIG)
        .build();

    let result = env.run(&["plan", "--json"]);

    assert!(result.is_success());
    let events = result.json_lines();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["event"], "start");
    assert_eq!(events[2]["event"], "complete");

    let units = events[1]["units"].as_array().unwrap();
    assert_eq!(units.len(), 3);
    assert_eq!(units[0]["id"], "SiteCleanup");
    assert_eq!(units[0]["prune"], true);
    assert!(units[0]["cache_control"].is_null());
    assert_eq!(units[1]["depends_on"], "SiteCleanup");
    assert_eq!(units[1]["key_prefix"], "blog");
    assert_eq!(units[1]["cache_control"], LONG_CACHE);
}

#[test]
fn plan_honors_custom_allow_list() {
    let env = TestEnv::builder()
        .with_site(BLOG_SITE)
        .with_project_config("[deploy]\nlong_cache_extensions = [\"js\"]\n")
        .build();

    let result = env.run(&["plan", "--json"]);

    let units = result.json_lines()[1]["units"].clone();
    assert_eq!(units[1]["selector"]["assets"], serde_json::json!(["app.js"]));
    assert_eq!(
        units[2]["selector"]["assets"],
        serde_json::json!(["app.css", "index.html", "posts/my-post/index.html"])
    );
}

#[test]
fn plan_rejects_bad_extension() {
    let env = TestEnv::builder()
        .with_site(BLOG_SITE)
        .with_project_config("[deploy]\nlong_cache_extensions = [\".js\"]\n")
        .build();

    let result = env.run(&["plan"]);

    assert_failed_with!(result, ".js");
}

#[test]
fn plan_missing_content_root_fails() {
    let env = TestEnv::builder().build();

    let result = env.run(&["plan", "--content-root", "missing", "--json"]);

    assert!(!result.is_success());
    let events = result.json_lines();
    let error = events.last().unwrap();
    assert_eq!(error["event"], "error");
    assert_eq!(error["code"], "asset_list_unavailable");
}

#[test]
fn plan_warns_about_unknown_config_keys() {
    let env = TestEnv::builder()
        .with_site(BLOG_SITE)
        .with_project_config("[deploy]\nkey_prefx = \"blog\"\n")
        .build();

    let result = env.run(&["plan"]);

    assert!(result.is_success());
    assert!(result.stderr.contains("Unknown config key 'key_prefx'"));
    assert!(result.stderr.contains("Did you mean 'key_prefix'?"));
}

#[test]
fn invalid_env_verbosity_is_reported_and_ignored() {
    let env = TestEnv::builder()
        .with_site(BLOG_SITE)
        .with_project_config("[output]\nverbosity = \"verbose\"\n")
        .build();

    let result = env.run_with_env(&["plan"], &[("SITESHIP_VERBOSITY", "verbse")]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stderr.contains("Ignoring SITESHIP_VERBOSITY='verbse'"));
    assert!(result.stderr.contains("Did you mean 'verbose'?"));
    // configured level still lists every asset
    assert!(result.stdout.contains("\n    app.css\n"));
}

#[test]
fn invalid_env_value_is_a_json_warning() {
    let env = TestEnv::builder().with_site(BLOG_SITE).build();

    let result = env.run_with_env(
        &["plan", "--json"],
        &[("SITESHIP_EXTENSION_MATCH", "final_segment")],
    );

    assert!(result.is_success(), "{}", result.combined_output());
    let events = result.json_lines();
    let warning = &events[0];
    assert_eq!(warning["event"], "warning");
    assert_eq!(warning["kind"], "invalid_env_value");
    assert_eq!(warning["key"], "SITESHIP_EXTENSION_MATCH");
    assert_eq!(warning["suggestion"], "final-segment");
}

#[test]
fn env_override_beats_project_config() {
    let env = TestEnv::builder()
        .with_site(BLOG_SITE)
        .with_project_config(BLOG_CONFIG)
        .build();

    let result = env.run_with_env(&["plan"], &[("SITESHIP_KEY_PREFIX", "docs")]);

    assert!(result.is_success());
    assert!(result.stdout.contains("prefix docs"));
}

#[test]
fn user_config_applies_without_project_config() {
    let env = TestEnv::builder()
        .with_site(BLOG_SITE)
        .with_user_config("[deploy]\nkey_prefix = \"from-home\"\n")
        .build();

    let result = env.run(&["plan"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("prefix from-home"));
}
