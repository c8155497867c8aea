//! Reusable site content.

/// A small blog build: two fingerprinted assets and two pages.
pub const BLOG_SITE: &[(&str, &str)] = &[
    ("app.js", "console.log('app');"),
    ("app.css", "body { margin: 0 }"),
    ("index.html", "<h1>Blog</h1>"),
    ("posts/my-post/index.html", "<h1>My post</h1>"),
];

pub const BLOG_CONFIG: &str = r#"
[deploy]
key_prefix = "blog"
"#;

pub const LONG_CACHE: &str = "max-age=31536000,public,immutable";
pub const NO_CACHE: &str = "max-age=0,public,must-revalidate";
