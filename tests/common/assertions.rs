//! Custom assertion macros for siteship tests.

/// Assert an object exists in the destination store with the given content
#[macro_export]
macro_rules! assert_published {
    ($env:expr, $key:expr, $content:expr) => {{
        let path = $env.object_path($key);
        assert!(path.exists(), "expected object {} at {}", $key, path.display());
        let actual = std::fs::read_to_string(&path).expect("Failed to read object");
        assert_eq!(actual, $content, "object {} has unexpected content", $key);
    }};
    ($env:expr, $key:expr) => {{
        let path = $env.object_path($key);
        assert!(path.exists(), "expected object {} at {}", $key, path.display());
    }};
}

/// Assert an object is absent from the destination store
#[macro_export]
macro_rules! assert_not_published {
    ($env:expr, $key:expr) => {{
        let path = $env.object_path($key);
        assert!(!path.exists(), "object {} should not exist", $key);
    }};
}

/// Assert the command failed and its output mentions `needle`
#[macro_export]
macro_rules! assert_failed_with {
    ($result:expr, $needle:expr) => {{
        let result = &$result;
        assert!(
            !result.is_success(),
            "expected failure, got success:\n{}",
            result.combined_output()
        );
        assert!(
            result.combined_output().contains($needle),
            "output should mention {:?}:\n{}",
            $needle,
            result.combined_output()
        );
    }};
}
