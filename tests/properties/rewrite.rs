//! Property tests for edge request rewriting.

use proptest::prelude::*;

use siteship::domain::services::{EdgeRequestRewriter, ExtensionMatch, RouteKind};
use siteship::rewrite_uri;

fn clean_route() -> impl Strategy<Value = String> {
    proptest::string::string_regex("(/[a-zA-Z0-9_-]{1,10}){1,4}/?").unwrap()
}

fn any_uri() -> impl Strategy<Value = String> {
    proptest::string::string_regex("(/[a-zA-Z0-9_.~-]{0,10}){1,4}/?").unwrap()
}

fn extension_match() -> impl Strategy<Value = ExtensionMatch> {
    prop_oneof![
        Just(ExtensionMatch::AnySegment),
        Just(ExtensionMatch::FinalSegment)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Rewriting an already-rewritten path changes nothing.
    #[test]
    fn property_rewrite_is_idempotent(uri in any_uri(), mode in extension_match()) {
        let rewriter = EdgeRequestRewriter::new().with_extension_match(mode);
        let once = rewriter.rewrite(&uri).into_owned();
        let twice = rewriter.rewrite(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: Paths containing a dot pass through untouched by default.
    #[test]
    fn property_resources_pass_through(uri in any_uri()) {
        prop_assume!(uri.contains('.'));
        let rewritten = rewrite_uri(&uri);
        prop_assert_eq!(rewritten.as_ref(), uri.as_str());
    }

    /// PROPERTY: Every clean route resolves to exactly one index document.
    #[test]
    fn property_clean_routes_end_in_index(uri in clean_route()) {
        let rewritten = rewrite_uri(&uri);

        prop_assert!(rewritten.ends_with("/index.html"));
        prop_assert!(rewritten.starts_with(uri.as_str()));
        prop_assert!(!rewritten.contains("//index.html"));
        prop_assert_eq!(rewritten.len() - uri.len(), if uri.ends_with('/') { 10 } else { 11 });
    }

    /// PROPERTY: Final-segment matching rewrites whenever the default does.
    #[test]
    fn property_final_segment_is_more_permissive(uri in any_uri()) {
        let any = EdgeRequestRewriter::new();
        let last = EdgeRequestRewriter::new().with_extension_match(ExtensionMatch::FinalSegment);

        if any.classify(&uri) == RouteKind::CleanRoute {
            prop_assert_eq!(last.classify(&uri), RouteKind::CleanRoute);
        }
    }
}
