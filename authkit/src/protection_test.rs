use super::*;

#[test]
fn public_paths_are_never_protected() {
    for path in ["/", "/login", "/logout", "/unauthorized", "/demo/anything", "/demo/a/b"] {
        assert!(!is_protected(path), "{path}");
        assert!(!is_protected_path(path), "{path}");
        assert!(!is_route_protected(path, &[AUTHED_LAYOUT_ID]), "{path}");
    }
}

#[test]
fn authenticated_pages_are_protected() {
    assert!(is_protected("/dashboard"));
    assert!(is_protected("/admin"));
    assert!(is_protected("/admin/users"));
    assert!(is_protected("/teacher"));
    assert!(is_protected("/student"));
    assert!(is_protected("/dashboard/"));
}

#[test]
fn auth_form_pages_are_not_protected() {
    assert!(!is_protected("/register"));
}

#[test]
fn prefix_variant_fails_open_for_unknown_paths() {
    assert!(!is_protected_path("/reports"));
    assert!(is_protected_path("/admin/anything-new"));
}

#[test]
fn prefix_variant_accepts_custom_prefixes() {
    let protection = RouteProtection::with_prefixes(["/reports"]);
    assert!(protection.is_protected_path("/reports/2024"));
    assert!(!protection.is_protected_path("/dashboard"));
    assert!(!protection.is_protected_path("/login"));
}

#[test]
fn metadata_variant_reads_route_ids() {
    assert!(is_route_protected("/x", &["__root__", "/_authed", "/_authed/x"]));
    assert!(!is_route_protected("/x", &["__root__", "/x"]));
    assert!(!is_route_protected::<&str>("/x", &[]));
}

#[test]
fn combined_predicate_covers_unlisted_children_of_protected_prefixes() {
    // Not in the route manifest, but under a protected prefix.
    assert!(is_protected("/admin/audit"));
    assert!(!is_protected("/nope"));
}

#[test]
fn demo_prefix_requires_trailing_segment_separator() {
    assert!(is_public_path("/demo/x"));
    assert!(!is_public_path("/demonstration"));
}
