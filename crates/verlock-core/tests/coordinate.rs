use verlock_core::context::ResolutionContext;
use verlock_core::coordinate::{is_valid_version, DependencyRequest, ModuleId};
use verlock_core::rule::{MatchKey, OverrideRule, RuleScope};

#[test]
fn request_parse_valid() {
    let req = DependencyRequest::parse("org.jetbrains.kotlin:kotlin-stdlib:1.4.10").unwrap();
    assert_eq!(req.id, ModuleId::new("org.jetbrains.kotlin", "kotlin-stdlib"));
    assert_eq!(req.requested_version, "1.4.10");
}

#[test]
fn request_parse_range_version() {
    let req =
        DependencyRequest::parse("com.atlassian.performance.tools:jira-actions:[2.2.0,4.0.0)")
            .unwrap();
    assert_eq!(req.requested_version, "[2.2.0,4.0.0)");
}

#[test]
fn request_parse_two_parts_returns_none() {
    assert!(DependencyRequest::parse("group:module").is_none());
}

#[test]
fn request_parse_empty_part_returns_none() {
    assert!(DependencyRequest::parse("group::1.0").is_none());
    assert!(DependencyRequest::parse("").is_none());
}

#[test]
fn request_display_roundtrip() {
    let s = "com.example:foo:2.0";
    assert_eq!(DependencyRequest::parse(s).unwrap().to_string(), s);
}

#[test]
fn module_id_orders_by_group_then_module() {
    let mut ids = vec![
        ModuleId::new("org.b", "a"),
        ModuleId::new("org.a", "z"),
        ModuleId::new("org.a", "b"),
    ];
    ids.sort();
    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["org.a:b", "org.a:z", "org.b:a"]);
}

#[test]
fn module_id_parse_rejects_three_parts() {
    assert!(ModuleId::parse("a:b:c").is_none());
    assert_eq!(ModuleId::parse("a:b"), Some(ModuleId::new("a", "b")));
}

#[test]
fn module_id_parse_trims_parts() {
    assert_eq!(ModuleId::parse(" a : b "), Some(ModuleId::new("a", "b")));
    assert!(ModuleId::parse("a: ").is_none());
}

#[test]
fn request_parse_rejects_lock_separator_in_version() {
    assert!(DependencyRequest::parse("a:b:1.0=rc").is_none());
    assert!(DependencyRequest::parse("a:b:1.0\n").is_some());
    assert!(DependencyRequest::parse("a:b:1.0\u{7}").is_none());
}

#[test]
fn valid_versions() {
    assert!(is_valid_version("1.8.0-alpha2"));
    assert!(is_valid_version("[1.0,2.0)"));
    assert!(!is_valid_version(""));
    assert!(!is_valid_version("1.0=rc"));
    assert!(!is_valid_version("1.0\trc"));
}

#[test]
fn rule_scope_applies_to_contexts() {
    assert!(RuleScope::All.applies_to(ResolutionContext::Default));
    assert!(RuleScope::All.applies_to(ResolutionContext::Test));
    assert!(!RuleScope::Test.applies_to(ResolutionContext::Default));
    assert!(RuleScope::Test.applies_to(ResolutionContext::Test));
}

#[test]
fn rule_builders() {
    let rule = OverrideRule::module("commons-io", "commons-io", "2.6").test_only();
    assert_eq!(rule.scope, RuleScope::Test);
    assert_eq!(rule.key, MatchKey::Module(ModuleId::new("commons-io", "commons-io")));
    assert_eq!(rule.to_string(), "commons-io:commons-io -> 2.6 (scope: test)");
    assert_eq!(
        OverrideRule::group("org.seleniumhq.selenium", "3.141.59").to_string(),
        "org.seleniumhq.selenium:* -> 3.141.59 (scope: all)"
    );
}

#[test]
fn context_from_str() {
    assert_eq!("test".parse::<ResolutionContext>(), Ok(ResolutionContext::Test));
    assert_eq!("default".parse::<ResolutionContext>(), Ok(ResolutionContext::Default));
    assert!("runtime".parse::<ResolutionContext>().is_err());
}
