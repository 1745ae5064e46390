//! Property tests for the extension guard.

use proptest::prelude::*;

use tsratchet::domain::services::ExtensionGuard;
use tsratchet::domain::value_objects::{
    RepoPath, LEGACY_EXTENSIONS, SUPPORTED_EXTENSIONS, VENDOR_DIRS,
};

fn extension() -> impl Strategy<Value = String> {
    let all: Vec<&'static str> = SUPPORTED_EXTENSIONS
        .iter()
        .chain(LEGACY_EXTENSIONS.iter())
        .chain(["json", "css", "md"].iter())
        .copied()
        .collect();
    proptest::sample::select(all).prop_map(str::to_string)
}

fn candidate() -> impl Strategy<Value = RepoPath> {
    (
        proptest::collection::vec("[a-z]{1,6}", 0..=3),
        any::<bool>(),
        "[a-z]{1,8}",
        extension(),
    )
        .prop_map(|(mut dirs, vendored, stem, ext)| {
            if vendored {
                dirs.insert(0, VENDOR_DIRS[0].to_string());
            }
            dirs.push(format!("{}.{}", stem, ext));
            RepoPath::new(dirs.join("/"))
        })
}

fn is_legacy(path: &RepoPath) -> bool {
    path.extension()
        .map(|ext| LEGACY_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn is_vendored(path: &RepoPath) -> bool {
    path.segments().any(|s| VENDOR_DIRS.contains(&s))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the guard flags exactly the non-vendored legacy files, in order.
    #[test]
    fn property_guard_flags_exactly_legacy_files(
        files in proptest::collection::vec(candidate(), 0..=12),
    ) {
        let report = ExtensionGuard::check(&files);

        let expected: Vec<&RepoPath> = files
            .iter()
            .filter(|f| is_legacy(f) && !is_vendored(f))
            .collect();
        let flagged: Vec<&RepoPath> = report.violations.iter().map(|v| &v.file).collect();

        prop_assert_eq!(&flagged, &expected);
        prop_assert_eq!(report.success, expected.is_empty());
        prop_assert_eq!(report.message.is_empty(), expected.is_empty());
    }
}
