#![cfg(test)]

use proptest::prelude::*;

use super::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9_-]{1,8}",
        Just(String::from(".")),
        Just(String::from("..")),
        Just(String::from("~")),
    ]
}

// Mixes roots, repeated separators and trailing separators.
fn raw_path_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("/"), Just("//"), Just("///")],
        prop::collection::vec((segment_strategy(), 1..3_usize), 0..8),
        any::<bool>(),
    )
        .prop_map(|(root, segments, trailing)| {
            let mut raw = String::from(root);
            for (segment, slashes) in segments {
                raw.push_str(&segment);
                raw.push_str(&"/".repeat(slashes));
            }
            if !trailing {
                while raw.len() > root.len() && raw.ends_with('/') {
                    raw.pop();
                }
            }
            raw
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn resolve_is_idempotent(raw in raw_path_strategy(), home in raw_path_strategy()) {
        let home = Path::from(home.as_str());
        let once = Path::from(raw.as_str()).resolve_from_home(&home);
        prop_assert_eq!(once.resolve_from_home(&home), once);
    }

    #[test]
    fn combine_is_idempotent(raw in raw_path_strategy()) {
        let once = combine([raw.as_str()]);
        prop_assert_eq!(combine([once.as_str()]), once);
    }

    #[test]
    fn combined_paths_have_no_duplicate_separators(raw in raw_path_strategy(), tail in raw_path_strategy()) {
        let combined = Path::combine([raw.as_str(), tail.as_str()]);
        let body = &combined.as_str()[combined.root_form().as_str().len()..];
        prop_assert!(!body.contains("//"));
        prop_assert!(!body.starts_with('/'));
        prop_assert!(!body.ends_with('/'));
    }

    #[test]
    fn resolved_absolute_paths_never_climb(raw in raw_path_strategy()) {
        let resolved = Path::from(raw.as_str()).resolve_from_home(&Path::from("/home/tester"));
        if !resolved.is_relative() {
            prop_assert!(resolved.segments().all(|segment| segment != ".." && segment != "."));
        }
    }
}
