//! Property-based tests for URL/path resolution.
//!
//! These tests use proptest to generate random inputs and verify that the
//! construction/extraction round trip and path resolution invariants hold.

#[cfg(test)]
mod proptest_tests {
    use crate::resolver::{
        extract_remote_prefix, extract_repo_name, is_network_url, local_path, repo_url,
    };
    use proptest::prelude::*;
    use std::path::Path;

    /// Single path segment: no separators, no leading/trailing whitespace.
    fn segment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9][a-zA-Z0-9_-]{0,20}"
    }

    fn host() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,10}\\.(com|org|io)"
    }

    proptest! {
        /// Round trip: the name and prefix of a constructed network URL
        /// extract back unchanged.
        #[test]
        fn network_url_round_trips(name in segment(), host in host(), org in segment()) {
            let prefix = format!("https://{host}/{org}");
            let url = repo_url(&name, &prefix);
            prop_assert_eq!(extract_repo_name(&url), name);
            prop_assert_eq!(extract_remote_prefix(&url), prefix);
        }

        /// Round trip: the name and prefix of a constructed SSH-shorthand URL
        /// extract back unchanged.
        #[test]
        fn ssh_url_round_trips(name in segment(), host in host(), org in segment()) {
            let prefix = format!("git@{host}:{org}");
            let url = repo_url(&name, &prefix);
            prop_assert_eq!(extract_repo_name(&url), name);
            prop_assert_eq!(extract_remote_prefix(&url), prefix);
        }

        /// Reconstructing a URL from its extracted parts is the identity for
        /// URLs this resolver produces.
        #[test]
        fn reconstruction_is_identity(name in segment(), host in host(), org in segment()) {
            for prefix in [format!("https://{host}/{org}"), format!("git@{host}:{org}")] {
                let url = repo_url(&name, &prefix);
                let rebuilt = repo_url(&extract_repo_name(&url), &extract_remote_prefix(&url));
                prop_assert_eq!(&rebuilt, &url);
            }
        }

        /// Construction always appends exactly one `.git` suffix.
        #[test]
        fn constructed_urls_end_with_single_git_suffix(name in segment(), host in host(), org in segment()) {
            let url = repo_url(&name, &format!("https://{host}/{org}"));
            prop_assert!(url.ends_with(".git"));
            prop_assert!(!url.ends_with(".git.git"));
        }

        /// Construction is deterministic.
        #[test]
        fn repo_url_is_deterministic(name in segment(), host in host(), org in segment()) {
            let prefix = format!("https://{host}/{org}");
            prop_assert_eq!(repo_url(&name, &prefix), repo_url(&name, &prefix));
        }

        /// The resolved local path is always directly under the base
        /// directory, whatever the repo name or rename.
        #[test]
        fn local_path_stays_under_base(
            owner in segment(),
            name in segment(),
            rename in proptest::option::of(segment()),
        ) {
            let base = Path::new("/work/base");
            let repo = format!("{owner}/{name}");
            let resolved = local_path(&repo, rename.as_deref(), base);
            prop_assert_eq!(resolved.parent(), Some(base));
        }

        /// SSH shorthand prefixes are never misclassified as network URLs.
        #[test]
        fn ssh_shorthand_is_not_a_network_url(host in host(), org in segment()) {
            let url = format!("git@{host}:{org}");
            prop_assert!(!is_network_url(&url));
        }
    }
}
