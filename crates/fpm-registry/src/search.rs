//! Keyword search over the module cache.

use crate::cache::{ModuleCache, split_reference};

/// Find qualified names matching `keyword`.
///
/// `keyword` may carry a provider filter after `@`. A key `name@origin`
/// matches when the keyword part is a case-insensitive substring of `name`
/// and, if given, the provider part is a case-insensitive substring of
/// `origin`. Results keep cache order; there is no ranking.
pub fn search(cache: &ModuleCache, keyword: &str) -> Vec<String> {
    let (name_part, provider) = split_reference(keyword);
    let name_part = name_part.to_lowercase();
    let provider = provider.map(str::to_lowercase);

    cache
        .keys()
        .filter(|key| {
            let (name, origin) = split_reference(key);
            if !name.to_lowercase().contains(&name_part) {
                return false;
            }
            match (&provider, origin) {
                (None, _) => true,
                (Some(wanted), Some(origin)) => origin.to_lowercase().contains(wanted.as_str()),
                (Some(_), None) => false,
            }
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ModuleCacheEntry;
    use fpm_meta::ModuleInfo;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn cache(keys: &[&str]) -> ModuleCache {
        let mut cache = ModuleCache::new();
        for key in keys {
            cache.insert(
                key.to_string(),
                ModuleCacheEntry {
                    info: ModuleInfo::default(),
                    download: format!("http://h/{key}.zip"),
                    require: None,
                },
            );
        }
        cache
    }

    #[test]
    fn results_follow_insertion_order() {
        let cache = cache(&["foo@A", "foo@B"]);
        assert_eq!(search(&cache, "foo"), vec!["foo@A", "foo@B"]);
        assert_eq!(search(&cache, "foo@B"), vec!["foo@B"]);
    }

    #[rstest]
    #[case("FOO", &["foo@Alpha", "foobar@Beta"])]
    #[case("bar", &["foobar@Beta"])]
    #[case("foo@alp", &["foo@Alpha"])]
    #[case("@beta", &["foobar@Beta", "logger@Beta"])]
    #[case("", &["foo@Alpha", "foobar@Beta", "logger@Beta"])]
    #[case("missing", &[])]
    fn substring_matching(#[case] keyword: &str, #[case] expected: &[&str]) {
        let cache = cache(&["foo@Alpha", "foobar@Beta", "logger@Beta"]);
        assert_eq!(search(&cache, keyword), expected);
    }
}
