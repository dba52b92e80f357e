//! Path prefix enumeration
//!
//! Node paths are indexed together with every ancestor path so that a term
//! query on a single prefix finds a whole subtree.

/// Builds all prefixes of a slash-delimited path, shortest first.
///
/// Absolute paths start with `"/"`; relative paths never carry a leading
/// slash. Empty segments (doubled or trailing slashes) are skipped, so the
/// result never holds an empty or repeated prefix.
///
/// ```ignore
/// assert_eq!(build_all_path_prefixes("/sites/home"), vec!["/", "/sites", "/sites/home"]);
/// assert_eq!(build_all_path_prefixes("sites/home"), vec!["sites", "sites/home"]);
/// ```
pub fn build_all_path_prefixes(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }

    let is_absolute = path.starts_with('/');
    let mut prefixes = Vec::new();
    let mut current = String::with_capacity(path.len());

    if is_absolute {
        prefixes.push("/".to_string());
    }

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        if is_absolute || !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        prefixes.push(current.clone());
    }

    prefixes
}
