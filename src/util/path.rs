use std::path::PathBuf;

/// Expand `~`, `$VAR` and `${VAR}`; returns the input unchanged if a variable is unset.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Split a comma-separated option value, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a comma-separated path list and expand each entry.
pub fn expand_path_list(value: &str) -> Vec<PathBuf> {
    split_list(value)
        .iter()
        .map(|p| PathBuf::from(expand_env_vars(p)))
        .collect()
}
