/// Names whose lowercase form contains the lowercase query, in their original
/// order. An empty query returns the full list.
pub fn filter_names(query: &str, names: &[String]) -> Vec<String> {
    if query.is_empty() {
        return names.to_vec();
    }
    let query = query.to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
