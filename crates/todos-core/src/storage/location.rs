use super::error::StorageError;

/// Where the task collection lives inside the store.
///
/// Parsed from a store path such as `/apps/todos`: the last segment is
/// the table, the preceding segments joined with `_` name the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    pub namespace: String,
    pub database: String,
    pub table: String,
}

impl StoreLocation {
    pub fn parse(namespace: &str, store_path: &str) -> Result<Self, StorageError> {
        let segments: Vec<&str> = store_path.split('/').filter(|s| !s.is_empty()).collect();

        let (table, parents) = segments
            .split_last()
            .ok_or_else(|| StorageError::InvalidStorePath(store_path.to_string()))?;

        for segment in segments.iter().copied().chain(std::iter::once(namespace)) {
            if !is_identifier(segment) {
                return Err(StorageError::InvalidStorePath(store_path.to_string()));
            }
        }

        let database = if parents.is_empty() {
            table.to_string()
        } else {
            parents.join("_")
        };

        Ok(Self {
            namespace: namespace.to_string(),
            database,
            table: table.to_string(),
        })
    }
}

/// Letters, digits and underscores, not starting with a digit.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
