//! Drive query-language predicates

/// MIME type added to the search when the user asks for sheets
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

const NOT_TRASHED: &str = "trashed = false";

/// Escape a value for use inside a single-quoted query literal
pub fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Build the predicate for a free-text search.
///
/// An empty (or whitespace-only) query lists every non-trashed file.
/// Otherwise the name must contain the query; a query mentioning "sheet"
/// also matches any spreadsheet.
pub fn search_predicate(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return NOT_TRASHED.to_string();
    }

    let mut conditions = vec![format!("name contains '{}'", escape_literal(query))];
    if query.to_lowercase().contains("sheet") {
        conditions.push(format!("mimeType = '{}'", SPREADSHEET_MIME_TYPE));
    }

    format!("({}) and {}", conditions.join(" or "), NOT_TRASHED)
}

/// Predicate for the non-trashed children of a folder
pub fn children_predicate(folder_id: &str) -> String {
    format!("'{}' in parents and {}", escape_literal(folder_id), NOT_TRASHED)
}

/// Predicate for every non-trashed file
pub fn not_trashed_predicate() -> &'static str {
    NOT_TRASHED
}
