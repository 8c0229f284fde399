/// Ordered query-string fragments for a list fetch.
///
/// Fragments are kept in the order they were added and joined with `&`. Filter and sort
/// grammar is not checked here; a bad filter comes back from the server as an error or as an
/// empty page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryClauses {
    clauses: Vec<String>,
}

impl QueryClauses {
    pub fn new() -> Self {
        Self::default()
    }

    /// `query=(Alias startswith j)`
    pub fn query(self, expression: &str) -> Self {
        self.clause("query", expression)
    }

    /// `sort=(Alias asc)`
    pub fn sort(self, expression: &str) -> Self {
        self.clause("sort", expression)
    }

    pub fn rows_per_page(self, rows: u32) -> Self {
        self.clause("rowsPerPage", &rows.to_string())
    }

    pub fn page_number(self, page: u32) -> Self {
        self.clause("pageNumber", &page.to_string())
    }

    /// A fragment such as `name=value`, added as-is. Existing `%XX` escapes are kept; only
    /// characters that cannot appear in a url (spaces, quotes, non-ASCII) are encoded.
    pub fn raw(mut self, fragment: &str) -> Self {
        let fragment = fragment.trim().trim_start_matches(['?', '&']);
        if fragment.is_empty() {
            return self;
        }

        self.clauses.push(encode_fragment(fragment));
        self
    }

    fn clause(mut self, name: &str, value: &str) -> Self {
        self.clauses.push(format!("{}={}", name, encode_value(value)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True when a fragment named `name` is present (case-insensitive).
    pub fn has_clause(&self, name: &str) -> bool {
        let prefix = format!("{}=", name.to_ascii_lowercase());
        self.clauses
            .iter()
            .any(|clause| clause.to_ascii_lowercase().starts_with(&prefix))
    }

    /// Copy without any fragment named `name`.
    pub(crate) fn without(&self, name: &str) -> Self {
        let prefix = format!("{}=", name.to_ascii_lowercase());
        Self {
            clauses: self
                .clauses
                .iter()
                .filter(|clause| !clause.to_ascii_lowercase().starts_with(&prefix))
                .cloned()
                .collect(),
        }
    }

    /// Joined fragments, or `None` when there are none.
    pub fn to_query_string(&self) -> Option<String> {
        if self.clauses.is_empty() {
            return None;
        }
        Some(self.clauses.join("&"))
    }
}

impl<S: AsRef<str>> FromIterator<S> for QueryClauses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter()
            .fold(QueryClauses::new(), |clauses, fragment| clauses.raw(fragment.as_ref()))
    }
}

/// Append the clauses to a url, with `?` only when there is something to append.
pub fn build_url(base: &str, clauses: &QueryClauses) -> String {
    match clauses.to_query_string() {
        Some(query) if base.contains('?') => format!("{}&{}", base, query),
        Some(query) => format!("{}?{}", base, query),
        None => base.to_string(),
    }
}

// Keep the characters CUPI expressions use literally; encode spaces and the rest.
fn encode_value(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%28", "(")
        .replace("%29", ")")
}

fn encode_fragment(fragment: &str) -> String {
    let mut encoded = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if ch.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@/?%".contains(ch) {
            encoded.push(ch);
        } else {
            let mut buf = [0u8; 4];
            encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }
    encoded
}
