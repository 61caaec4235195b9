use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "date_desc")]
    DateDesc,
}

// The empty select value means all categories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryFilter(Option<String>);

impl CategoryFilter {
    pub fn all() -> Self {
        CategoryFilter(None)
    }

    pub fn from_select_value(value: &str) -> Self {
        if value.is_empty() {
            CategoryFilter(None)
        } else {
            CategoryFilter(Some(value.to_string()))
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_all(&self) -> bool {
        self.0.is_none()
    }

    pub fn select_value(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub sort: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ListQuery {
    pub fn new(filter: &CategoryFilter) -> Self {
        ListQuery {
            sort: SortOrder::DateDesc,
            category: filter.category().map(str::to_string),
        }
    }

    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }
}
