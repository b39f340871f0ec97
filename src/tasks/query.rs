use serde::Deserialize;
use utoipa::IntoParams;

/// Default page size when `limit` is absent or out of range
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page a client may request
pub const MAX_LIMIT: u32 = 100;

/// Query parameters extracted from HTTP request
///
/// Everything arrives as raw strings; unparseable values fall back to
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskQueryParams {
    /// Page number (1-indexed, defaults to 1)
    pub page: Option<String>,
    /// Items per page (1..=100, defaults to 10)
    pub limit: Option<String>,
    /// "true" or "false"; anything else means no filter
    pub completed: Option<String>,
    /// Sort field: id, title, created_at or updated_at
    pub sort: Option<String>,
    /// Sort order: asc or desc
    pub order: Option<String>,
}

/// Sort field options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Column name; only these four strings ever reach an ORDER BY
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

/// Sort order options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Normalized listing request handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            completed: None,
            sort: SortField::Id,
            order: SortOrder::Asc,
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TaskFilter {
    /// Same bounds as query parsing: page at least 1, limit within 1..=MAX_LIMIT
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: if (1..=MAX_LIMIT).contains(&self.limit) {
                self.limit
            } else {
                DEFAULT_LIMIT
            },
            ..self
        }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl From<TaskQueryParams> for TaskFilter {
    fn from(params: TaskQueryParams) -> Self {
        let page = parse_number(params.page.as_deref())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let limit = parse_number(params.limit.as_deref())
            .filter(|l| (1..=MAX_LIMIT).contains(l))
            .unwrap_or(DEFAULT_LIMIT);

        let completed = match params.completed.as_deref().map(str::trim) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };

        let sort = match params.sort.as_deref().map(|s| s.trim().to_lowercase()).as_deref() {
            Some("title") => SortField::Title,
            Some("created_at") => SortField::CreatedAt,
            Some("updated_at") => SortField::UpdatedAt,
            _ => SortField::Id,
        };

        let order = match params.order.as_deref().map(|s| s.trim().to_lowercase()).as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        Self {
            completed,
            sort,
            order,
            page,
            limit,
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_repairs_hand_built_filters() {
        let filter = TaskFilter {
            page: 0,
            limit: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, DEFAULT_LIMIT);
        assert_eq!(filter.offset(), 0);

        let filter = TaskFilter {
            limit: MAX_LIMIT + 1,
            ..Default::default()
        }
        .normalized();
        assert_eq!(filter.limit, DEFAULT_LIMIT);

        let filter = TaskFilter {
            page: 3,
            limit: 25,
            ..Default::default()
        };
        assert_eq!(filter.clone().normalized(), filter);
    }

    fn params(pairs: &[(&str, &str)]) -> TaskQueryParams {
        let mut params = TaskQueryParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => params.page = value,
                "limit" => params.limit = value,
                "completed" => params.completed = value,
                "sort" => params.sort = value,
                "order" => params.order = value,
                _ => unreachable!(),
            }
        }
        params
    }

    #[test]
    fn test_defaults_when_empty() {
        assert_eq!(TaskFilter::from(TaskQueryParams::default()), TaskFilter::default());
    }

    #[test]
    fn test_out_of_range_pagination_falls_back() {
        let filter = TaskFilter::from(params(&[("page", "0"), ("limit", "500")]));
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, DEFAULT_LIMIT);

        let filter = TaskFilter::from(params(&[("page", "-3"), ("limit", "abc")]));
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_valid_values_are_kept() {
        let filter = TaskFilter::from(params(&[
            ("page", "3"),
            ("limit", "100"),
            ("completed", "false"),
            ("sort", "created_at"),
            ("order", "DESC"),
        ]));

        assert_eq!(filter.page, 3);
        assert_eq!(filter.limit, 100);
        assert_eq!(filter.completed, Some(false));
        assert_eq!(filter.sort, SortField::CreatedAt);
        assert_eq!(filter.order, SortOrder::Desc);
        assert_eq!(filter.offset(), 200);
    }

    #[test]
    fn test_unknown_sort_is_never_passed_through() {
        let filter = TaskFilter::from(params(&[
            ("sort", "id; DROP TABLE tasks"),
            ("order", "sideways"),
            ("completed", "maybe"),
        ]));

        assert_eq!(filter.sort, SortField::Id);
        assert_eq!(filter.order, SortOrder::Asc);
        assert_eq!(filter.completed, None);
    }
}
