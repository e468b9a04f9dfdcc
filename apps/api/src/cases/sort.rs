use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Id,
    Front,
    Back,
    Tags,
    Keywords,
    NextReview,
    Modified,
}

impl SortColumn {
    pub fn column(self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Front => "front",
            SortColumn::Back => "back",
            SortColumn::Tags => "tags",
            SortColumn::Keywords => "keywords",
            SortColumn::NextReview => "next_review",
            SortColumn::Modified => "modified",
        }
    }
}

impl FromStr for SortColumn {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "id" => Ok(SortColumn::Id),
            "front" => Ok(SortColumn::Front),
            "back" => Ok(SortColumn::Back),
            "tags" => Ok(SortColumn::Tags),
            "keywords" => Ok(SortColumn::Keywords),
            "next_review" => Ok(SortColumn::NextReview),
            "modified" => Ok(SortColumn::Modified),
            other => Err(AppError::Validation(format!("Cannot sort by '{other}'"))),
        }
    }
}

/// Sort order for listing and search, sent by the client with every request
/// (`?sort=<column>&desc=<bool>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    #[serde(rename = "sort", alias = "column", default = "default_column")]
    pub column: SortColumn,
    #[serde(default = "default_desc")]
    pub desc: bool,
}

fn default_column() -> SortColumn {
    SortColumn::Modified
}

fn default_desc() -> bool {
    true
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder {
            column: default_column(),
            desc: default_desc(),
        }
    }
}

impl SortOrder {
    /// Re-selecting the active column flips the direction; another column
    /// becomes active with the direction unchanged.
    pub fn toggle(self, column: SortColumn) -> Self {
        if column == self.column {
            SortOrder {
                column,
                desc: !self.desc,
            }
        } else {
            SortOrder {
                column,
                desc: self.desc,
            }
        }
    }

    /// `ORDER BY` clause built from the closed column set only.
    /// `id` breaks ties so pages stay stable.
    pub fn order_by(self) -> String {
        let dir = if self.desc { "DESC" } else { "ASC" };
        if self.column == SortColumn::Id {
            format!("id {dir}")
        } else {
            format!("{} {dir}, id {dir}", self.column.column())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_modified_desc() {
        let order = SortOrder::default();
        assert_eq!(order.column, SortColumn::Modified);
        assert!(order.desc);
        assert_eq!(order.order_by(), "modified DESC, id DESC");
    }

    #[test]
    fn test_toggle_same_column_flips() {
        let order = SortOrder::default().toggle(SortColumn::Modified);
        assert!(!order.desc);
        assert!(order.toggle(SortColumn::Modified).desc);
    }

    #[test]
    fn test_toggle_other_column_keeps_direction() {
        let order = SortOrder {
            column: SortColumn::Front,
            desc: false,
        }
        .toggle(SortColumn::Tags);
        assert_eq!(order.column, SortColumn::Tags);
        assert!(!order.desc);
        assert_eq!(order.order_by(), "tags ASC, id ASC");
    }

    #[test]
    fn test_unknown_column_rejected() {
        assert!("front; DROP TABLE cases".parse::<SortColumn>().is_err());
        assert_eq!(
            "next_review".parse::<SortColumn>().unwrap(),
            SortColumn::NextReview
        );
    }

    #[test]
    fn test_query_string_shape() {
        let order: SortOrder = serde_json::from_str(r#"{"sort":"front","desc":false}"#).unwrap();
        assert_eq!(order.column, SortColumn::Front);
        assert!(!order.desc);
        let order: SortOrder = serde_json::from_str("{}").unwrap();
        assert_eq!(order, SortOrder::default());
    }
}
