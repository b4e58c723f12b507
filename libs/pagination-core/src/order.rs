//! Sortable fields and the `"<field> <direction>"` order grammar.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Alias under which listings must join the per-mover statistics view
/// before ordering by any statistics-backed field.
pub const STATS_ALIAS: &str = "stats";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub const ALL: [SortDir; 2] = [SortDir::Asc, SortDir::Desc];

    pub const fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

impl FromStr for SortDir {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(SortDir::Asc),
            "DESC" => Ok(SortDir::Desc),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

/// How a cursor value for a field is represented and compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Timestamp,
}

impl FieldKind {
    pub const fn describe(self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "number",
            FieldKind::Timestamp => "RFC 3339 timestamp",
        }
    }
}

/// Where a sortable field lives: directly on the listing's base row, or on
/// the statistics view joined under [`STATS_ALIAS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldLocation {
    Base(&'static str),
    Stats(&'static str),
}

impl FieldLocation {
    pub const fn column(self) -> &'static str {
        match self {
            FieldLocation::Base(c) | FieldLocation::Stats(c) => c,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderField {
    ReviewCount,
    AverageRating,
    Experience,
    ConfirmedEstimateCount,
    CreatedAt,
    MoveDate,
    LikeCount,
}

impl OrderField {
    pub const ALL: [OrderField; 7] = [
        OrderField::ReviewCount,
        OrderField::AverageRating,
        OrderField::Experience,
        OrderField::ConfirmedEstimateCount,
        OrderField::CreatedAt,
        OrderField::MoveDate,
        OrderField::LikeCount,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OrderField::ReviewCount => "review_count",
            OrderField::AverageRating => "average_rating",
            OrderField::Experience => "experience",
            OrderField::ConfirmedEstimateCount => "confirmed_estimate_count",
            OrderField::CreatedAt => "created_at",
            OrderField::MoveDate => "move_date",
            OrderField::LikeCount => "like_count",
        }
    }

    pub const fn location(self) -> FieldLocation {
        match self {
            OrderField::Experience | OrderField::CreatedAt | OrderField::MoveDate => {
                FieldLocation::Base(self.as_str())
            }
            OrderField::ReviewCount
            | OrderField::AverageRating
            | OrderField::ConfirmedEstimateCount
            | OrderField::LikeCount => FieldLocation::Stats(self.as_str()),
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            OrderField::ReviewCount
            | OrderField::Experience
            | OrderField::ConfirmedEstimateCount
            | OrderField::LikeCount => FieldKind::Integer,
            OrderField::AverageRating => FieldKind::Float,
            OrderField::CreatedAt | OrderField::MoveDate => FieldKind::Timestamp,
        }
    }
}

impl FromStr for OrderField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::InvalidOrder(s.to_string()))
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every legal order string, built once from `OrderField::ALL × SortDir::ALL`.
static VALID_ORDERS: Lazy<HashSet<String>> = Lazy::new(|| {
    OrderField::ALL
        .iter()
        .flat_map(|field| {
            SortDir::ALL
                .iter()
                .map(move |dir| format!("{} {}", field.as_str(), dir.as_str()))
        })
        .collect()
});

pub fn valid_orders() -> &'static HashSet<String> {
    &VALID_ORDERS
}

/// A validated `"<field> <direction>"` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrderSpec {
    pub field: OrderField,
    pub dir: SortDir,
}

impl OrderSpec {
    pub const fn new(field: OrderField, dir: SortDir) -> Self {
        Self { field, dir }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        let tokens: Vec<&str> = s.split(' ').collect();
        let [field, dir] = tokens.as_slice() else {
            return Err(Error::InvalidOrder(s.to_string()));
        };
        if !VALID_ORDERS.contains(s) {
            return Err(Error::InvalidOrder(s.to_string()));
        }
        Ok(Self {
            field: field.parse()?,
            dir: dir.parse()?,
        })
    }

    pub const fn location(&self) -> FieldLocation {
        self.field.location()
    }
}

impl FromStr for OrderSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderSpec::parse(s)
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.as_str(), self.dir.as_str())
    }
}

impl Serialize for OrderSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OrderSpec::parse(&raw).map_err(serde::de::Error::custom)
    }
}
