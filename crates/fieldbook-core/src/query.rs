//! Filter, sort, and paginate over in-memory record collections
//!
//! Every repository funnels reads through [`apply`], which fixes the
//! pipeline order: filter, then sort, then paginate. Callers cannot
//! reorder the stages.
//!
//! The engine works over heterogeneous record types through the
//! [`Queryable`] trait: each entity maps the uniform predicate and sort
//! surface onto its own fields and returns `None` for anything it does
//! not carry.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

/// Conjunction of optional predicates over a record collection.
///
/// A field left as `None` does not constrain results. Records that carry
/// no date (goals, representatives) pass the date-bound predicates;
/// records that carry no status are excluded by a status predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Inclusive lower date bound
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub date_to: Option<NaiveDate>,
    /// Exact status label match
    pub status: Option<String>,
    /// Exact facility-type label match (visits)
    pub facility_type: Option<String>,
    /// Exact customer-type label match (orders)
    pub customer_type: Option<String>,
    /// Exact owning-representative match
    pub representative_id: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Constrain to an exact status label (accepts the status enums via
    /// their `Display` labels)
    pub fn status(mut self, status: impl ToString) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn facility_type(mut self, facility_type: impl ToString) -> Self {
        self.facility_type = Some(facility_type.to_string());
        self
    }

    pub fn customer_type(mut self, customer_type: impl ToString) -> Self {
        self.customer_type = Some(customer_type.to_string());
        self
    }

    pub fn representative(mut self, id: impl Into<String>) -> Self {
        self.representative_id = Some(id.into());
        self
    }

    /// Whether a record passes every predicate in the conjunction
    pub fn matches<T: Queryable>(&self, record: &T) -> bool {
        if let Some(from) = self.date_from {
            if matches!(record.record_date(), Some(date) if date < from) {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if matches!(record.record_date(), Some(date) if date > to) {
                return false;
            }
        }
        if let Some(ref want) = self.status {
            if record.status_label() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(ref want) = self.facility_type {
            if record.facility_type_label() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(ref want) = self.customer_type {
            if record.customer_type_label() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(ref want) = self.representative_id {
            if record.representative_id() != Some(want.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Field a collection can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// The record's primary date (visit/order/attendance date, goal start,
    /// representative join date)
    Date,
    /// Display name (facility, customer, goal title, representative name)
    Name,
    /// Status label
    Status,
    /// Order total amount
    TotalAmount,
    /// Goal target
    Target,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Single-field sort descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Comparable value extracted from a record for sorting.
///
/// Values of different shapes compare as equal, which leaves the
/// collection's prior order intact under the stable sort.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Instant(DateTime<Utc>),
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Instant(a), Self::Instant(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// 1-indexed pagination window.
///
/// Out-of-range pages yield an empty sequence, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    fn slice<T>(self, records: Vec<T>) -> Vec<T> {
        let start = self.page.saturating_sub(1).saturating_mul(self.limit);
        records.into_iter().skip(start).take(self.limit).collect()
    }
}

/// Uniform query surface over heterogeneous record types
pub trait Queryable {
    /// Date used for range filtering; `None` means date bounds never
    /// constrain this record type
    fn record_date(&self) -> Option<NaiveDate> {
        None
    }

    fn status_label(&self) -> Option<&str> {
        None
    }

    fn facility_type_label(&self) -> Option<&str> {
        None
    }

    fn customer_type_label(&self) -> Option<&str> {
        None
    }

    fn representative_id(&self) -> Option<&str> {
        None
    }

    /// Value to order by for the given field; `None` sorts as equal
    fn sort_value(&self, field: SortField) -> Option<SortValue>;
}

/// Run the fixed filter -> sort -> paginate pipeline over a collection
pub fn apply<T: Queryable>(
    records: Vec<T>,
    filter: Option<&Filter>,
    sort: Option<&Sort>,
    page: Option<Page>,
) -> Vec<T> {
    let mut records = match filter {
        Some(filter) => records
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect(),
        None => records,
    };

    if let Some(sort) = sort {
        records.sort_by(|a, b| {
            let ordering = match (a.sort_value(sort.field), b.sort_value(sort.field)) {
                (Some(a), Some(b)) => a.compare(&b),
                _ => Ordering::Equal,
            };
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    match page {
        Some(page) => page.slice(records),
        None => records,
    }
}
