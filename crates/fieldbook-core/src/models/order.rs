//! Order records
//!
//! An order is a set of product line items sold to a customer. The order
//! total is always derived from its line items; it is computed at create
//! time and recomputed whenever the items are patched, so the
//! total-equals-sum-of-lines invariant cannot be broken through the
//! public API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{round2, InvalidLabel};
use crate::query::{Queryable, SortField, SortValue};
use crate::storage::new_record_id;

/// Kind of customer an order ships to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerType {
    Hospital,
    Clinic,
    Pharmacy,
    Doctor,
}

impl CustomerType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::Clinic => "Clinic",
            Self::Pharmacy => "Pharmacy",
            Self::Doctor => "Doctor",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CustomerType {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hospital" => Ok(Self::Hospital),
            "Clinic" => Ok(Self::Clinic),
            "Pharmacy" => Ok(Self::Pharmacy),
            "Doctor" => Ok(Self::Doctor),
            _ => Err(InvalidLabel::new("customer type", s)),
        }
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidLabel::new("order status", s)),
        }
    }
}

/// One product line on an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    /// quantity x unit price, rounded to 2 decimals
    pub total_price: f64,
}

impl OrderItem {
    /// Build a line item, computing its total
    pub fn new(product_name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            id: new_record_id(),
            product_name: product_name.into(),
            quantity,
            unit_price,
            total_price: round2(quantity as f64 * unit_price),
        }
    }
}

/// Sum of line totals, rounded to 2 decimals
pub fn order_total(items: &[OrderItem]) -> f64 {
    round2(items.iter().map(|item| item.total_price).sum())
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_type: CustomerType,
    pub products: Vec<OrderItem>,
    /// Always the sum of line totals
    pub total_amount: f64,
    pub status: OrderStatus,
    pub date: NaiveDate,
    pub representative_id: String,
    /// Originating visit, if any (weak reference, never validated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating an order.
///
/// Carries no total: the repository derives it from the line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_type: CustomerType,
    pub products: Vec<OrderItem>,
    pub status: OrderStatus,
    pub date: NaiveDate,
    pub representative_id: String,
    #[serde(default)]
    pub visit_id: Option<String>,
}

impl OrderDraft {
    pub(crate) fn into_record(self, id: String, now: DateTime<Utc>) -> Order {
        let total_amount = order_total(&self.products);
        Order {
            id,
            customer_name: self.customer_name,
            customer_type: self.customer_type,
            products: self.products,
            total_amount,
            status: self.status,
            date: self.date,
            representative_id: self.representative_id,
            visit_id: self.visit_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for an order; absent fields are left unchanged.
///
/// Patching `products` recomputes the order total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct OrderPatch {
    pub customer_name: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub products: Option<Vec<OrderItem>>,
    pub status: Option<OrderStatus>,
    pub date: Option<NaiveDate>,
    pub representative_id: Option<String>,
    pub visit_id: Option<String>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, order: &mut Order) {
        if let Some(customer_name) = self.customer_name {
            order.customer_name = customer_name;
        }
        if let Some(customer_type) = self.customer_type {
            order.customer_type = customer_type;
        }
        if let Some(products) = self.products {
            order.total_amount = order_total(&products);
            order.products = products;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(date) = self.date {
            order.date = date;
        }
        if let Some(representative_id) = self.representative_id {
            order.representative_id = representative_id;
        }
        if let Some(visit_id) = self.visit_id {
            order.visit_id = Some(visit_id);
        }
    }
}

impl Queryable for Order {
    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.label())
    }

    fn customer_type_label(&self) -> Option<&str> {
        Some(self.customer_type.label())
    }

    fn representative_id(&self) -> Option<&str> {
        Some(&self.representative_id)
    }

    fn sort_value(&self, field: SortField) -> Option<SortValue> {
        match field {
            SortField::Date => Some(SortValue::Date(self.date)),
            SortField::Name => Some(SortValue::Text(self.customer_name.clone())),
            SortField::Status => Some(SortValue::Text(self.status.label().to_string())),
            SortField::TotalAmount => Some(SortValue::Number(self.total_amount)),
            SortField::CreatedAt => Some(SortValue::Instant(self.created_at)),
            SortField::UpdatedAt => Some(SortValue::Instant(self.updated_at)),
            SortField::Target => None,
        }
    }
}
