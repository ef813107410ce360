//! Order command handlers

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};

use fieldbook_core::{
    Crm, CustomerType, Filter, OrderDraft, OrderItem, OrderPatch, OrderStatus,
};

use super::{page_opt, resolve_prefix, resolve_rep};
use crate::output::Output;

/// Create a new order from "product:quantity:unit-price" line items
#[allow(clippy::too_many_arguments)]
pub fn create(
    crm: &Crm,
    customer: String,
    customer_type: CustomerType,
    items: Vec<String>,
    date: Option<NaiveDate>,
    rep: Option<String>,
    visit: Option<String>,
    output: &Output,
) -> Result<()> {
    let representative_id = resolve_rep(crm, rep)?;
    let products = items
        .iter()
        .map(|spec| parse_item(spec))
        .collect::<Result<Vec<_>>>()?;

    let order = crm.orders().create(OrderDraft {
        customer_name: customer,
        customer_type,
        products,
        status: OrderStatus::Pending,
        date: date.unwrap_or_else(|| Utc::now().date_naive()),
        representative_id,
        visit_id: visit,
    });

    output.success(&format!("Created order: {}", order.id));
    output.print_order(&order);
    Ok(())
}

/// List orders with optional filters
#[allow(clippy::too_many_arguments)]
pub fn list(
    crm: &Crm,
    status: Option<OrderStatus>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    rep: Option<String>,
    page: Option<usize>,
    limit: Option<usize>,
    output: &Output,
) -> Result<()> {
    let mut filter = Filter::new();
    if let Some(status) = status {
        filter = filter.status(status);
    }
    if let Some(from) = from {
        filter = filter.date_from(from);
    }
    if let Some(to) = to {
        filter = filter.date_to(to);
    }
    if let Some(rep) = rep {
        filter = filter.representative(rep);
    }

    let orders = crm
        .orders()
        .get_all(Some(&filter), None, page_opt(page, limit));
    output.print_orders(&orders);
    Ok(())
}

/// Show a single order
pub fn show(crm: &Crm, id: &str, output: &Output) -> Result<()> {
    let id = resolve_order_id(crm, id)?;
    if let Some(order) = crm.orders().get_by_id(&id) {
        output.print_order(&order);
    }
    Ok(())
}

/// Mark an order completed
pub fn complete(crm: &Crm, id: &str, output: &Output) -> Result<()> {
    let id = resolve_order_id(crm, id)?;
    match crm
        .orders()
        .update(&id, OrderPatch::status(OrderStatus::Completed))
    {
        Some(order) => {
            output.success(&format!("Order {} is now {}", order.id, order.status));
            Ok(())
        }
        None => bail!("Order not found: {}", id),
    }
}

/// Delete an order
pub fn delete(crm: &Crm, id: &str, output: &Output) -> Result<()> {
    let id = resolve_order_id(crm, id)?;
    if crm.orders().delete(&id) {
        output.success(&format!("Deleted order: {}", id));
        Ok(())
    } else {
        bail!("Order not found: {}", id)
    }
}

/// Parse a "product:quantity:unit-price" line-item spec
fn parse_item(spec: &str) -> Result<OrderItem> {
    let mut parts = spec.rsplitn(3, ':');
    let price = parts.next();
    let quantity = parts.next();
    let product = parts.next();

    let (Some(product), Some(quantity), Some(price)) = (product, quantity, price) else {
        bail!("Invalid item '{}': expected product:quantity:unit-price", spec);
    };

    let quantity: u32 = quantity
        .parse()
        .with_context(|| format!("Invalid quantity in item '{}'", spec))?;
    let price: f64 = price
        .parse()
        .with_context(|| format!("Invalid unit price in item '{}'", spec))?;

    Ok(OrderItem::new(product, quantity, price))
}

fn resolve_order_id(crm: &Crm, prefix: &str) -> Result<String> {
    let ids = crm
        .orders()
        .get_all(None, None, None)
        .into_iter()
        .map(|order| order.id)
        .collect();
    resolve_prefix("Order", prefix, ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let item = parse_item("Amoxicillin 500mg:10:12.50").unwrap();
        assert_eq!(item.product_name, "Amoxicillin 500mg");
        assert_eq!(item.quantity, 10);
        assert_eq!(item.unit_price, 12.50);
        assert_eq!(item.total_price, 125.0);
    }

    #[test]
    fn test_parse_item_with_colon_in_name() {
        // rsplitn keeps colons inside the product name intact
        let item = parse_item("Vitamin B12: forte:2:8.00").unwrap();
        assert_eq!(item.product_name, "Vitamin B12: forte");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_parse_item_rejects_bad_specs() {
        assert!(parse_item("no-separators").is_err());
        assert!(parse_item("product:x:1.0").is_err());
        assert!(parse_item("product:1:cheap").is_err());
    }
}
