//! Entity types of the synthetic e-commerce dataset.
//!
//! Field names double as CSV column names, so their order here is the column
//! order in the written files.

use crate::error::{Result, SynthError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Format of `order_date` in the written files.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A table row that can be written as one CSV record.
pub trait Record: Serialize {
    /// File name the table is written to.
    const FILE_NAME: &'static str;

    /// Header row, in field order.
    const HEADERS: &'static [&'static str];
}

/// An amount of money held as integer cents.
///
/// Keeping cents exact means an order total is always the exact sum of its
/// line subtotals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from a number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from a decimal value, rounded to the nearest cent.
    pub fn from_f64(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal value.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Adds two amounts, returning `None` on overflow.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    pub fn checked_mul(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderStatus {
    Completed,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// All statuses with their sampling weights.
    pub const WEIGHTED: [(OrderStatus, f64); 3] = [
        (OrderStatus::Completed, 0.85),
        (OrderStatus::Cancelled, 0.10),
        (OrderStatus::Returned, 0.05),
    ];

    /// Returns the status as written to CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Returned => "Returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub customer_id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub signup_date: NaiveDate,
    pub country: &'static str,
}

impl Record for Customer {
    const FILE_NAME: &'static str = "customers.csv";
    const HEADERS: &'static [&'static str] = &[
        "customer_id",
        "first_name",
        "last_name",
        "email",
        "signup_date",
        "country",
    ];
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub product_id: u32,
    pub product_name: String,
    pub category: &'static str,
    pub price: Money,
    pub stock_quantity: u32,
}

impl Record for Product {
    const FILE_NAME: &'static str = "products.csv";
    const HEADERS: &'static [&'static str] = &[
        "product_id",
        "product_name",
        "category",
        "price",
        "stock_quantity",
    ];
}

/// An order placed by a customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: u32,
    pub customer_id: u32,
    #[serde(serialize_with = "serialize_order_date")]
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
    pub total_amount: Money,
}

impl Record for Order {
    const FILE_NAME: &'static str = "orders.csv";
    const HEADERS: &'static [&'static str] = &[
        "order_id",
        "customer_id",
        "order_date",
        "status",
        "total_amount",
    ];
}

/// One product line within an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub order_item_id: u32,
    pub order_id: u32,
    pub product_id: u32,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    /// Returns `quantity * unit_price`.
    pub fn subtotal(&self) -> Result<Money> {
        self.unit_price.checked_mul(self.quantity).ok_or_else(|| {
            SynthError::generation(format!(
                "subtotal of order item {} overflows",
                self.order_item_id
            ))
        })
    }
}

impl Record for OrderItem {
    const FILE_NAME: &'static str = "order_items.csv";
    const HEADERS: &'static [&'static str] = &[
        "order_item_id",
        "order_id",
        "product_id",
        "quantity",
        "unit_price",
    ];
}

/// A product review left after an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub review_id: u32,
    pub product_id: u32,
    pub customer_id: u32,
    pub rating: u8,
    pub review_date: NaiveDate,
}

impl Record for Review {
    const FILE_NAME: &'static str = "reviews.csv";
    const HEADERS: &'static [&'static str] = &[
        "review_id",
        "product_id",
        "customer_id",
        "rating",
        "review_date",
    ];
}

fn serialize_order_date<S: Serializer>(
    date: &NaiveDateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(ORDER_DATE_FORMAT))
}
