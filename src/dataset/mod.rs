//! Synthetic e-commerce dataset.
//!
//! Generates customers, products, orders, order items and reviews that stay
//! referentially consistent, and writes them out as CSV files.

mod generator;
mod model;
mod writer;

pub use generator::{generate, generate_with_rng, CATEGORIES, COUNTRIES};
pub use model::{
    Customer, Money, Order, OrderItem, OrderStatus, Product, Record, Review, ORDER_DATE_FORMAT,
};
pub use writer::write_dataset;

use std::fmt;

/// The five generated tables, in generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub reviews: Vec<Review>,
}

impl Dataset {
    /// Returns the row count of every table.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            customers: self.customers.len(),
            products: self.products.len(),
            orders: self.orders.len(),
            order_items: self.order_items.len(),
            reviews: self.reviews.len(),
        }
    }
}

/// Row counts of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
    pub reviews: usize,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} customers, {} products, {} orders, {} order items, {} reviews",
            self.customers, self.products, self.orders, self.order_items, self.reviews
        )
    }
}
