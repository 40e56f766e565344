//! Seeded generation of the five dataset tables.
//!
//! Tables are produced in dependency order and each stage only reads tables
//! generated before it, which is what keeps foreign keys, dates and totals
//! consistent.

use super::model::{Customer, Money, Order, OrderItem, OrderStatus, Product, Review};
use super::Dataset;
use crate::config::GeneratorConfig;
use crate::error::{Result, SynthError};
use chrono::{Days, NaiveDate, NaiveTime};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Countries customers sign up from.
pub const COUNTRIES: [&str; 6] = ["USA", "UK", "Canada", "Germany", "France", "Australia"];

/// Product categories.
pub const CATEGORIES: [&str; 5] = [
    "Electronics",
    "Clothing",
    "Home & Kitchen",
    "Books",
    "Beauty",
];

const STOCK_RANGE: (u32, u32) = (10, 1000);
const ITEMS_PER_ORDER: (u32, u32) = (1, 5);
const QUANTITY_RANGE: (u32, u32) = (1, 3);
const REVIEW_DELAY_DAYS: (u64, u64) = (1, 30);
const RATING_RANGE: (u8, u8) = (1, 5);

/// Generates a complete dataset from the configuration.
///
/// The random source is seeded from `config.seed`, so repeated calls with the
/// same configuration return identical datasets.
pub fn generate(config: &GeneratorConfig) -> Result<Dataset> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    generate_with_rng(config, &mut rng)
}

/// Generates a dataset drawing from the given random source.
///
/// The configuration is validated before anything is sampled.
pub fn generate_with_rng<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Dataset> {
    config.validate()?;

    let customers = generate_customers(config, rng)?;
    debug!("Generated {} customers", customers.len());

    let products = generate_products(config, rng)?;
    debug!("Generated {} products", products.len());

    let (orders, order_items) = generate_orders(config, rng, &customers, &products)?;
    debug!(
        "Generated {} orders with {} items",
        orders.len(),
        order_items.len()
    );

    let reviews = generate_reviews(config, rng, &orders, &order_items)?;
    debug!("Generated {} reviews", reviews.len());

    Ok(Dataset {
        customers,
        products,
        orders,
        order_items,
        reviews,
    })
}

fn generate_customers<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Customer>> {
    (1..=config.customers)
        .map(|i| -> Result<Customer> {
            let offset = rng.random_range(0..=u64::from(config.signup_window_days));
            let signup_date = add_days(config.start_date, offset)?;
            let country = COUNTRIES[rng.random_range(0..COUNTRIES.len())];
            Ok(Customer {
                customer_id: to_id(i)?,
                first_name: format!("User_{i}"),
                last_name: format!("Last_{i}"),
                email: format!("user{i}@example.com"),
                signup_date,
                country,
            })
        })
        .collect()
}

fn generate_products<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Product>> {
    let min_cents = Money::from_f64(config.price_min).cents();
    let max_cents = Money::from_f64(config.price_max).cents();

    (1..=config.products)
        .map(|i| -> Result<Product> {
            Ok(Product {
                product_id: to_id(i)?,
                product_name: format!("Product_{i}"),
                category: CATEGORIES[rng.random_range(0..CATEGORIES.len())],
                price: Money::from_cents(rng.random_range(min_cents..=max_cents)),
                stock_quantity: rng.random_range(STOCK_RANGE.0..=STOCK_RANGE.1),
            })
        })
        .collect()
}

fn generate_orders<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
    customers: &[Customer],
    products: &[Product],
) -> Result<(Vec<Order>, Vec<OrderItem>)> {
    let mut orders = Vec::with_capacity(config.orders);
    let mut order_items = Vec::with_capacity(config.orders.saturating_mul(3));

    for i in 1..=config.orders {
        let order_id = to_id(i)?;
        let customer = customers
            .choose(rng)
            .ok_or_else(|| SynthError::generation("cannot place orders without customers"))?;

        let span = (config.end_date - customer.signup_date).num_days().max(0) as u64;
        let order_date = add_days(customer.signup_date, rng.random_range(0..=span))?;
        let status = pick_status(rng)?;

        let item_count = rng.random_range(ITEMS_PER_ORDER.0..=ITEMS_PER_ORDER.1);
        let first_item = order_items.len();
        for _ in 0..item_count {
            let product = products
                .choose(rng)
                .ok_or_else(|| SynthError::generation("cannot place orders without products"))?;
            order_items.push(OrderItem {
                order_item_id: to_id(order_items.len() + 1)?,
                order_id,
                product_id: product.product_id,
                quantity: rng.random_range(QUANTITY_RANGE.0..=QUANTITY_RANGE.1),
                unit_price: product.price,
            });
        }

        orders.push(Order {
            order_id,
            customer_id: customer.customer_id,
            order_date: order_date.and_time(NaiveTime::MIN),
            status,
            total_amount: order_total(order_id, &order_items[first_item..])?,
        });
    }

    Ok((orders, order_items))
}

fn generate_reviews<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
    orders: &[Order],
    order_items: &[OrderItem],
) -> Result<Vec<Review>> {
    (1..=config.reviews)
        .map(|i| -> Result<Review> {
            let item = order_items
                .choose(rng)
                .ok_or_else(|| SynthError::generation("cannot write reviews without orders"))?;
            // Order ids are dense from 1, so the parent sits at order_id - 1.
            let order = orders
                .get(item.order_id as usize - 1)
                .ok_or_else(|| {
                    SynthError::generation(format!(
                        "order item {} references missing order {}",
                        item.order_item_id, item.order_id
                    ))
                })?;
            let delay = rng.random_range(REVIEW_DELAY_DAYS.0..=REVIEW_DELAY_DAYS.1);

            Ok(Review {
                review_id: to_id(i)?,
                product_id: item.product_id,
                customer_id: order.customer_id,
                rating: rng.random_range(RATING_RANGE.0..=RATING_RANGE.1),
                review_date: add_days(order.order_date.date(), delay)?,
            })
        })
        .collect()
}

/// Sums the subtotals of one order's items.
fn order_total(order_id: u32, items: &[OrderItem]) -> Result<Money> {
    items.iter().try_fold(Money::ZERO, |total, item| {
        total.checked_add(item.subtotal()?).ok_or_else(|| {
            SynthError::generation(format!("total of order {order_id} overflows"))
        })
    })
}

fn pick_status<R: Rng + ?Sized>(rng: &mut R) -> Result<OrderStatus> {
    OrderStatus::WEIGHTED
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(status, _)| *status)
        .map_err(|e| SynthError::generation(format!("invalid status weights: {e}")))
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| {
        SynthError::generation(format!("date overflow adding {days} days to {date}"))
    })
}

fn to_id(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| SynthError::generation(format!("identifier {n} out of range")))
}
