//! Dataset generation integration tests.
//!
//! Generates a dataset, writes the CSV files and checks the cross-table
//! properties on what was actually written.

use super::common::small_config;
use chrono::{NaiveDate, NaiveDateTime};
use ecom_synth::dataset::{generate, write_dataset, ORDER_DATE_FORMAT};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::Path;
use tempfile::tempdir;

/// Reads a CSV file into its header and records.
fn read_csv(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let records = reader.records().map(|r| r.unwrap()).collect();
    (headers, records)
}

/// Parses a decimal amount such as "123.45" into cents.
fn cents(amount: &str) -> i64 {
    let (whole, frac) = amount.split_once('.').unwrap();
    assert_eq!(frac.len(), 2, "amount {amount} should have two decimals");
    whole.parse::<i64>().unwrap() * 100 + frac.parse::<i64>().unwrap()
}

#[test]
fn test_written_files_have_expected_headers() {
    let dir = tempdir().unwrap();
    let dataset = generate(&small_config(42)).unwrap();
    write_dataset(&dataset, dir.path()).unwrap();

    let expected = [
        (
            "customers.csv",
            "customer_id,first_name,last_name,email,signup_date,country",
        ),
        (
            "products.csv",
            "product_id,product_name,category,price,stock_quantity",
        ),
        (
            "orders.csv",
            "order_id,customer_id,order_date,status,total_amount",
        ),
        (
            "order_items.csv",
            "order_item_id,order_id,product_id,quantity,unit_price",
        ),
        (
            "reviews.csv",
            "review_id,product_id,customer_id,rating,review_date",
        ),
    ];

    for (file, header) in expected {
        let (headers, _) = read_csv(&dir.path().join(file));
        assert_eq!(headers.join(","), header, "header of {file}");
    }
}

#[test]
fn test_written_row_counts_match_config() {
    let dir = tempdir().unwrap();
    let config = small_config(7);
    let dataset = generate(&config).unwrap();
    write_dataset(&dataset, dir.path()).unwrap();

    assert_eq!(read_csv(&dir.path().join("customers.csv")).1.len(), config.customers);
    assert_eq!(read_csv(&dir.path().join("products.csv")).1.len(), config.products);
    assert_eq!(read_csv(&dir.path().join("orders.csv")).1.len(), config.orders);
    assert_eq!(read_csv(&dir.path().join("reviews.csv")).1.len(), config.reviews);
    assert_eq!(
        read_csv(&dir.path().join("order_items.csv")).1.len(),
        dataset.order_items.len()
    );
}

#[test]
fn test_written_totals_equal_item_sums() {
    let dir = tempdir().unwrap();
    let dataset = generate(&small_config(3)).unwrap();
    write_dataset(&dataset, dir.path()).unwrap();

    let (_, items) = read_csv(&dir.path().join("order_items.csv"));
    let mut sums: HashMap<String, i64> = HashMap::new();
    for item in &items {
        let quantity: i64 = item[3].parse().unwrap();
        *sums.entry(item[1].to_string()).or_default() += quantity * cents(&item[4]);
    }

    let (_, orders) = read_csv(&dir.path().join("orders.csv"));
    for order in &orders {
        assert_eq!(
            cents(&order[4]),
            sums[&order[0]],
            "total of order {}",
            &order[0]
        );
    }
}

#[test]
fn test_written_dates_are_consistent() {
    let dir = tempdir().unwrap();
    let dataset = generate(&small_config(11)).unwrap();
    write_dataset(&dataset, dir.path()).unwrap();

    let (_, customers) = read_csv(&dir.path().join("customers.csv"));
    let signups: HashMap<String, NaiveDate> = customers
        .iter()
        .map(|c| (c[0].to_string(), c[4].parse().unwrap()))
        .collect();

    let (_, orders) = read_csv(&dir.path().join("orders.csv"));
    let mut first_order: HashMap<String, NaiveDateTime> = HashMap::new();
    for order in &orders {
        let date = NaiveDateTime::parse_from_str(&order[2], ORDER_DATE_FORMAT).unwrap();
        assert!(date.date() >= signups[&order[1]]);
        let first = first_order.entry(order[1].to_string()).or_insert(date);
        *first = (*first).min(date);
    }

    // A review always follows an order by the same customer.
    let (_, reviews) = read_csv(&dir.path().join("reviews.csv"));
    for review in &reviews {
        let date: NaiveDate = review[4].parse().unwrap();
        let first = first_order[&review[2]];
        assert!(date > first.date());
    }
}

#[test]
fn test_same_seed_writes_identical_files() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let config = small_config(99);

    write_dataset(&generate(&config).unwrap(), first.path()).unwrap();
    write_dataset(&generate(&config).unwrap(), second.path()).unwrap();

    for file in [
        "customers.csv",
        "products.csv",
        "orders.csv",
        "order_items.csv",
        "reviews.csv",
    ] {
        let a = std::fs::read(first.path().join(file)).unwrap();
        let b = std::fs::read(second.path().join(file)).unwrap();
        assert!(a == b, "{file} differs between runs");
    }
}
