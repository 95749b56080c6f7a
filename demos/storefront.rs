//! Storefront Example
//!
//! This example runs a catalog query, fills a cart from the first hits,
//! walks the checkout steps and prints the receipt of the placed order.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to search the catalog
//! Use `--sort` to pick a sort order for the listing
//! Use `-p` to apply a promo code at checkout

use std::io;

use anyhow::{Result, anyhow};
use clap::Parser;
use vitrine::{
    cart::Cart,
    checkout::{CheckoutSession, FieldIssue, PaymentForm, ShippingForm},
    fixtures::Fixture,
    orders::OrderBook,
    promos::PromoOutcome,
    query::{self, FilterState},
    receipt,
    summary::summarize,
    utils::StorefrontArgs,
};

/// Storefront Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = StorefrontArgs::parse();

    let set = Fixture::from_set(&args.fixture)?;

    let hits = query::run(&set.catalog, &args.search, &FilterState::none(), args.sort)?;

    let shown = hits.len();
    let total = set.catalog.len();
    let sort = args.sort;

    println!("{shown} of {total} products, sorted by {sort}:");

    for key in &hits {
        if let Some(product) = set.catalog.get(*key) {
            let price = product.price.to_string();

            println!("  {:<34} {price:>10}  {}", product.name, product.brand);
        }
    }

    let mut cart = Cart::new(set.catalog.currency());

    for key in hits.iter().take(2) {
        let Some(product) = set.catalog.get(*key) else {
            continue;
        };

        cart.add_product(*key, product, 1, product.sizes.first().map(String::as_str), None)?;
    }

    if cart.is_empty() {
        println!("\nNothing matched, so there is nothing to check out.");
        return Ok(());
    }

    let summary = summarize(&cart, args.promo.as_deref(), &set.rules, &set.promos)?;

    if let PromoOutcome::Invalid(code) = summary.promo() {
        println!("\nPromo code {code:?} was not recognised; no discount applied.");
    }

    let shipping = ShippingForm {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        address1: "1 Analytical Way".to_string(),
        address2: String::new(),
        city: "London".to_string(),
        postal_code: "EC1A 1BB".to_string(),
        country: "United Kingdom".to_string(),
    }
    .validate()
    .map_err(form_issues)?;

    let payment = PaymentForm {
        card_holder: "Ada Lovelace".to_string(),
        card_number: "4242 4242 4242 4242".to_string(),
        expiry: "12/27".to_string(),
        cvv: "123".to_string(),
    }
    .validate()
    .map_err(form_issues)?;

    let mut session = CheckoutSession::new();

    session.complete_shipping(shipping)?;
    session.complete_payment(payment)?;

    let draft = session.confirm_order(&cart, summary)?;

    let mut book = OrderBook::new();
    let key = book.place(draft);

    let order = book.get(key).ok_or_else(|| anyhow!("placed order went missing"))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt::write_receipt(&mut handle, order, &set.catalog)?;

    let history = book.history(None, 1, 5);
    let placed = history.info().total_items;

    println!("Order history ({placed} placed):");

    for key in history.items() {
        if let Some(order) = book.get(*key) {
            let order_total = order.summary().total().to_string();

            println!("  {} [{}] {order_total}", order.id(), order.status());
        }
    }

    Ok(())
}

fn form_issues(issues: Vec<FieldIssue>) -> anyhow::Error {
    let joined = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    anyhow!("form validation failed: {joined}")
}
