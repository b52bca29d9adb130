#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use template_resolve::engine::{HostObject, Invocation, Value};
use template_resolve::error::ResolveError;
use template_resolve::metadata::loader::load_index;
use template_resolve::metadata::TypeIndex;

pub fn get_test_fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The shop hierarchy: `shop::Book` extends `shop::Product` extends
/// `shop::Named`, plus an orphan whose superclass is not indexed.
pub fn shop_index() -> TypeIndex {
    load_index(get_test_fixture_path("index/shop.yaml")).expect("fixture index loads")
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub available: bool,
    pub calls: Arc<AtomicUsize>,
}

impl Product {
    pub fn new(id: i32, name: &str, price: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            available: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of method invocations so far.
    pub fn invocations(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::Int(self.id)),
            "price" => Some(Value::Int(self.price)),
            "secret" => Some(Value::from("hidden")),
            _ => None,
        }
    }

    fn call(&self, method: &str, args: Vec<Value>) -> Invocation {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match (method, args.as_slice()) {
            ("getName", []) => Invocation::ready(self.name.clone()),
            ("isAvailable", []) => Invocation::ready(self.available),
            ("getURLThing", []) => Invocation::ready(format!("https://shop/{}", self.id)),
            ("priceWith", [Value::Int(extra)]) => Invocation::ready(self.price + extra),
            ("priceWith", [Value::Null]) => Invocation::ready(self.price),
            ("quote", [Value::Str(currency), Value::Int(quantity)]) => {
                let total = self.price * quantity;
                let currency = currency.clone();
                Invocation::pending(async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Ok(Value::from(format!("{total} {currency}")))
                })
            }
            ("quote", [_, _]) => Invocation::failed(ResolveError::invocation(
                "shop::Product",
                "quote",
                "expected a currency and a quantity",
            )),
            ("fail", []) => Invocation::failed(ResolveError::invocation(
                "shop::Product",
                "fail",
                "out of stock",
            )),
            _ => Invocation::Missing,
        }
    }
}

impl HostObject for Product {
    fn type_name(&self) -> &str {
        "shop::Product"
    }

    fn supertypes(&self) -> &[&str] {
        &["shop::Named"]
    }

    fn read_field(&self, name: &str) -> Option<Value> {
        self.field(name)
    }

    fn invoke(&self, method: &str, args: Vec<Value>) -> Invocation {
        self.call(method, args)
    }
}

#[derive(Debug, Clone)]
pub struct Book {
    pub product: Product,
    pub author: String,
}

impl Book {
    pub fn new(id: i32, name: &str, price: i32, author: &str) -> Self {
        Self {
            product: Product::new(id, name, price),
            author: author.to_string(),
        }
    }
}

impl HostObject for Book {
    fn type_name(&self) -> &str {
        "shop::Book"
    }

    fn supertypes(&self) -> &[&str] {
        &["shop::Product", "shop::Named"]
    }

    fn read_field(&self, name: &str) -> Option<Value> {
        self.product.field(name)
    }

    fn invoke(&self, method: &str, args: Vec<Value>) -> Invocation {
        if method == "getAuthor" && args.is_empty() {
            return Invocation::ready(self.author.clone());
        }
        self.product.call(method, args)
    }
}

/// A subtype of `shop::Book` defined by the application, absent from the
/// type index.
#[derive(Debug, Clone)]
pub struct SpecialBook {
    pub book: Book,
    pub edition: i32,
}

impl SpecialBook {
    pub fn new(book: Book, edition: i32) -> Self {
        Self { book, edition }
    }
}

impl HostObject for SpecialBook {
    fn type_name(&self) -> &str {
        "app::SpecialBook"
    }

    fn supertypes(&self) -> &[&str] {
        &["shop::Book", "shop::Product", "shop::Named"]
    }

    fn read_field(&self, name: &str) -> Option<Value> {
        match name {
            "edition" => Some(Value::Int(self.edition)),
            _ => self.book.read_field(name),
        }
    }

    fn invoke(&self, method: &str, args: Vec<Value>) -> Invocation {
        self.book.invoke(method, args)
    }
}

/// A plain `shop::Named`.
#[derive(Debug, Clone)]
pub struct Label {
    pub id: i32,
    pub name: String,
}

impl HostObject for Label {
    fn type_name(&self) -> &str {
        "shop::Named"
    }

    fn read_field(&self, name: &str) -> Option<Value> {
        (name == "id").then(|| Value::Int(self.id))
    }

    fn invoke(&self, method: &str, args: Vec<Value>) -> Invocation {
        match (method, args.as_slice()) {
            ("getName", []) => Invocation::ready(self.name.clone()),
            _ => Invocation::Missing,
        }
    }
}
