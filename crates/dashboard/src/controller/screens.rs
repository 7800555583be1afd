//! Concrete screen fetchers and the bundle the app state carries.

use shopdeck_core::{Customer, Order, Page, Product};

use crate::backend::{BackendClient, BackendError};
use crate::cache::QueryCache;

use super::{Filters, ListController, PageFetcher};

/// Fetches product pages, honoring the `category` filter.
pub struct ProductsScreen {
    backend: BackendClient,
}

impl PageFetcher for ProductsScreen {
    type Item = Product;

    fn resource(&self) -> &'static str {
        "products"
    }

    async fn fetch(
        &self,
        page: u32,
        size: u32,
        filters: &Filters,
    ) -> Result<Page<Product>, BackendError> {
        let category = filters.get("category").map(String::as_str);
        self.backend.list_products(page, size, category).await
    }
}

pub struct OrdersScreen {
    backend: BackendClient,
}

impl PageFetcher for OrdersScreen {
    type Item = Order;

    fn resource(&self) -> &'static str {
        "orders"
    }

    async fn fetch(
        &self,
        page: u32,
        size: u32,
        _filters: &Filters,
    ) -> Result<Page<Order>, BackendError> {
        self.backend.list_orders(page, size).await
    }
}

pub struct CustomersScreen {
    backend: BackendClient,
}

impl PageFetcher for CustomersScreen {
    type Item = Customer;

    fn resource(&self) -> &'static str {
        "customers"
    }

    async fn fetch(
        &self,
        page: u32,
        size: u32,
        _filters: &Filters,
    ) -> Result<Page<Customer>, BackendError> {
        self.backend.list_customers(page, size).await
    }
}

/// The list controllers for every dashboard screen.
///
/// All three share the one cache, so an invalidation published by any
/// mutation reaches the screen it concerns.
#[derive(Clone)]
pub struct Screens {
    products: ListController<ProductsScreen>,
    orders: ListController<OrdersScreen>,
    customers: ListController<CustomersScreen>,
}

impl Screens {
    #[must_use]
    pub fn new(backend: BackendClient, cache: QueryCache, page_size: u32) -> Self {
        Self {
            products: ListController::new(
                ProductsScreen {
                    backend: backend.clone(),
                },
                cache.clone(),
                page_size,
            ),
            orders: ListController::new(
                OrdersScreen {
                    backend: backend.clone(),
                },
                cache.clone(),
                page_size,
            ),
            customers: ListController::new(
                CustomersScreen { backend },
                cache,
                page_size,
            ),
        }
    }

    #[must_use]
    pub fn products(&self) -> &ListController<ProductsScreen> {
        &self.products
    }

    #[must_use]
    pub fn orders(&self) -> &ListController<OrdersScreen> {
        &self.orders
    }

    #[must_use]
    pub fn customers(&self) -> &ListController<CustomersScreen> {
        &self.customers
    }

    /// Spawn the invalidation watchers for every screen. Call once at
    /// startup, after a runtime exists.
    pub fn watch(&self) -> Vec<tokio::task::JoinHandle<()>> {
        vec![
            self.products.spawn_invalidation_watcher(),
            self.orders.spawn_invalidation_watcher(),
            self.customers.spawn_invalidation_watcher(),
        ]
    }
}
