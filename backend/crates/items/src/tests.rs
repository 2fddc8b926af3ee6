//! Use-case and router tests over an in-memory store
//!
//! `MemoryTx` works on a copy of the state and writes it back on commit, so
//! a failed use case leaves the shared state as it was.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use auth::{AuthResult, GrantOutcome, ShopAccessRepository, TokenService, UserRole};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use kernel::id::{ItemId, ShopId, UserId};
use platform::token::TokenKeys;
use tower::ServiceExt;

use crate::application::{
    CartUseCase, CatalogUseCase, ConfirmPurchaseUseCase, IntakeOutcome, ReceiveShipmentInput,
    ReceiveShipmentUseCase, SalesReportUseCase, ShopStockUseCase,
};
use crate::domain::entity::cart::CartLine;
use crate::domain::entity::item::{Item, ItemSummary};
use crate::domain::entity::sale::{Sale, SalesDay};
use crate::domain::entity::stock::{QueuedShipment, Shipment, ShopStockEntry, StockLine};
use crate::domain::repository::{
    DeleteOutcome, ItemRepository, ItemStore, StockTransaction,
};
use crate::domain::services::SalesPage;
use crate::error::{ItemError, ItemResult};
use crate::presentation::router::items_router_generic;

const PRIVATE_PEM: &[u8] = include_bytes!("../../platform/testdata/jwt_private.pem");
const PUBLIC_PEM: &[u8] = include_bytes!("../../platform/testdata/jwt_public.pem");

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Clone, Default)]
struct State {
    items: BTreeMap<ItemId, Item>,
    stock: BTreeMap<(ItemId, ShopId), StockLine>,
    queue: BTreeMap<i64, QueuedShipment>,
    next_queue_id: i64,
    carts: BTreeMap<(ShopId, UserId, ItemId), i32>,
    sales: Vec<Sale>,
}

#[derive(Clone, Default)]
struct MemoryStore {
    state: Arc<Mutex<State>>,
    grants: Arc<Mutex<HashSet<(UserId, ShopId)>>>,
}

impl MemoryStore {
    fn snapshot(&self) -> State {
        self.state.lock().unwrap().clone()
    }

    fn grant(&self, user_id: UserId, shop_id: ShopId) {
        self.grants.lock().unwrap().insert((user_id, shop_id));
    }

    fn stock_of(&self, item_id: ItemId, shop_id: ShopId) -> Option<StockLine> {
        self.snapshot().stock.get(&(item_id, shop_id)).cloned()
    }

    fn cart_of(&self, shop_id: ShopId, user_id: UserId) -> Vec<(ItemId, i32)> {
        self.snapshot()
            .carts
            .iter()
            .filter(|((s, u, _), _)| *s == shop_id && *u == user_id)
            .map(|((_, _, i), q)| (*i, *q))
            .collect()
    }
}

struct MemoryTx {
    shared: Arc<Mutex<State>>,
    working: State,
}

impl ItemStore for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> ItemResult<MemoryTx> {
        Ok(MemoryTx {
            shared: self.state.clone(),
            working: self.snapshot(),
        })
    }
}

impl StockTransaction for MemoryTx {
    async fn item_exists(&mut self, item_id: &ItemId) -> ItemResult<bool> {
        Ok(self.working.items.contains_key(item_id))
    }

    async fn lock_stock_line(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
    ) -> ItemResult<Option<StockLine>> {
        Ok(self.working.stock.get(&(*item_id, *shop_id)).cloned())
    }

    async fn insert_stock_line(&mut self, line: &StockLine) -> ItemResult<bool> {
        let key = (line.item_id, line.shop_id);
        if self.working.stock.contains_key(&key) {
            return Ok(false);
        }
        self.working.stock.insert(key, line.clone());
        Ok(true)
    }

    async fn save_stock_line(&mut self, line: &StockLine) -> ItemResult<()> {
        self.working
            .stock
            .insert((line.item_id, line.shop_id), line.clone());
        Ok(())
    }

    async fn enqueue(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
        shipment: &Shipment,
    ) -> ItemResult<i64> {
        self.working.next_queue_id += 1;
        let queue_id = self.working.next_queue_id;
        self.working.queue.insert(
            queue_id,
            QueuedShipment {
                queue_id,
                item_id: *item_id,
                shop_id: *shop_id,
                shipment: *shipment,
                created_at: Utc::now(),
            },
        );
        Ok(queue_id)
    }

    async fn oldest_queued(
        &mut self,
        item_id: &ItemId,
        shop_id: &ShopId,
    ) -> ItemResult<Option<QueuedShipment>> {
        Ok(self
            .working
            .queue
            .values()
            .find(|q| q.item_id == *item_id && q.shop_id == *shop_id)
            .cloned())
    }

    async fn remove_queued(&mut self, queue_id: i64) -> ItemResult<()> {
        self.working.queue.remove(&queue_id);
        Ok(())
    }

    async fn cart_line(
        &mut self,
        shop_id: &ShopId,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> ItemResult<Option<CartLine>> {
        Ok(self
            .working
            .carts
            .get(&(*shop_id, *user_id, *item_id))
            .map(|quantity| CartLine {
                shop_id: *shop_id,
                user_id: *user_id,
                item_id: *item_id,
                quantity: *quantity,
            }))
    }

    async fn cart_lines(
        &mut self,
        shop_id: &ShopId,
        user_id: &UserId,
    ) -> ItemResult<Vec<CartLine>> {
        Ok(self
            .working
            .carts
            .iter()
            .filter(|((s, u, _), _)| s == shop_id && u == user_id)
            .map(|((s, u, i), q)| CartLine {
                shop_id: *s,
                user_id: *u,
                item_id: *i,
                quantity: *q,
            })
            .collect())
    }

    async fn save_cart_line(&mut self, line: &CartLine) -> ItemResult<()> {
        self.working
            .carts
            .insert((line.shop_id, line.user_id, line.item_id), line.quantity);
        Ok(())
    }

    async fn delete_cart_line(
        &mut self,
        shop_id: &ShopId,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> ItemResult<()> {
        self.working.carts.remove(&(*shop_id, *user_id, *item_id));
        Ok(())
    }

    async fn clear_cart(&mut self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<()> {
        self.working
            .carts
            .retain(|(s, u, _), _| !(s == shop_id && u == user_id));
        Ok(())
    }

    async fn insert_sale(&mut self, sale: &Sale) -> ItemResult<()> {
        self.working.sales.push(sale.clone());
        Ok(())
    }

    async fn commit(self) -> ItemResult<()> {
        *self.shared.lock().unwrap() = self.working;
        Ok(())
    }
}

impl ItemRepository for MemoryStore {
    async fn create_item(&self, item: &Item) -> ItemResult<()> {
        self.state
            .lock()
            .unwrap()
            .items
            .insert(item.item_id, item.clone());
        Ok(())
    }

    async fn list_items(&self) -> ItemResult<Vec<ItemSummary>> {
        let state = self.snapshot();
        let mut items: Vec<&Item> = state.items.values().collect();
        items.sort_by_key(|i| i.created_at);

        Ok(items
            .into_iter()
            .map(|item| {
                let active: i64 = state
                    .stock
                    .values()
                    .filter(|s| s.item_id == item.item_id)
                    .map(|s| i64::from(s.quantity))
                    .sum();
                let queued: i64 = state
                    .queue
                    .values()
                    .filter(|q| q.item_id == item.item_id)
                    .map(|q| i64::from(q.shipment.quantity))
                    .sum();
                ItemSummary {
                    item_id: item.item_id,
                    name: item.name.clone(),
                    quantity: active + queued,
                }
            })
            .collect())
    }

    async fn delete_item(&self, item_id: &ItemId) -> ItemResult<DeleteOutcome> {
        let mut state = self.state.lock().unwrap();
        if !state.items.contains_key(item_id) {
            return Ok(DeleteOutcome::NotFound);
        }
        let referenced = state.stock.keys().any(|(i, _)| i == item_id)
            || state.sales.iter().any(|s| s.item_id == *item_id);
        if referenced {
            return Ok(DeleteOutcome::HasDependents);
        }
        state.items.remove(item_id);
        Ok(DeleteOutcome::Deleted)
    }

    async fn shop_stock(&self, shop_id: &ShopId) -> ItemResult<Vec<ShopStockEntry>> {
        let state = self.snapshot();
        let mut entries: Vec<ShopStockEntry> = state
            .stock
            .values()
            .filter(|s| s.shop_id == *shop_id)
            .map(|s| ShopStockEntry {
                item_id: s.item_id,
                name: state
                    .items
                    .get(&s.item_id)
                    .map(|i| i.name.clone())
                    .unwrap_or_default(),
                price: s.price,
                quantity: s.quantity,
                purchase_price: s.purchase_price,
                queued_quantity: state
                    .queue
                    .values()
                    .filter(|q| q.item_id == s.item_id && q.shop_id == *shop_id)
                    .map(|q| i64::from(q.shipment.quantity))
                    .sum(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn delete_stock_line(
        &self,
        item_id: &ItemId,
        shop_id: &ShopId,
    ) -> ItemResult<DeleteOutcome> {
        let mut state = self.state.lock().unwrap();
        let key = (*item_id, *shop_id);
        if !state.stock.contains_key(&key) {
            return Ok(DeleteOutcome::NotFound);
        }
        let referenced = state
            .queue
            .values()
            .any(|q| q.item_id == *item_id && q.shop_id == *shop_id)
            || state
                .carts
                .keys()
                .any(|(s, _, i)| s == shop_id && i == item_id);
        if referenced {
            return Ok(DeleteOutcome::HasDependents);
        }
        state.stock.remove(&key);
        Ok(DeleteOutcome::Deleted)
    }

    async fn cart(&self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<Vec<CartLine>> {
        Ok(self
            .cart_of(*shop_id, *user_id)
            .into_iter()
            .map(|(item_id, quantity)| CartLine {
                shop_id: *shop_id,
                user_id: *user_id,
                item_id,
                quantity,
            })
            .collect())
    }

    async fn clear_cart(&self, shop_id: &ShopId, user_id: &UserId) -> ItemResult<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.carts.len();
        state
            .carts
            .retain(|(s, u, _), _| !(s == shop_id && u == user_id));
        Ok((before - state.carts.len()) as u64)
    }

    async fn sales_by_day(&self, page: SalesPage) -> ItemResult<Vec<SalesDay>> {
        let state = self.snapshot();
        let mut days: BTreeMap<chrono::NaiveDate, (i64, i64)> = BTreeMap::new();
        for sale in &state.sales {
            let entry = days.entry(sale.created_at.date_naive()).or_default();
            entry.0 += 1;
            entry.1 += sale.income;
        }

        Ok(days
            .into_iter()
            .rev()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(|(date, (count, income))| SalesDay {
                date,
                count,
                income,
            })
            .collect())
    }
}

impl ShopAccessRepository for MemoryStore {
    async fn has_access(&self, user_id: &UserId, shop_id: &ShopId) -> AuthResult<bool> {
        Ok(self.grants.lock().unwrap().contains(&(*user_id, *shop_id)))
    }

    async fn shop_ids_for(&self, user_id: &UserId) -> AuthResult<Vec<ShopId>> {
        Ok(self
            .grants
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == user_id)
            .map(|(_, s)| *s)
            .collect())
    }

    async fn grant(&self, shop_id: &ShopId, user_id: &UserId) -> AuthResult<GrantOutcome> {
        if self.grants.lock().unwrap().insert((*user_id, *shop_id)) {
            Ok(GrantOutcome::Granted)
        } else {
            Ok(GrantOutcome::AlreadyGranted)
        }
    }

    async fn revoke(&self, shop_id: &ShopId, user_id: &UserId) -> AuthResult<bool> {
        Ok(self.grants.lock().unwrap().remove(&(*user_id, *shop_id)))
    }
}

// ============================================================================
// Helpers
// ============================================================================

async fn new_item(store: &MemoryStore, name: &str) -> ItemId {
    CatalogUseCase::new(Arc::new(store.clone()))
        .create(name.to_string())
        .await
        .unwrap()
}

async fn receive(
    store: &MemoryStore,
    shop_id: ShopId,
    item_id: ItemId,
    price: i32,
    quantity: i32,
    purchase_price: i32,
) -> ItemResult<IntakeOutcome> {
    ReceiveShipmentUseCase::new(Arc::new(store.clone()))
        .execute(
            shop_id,
            ReceiveShipmentInput {
                item_id,
                price,
                quantity,
                purchase_price,
            },
        )
        .await
}

fn cart(store: &MemoryStore) -> CartUseCase<MemoryStore> {
    CartUseCase::new(Arc::new(store.clone()))
}

fn confirm(store: &MemoryStore) -> ConfirmPurchaseUseCase<MemoryStore> {
    ConfirmPurchaseUseCase::new(Arc::new(store.clone()))
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_quantity_sums_active_and_queued() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_a = ShopId::new();
    let shop_b = ShopId::new();

    receive(&store, shop_a, item_id, 100, 3, 60).await.unwrap();
    receive(&store, shop_a, item_id, 110, 5, 65).await.unwrap();
    receive(&store, shop_b, item_id, 90, 2, 50).await.unwrap();

    let items = CatalogUseCase::new(Arc::new(store.clone()))
        .list()
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Milk");
    assert_eq!(items[0].quantity, 10);
}

#[tokio::test]
async fn test_delete_item() {
    let store = MemoryStore::default();
    let catalog = CatalogUseCase::new(Arc::new(store.clone()));
    let unused = new_item(&store, "Bread").await;
    let stocked = new_item(&store, "Milk").await;
    receive(&store, ShopId::new(), stocked, 100, 3, 60)
        .await
        .unwrap();

    catalog.delete(unused).await.unwrap();

    assert!(matches!(
        catalog.delete(unused).await,
        Err(ItemError::ItemNotFound)
    ));
    assert!(matches!(
        catalog.delete(stocked).await,
        Err(ItemError::HasDependents)
    ));
    assert_eq!(catalog.list().await.unwrap().len(), 1);
}

// ============================================================================
// Intake
// ============================================================================

#[tokio::test]
async fn test_second_shipment_is_queued() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_id = ShopId::new();

    let first = receive(&store, shop_id, item_id, 100, 3, 60).await.unwrap();
    let second = receive(&store, shop_id, item_id, 110, 5, 65).await.unwrap();
    let third = receive(&store, shop_id, item_id, 120, 7, 70).await.unwrap();

    assert_eq!(first, IntakeOutcome::Stocked);
    assert!(matches!(second, IntakeOutcome::Queued { .. }));
    assert!(matches!(third, IntakeOutcome::Queued { .. }));

    // The active line keeps the first shipment's values.
    let line = store.stock_of(item_id, shop_id).unwrap();
    assert_eq!((line.price, line.quantity, line.purchase_price), (100, 3, 60));

    let entries = ShopStockUseCase::new(Arc::new(store.clone()))
        .list(shop_id)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].queued_quantity, 12);
}

#[tokio::test]
async fn test_intake_rejects_bad_input() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_id = ShopId::new();

    assert!(matches!(
        receive(&store, shop_id, ItemId::new(), 100, 3, 60).await,
        Err(ItemError::ItemNotFound)
    ));
    assert!(matches!(
        receive(&store, shop_id, item_id, 100, 0, 60).await,
        Err(ItemError::Validation(_))
    ));
    assert!(store.stock_of(item_id, shop_id).is_none());
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_cannot_exceed_active_stock() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_id = ShopId::new();
    let user_id = UserId::new();
    receive(&store, shop_id, item_id, 100, 10, 60).await.unwrap();
    // Queued units do not count towards what can be reserved.
    receive(&store, shop_id, item_id, 100, 50, 60).await.unwrap();

    assert_eq!(cart(&store).add(shop_id, user_id, item_id, 4).await.unwrap(), 4);

    assert!(matches!(
        cart(&store).add(shop_id, user_id, item_id, 7).await,
        Err(ItemError::ExceedsAvailable)
    ));
    assert_eq!(store.cart_of(shop_id, user_id), vec![(item_id, 4)]);

    assert_eq!(cart(&store).add(shop_id, user_id, item_id, 6).await.unwrap(), 10);
}

#[tokio::test]
async fn test_cart_requires_stock_line() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;

    let result = cart(&store)
        .add(ShopId::new(), UserId::new(), item_id, 1)
        .await;

    assert!(matches!(result, Err(ItemError::StockLineNotFound)));
}

#[tokio::test]
async fn test_cart_remove() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_id = ShopId::new();
    let user_id = UserId::new();
    receive(&store, shop_id, item_id, 100, 10, 60).await.unwrap();
    cart(&store).add(shop_id, user_id, item_id, 5).await.unwrap();

    assert_eq!(
        cart(&store).remove(shop_id, user_id, item_id, 2).await.unwrap(),
        Some(3)
    );
    assert_eq!(
        cart(&store).remove(shop_id, user_id, item_id, 9).await.unwrap(),
        None
    );
    assert!(store.cart_of(shop_id, user_id).is_empty());

    assert!(matches!(
        cart(&store).remove(shop_id, user_id, item_id, 1).await,
        Err(ItemError::CartLineNotFound)
    ));
}

#[tokio::test]
async fn test_carts_are_per_user_and_shop() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_a = ShopId::new();
    let shop_b = ShopId::new();
    let alice = UserId::new();
    let bob = UserId::new();
    receive(&store, shop_a, item_id, 100, 10, 60).await.unwrap();
    receive(&store, shop_b, item_id, 100, 10, 60).await.unwrap();

    cart(&store).add(shop_a, alice, item_id, 10).await.unwrap();
    cart(&store).add(shop_a, bob, item_id, 10).await.unwrap();
    cart(&store).add(shop_b, alice, item_id, 1).await.unwrap();

    assert_eq!(store.cart_of(shop_a, alice), vec![(item_id, 10)]);
    assert_eq!(store.cart_of(shop_a, bob), vec![(item_id, 10)]);
    assert_eq!(store.cart_of(shop_b, alice), vec![(item_id, 1)]);
}

// ============================================================================
// Confirm purchase
// ============================================================================

#[tokio::test]
async fn test_confirm_promotes_queued_shipment() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_id = ShopId::new();
    let user_id = UserId::new();
    receive(&store, shop_id, item_id, 100, 3, 60).await.unwrap();
    receive(&store, shop_id, item_id, 120, 5, 70).await.unwrap();
    cart(&store).add(shop_id, user_id, item_id, 3).await.unwrap();

    let receipt = confirm(&store).execute(shop_id, user_id).await.unwrap();

    assert_eq!(receipt.sales.len(), 1);
    assert_eq!(receipt.promoted.len(), 1);
    let sale = &receipt.sales[0];
    assert_eq!((sale.price, sale.quantity, sale.income), (100, 3, 120));
    assert_eq!(receipt.income(), 120);

    let line = store.stock_of(item_id, shop_id).unwrap();
    assert_eq!((line.price, line.quantity, line.purchase_price), (120, 5, 70));

    let state = store.snapshot();
    assert!(state.queue.is_empty());
    assert!(state.carts.is_empty());
    assert_eq!(state.sales.len(), 1);
}

#[tokio::test]
async fn test_confirm_keeps_depleted_line_without_queue() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_id = ShopId::new();
    let user_id = UserId::new();
    receive(&store, shop_id, item_id, 100, 2, 60).await.unwrap();
    cart(&store).add(shop_id, user_id, item_id, 2).await.unwrap();

    let receipt = confirm(&store).execute(shop_id, user_id).await.unwrap();

    assert!(receipt.promoted.is_empty());
    assert_eq!(store.stock_of(item_id, shop_id).unwrap().quantity, 0);
}

#[tokio::test]
async fn test_restock_after_sell_out() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_id = ShopId::new();
    let user_id = UserId::new();
    receive(&store, shop_id, item_id, 100, 3, 60).await.unwrap();
    cart(&store).add(shop_id, user_id, item_id, 3).await.unwrap();
    confirm(&store).execute(shop_id, user_id).await.unwrap();

    let outcome = receive(&store, shop_id, item_id, 110, 5, 65).await.unwrap();

    assert_eq!(outcome, IntakeOutcome::Stocked);
    let line = store.stock_of(item_id, shop_id).unwrap();
    assert_eq!((line.price, line.quantity, line.purchase_price), (110, 5, 65));
    assert!(store.snapshot().queue.is_empty());

    cart(&store).add(shop_id, user_id, item_id, 1).await.unwrap();
    assert_eq!(store.cart_of(shop_id, user_id).len(), 1);

    // The refilled line is active again, so the next shipment queues.
    let next = receive(&store, shop_id, item_id, 120, 2, 70).await.unwrap();
    assert!(matches!(next, IntakeOutcome::Queued { .. }));
}

#[tokio::test]
async fn test_confirm_partial_sale_does_not_promote() {
    let store = MemoryStore::default();
    let item_id = new_item(&store, "Milk").await;
    let shop_id = ShopId::new();
    let user_id = UserId::new();
    receive(&store, shop_id, item_id, 100, 5, 60).await.unwrap();
    receive(&store, shop_id, item_id, 120, 5, 70).await.unwrap();
    cart(&store).add(shop_id, user_id, item_id, 4).await.unwrap();

    confirm(&store).execute(shop_id, user_id).await.unwrap();

    let line = store.stock_of(item_id, shop_id).unwrap();
    assert_eq!((line.price, line.quantity), (100, 1));
    assert_eq!(store.snapshot().queue.len(), 1);
}

#[tokio::test]
async fn test_confirm_empty_cart() {
    let store = MemoryStore::default();

    let result = confirm(&store).execute(ShopId::new(), UserId::new()).await;

    assert!(matches!(result, Err(ItemError::CartEmpty)));
}

#[tokio::test]
async fn test_confirm_insufficient_stock_changes_nothing() {
    let store = MemoryStore::default();
    let milk = new_item(&store, "Milk").await;
    let bread = new_item(&store, "Bread").await;
    let shop_id = ShopId::new();
    let alice = UserId::new();
    let bob = UserId::new();
    receive(&store, shop_id, milk, 100, 5, 60).await.unwrap();
    receive(&store, shop_id, bread, 40, 3, 20).await.unwrap();

    cart(&store).add(shop_id, alice, milk, 2).await.unwrap();
    cart(&store).add(shop_id, alice, bread, 3).await.unwrap();
    cart(&store).add(shop_id, bob, bread, 2).await.unwrap();
    confirm(&store).execute(shop_id, bob).await.unwrap();

    let result = confirm(&store).execute(shop_id, alice).await;

    assert!(matches!(result, Err(ItemError::InsufficientStock)));
    assert_eq!(store.stock_of(milk, shop_id).unwrap().quantity, 5);
    assert_eq!(store.stock_of(bread, shop_id).unwrap().quantity, 1);
    assert_eq!(store.cart_of(shop_id, alice).len(), 2);
    assert_eq!(store.snapshot().sales.len(), 1);
}

// ============================================================================
// Shop stock and sales
// ============================================================================

#[tokio::test]
async fn test_delete_stock_line() {
    let store = MemoryStore::default();
    let shop_stock = ShopStockUseCase::new(Arc::new(store.clone()));
    let milk = new_item(&store, "Milk").await;
    let bread = new_item(&store, "Bread").await;
    let shop_id = ShopId::new();
    receive(&store, shop_id, milk, 100, 5, 60).await.unwrap();
    receive(&store, shop_id, bread, 40, 3, 20).await.unwrap();
    receive(&store, shop_id, bread, 40, 3, 20).await.unwrap();

    shop_stock.delete(shop_id, milk).await.unwrap();

    assert!(matches!(
        shop_stock.delete(shop_id, milk).await,
        Err(ItemError::StockLineNotFound)
    ));
    assert!(matches!(
        shop_stock.delete(shop_id, bread).await,
        Err(ItemError::HasDependents)
    ));
    assert_eq!(shop_stock.list(shop_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sales_report_pages_newest_first() {
    let store = MemoryStore::default();
    let line = StockLine {
        item_id: ItemId::new(),
        shop_id: ShopId::new(),
        price: 100,
        quantity: 10,
        purchase_price: 60,
    };
    {
        let mut state = store.state.lock().unwrap();
        for days_ago in [0, 0, 1, 3] {
            let mut sale = Sale::record(&line, UserId::new(), 2);
            sale.created_at = Utc::now() - Duration::days(days_ago);
            state.sales.push(sale);
        }
    }
    let report = SalesReportUseCase::new(Arc::new(store.clone()));

    let days = report.execute(None, None).await.unwrap();
    assert_eq!(days.len(), 3);
    assert!(days[0].date > days[1].date);
    assert_eq!((days[0].count, days[0].income), (2, 160));

    let days = report.execute(Some(1), Some(1)).await.unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].count, 1);

    assert!(matches!(
        report.execute(None, Some(32)).await,
        Err(ItemError::Validation(_))
    ));
    assert!(matches!(
        report.execute(Some(-1), None).await,
        Err(ItemError::Validation(_))
    ));
}

// ============================================================================
// Router
// ============================================================================

fn tokens() -> Arc<TokenService> {
    let keys = TokenKeys::from_rsa_pem(PRIVATE_PEM, PUBLIC_PEM).unwrap();
    Arc::new(TokenService::new(keys, 12 * 3600))
}

fn router(store: &MemoryStore, tokens: Arc<TokenService>) -> Router {
    Router::new().nest(
        "/items",
        items_router_generic(store.clone(), store.clone(), tokens),
    )
}

fn request(method: &str, uri: &str, token: &str, body: Option<String>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_catalog_routes_require_admin() {
    let store = MemoryStore::default();
    let tokens = tokens();
    let worker = tokens.issue(UserId::new(), UserRole::Worker).unwrap().token;
    let admin = tokens.issue(UserId::new(), UserRole::Admin).unwrap().token;
    let body = Some(r#"{"name":"Milk"}"#.to_string());

    let response = router(&store, tokens.clone())
        .oneshot(request("POST", "/items", &worker, body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = router(&store, tokens.clone())
        .oneshot(request("POST", "/items", &admin, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let item_id = body_json(response).await["item_id"].clone();

    let response = router(&store, tokens.clone())
        .oneshot(request("GET", "/items/list", &admin, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["item_id"], item_id);
    assert_eq!(json[0]["quantity"], 0);

    let response = router(&store, tokens)
        .oneshot(request("GET", "/items/sold", &admin, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_token() {
    let store = MemoryStore::default();

    let response = router(&store, tokens())
        .oneshot(
            Request::builder()
                .uri("/items/list")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_shop_routes_check_grant() {
    let store = MemoryStore::default();
    let tokens = tokens();
    let user_id = UserId::new();
    let shop_id = ShopId::new();
    let token = tokens.issue(user_id, UserRole::Worker).unwrap().token;

    let response = router(&store, tokens.clone())
        .oneshot(request("GET", "/items/shop", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let uri = format!("/items/shop?shop_id={}", shop_id);
    let response = router(&store, tokens.clone())
        .oneshot(request("GET", &uri, &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    store.grant(user_id, shop_id);
    let response = router(&store, tokens)
        .oneshot(request("GET", &uri, &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_shop_flow_routes() {
    let store = MemoryStore::default();
    let tokens = tokens();
    let item_id = new_item(&store, "Milk").await;
    let user_id = UserId::new();
    let shop_id = ShopId::new();
    store.grant(user_id, shop_id);
    let token = tokens.issue(user_id, UserRole::Worker).unwrap().token;
    let shipment = format!(
        r#"{{"item_id":"{}","price":100,"quantity":3,"purchase_price":60}}"#,
        item_id
    );
    let queue_uri = format!("/items/shop/queue?shop_id={}", shop_id);
    let cart_uri = format!("/items/cart?shop_id={}", shop_id);

    let response = router(&store, tokens.clone())
        .oneshot(request("POST", &queue_uri, &token, Some(shipment.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["detail"], "item added to shop");

    let response = router(&store, tokens.clone())
        .oneshot(request("POST", &queue_uri, &token, Some(shipment)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(response).await["detail"], "item added to shop queue");

    let add = format!(r#"{{"item_id":"{}","quantity":3}}"#, item_id);
    let response = router(&store, tokens.clone())
        .oneshot(request("POST", &cart_uri, &token, Some(add)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router(&store, tokens.clone())
        .oneshot(request("GET", &cart_uri, &token, None))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json[0]["quantity"], 3);

    let confirm_uri = format!("/items/cart/confirmm?shop_id={}", shop_id);
    let response = router(&store, tokens.clone())
        .oneshot(request("POST", &confirm_uri, &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["detail"], "purchase been confirmed");

    let response = router(&store, tokens.clone())
        .oneshot(request("POST", &confirm_uri, &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["detail"],
        "The shopping cart is empty."
    );

    let response = router(&store, tokens)
        .oneshot(request(
            "GET",
            &format!("/items/shop?shop_id={}", shop_id),
            &token,
            None,
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json[0]["price"], 100);
    assert_eq!(json[0]["quantity"], 3);
    assert_eq!(json[0]["queued_quantity"], 0);
}

#[tokio::test]
async fn test_restock_route_after_sell_out() {
    let store = MemoryStore::default();
    let tokens = tokens();
    let item_id = new_item(&store, "Milk").await;
    let user_id = UserId::new();
    let shop_id = ShopId::new();
    store.grant(user_id, shop_id);
    let token = tokens.issue(user_id, UserRole::Worker).unwrap().token;
    receive(&store, shop_id, item_id, 100, 2, 60).await.unwrap();
    cart(&store).add(shop_id, user_id, item_id, 2).await.unwrap();
    confirm(&store).execute(shop_id, user_id).await.unwrap();

    let shipment = format!(
        r#"{{"item_id":"{}","price":90,"quantity":4,"purchase_price":50}}"#,
        item_id
    );
    let response = router(&store, tokens.clone())
        .oneshot(request(
            "POST",
            &format!("/items/shop/queue?shop_id={}", shop_id),
            &token,
            Some(shipment),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["detail"], "item added to shop");

    let add = format!(r#"{{"item_id":"{}","quantity":4}}"#, item_id);
    let response = router(&store, tokens)
        .oneshot(request(
            "POST",
            &format!("/items/cart?shop_id={}", shop_id),
            &token,
            Some(add),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_clear_cart_route() {
    let store = MemoryStore::default();
    let tokens = tokens();
    let item_id = new_item(&store, "Milk").await;
    let user_id = UserId::new();
    let shop_id = ShopId::new();
    store.grant(user_id, shop_id);
    receive(&store, shop_id, item_id, 100, 3, 60).await.unwrap();
    cart(&store).add(shop_id, user_id, item_id, 2).await.unwrap();
    let token = tokens.issue(user_id, UserRole::Worker).unwrap().token;

    let response = router(&store, tokens)
        .oneshot(request(
            "DELETE",
            &format!("/items/cart/all?shop_id={}", shop_id),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["detail"], "cleaned cart");
    assert!(store.cart_of(shop_id, user_id).is_empty());
}
