//! In-memory repositories
//!
//! `MemoryStore` implements every repository trait over plain maps behind a
//! mutex. It enforces the same constraints as the PostgreSQL schema: links to
//! unknown rows are rejected, referenced categories and roles cannot be
//! deleted, and user e-mails are unique. Used by service and router tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use catalog_common::PasswordService;
use catalog_core::entities::{Category, Product, Role, User};
use catalog_core::traits::{
    CategoryRepository, ProductRepository, RepoResult, RoleRepository, UserRepository,
};
use catalog_core::value_objects::{EntityId, Page, PageRequest, ReferenceSet};
use catalog_core::DomainError;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use crate::services::ServiceContext;

/// Products inserted by `MemoryStore::seeded`, in id order
const SEED_PRODUCTS: &[(&str, &str, f64)] = &[
    ("The Lord of the Rings", "Fantasy novel in three volumes.", 90.5),
    ("Smart TV", "Full HD television with streaming apps.", 2190.0),
    ("Macbook Pro", "Laptop with 16GB of memory.", 1250.0),
    ("PC Gamer", "Desktop with a dedicated graphics card.", 1200.0),
    ("Rails for Dummies", "Introductory web development book.", 100.99),
    ("PC Gamer Ex", "Desktop with liquid cooling.", 1350.0),
    ("PC Gamer X", "Desktop with a mechanical keyboard.", 1350.0),
    ("PC Gamer Alfa", "Desktop with a curved monitor.", 1850.0),
    ("PC Gamer Tera", "Desktop with two terabytes of storage.", 1950.0),
    ("PC Gamer Y", "Desktop with a silent power supply.", 1700.0),
    ("PC Gamer Nitro", "Desktop tuned for esports.", 1450.0),
    ("PC Gamer Card", "Desktop with a streaming capture card.", 1850.0),
    ("PC Gamer Plus", "Desktop with extra memory.", 1350.0),
    ("PC Gamer Hera", "Desktop in a compact case.", 2250.0),
    ("PC Gamer Weed", "Desktop with RGB lighting.", 2200.99),
    ("PC Gamer Max", "Desktop with a high refresh monitor.", 2340.0),
    ("PC Gamer Turbo", "Desktop with an overclocked processor.", 1280.0),
    ("PC Gamer Hot", "Desktop with a glass side panel.", 1450.0),
    ("PC Gamer Ez", "Desktop preinstalled with games.", 1750.0),
    ("PC Gamer Tr", "Desktop with a wireless headset.", 1650.0),
    ("PC Gamer Tx", "Desktop with a six core processor.", 1680.0),
    ("PC Gamer Er", "Desktop with a solid state drive.", 1850.0),
    ("PC Gamer Min", "Entry level gaming desktop.", 2250.0),
    ("PC Gamer Boo", "Desktop bundle with mouse and pad.", 2350.0),
    ("PC Gamer Foo", "Desktop with a 4K monitor.", 4170.0),
];

const SEED_PRODUCT_CATEGORIES: &[(i64, i64)] = &[(1, 2), (2, 1), (2, 3), (3, 3), (4, 3), (5, 2)];

const SEED_USERS: &[(&str, &str, &str)] = &[
    ("Alex", "Brown", "alex@gmail.com"),
    ("Maria", "Green", "maria@gmail.com"),
    ("Bob", "Grey", "bob@gmail.com"),
    ("Ana", "White", "ana@gmail.com"),
    ("Nina", "Black", "nina@gmail.com"),
];

const SEED_USER_ROLES: &[(i64, i64)] = &[(1, 1), (2, 1), (2, 2), (3, 1), (4, 1), (5, 1), (5, 2)];

/// Value a page is ordered by
#[derive(PartialEq, PartialOrd)]
enum SortKey {
    Id(EntityId),
    Text(String),
    Number(f64),
    Instant(Option<DateTime<Utc>>),
}

#[derive(Default)]
struct Tables {
    categories: BTreeMap<EntityId, Category>,
    products: BTreeMap<EntityId, Product>,
    product_category: BTreeSet<(EntityId, EntityId)>,
    roles: BTreeMap<EntityId, Role>,
    users: BTreeMap<EntityId, User>,
    user_role: BTreeSet<(EntityId, EntityId)>,
    password_hashes: BTreeMap<EntityId, String>,
    last_category_id: i64,
    last_product_id: i64,
    last_user_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> EntityId {
        *counter += 1;
        EntityId::new(*counter)
    }

    fn categories_of(&self, product_id: EntityId) -> ReferenceSet<Category> {
        self.product_category
            .range((product_id, EntityId::new(i64::MIN))..=(product_id, EntityId::new(i64::MAX)))
            .filter_map(|(_, id)| self.categories.get(id).map(|c| (*id, c.clone())))
            .collect()
    }

    fn roles_of(&self, user_id: EntityId) -> ReferenceSet<Role> {
        self.user_role
            .range((user_id, EntityId::new(i64::MIN))..=(user_id, EntityId::new(i64::MAX)))
            .filter_map(|(_, id)| self.roles.get(id).map(|r| (*id, r.clone())))
            .collect()
    }

    fn load_product(&self, id: EntityId) -> Option<Product> {
        self.products.get(&id).map(|row| Product {
            categories: self.categories_of(id),
            ..row.clone()
        })
    }

    fn load_user(&self, id: EntityId) -> Option<User> {
        self.users.get(&id).map(|row| User {
            roles: self.roles_of(id),
            ..row.clone()
        })
    }

    fn check_categories_exist(&self, categories: &ReferenceSet<Category>) -> RepoResult<()> {
        match categories.ids().find(|id| !self.categories.contains_key(id)) {
            Some(id) => Err(DomainError::CategoryNotFound(id)),
            None => Ok(()),
        }
    }

    fn check_roles_exist(&self, roles: &ReferenceSet<Role>) -> RepoResult<()> {
        match roles.ids().find(|id| !self.roles.contains_key(id)) {
            Some(id) => Err(DomainError::RoleNotFound(id)),
            None => Ok(()),
        }
    }

    fn check_email_free(&self, email: &str, owner: Option<EntityId>) -> RepoResult<()> {
        let taken = self
            .users
            .iter()
            .any(|(id, user)| user.email == email && Some(*id) != owner);
        if taken {
            return Err(DomainError::IntegrityViolation(
                "E-mail is already in use".to_string(),
            ));
        }
        Ok(())
    }

    fn link_categories(&mut self, product_id: EntityId, categories: &ReferenceSet<Category>) {
        self.product_category.retain(|(pid, _)| *pid != product_id);
        self.product_category
            .extend(categories.ids().map(|cid| (product_id, cid)));
    }

    fn link_roles(&mut self, user_id: EntityId, roles: &ReferenceSet<Role>) {
        self.user_role.retain(|(uid, _)| *uid != user_id);
        self.user_role.extend(roles.ids().map(|rid| (user_id, rid)));
    }
}

/// Sort and slice rows the way the SQL repositories do
///
/// Rows must arrive in id order; the stable sort keeps that order for ties.
fn paginate<T>(
    mut rows: Vec<T>,
    request: &PageRequest,
    sortable: &[&str],
    key: impl Fn(&T, &str) -> SortKey,
) -> RepoResult<Page<T>> {
    request.ensure_sortable(sortable)?;

    rows.sort_by(|a, b| {
        request
            .sort()
            .iter()
            .map(|order| {
                let ordering = key(a, &order.property)
                    .partial_cmp(&key(b, &order.property))
                    .unwrap_or(std::cmp::Ordering::Equal);
                match order.direction {
                    catalog_core::Direction::Asc => ordering,
                    catalog_core::Direction::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total = rows.len() as u64;
    let content = rows
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .collect();
    Ok(Page::new(content, request.clone(), total))
}

fn id_key(id: Option<EntityId>) -> SortKey {
    SortKey::Id(id.unwrap_or(EntityId::new(0)))
}

/// In-memory implementation of every repository trait
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the same rows as the baseline migration
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut t = store.tables.lock();

            for name in ["Electronics", "Books", "Computers"] {
                let id = Tables::next_id(&mut t.last_category_id);
                t.categories.insert(id, Category::with_id(id, name));
            }

            for (index, (name, description, price)) in SEED_PRODUCTS.iter().enumerate() {
                let id = Tables::next_id(&mut t.last_product_id);
                let mut product = Product::new(*name, *description, *price);
                product.id = Some(id);
                product.image_url = Some(format!("https://img.example.com/{id}-big.jpg"));
                product.release_date = if index == 0 {
                    Utc.with_ymd_and_hms(2020, 7, 13, 20, 50, 7).single()
                } else {
                    Utc.with_ymd_and_hms(2020, 7, 14, 10, 0, 0).single()
                };
                t.products.insert(id, product);
            }
            let computers = EntityId::new(3);
            let links: Vec<(EntityId, EntityId)> = SEED_PRODUCT_CATEGORIES
                .iter()
                .map(|(p, c)| (EntityId::new(*p), EntityId::new(*c)))
                .chain((6..=25).map(|p| (EntityId::new(p), computers)))
                .collect();
            t.product_category.extend(links);

            for (id, authority) in [(1, "ROLE_OPERATOR"), (2, "ROLE_ADMIN")] {
                let id = EntityId::new(id);
                t.roles.insert(id, Role::with_id(id, authority));
            }

            for (first_name, last_name, email) in SEED_USERS {
                let id = Tables::next_id(&mut t.last_user_id);
                let mut user = User::new(*first_name, *last_name, *email);
                user.id = Some(id);
                t.users.insert(id, user);
                t.password_hashes.insert(id, "!".to_string());
            }
            t.user_role.extend(
                SEED_USER_ROLES
                    .iter()
                    .map(|(u, r)| (EntityId::new(*u), EntityId::new(*r))),
            );
        }
        store
    }

    /// Wire a service context with this store behind every repository
    pub fn context(store: Arc<Self>) -> ServiceContext {
        ServiceContext::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            Arc::new(PasswordService::new()),
        )
    }

    /// Number of stored products
    pub fn product_count(&self) -> usize {
        self.tables.lock().products.len()
    }

    /// Number of stored categories
    pub fn category_count(&self) -> usize {
        self.tables.lock().categories.len()
    }

    /// Stored product with its categories
    pub fn product(&self, id: EntityId) -> Option<Product> {
        self.tables.lock().load_product(id)
    }

    /// Stored user with their roles
    pub fn user(&self, id: EntityId) -> Option<User> {
        self.tables.lock().load_user(id)
    }
}

/// Seeded store plus a context over it
pub fn seeded_context() -> (Arc<MemoryStore>, ServiceContext) {
    let store = Arc::new(MemoryStore::seeded());
    let ctx = MemoryStore::context(store.clone());
    (store, ctx)
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<Category>> {
        let rows = self.tables.lock().categories.values().cloned().collect();
        paginate(rows, request, Category::SORTABLE, |c, property| match property {
            "name" => SortKey::Text(c.name.clone()),
            _ => id_key(c.id),
        })
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Category>> {
        Ok(self.tables.lock().categories.get(&id).cloned())
    }

    async fn insert(&self, category: &Category) -> RepoResult<Category> {
        let mut t = self.tables.lock();
        let id = Tables::next_id(&mut t.last_category_id);
        let created = Category::with_id(id, category.name.clone());
        t.categories.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, category: &Category) -> RepoResult<()> {
        let id = category.persisted_id()?;
        let mut t = self.tables.lock();
        match t.categories.get_mut(&id) {
            Some(row) => {
                row.name.clone_from(&category.name);
                Ok(())
            }
            None => Err(DomainError::CategoryNotFound(id)),
        }
    }

    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        let mut t = self.tables.lock();
        if !t.categories.contains_key(&id) {
            return Err(DomainError::CategoryNotFound(id));
        }
        if t.product_category.iter().any(|(_, cid)| *cid == id) {
            return Err(DomainError::IntegrityViolation(format!(
                "category {id} is still referenced by a product"
            )));
        }
        t.categories.remove(&id);
        Ok(())
    }
}

// ============================================================================
// Product Repository
// ============================================================================

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<Product>> {
        // Rows are stored without categories, like the SQL page query
        let rows = self.tables.lock().products.values().cloned().collect();
        paginate(rows, request, Product::SORTABLE, |p, property| match property {
            "name" => SortKey::Text(p.name.clone()),
            "price" => SortKey::Number(p.price),
            "releaseDate" => SortKey::Instant(p.release_date),
            _ => id_key(p.id),
        })
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Product>> {
        Ok(self.tables.lock().load_product(id))
    }

    async fn insert(&self, product: &Product) -> RepoResult<Product> {
        let mut t = self.tables.lock();
        t.check_categories_exist(&product.categories)?;

        let id = Tables::next_id(&mut t.last_product_id);
        let row = Product {
            id: Some(id),
            categories: ReferenceSet::new(),
            ..product.clone()
        };
        t.products.insert(id, row);
        t.link_categories(id, &product.categories);

        t.load_product(id)
            .ok_or_else(|| DomainError::InternalError(format!("product {id} vanished")))
    }

    async fn update(&self, product: &Product) -> RepoResult<()> {
        let id = product.persisted_id()?;
        let mut t = self.tables.lock();
        if !t.products.contains_key(&id) {
            return Err(DomainError::ProductNotFound(id));
        }
        t.check_categories_exist(&product.categories)?;

        let row = Product {
            categories: ReferenceSet::new(),
            ..product.clone()
        };
        t.products.insert(id, row);
        t.link_categories(id, &product.categories);
        Ok(())
    }

    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        let mut t = self.tables.lock();
        if t.products.remove(&id).is_none() {
            return Err(DomainError::ProductNotFound(id));
        }
        t.product_category.retain(|(pid, _)| *pid != id);
        Ok(())
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_page(&self, request: &PageRequest) -> RepoResult<Page<User>> {
        let rows = {
            let t = self.tables.lock();
            t.users.keys().filter_map(|id| t.load_user(*id)).collect()
        };
        paginate(rows, request, User::SORTABLE, |u, property| match property {
            "firstName" => SortKey::Text(u.first_name.clone()),
            "lastName" => SortKey::Text(u.last_name.clone()),
            "email" => SortKey::Text(u.email.clone()),
            _ => id_key(u.id),
        })
    }

    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().load_user(id))
    }

    async fn insert(&self, user: &User, password_hash: &str) -> RepoResult<User> {
        let mut t = self.tables.lock();
        t.check_email_free(&user.email, None)?;
        t.check_roles_exist(&user.roles)?;

        let id = Tables::next_id(&mut t.last_user_id);
        let row = User {
            id: Some(id),
            roles: ReferenceSet::new(),
            ..user.clone()
        };
        t.users.insert(id, row);
        t.password_hashes.insert(id, password_hash.to_string());
        t.link_roles(id, &user.roles);

        t.load_user(id)
            .ok_or_else(|| DomainError::InternalError(format!("user {id} vanished")))
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let id = user.persisted_id()?;
        let mut t = self.tables.lock();
        if !t.users.contains_key(&id) {
            return Err(DomainError::UserNotFound(id));
        }
        t.check_email_free(&user.email, Some(id))?;
        t.check_roles_exist(&user.roles)?;

        let row = User {
            roles: ReferenceSet::new(),
            ..user.clone()
        };
        t.users.insert(id, row);
        t.link_roles(id, &user.roles);
        Ok(())
    }

    async fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        let mut t = self.tables.lock();
        if t.users.remove(&id).is_none() {
            return Err(DomainError::UserNotFound(id));
        }
        t.password_hashes.remove(&id);
        t.user_role.retain(|(uid, _)| *uid != id);
        Ok(())
    }

    async fn get_password_hash(&self, id: EntityId) -> RepoResult<Option<String>> {
        Ok(self.tables.lock().password_hashes.get(&id).cloned())
    }
}

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Role>> {
        Ok(self.tables.lock().roles.get(&id).cloned())
    }
}
