// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog navigation: inline-keyboard menus and the callback protocol.
//!
//! Menus are driven by compact callback payloads (`shop_<id>`,
//! `category_<shop>_<cat>`, `product_<shop>_<prod>`, `order_<shop>_<prod>`)
//! decoded once into [`CallbackCommand`] at the edge. Every rendered menu
//! carries a navigational escape so a customer is never stranded on a dead
//! screen.

use std::sync::Arc;

use tracing::{info, warn};

use suntrade_config::SiteConfig;
use suntrade_core::error::SuntradeError;
use suntrade_core::traits::{CatalogStore, MessageGateway, OrderStore};
use suntrade_core::types::{
    CategoryId, ChatId, DeliveryMethod, InlineButton, InlineKeyboard, Order, OrderDraft,
    OrderItem, OrderSource, ParseMode, Product, ProductId, Shop, ShopId,
};

/// Stock threshold below which product buttons show a scarcity hint.
const LOW_STOCK_HINT: i64 = 10;

/// A decoded callback payload.
///
/// Identifiers are carried verbatim between underscores, so store ids must
/// not themselves contain `_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackCommand {
    ShopMenu(ShopId),
    CategoryProducts(ShopId, CategoryId),
    ProductDetails(ShopId, ProductId),
    PlaceOrder(ShopId, ProductId),
}

impl CallbackCommand {
    /// Decodes a raw callback payload. Unknown prefixes and malformed
    /// payloads return `None`; the caller ignores them.
    pub fn parse(data: &str) -> Option<Self> {
        let (prefix, rest) = data.split_once('_')?;
        match prefix {
            "shop" if !rest.is_empty() => Some(Self::ShopMenu(ShopId(rest.to_string()))),
            "category" => {
                let (shop, cat) = split_pair(rest)?;
                Some(Self::CategoryProducts(ShopId(shop), CategoryId(cat)))
            }
            "product" => {
                let (shop, prod) = split_pair(rest)?;
                Some(Self::ProductDetails(ShopId(shop), ProductId(prod)))
            }
            "order" => {
                let (shop, prod) = split_pair(rest)?;
                Some(Self::PlaceOrder(ShopId(shop), ProductId(prod)))
            }
            _ => None,
        }
    }

    /// Encodes the payload back to its wire form.
    pub fn encode(&self) -> String {
        match self {
            Self::ShopMenu(shop) => format!("shop_{}", shop.0),
            Self::CategoryProducts(shop, cat) => format!("category_{}_{}", shop.0, cat.0),
            Self::ProductDetails(shop, prod) => format!("product_{}_{}", shop.0, prod.0),
            Self::PlaceOrder(shop, prod) => format!("order_{}_{}", shop.0, prod.0),
        }
    }
}

fn split_pair(rest: &str) -> Option<(String, String)> {
    let (a, b) = rest.split_once('_')?;
    if a.is_empty() || b.is_empty() {
        return None;
    }
    Some((a.to_string(), b.to_string()))
}

/// The chat customer on whose behalf a menu or order is handled.
#[derive(Debug, Clone)]
pub struct CustomerRef {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl CustomerRef {
    /// Stable customer identifier: username when set, otherwise derived from
    /// the numeric id.
    pub fn customer_id(&self) -> String {
        self.username
            .clone()
            .unwrap_or_else(|| format!("user_{}", self.telegram_id))
    }

    /// Display name with the same fallback chain the staff sees in orders.
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| format!("User {}", self.telegram_id))
    }

    /// Contact tag staff use to reach the customer back on the platform.
    pub fn contact_tag(&self) -> String {
        format!("TG-{}", self.telegram_id)
    }
}

/// Renders catalog menus into a chat and places one-tap orders.
pub struct Navigator {
    gateway: Arc<dyn MessageGateway>,
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
    site: SiteConfig,
}

impl Navigator {
    pub fn new(
        gateway: Arc<dyn MessageGateway>,
        catalog: Arc<dyn CatalogStore>,
        orders: Arc<dyn OrderStore>,
        site: SiteConfig,
    ) -> Self {
        Self {
            gateway,
            catalog,
            orders,
            site,
        }
    }

    /// Dispatches one raw callback payload for a customer chat. Malformed
    /// payloads are ignored. The order placed by a `PlaceOrder` payload is
    /// returned so the caller can hand it to the notifier.
    pub async fn handle(
        &self,
        chat: &ChatId,
        customer: &CustomerRef,
        callback_data: &str,
    ) -> Result<Option<Order>, SuntradeError> {
        let Some(command) = CallbackCommand::parse(callback_data) else {
            warn!(callback_data, "ignoring unrecognized callback payload");
            return Ok(None);
        };

        match command {
            CallbackCommand::ShopMenu(shop) => {
                self.show_shop_menu(chat, &shop).await?;
                Ok(None)
            }
            CallbackCommand::CategoryProducts(shop, cat) => {
                self.show_category_products(chat, &shop, &cat).await?;
                Ok(None)
            }
            CallbackCommand::ProductDetails(shop, prod) => {
                self.show_product_details(chat, &shop, &prod).await?;
                Ok(None)
            }
            CallbackCommand::PlaceOrder(shop, prod) => {
                self.handle_order(chat, customer, &shop, &prod).await
            }
        }
    }

    /// Top-level shop menu: one button per category, sorted by display
    /// order, plus a refresh/website escape row.
    pub async fn show_shop_menu(
        &self,
        chat: &ChatId,
        shop_id: &ShopId,
    ) -> Result<(), SuntradeError> {
        let shop = self.require_shop(shop_id).await?;
        let mut categories = self.catalog.categories_for_shop(shop_id).await?;
        categories.sort_by_key(|c| c.order);

        let mut keyboard = InlineKeyboard::new();
        for category in &categories {
            let icon = category.icon.as_deref().unwrap_or("📦");
            let label = format!("{icon} {}", category.name);
            let payload =
                CallbackCommand::CategoryProducts(shop_id.clone(), category.id.clone()).encode();
            keyboard = keyboard.row(vec![InlineButton::callback(label, payload)]);
        }
        keyboard = keyboard.row(vec![
            InlineButton::callback(
                "🔄 Refresh",
                CallbackCommand::ShopMenu(shop_id.clone()).encode(),
            ),
            InlineButton::url("🌐 Visit Website", &self.site.shop_url),
        ]);

        let text = if categories.is_empty() {
            format!("🏪 <b>{}</b>\n\nNo categories available yet.", shop.name)
        } else {
            let description = shop.description.as_deref().unwrap_or_default();
            format!(
                "🏪 <b>{}</b>\n{description}\n\nChoose a category:",
                shop.name
            )
        };

        self.gateway
            .send_text_with_keyboard(chat, &text, ParseMode::Html, &keyboard)
            .await
    }

    /// Product listing for one category: available products only, one button
    /// each, with a back escape to the shop menu.
    pub async fn show_category_products(
        &self,
        chat: &ChatId,
        shop_id: &ShopId,
        category_id: &CategoryId,
    ) -> Result<(), SuntradeError> {
        let category = self
            .catalog
            .get_category(category_id)
            .await?
            .ok_or_else(|| SuntradeError::NotFound {
                kind: "category",
                id: category_id.0.clone(),
            })?;

        let products: Vec<Product> = self
            .catalog
            .products_in_category(shop_id, category_id)
            .await?
            .into_iter()
            .filter(Product::is_available)
            .collect();

        let mut keyboard = InlineKeyboard::new();
        for product in &products {
            let payload =
                CallbackCommand::ProductDetails(shop_id.clone(), product.id.clone()).encode();
            keyboard = keyboard.row(vec![InlineButton::callback(
                product_button_label(product),
                payload,
            )]);
        }
        keyboard = keyboard.row(vec![InlineButton::callback(
            "⬅️ Back",
            CallbackCommand::ShopMenu(shop_id.clone()).encode(),
        )]);

        let text = if products.is_empty() {
            format!(
                "📂 <b>{}</b>\n\nNo products available in this category right now.",
                category.name
            )
        } else {
            format!("📂 <b>{}</b>\n\nSelect a product:", category.name)
        };

        self.gateway
            .send_text_with_keyboard(chat, &text, ParseMode::Html, &keyboard)
            .await
    }

    /// Product detail card: photo with caption when the product has images,
    /// plain text otherwise. Order button included only while orderable.
    pub async fn show_product_details(
        &self,
        chat: &ChatId,
        shop_id: &ShopId,
        product_id: &ProductId,
    ) -> Result<(), SuntradeError> {
        let product = self.require_product(product_id).await?;

        let mut caption = format!(
            "🛍️ <b>{}</b>\n\n{}\n\n💰 Price: ${:.2}\n📦 Stock: {}",
            product.name, product.description, product.price, product.stock
        );
        if !product.is_available() {
            caption.push_str("\n\n❌ Currently unavailable");
        }

        let mut keyboard = InlineKeyboard::new();
        if product.is_available() {
            keyboard = keyboard.row(vec![InlineButton::callback(
                "🛒 Order Now",
                CallbackCommand::PlaceOrder(shop_id.clone(), product_id.clone()).encode(),
            )]);
        }
        keyboard = keyboard.row(vec![InlineButton::callback(
            "⬅️ Back",
            CallbackCommand::CategoryProducts(
                shop_id.clone(),
                CategoryId(product.category.clone()),
            )
            .encode(),
        )]);

        match product.images.first() {
            Some(image) => {
                self.gateway
                    .send_photo(chat, image, &caption, ParseMode::Html, Some(&keyboard))
                    .await
            }
            None => {
                self.gateway
                    .send_text_with_keyboard(chat, &caption, ParseMode::Html, &keyboard)
                    .await
            }
        }
    }

    /// Places a single-item order for the customer with chat defaults
    /// (pickup, cash) and sends the confirmation message. Fails with
    /// `NotFound` for a missing product and refuses unavailable ones.
    pub async fn place_order(
        &self,
        chat: &ChatId,
        customer: &CustomerRef,
        shop_id: &ShopId,
        product_id: &ProductId,
    ) -> Result<Order, SuntradeError> {
        let product = self.require_product(product_id).await?;
        if !product.is_available() {
            return Err(SuntradeError::Internal(format!(
                "product {} is not orderable",
                product.id.0
            )));
        }

        let draft = OrderDraft {
            shop_id: shop_id.clone(),
            customer_id: customer.customer_id(),
            customer_name: customer.display_name(),
            telegram_id: Some(customer.telegram_id.to_string()),
            telegram_username: customer.username.clone(),
            items: vec![OrderItem {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity: 1,
                unit_price: product.price,
                line_total: product.price,
            }],
            total: product.price,
            delivery_method: DeliveryMethod::Pickup,
            delivery_address: None,
            payment_preference: "cash".to_string(),
            customer_notes: None,
            contact_tag: customer.contact_tag(),
            source: OrderSource::Telegram,
        };

        let order_id = self.orders.create_order(draft.clone()).await?;
        info!(order_id = %order_id, customer = %draft.customer_id, "chat order placed");
        let order = Order::from_draft(order_id, draft, chrono::Utc::now());

        let confirmation = format!(
            "✅ <b>Order Request Sent!</b>\n\nOrder ID: <code>{}</code>\n{} x1 - ${:.2}\n\nOur team will contact you shortly to arrange payment and pickup.",
            order.id, product.name, product.price
        );
        let keyboard = InlineKeyboard::new().row(vec![InlineButton::callback(
            "⬅️ Back to Menu",
            CallbackCommand::ShopMenu(shop_id.clone()).encode(),
        )]);
        self.gateway
            .send_text_with_keyboard(chat, &confirmation, ParseMode::Html, &keyboard)
            .await?;

        Ok(order)
    }

    async fn handle_order(
        &self,
        chat: &ChatId,
        customer: &CustomerRef,
        shop_id: &ShopId,
        product_id: &ProductId,
    ) -> Result<Option<Order>, SuntradeError> {
        let product = self.require_product(product_id).await?;
        if !product.is_available() {
            self.gateway
                .send_text(
                    chat,
                    "😔 Sorry, this product is currently out of stock.",
                    ParseMode::Html,
                )
                .await?;
            return Ok(None);
        }

        let order = self.place_order(chat, customer, shop_id, product_id).await?;
        Ok(Some(order))
    }

    async fn require_shop(&self, id: &ShopId) -> Result<Shop, SuntradeError> {
        self.catalog
            .get_shop(id)
            .await?
            .ok_or_else(|| SuntradeError::NotFound {
                kind: "shop",
                id: id.0.clone(),
            })
    }

    async fn require_product(&self, id: &ProductId) -> Result<Product, SuntradeError> {
        self.catalog
            .get_product(id)
            .await?
            .ok_or_else(|| SuntradeError::NotFound {
                kind: "product",
                id: id.0.clone(),
            })
    }
}

/// Button text for a product row; a scarcity hint appears at ten units or
/// fewer.
fn product_button_label(product: &Product) -> String {
    let mut label = format!("{} - ${:.2}", product.name, product.price);
    if product.stock <= LOW_STOCK_HINT {
        label.push_str(&format!(" ({} left)", product.stock));
    }
    label
}
