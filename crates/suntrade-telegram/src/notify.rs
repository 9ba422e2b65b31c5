// SPDX-FileCopyrightText: 2026 Suntrade Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order workflow notifications to the staff groups and the customer.
//!
//! Three staff destinations are configured independently: the shop group
//! (approvals, new orders, stock alerts), the cashier group (payment
//! prompts and proof), and the delivery group (orders ready to go out).
//! Multi-destination sends are best-effort per destination; a failure is
//! recorded in the [`FanoutReport`] instead of aborting the siblings. An
//! unconfigured destination is silently skipped.

use std::sync::Arc;
use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use tracing::{debug, warn};

use suntrade_config::TelegramConfig;
use suntrade_core::error::SuntradeError;
use suntrade_core::traits::MessageGateway;
use suntrade_core::types::{
    ChatId, DeliveryMethod, FanoutReport, Order, OrderItem, OrderSource, ParseMode, Product,
};

static MAP_COORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Lat:\s*([-\d.]+),\s*Lng:\s*([-\d.]+)").expect("coordinate pattern is valid")
});

/// Sends order lifecycle messages on behalf of the back office.
pub struct OrderNotifier {
    gateway: Arc<dyn MessageGateway>,
    destinations: TelegramConfig,
}

impl OrderNotifier {
    pub fn new(gateway: Arc<dyn MessageGateway>, destinations: TelegramConfig) -> Self {
        Self {
            gateway,
            destinations,
        }
    }

    /// Asks the shop group to approve or reject a freshly placed order.
    pub async fn request_approval(&self, order: &Order) -> Result<(), SuntradeError> {
        let Some(chat) = configured(&self.destinations.shop_group_id, "shop group") else {
            return Ok(());
        };

        let method = match order.delivery_method {
            DeliveryMethod::Delivery => "🚚 Delivery",
            DeliveryMethod::Pickup => "📦 Pickup",
        };
        let source = match order.source {
            OrderSource::Telegram => "📱 Telegram",
            OrderSource::Web => "🌐 Web",
        };

        let mut text = format!(
            "🔔 <b>New Order Pending Approval</b>\n\n📋 Order ID: #{}\n👤 Customer: {}\n📞 Contact: {}\n🚚 Method: {method}\n",
            short_id(&order.id.0),
            order.customer_name,
            order.contact_tag,
        );
        if let Some(info) = delivery_info(order) {
            text.push_str(&info);
            text.push('\n');
        }
        text.push_str(&format!(
            "💳 Payment: {}\n💰 Total: ${:.2}\n📱 Source: {source}\n\n📦 <b>Items:</b>\n{}\n\n",
            order.payment_preference,
            order.total,
            items_list(&order.items),
        ));
        if let Some(notes) = &order.customer_notes {
            text.push_str(&format!("📝 <b>Notes:</b> {notes}\n"));
        }
        text.push_str(&format!(
            "⏰ Ordered: {}\n\n<i>Please approve or reject this order</i>",
            now_stamp()
        ));

        self.gateway.send_text(&chat, &text, ParseMode::Html).await
    }

    /// Tells the cashier group a customer claims to have paid, with the
    /// payment proof photo first when one was submitted.
    pub async fn notify_payment_submitted(
        &self,
        order: &Order,
        payment_photo_url: Option<&str>,
    ) -> Result<(), SuntradeError> {
        let Some(chat) = configured(&self.destinations.cashier_group_id, "cashier group") else {
            return Ok(());
        };

        if let Some(photo) = payment_photo_url {
            let caption = format!(
                "💳 Payment Proof - Order #{}\n\n👤 {}\n💰 ${:.2}",
                short_id(&order.id.0),
                order.customer_name,
                order.total,
            );
            self.gateway
                .send_photo(&chat, photo, &caption, ParseMode::Html, None)
                .await?;
        }

        let mut text = format!(
            "💳 <b>Payment Confirmation Required</b>\n\n📋 Order ID: #{}\n👤 Customer: {}\n📞 Contact: {}\n💰 Total: ${:.2}\n",
            short_id(&order.id.0),
            order.customer_name,
            order.contact_tag,
            order.total,
        );
        if let Some(info) = delivery_info(order) {
            text.push_str(&info);
            text.push('\n');
        }
        text.push_str(&format!(
            "\n📦 <b>Items:</b>\n{}\n\n⚠️ <b>Customer has confirmed payment completion</b>\n<i>Please verify payment and approve order</i>",
            items_list(&order.items),
        ));

        self.gateway.send_text(&chat, &text, ParseMode::Html).await
    }

    /// Announces a brand-new order to the shop group and prompts the cashier
    /// group for payment. Best-effort per destination.
    pub async fn notify_new_order(&self, order: &Order) -> FanoutReport {
        let mut report = FanoutReport::default();

        if let Some(chat) = configured(&self.destinations.shop_group_id, "shop group") {
            let text = format!(
                "🛍️ <b>New Order #{}</b>\n\n👤 Customer: {}\n💰 Total: ${:.2}\n📦 Items: {}\n🚚 Delivery: {}\n\n<i>Order received at {}</i>",
                order.id,
                order.customer_name,
                order.total,
                order.items.len(),
                order.delivery_method,
                now_stamp(),
            );
            let result = self.gateway.send_text(&chat, &text, ParseMode::Html).await;
            report.record(chat, result);
        }

        if let Some(chat) = configured(&self.destinations.cashier_group_id, "cashier group") {
            let text = format!(
                "💳 <b>Payment Required</b>\n\nOrder #{}\nAmount: ${:.2}\nCustomer: {}",
                order.id, order.total, order.customer_name,
            );
            let result = self.gateway.send_text(&chat, &text, ParseMode::Html).await;
            report.record(chat, result);
        }

        if !report.is_complete() {
            warn!(
                order_id = %order.id,
                failed = report.failed.len(),
                "new-order notification did not reach every destination"
            );
        }
        report
    }

    /// Fans an approved order out to fulfillment: the shop group always, the
    /// delivery group only for delivery orders.
    pub async fn notify_approved_to_fulfillment(&self, order: &Order) -> FanoutReport {
        let mut report = FanoutReport::default();
        let items = items_list(&order.items);

        if let Some(chat) = configured(&self.destinations.shop_group_id, "shop group") {
            let text = format!(
                "✅ <b>Order Approved - Sales</b>\n\n📋 Order ID: #{}\n👤 Customer: {}\n📞 Contact: {}\n💰 Total: ${:.2}\n💳 Payment: {}\n\n📦 <b>Items:</b>\n{items}\n\n⏰ Approved: {}\n\n<i>Order ready for processing</i>",
                short_id(&order.id.0),
                order.customer_name,
                order.contact_tag,
                order.total,
                order.payment_preference,
                now_stamp(),
            );
            let result = self.gateway.send_text(&chat, &text, ParseMode::Html).await;
            report.record(chat, result);
        }

        if order.delivery_method == DeliveryMethod::Delivery {
            if let Some(chat) = configured(&self.destinations.delivery_group_id, "delivery group")
            {
                let address = order.delivery_address.as_deref().unwrap_or("not provided");
                let text = format!(
                    "🚚 <b>Delivery Order - Ready</b>\n\n📋 Order ID: #{}\n👤 Customer: {}\n📞 Contact: {}\n📍 Address: {address}\n💰 Total: ${:.2}\n\n📦 <b>Items:</b>\n{items}\n\n<i>Please prepare for delivery</i>",
                    short_id(&order.id.0),
                    order.customer_name,
                    order.contact_tag,
                    order.total,
                );
                let result = self.gateway.send_text(&chat, &text, ParseMode::Html).await;
                report.record(chat, result);
            }
        }

        report
    }

    /// Tells the customer their order moved to a new status. Statuses arrive
    /// as raw strings from the approval actor; anything unrecognized gets the
    /// neutral presentation. A missing customer chat is a silent skip.
    pub async fn notify_status_change(
        &self,
        order: &Order,
        old_status: &str,
        new_status: &str,
    ) -> Result<(), SuntradeError> {
        let Some(telegram_id) = &order.telegram_id else {
            debug!(order_id = %order.id, "no customer chat on order, skipping status notice");
            return Ok(());
        };
        let chat = ChatId(telegram_id.clone());

        let (emoji, blurb) = status_presentation(new_status);
        let text = format!(
            "{emoji} <b>Order Status Updated</b>\n\n📋 Order: #{}\n👤 Customer: {}\n💰 Total: ${:.2}\n\n🔄 Status: {} → <b>{}</b>\n⏰ Updated: {}\n\n<i>{blurb}</i>",
            short_id(&order.id.0),
            order.customer_id,
            order.total,
            old_status.to_uppercase(),
            new_status.to_uppercase(),
            now_stamp(),
        );

        self.gateway.send_text(&chat, &text, ParseMode::Html).await
    }

    /// Tells the delivery group a payment was verified and the order can go
    /// out.
    pub async fn notify_payment_received(&self, order: &Order) -> Result<(), SuntradeError> {
        let Some(chat) = configured(&self.destinations.delivery_group_id, "delivery group")
        else {
            return Ok(());
        };

        let text = format!(
            "✅ <b>Payment Confirmed</b>\n\nOrder #{}\nAmount: ${:.2}\nCustomer: {}\n\n📦 <b>Ready for processing/delivery</b>",
            order.id, order.total, order.customer_name,
        );
        self.gateway.send_text(&chat, &text, ParseMode::Html).await
    }

    /// Warns the shop group a product dropped to its restock threshold.
    pub async fn notify_low_stock(&self, product: &Product) -> Result<(), SuntradeError> {
        let Some(chat) = configured(&self.destinations.shop_group_id, "shop group") else {
            return Ok(());
        };

        let threshold = product
            .low_stock_alert
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        let text = format!(
            "⚠️ <b>Low Stock Alert</b>\n\nProduct: {}\nCurrent Stock: {}\nAlert Threshold: {threshold}\n\n<i>Please restock soon!</i>",
            product.name, product.stock,
        );
        self.gateway.send_text(&chat, &text, ParseMode::Html).await
    }
}

fn configured(id: &Option<String>, name: &str) -> Option<ChatId> {
    match id {
        Some(id) if !id.is_empty() => Some(ChatId(id.clone())),
        _ => {
            debug!(destination = name, "destination not configured, skipping");
            None
        }
    }
}

/// Delivery line for staff messages: a clickable map link when the address
/// embeds `Lat: .., Lng: ..` coordinates, the raw address otherwise. `None`
/// for pickup orders.
fn delivery_info(order: &Order) -> Option<String> {
    if order.delivery_method != DeliveryMethod::Delivery {
        return None;
    }
    let address = order.delivery_address.as_deref()?;
    Some(match map_link(address) {
        Some(link) => format!("📍 <a href=\"{link}\">📍 View Location on Map</a>"),
        None => format!("📍 Address: {address}"),
    })
}

/// Extracts embedded coordinates into a Google Maps link.
pub fn map_link(address: &str) -> Option<String> {
    let caps = MAP_COORDS.captures(address)?;
    Some(format!(
        "https://www.google.com/maps?q={},{}",
        &caps[1], &caps[2]
    ))
}

/// Emoji and customer-facing blurb for a status string.
fn status_presentation(status: &str) -> (&'static str, &'static str) {
    match status {
        "pending" => ("⏳", "Order received"),
        "confirmed" => ("✅", "Order approved and ready for processing"),
        "processing" => ("🔄", "Order is being prepared"),
        "shipped" => ("🚚", "Order has been shipped"),
        "delivered" => ("📦", "Order delivered successfully"),
        "cancelled" => ("❌", "Order has been cancelled"),
        _ => ("📋", "Order status updated"),
    }
}

fn items_list(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "• {} × {} = ${:.2}",
                item.product_name, item.quantity, item.line_total
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Last six characters of a store identifier, the human-friendly short form.
fn short_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    chars[chars.len().saturating_sub(6)..].iter().collect()
}

fn now_stamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use suntrade_core::types::{OrderDraft, OrderId, OrderStatus, ProductId, ShopId};
    use suntrade_test_utils::{MockGateway, SentMessage};

    fn order() -> Order {
        let draft = OrderDraft {
            shop_id: ShopId("s1".into()),
            customer_id: "alice".into(),
            customer_name: "Alice".into(),
            telegram_id: Some("42".into()),
            telegram_username: Some("alice".into()),
            items: vec![OrderItem {
                product_id: ProductId("p1".into()),
                product_name: "Mono 300W".into(),
                quantity: 2,
                unit_price: 120.0,
                line_total: 240.0,
            }],
            total: 240.0,
            delivery_method: DeliveryMethod::Pickup,
            delivery_address: None,
            payment_preference: "cash".into(),
            customer_notes: None,
            contact_tag: "TG-42".into(),
            source: OrderSource::Telegram,
        };
        Order::from_draft(OrderId("abcdef123456".into()), draft, Utc::now())
    }

    fn delivery_order(address: &str) -> Order {
        let mut order = order();
        order.delivery_method = DeliveryMethod::Delivery;
        order.delivery_address = Some(address.to_string());
        order
    }

    fn config() -> TelegramConfig {
        TelegramConfig {
            bot_token: Some("123:ABC".into()),
            shop_group_id: Some("-100".into()),
            cashier_group_id: Some("-200".into()),
            delivery_group_id: Some("-300".into()),
            ..TelegramConfig::default()
        }
    }

    #[test]
    fn map_link_extracts_coordinates() {
        assert_eq!(
            map_link("Main St, Lat: -1.95, Lng: 30.06").as_deref(),
            Some("https://www.google.com/maps?q=-1.95,30.06")
        );
        assert!(map_link("Main St 5, Kigali").is_none());
    }

    #[test]
    fn status_presentation_covers_table_and_fallback() {
        assert_eq!(status_presentation("pending").0, "⏳");
        assert_eq!(status_presentation("confirmed").0, "✅");
        assert_eq!(status_presentation("processing").0, "🔄");
        assert_eq!(status_presentation("shipped").0, "🚚");
        assert_eq!(status_presentation("delivered").0, "📦");
        assert_eq!(status_presentation("cancelled").0, "❌");
        assert_eq!(status_presentation("archived"), ("📋", "Order status updated"));
    }

    #[test]
    fn short_id_takes_last_six_chars() {
        assert_eq!(short_id("abcdef123456"), "123456");
        assert_eq!(short_id("abc"), "abc");
    }

    #[tokio::test]
    async fn new_order_fans_out_to_shop_and_cashier() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), config());

        let report = notifier.notify_new_order(&order()).await;
        assert!(report.is_complete());
        assert_eq!(report.delivered.len(), 2);

        let sent = gateway.sent();
        assert_eq!(sent.len(), 2);
        let SentMessage::Text { chat, text, .. } = &sent[0] else {
            panic!("expected text");
        };
        assert_eq!(chat.0, "-100");
        assert!(text.contains("New Order"));
        let SentMessage::Text { chat, text, .. } = &sent[1] else {
            panic!("expected text");
        };
        assert_eq!(chat.0, "-200");
        assert!(text.contains("Payment Required"));
    }

    #[tokio::test]
    async fn fanout_records_partial_failure_without_aborting() {
        let gateway = Arc::new(MockGateway::new());
        gateway.fail_sends_to(&ChatId("-100".into()));
        let notifier = OrderNotifier::new(gateway.clone(), config());

        let report = notifier.notify_new_order(&order()).await;
        assert!(!report.is_complete());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0.0, "-100");
        // The cashier message still went out.
        assert_eq!(report.delivered, vec![ChatId("-200".into())]);
    }

    #[tokio::test]
    async fn approved_pickup_order_skips_delivery_group() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), config());

        let report = notifier.notify_approved_to_fulfillment(&order()).await;
        assert_eq!(report.delivered, vec![ChatId("-100".into())]);
    }

    #[tokio::test]
    async fn approved_delivery_order_reaches_delivery_group() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), config());

        let report = notifier
            .notify_approved_to_fulfillment(&delivery_order("12 Solar Ave"))
            .await;
        assert_eq!(
            report.delivered,
            vec![ChatId("-100".into()), ChatId("-300".into())]
        );
        let SentMessage::Text { text, .. } = &gateway.sent()[1] else {
            panic!("expected text");
        };
        assert!(text.contains("12 Solar Ave"));
    }

    #[tokio::test]
    async fn approval_request_embeds_map_link_for_coordinates() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), config());

        notifier
            .request_approval(&delivery_order("Lat: -1.95, Lng: 30.06"))
            .await
            .unwrap();

        let SentMessage::Text { text, .. } = &gateway.sent()[0] else {
            panic!("expected text");
        };
        assert!(text.contains("https://www.google.com/maps?q=-1.95,30.06"));
        assert!(text.contains("#123456"));
        assert!(text.contains("TG-42"));
    }

    #[tokio::test]
    async fn status_change_goes_to_customer_chat() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), config());

        notifier
            .notify_status_change(&order(), "pending", "confirmed")
            .await
            .unwrap();

        let SentMessage::Text { chat, text, .. } = &gateway.sent()[0] else {
            panic!("expected text");
        };
        assert_eq!(chat.0, "42");
        assert!(text.contains("PENDING → <b>CONFIRMED</b>"));
        assert!(text.contains("ready for processing"));
    }

    #[tokio::test]
    async fn status_change_without_customer_chat_is_skipped() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), config());

        let mut web_order = order();
        web_order.telegram_id = None;
        notifier
            .notify_status_change(&web_order, "pending", "shipped")
            .await
            .unwrap();
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn payment_proof_photo_precedes_confirmation_message() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), config());

        notifier
            .notify_payment_submitted(&order(), Some("https://img.example/proof.jpg"))
            .await
            .unwrap();

        let sent = gateway.sent();
        assert_eq!(sent.len(), 2);
        assert!(matches!(&sent[0], SentMessage::Photo { photo_url, .. }
            if photo_url == "https://img.example/proof.jpg"));
        assert!(matches!(&sent[1], SentMessage::Text { text, .. }
            if text.contains("Payment Confirmation Required")));
    }

    #[tokio::test]
    async fn unconfigured_destination_is_a_silent_skip() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), TelegramConfig::default());

        notifier.request_approval(&order()).await.unwrap();
        let report = notifier.notify_new_order(&order()).await;
        assert!(report.delivered.is_empty());
        assert!(report.failed.is_empty());
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn low_stock_alert_goes_to_shop_group() {
        let gateway = Arc::new(MockGateway::new());
        let notifier = OrderNotifier::new(gateway.clone(), config());

        let product = Product {
            id: ProductId("p1".into()),
            name: "Mono 300W".into(),
            description: "panel".into(),
            price: 120.0,
            stock: 2,
            category: "panels".into(),
            subcategory: None,
            images: vec![],
            is_active: true,
            shop_id: ShopId("s1".into()),
            sku: None,
            low_stock_alert: Some(5),
        };
        notifier.notify_low_stock(&product).await.unwrap();

        let SentMessage::Text { chat, text, .. } = &gateway.sent()[0] else {
            panic!("expected text");
        };
        assert_eq!(chat.0, "-100");
        assert!(text.contains("Low Stock Alert"));
        assert!(text.contains("Current Stock: 2"));
    }

    #[test]
    fn orders_start_pending_for_status_messages() {
        assert_eq!(order().status, OrderStatus::Pending);
    }
}
