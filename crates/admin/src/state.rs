//! In-memory view state.
//!
//! Mirrors of the most recently fetched collections plus the transient
//! selections the screens work with. Collections are replaced wholesale on
//! fetch and patched element-wise after the backend confirms a mutation.
//!
//! # Out-of-order fetches
//!
//! Each collection hands out increasing [`FetchTicket`]s. A fetch result is
//! applied only if no result from a later-started fetch of the same
//! collection has been applied already, so a slow response cannot overwrite
//! fresher data.

use std::collections::HashMap;

use shopdesk_core::{
    Cart, CartId, CartStatus, Comment, CommentId, DashboardSnapshot, Notification, NotificationId,
    Product, ProductId, Reply, ReplyId, SearchTerm, filter_products,
};

/// The fetchable collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Carts,
    Comments,
    Replies,
    Notifications,
    Dashboard,
}

/// Proof that a fetch was started, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    collection: Collection,
    seq: u64,
}

impl FetchTicket {
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Sequence {
    issued: u64,
    applied: u64,
}

/// What the screens currently have selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub product: Option<ProductId>,
    pub cart: Option<CartId>,
    pub comment: Option<CommentId>,
    pub reply: Option<ReplyId>,
    pub notification: Option<NotificationId>,
}

/// View state owned by the console.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    products: Vec<Product>,
    filtered: Vec<Product>,
    search: SearchTerm,
    carts: Vec<Cart>,
    comments: Vec<Comment>,
    replies: Vec<Reply>,
    notifications: Vec<Notification>,
    dashboard: Option<DashboardSnapshot>,
    pub selection: Selection,
    sequences: HashMap<Collection, Sequence>,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Fetch tickets
    // =========================================================================

    /// Start a fetch of `collection`.
    pub fn begin_fetch(&mut self, collection: Collection) -> FetchTicket {
        let seq = self.sequences.entry(collection).or_default();
        seq.issued += 1;
        FetchTicket {
            collection,
            seq: seq.issued,
        }
    }

    /// Record that `ticket`'s result is about to be applied. Returns false if
    /// a later fetch already landed.
    fn accept(&mut self, ticket: FetchTicket, collection: Collection) -> bool {
        let seq = self.sequences.entry(collection).or_default();
        if ticket.collection != collection || ticket.seq < seq.applied {
            tracing::debug!(?collection, ticket = ticket.seq, applied = seq.applied, "Discarding stale fetch");
            return false;
        }
        seq.applied = ticket.seq;
        true
    }

    // =========================================================================
    // Products
    // =========================================================================

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products matching the current search term.
    #[must_use]
    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered
    }

    #[must_use]
    pub const fn search_term(&self) -> &SearchTerm {
        &self.search
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Change the search term and recompute the filtered list.
    pub fn set_search(&mut self, raw: &str) {
        self.search = SearchTerm::new(raw);
        self.refilter();
    }

    /// Replace the catalog with a fetch result.
    pub fn apply_products(&mut self, ticket: FetchTicket, products: Vec<Product>) -> bool {
        if !self.accept(ticket, Collection::Products) {
            return false;
        }
        self.products = products;
        self.refilter();
        true
    }

    /// Insert or replace a single product.
    pub fn upsert_product(&mut self, product: Product) {
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) {
            *existing = product;
        } else {
            self.products.push(product);
        }
        self.refilter();
    }

    /// Flip the availability flag of a product.
    pub fn toggle_availability(&mut self, id: &ProductId) {
        self.patch_product(id, |p| p.available = !p.available);
    }

    /// Flip the bestseller flag of a product.
    pub fn toggle_bestseller(&mut self, id: &ProductId) {
        self.patch_product(id, |p| p.bestseller = !p.bestseller);
    }

    pub fn remove_product(&mut self, id: &ProductId) {
        self.products.retain(|p| &p.id != id);
        if self.selection.product.as_ref() == Some(id) {
            self.selection.product = None;
        }
        self.refilter();
    }

    fn patch_product(&mut self, id: &ProductId, patch: impl FnOnce(&mut Product)) {
        if let Some(product) = self.products.iter_mut().find(|p| &p.id == id) {
            patch(product);
        }
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_products(&self.products, &self.search);
    }

    // =========================================================================
    // Carts
    // =========================================================================

    #[must_use]
    pub fn carts(&self) -> &[Cart] {
        &self.carts
    }

    #[must_use]
    pub fn cart(&self, id: &CartId) -> Option<&Cart> {
        self.carts.iter().find(|c| &c.id == id)
    }

    pub fn apply_carts(&mut self, ticket: FetchTicket, carts: Vec<Cart>) -> bool {
        if !self.accept(ticket, Collection::Carts) {
            return false;
        }
        self.carts = carts;
        true
    }

    pub fn set_cart_status(&mut self, id: &CartId, status: CartStatus) {
        if let Some(cart) = self.carts.iter_mut().find(|c| &c.id == id) {
            cart.status = status;
        }
    }

    pub fn remove_cart(&mut self, id: &CartId) {
        self.carts.retain(|c| &c.id != id);
        if self.selection.cart.as_ref() == Some(id) {
            self.selection.cart = None;
        }
    }

    // =========================================================================
    // Comments & replies
    // =========================================================================

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[must_use]
    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    #[must_use]
    pub fn reply(&self, id: &ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|r| &r.id == id)
    }

    /// Replies to one comment, in fetch order.
    pub fn replies_for<'a>(&'a self, comment_id: &'a CommentId) -> impl Iterator<Item = &'a Reply> {
        self.replies.iter().filter(move |r| &r.comment_id == comment_id)
    }

    pub fn apply_comments(&mut self, ticket: FetchTicket, comments: Vec<Comment>) -> bool {
        if !self.accept(ticket, Collection::Comments) {
            return false;
        }
        self.comments = comments;
        true
    }

    pub fn apply_replies(&mut self, ticket: FetchTicket, replies: Vec<Reply>) -> bool {
        if !self.accept(ticket, Collection::Replies) {
            return false;
        }
        self.replies = replies;
        true
    }

    pub fn set_reply_text(&mut self, id: &ReplyId, text: &str) {
        if let Some(reply) = self.replies.iter_mut().find(|r| &r.id == id) {
            text.clone_into(&mut reply.text);
        }
    }

    pub fn remove_reply(&mut self, id: &ReplyId) {
        self.replies.retain(|r| &r.id != id);
        if self.selection.reply.as_ref() == Some(id) {
            self.selection.reply = None;
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    #[must_use]
    pub fn notification(&self, id: &NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| &n.id == id)
    }

    pub fn apply_notifications(&mut self, ticket: FetchTicket, notifications: Vec<Notification>) -> bool {
        if !self.accept(ticket, Collection::Notifications) {
            return false;
        }
        self.notifications = notifications;
        true
    }

    pub fn remove_notification(&mut self, id: &NotificationId) {
        self.notifications.retain(|n| &n.id != id);
        if self.selection.notification.as_ref() == Some(id) {
            self.selection.notification = None;
        }
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    #[must_use]
    pub const fn dashboard(&self) -> Option<&DashboardSnapshot> {
        self.dashboard.as_ref()
    }

    pub fn apply_dashboard(&mut self, ticket: FetchTicket, snapshot: DashboardSnapshot) -> bool {
        if !self.accept(ticket, Collection::Dashboard) {
            return false;
        }
        self.dashboard = Some(snapshot);
        true
    }

    /// Forget everything, as on logout. Fetches started before the reset
    /// become stale.
    pub fn reset(&mut self) {
        let mut sequences = std::mem::take(&mut self.sequences);
        for seq in sequences.values_mut() {
            seq.issued += 1;
            seq.applied = seq.issued;
        }
        *self = Self {
            sequences,
            ..Self::default()
        };
    }
}
