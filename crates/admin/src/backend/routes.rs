//! Backend routes, relative to the configured base URL.

pub const LOGIN: &str = "api/admin/login";
pub const DASHBOARD: &str = "api/admin/admin-dashboard";

pub const ALL_PRODUCTS: &str = "api/admin/all-products";
pub const GET_PRODUCT: &str = "api/admin/get-product";
pub const ADD_PRODUCT: &str = "api/admin/add-product";
pub const UPDATE_PRODUCT: &str = "api/admin/update-product";
// Served by the product router, not the admin router.
pub const DELETE_PRODUCT: &str = "api/product/delete-product";
pub const CHANGE_AVAILABILITY: &str = "api/admin/change-product-availability";
pub const CHANGE_BESTSELLER: &str = "api/admin/change-bestseller-status";

pub const ALL_CARTS: &str = "api/admin/all-carts";
pub const DELETE_CART: &str = "api/admin/delete-cart";
pub const CHANGE_CART_STATUS: &str = "api/admin/change-cart-status";

pub const COMMENTS: &str = "api/admin/comments";
pub const ALL_REPLIES: &str = "api/admin/all-replies";
pub const REPLY: &str = "api/admin/reply";
pub const UPDATE_REPLY: &str = "api/admin/update-reply";
pub const REMOVE_REPLY: &str = "api/admin/remove-reply";

pub const ALL_NOTIFICATIONS: &str = "api/admin/get-all-notifications";
pub const DELETE_NOTIFICATION: &str = "api/admin/delete-notification";
pub const CREATE_NOTIFICATION: &str = "api/admin/create-notification";
