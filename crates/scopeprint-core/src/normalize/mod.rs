//! Module: normalize
//! Responsibility: resource-specific reshaping of response bodies.
//! Does not own: identity (see `fingerprint`) or metadata (see `meta`).
//! Boundary: pure `Record -> Record` transforms run before fingerprinting.

mod address;
mod encode;
mod legacy;
mod links;
mod proxy;
mod select;
mod slug;

pub use address::split_address;
pub use encode::{ComponentEncoder, UriEncoder, intention_id};
pub use legacy::{Reconciled, reconcile_legacy_token};
pub use links::{
    Links, PolicyLinks, RoleLinks, TEMPLATE_KEY, TEMPLATE_NODE_IDENTITY, TEMPLATE_POLICY,
    TEMPLATE_SERVICE_IDENTITY, normalize_links, serialize_links,
};
pub use proxy::merge_proxies;
pub use select::{select_first, select_instance};
pub use slug::fill_slug;
