//! Climate Site - routing and sharing glue
//!
//! Maps logical page names to paths and builds QR share links for them.
//! The game engines know nothing about either.

mod error;
mod page;
mod qr;

pub use error::{Error, Result};
pub use page::{page_url, Page};
pub use qr::{
    encode_component, qr_image_url, ShareLink, ShareTarget, SiteOrigin, DEFAULT_QR_SIZE,
    MAX_QR_SIZE, MIN_QR_SIZE, QR_SERVICE_URL,
};
