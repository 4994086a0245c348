//! ICO container encoding.
//!
//! This module provides functionality for:
//! - Validating requested icon sizes ([`IconSize`])
//! - Serializing the icon directory header and entry byte-for-byte
//! - Encoding an image as a single-frame icon with a PNG payload
//!
//! # Output Layout
//!
//! Every icon produced here has exactly one directory entry, so the PNG
//! payload always begins at byte 22.
//!
//! # Examples
//!
//! ```ignore
//! use iconpress_core::ico::encode;
//!
//! let image = image::open("logo.png").unwrap();
//! let mut file = std::fs::File::create("favicon.ico").unwrap();
//! encode(&mut file, &image, 32).unwrap();
//! ```

mod encoder;
mod layout;
mod types;

pub use encoder::{compress_png, encode, encode_rgba, encode_to_vec};
pub use layout::{
    encode_layout, read_layout, IconDirEntry, IconDirHeader, LayoutError, ENTRY_LEN, HEADER_LEN,
    ICON_TYPE, LAYOUT_LEN, PAYLOAD_OFFSET,
};
pub use types::{IcoError, IconSize};
