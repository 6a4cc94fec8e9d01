//! Well Connected Gardener Common Library
//!
//! 除籍候補リストの行モデル、ISBN抽出、カタログ定義、付加列の組み立て。
//! I/Oを伴わない処理のみを置く。

pub mod augment;
pub mod catalog;
pub mod error;
pub mod fields;
pub mod isbn;
pub mod record;

pub use augment::{augment_row, augmented_header, url_ready_title, CatalogOutcome};
pub use catalog::{Catalog, CATALOGS};
pub use error::{Error, Result};
pub use fields::{decode_row, decode_text};
pub use isbn::extract_isbns;
pub use record::{Header, Record};
