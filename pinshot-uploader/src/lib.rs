//! # Pinshot Uploader
//!
//! The pick-and-upload flow: consent gate, file selection, filename
//! derivation, and the transient lifecycle state a display layer renders.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pinshot_ipfs::{PinataClient, PinataConfig};
//! use pinshot_uploader::{PathPicker, Uploader};
//!
//! let client = PinataClient::with_config(PinataConfig::from_env());
//! let mut uploader = Uploader::new(PathPicker::new("photo.jpg"), client);
//!
//! if let Some(result) = uploader.pick_and_upload().await? {
//!     println!("{}", result.display_url);
//! }
//! ```

mod flow;
mod picker;

pub use flow::{derive_file_name, UploadState, Uploader};
pub use picker::{guess_mime, PathPicker};
