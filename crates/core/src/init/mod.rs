//! Initialization module for creating .fitting-room directory structures.
//!
//! Generates a `.fitting-room/` directory with:
//! - Global configuration (`config.toml`)
//! - The outfit catalog (`catalog/*.yaml`)
//!
//! # Example
//!
//! ```no_run
//! use fr_core::init::{generate_fitting_room_structure, InitOptions};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! generate_fitting_room_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_fitting_room_structure, InitOptions};
pub use templates::{get_template, list_templates};
