//! Outfit catalog models for `.fitting-room/catalog/*.yaml`.
//!
//! The catalog lists what a user may pick on the select screen, per gender.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::wizard_models::Gender;

/// A single garment the user can pick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct OutfitItem {
    /// Display name, also sent verbatim to the backend.
    pub name: String,

    /// Reference image URL for the garment.
    #[serde(default)]
    pub image: String,

    /// Whether this item covers both the top and bottom slots (a dress).
    ///
    /// Picking a full outfit clears the paired slot before submission.
    #[serde(default)]
    pub full_outfit: bool,
}

/// Catalog entries for one gender.
///
/// # Example
///
/// ```yaml
/// gender: female
/// tops:
///   - name: Pink Blouse
///     image: https://i.postimg.cc/B6GJ3b6b/pink_blouse.png
///   - name: Formal Dress
///     image: https://i.postimg.cc/V6czwvNh/formal_dress.png
///     full-outfit: true
/// bottoms:
///   - name: Black Skirt
///     image: https://i.postimg.cc/9Mjc20fS/black_skirt.png
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct GenderCatalog {
    pub gender: Gender,

    #[serde(default)]
    pub tops: Vec<OutfitItem>,

    #[serde(default)]
    pub bottoms: Vec<OutfitItem>,
}

/// A setting the generated portrait is placed in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct Background {
    pub name: String,

    #[serde(default)]
    pub description: String,
}
