//! Outfit shaping applied before a generation request is submitted.
//!
//! A full outfit (a dress) occupies both garment slots. When one is picked
//! the paired slot is cleared and the apparel label collapses to the dress.

use crate::catalog::Catalog;
use fr_protocol::wizard_models::{Gender, Selections};

/// Garment fields as they are sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApparelOutfit {
    pub outfit_top: String,
    pub outfit_bottom: String,
    /// Composite description, e.g. `"Blue T-Shirt with Black Jeans"`.
    pub apparel_type: String,
}

/// Collapse the two garment slots into the fields submitted for generation.
///
/// A full-outfit top wins over a full-outfit bottom.
pub fn shape_outfit(gender: Gender, selections: &Selections, catalog: &Catalog) -> ApparelOutfit {
    let top_is_full = catalog
        .find_top(gender, &selections.top)
        .is_some_and(|item| item.full_outfit);
    let bottom_is_full = catalog
        .find_bottom(gender, &selections.bottom)
        .is_some_and(|item| item.full_outfit);

    if top_is_full {
        ApparelOutfit {
            outfit_top: selections.top.clone(),
            outfit_bottom: String::new(),
            apparel_type: selections.top.clone(),
        }
    } else if bottom_is_full {
        ApparelOutfit {
            outfit_top: String::new(),
            outfit_bottom: selections.bottom.clone(),
            apparel_type: selections.bottom.clone(),
        }
    } else {
        ApparelOutfit {
            outfit_top: selections.top.clone(),
            outfit_bottom: selections.bottom.clone(),
            apparel_type: format!("{} with {}", selections.top, selections.bottom),
        }
    }
}

/// Turnaround prompt for the video stage.
pub fn motion_description(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => {
            "man stands still, turns around slowly 360 degrees to show full outfit, \
             stands facing forward, confident posture, no adjusting clothes"
        }
        Gender::Female => {
            "woman stands still, turns around slowly 360 degrees to show full outfit, \
             stands facing forward, elegant posture, keeps hands at sides, no touching or \
             adjusting clothes, no lifting or moving fabric"
        }
    }
}
