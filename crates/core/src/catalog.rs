//! The outfit catalog a session validates selections against.

use fr_protocol::catalog_models::{Background, GenderCatalog, OutfitItem};
use fr_protocol::wizard_models::{Gender, Selections};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Selection incomplete, missing: {0}")]
    Incomplete(String),
    #[error("Unknown {slot} option '{name}' for {gender}")]
    UnknownOption {
        slot: &'static str,
        name: String,
        gender: Gender,
    },
}

/// Tops, bottoms and backgrounds available to the select screen.
///
/// A gender without catalog entries, or an empty background list, accepts
/// any name for the corresponding slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    genders: Vec<GenderCatalog>,
    backgrounds: Vec<Background>,
}

impl Catalog {
    pub fn new(genders: Vec<GenderCatalog>, backgrounds: Vec<Background>) -> Self {
        Self {
            genders,
            backgrounds,
        }
    }

    pub fn for_gender(&self, gender: Gender) -> Option<&GenderCatalog> {
        self.genders.iter().find(|c| c.gender == gender)
    }

    pub fn tops(&self, gender: Gender) -> &[OutfitItem] {
        self.for_gender(gender)
            .map(|c| c.tops.as_slice())
            .unwrap_or_default()
    }

    pub fn bottoms(&self, gender: Gender) -> &[OutfitItem] {
        self.for_gender(gender)
            .map(|c| c.bottoms.as_slice())
            .unwrap_or_default()
    }

    pub fn backgrounds(&self) -> &[Background] {
        &self.backgrounds
    }

    pub fn genders(&self) -> &[GenderCatalog] {
        &self.genders
    }

    pub fn find_top(&self, gender: Gender, name: &str) -> Option<&OutfitItem> {
        self.tops(gender).iter().find(|item| item.name == name)
    }

    pub fn find_bottom(&self, gender: Gender, name: &str) -> Option<&OutfitItem> {
        self.bottoms(gender).iter().find(|item| item.name == name)
    }

    /// Check that every slot is filled with an option offered for `gender`.
    pub fn validate(&self, gender: Gender, selections: &Selections) -> Result<(), CatalogError> {
        let missing = selections.missing_slots();
        if !missing.is_empty() {
            return Err(CatalogError::Incomplete(missing.join(", ")));
        }

        if self.for_gender(gender).is_some() {
            if self.find_top(gender, &selections.top).is_none() {
                return Err(CatalogError::UnknownOption {
                    slot: "top",
                    name: selections.top.clone(),
                    gender,
                });
            }
            if self.find_bottom(gender, &selections.bottom).is_none() {
                return Err(CatalogError::UnknownOption {
                    slot: "bottom",
                    name: selections.bottom.clone(),
                    gender,
                });
            }
        }

        if !self.backgrounds.is_empty()
            && !self
                .backgrounds
                .iter()
                .any(|b| b.name == selections.background)
        {
            return Err(CatalogError::UnknownOption {
                slot: "background",
                name: selections.background.clone(),
                gender,
            });
        }

        Ok(())
    }
}
