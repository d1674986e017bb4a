//! The showcased entity and its create input.

mod seed;
mod store;

use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::validate::Validate;

pub use seed::mock_setups;
pub use store::{SetupStore, StoreError, PAGE_SIZE};

/// A published desk setup.
///
/// `id` is assigned by the store and never changes. `likes` only grows;
/// there is no decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Model)]
#[model(collection = "setups")]
#[serde(rename_all = "camelCase")]
pub struct Setup {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Fields accepted by `setup.create`.
///
/// Required strings default to empty when absent so that a missing field
/// is reported as a validation failure on that field, not as a decode
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSetup {
    #[serde(default)]
    #[validate(non_empty, message = "Title is required")]
    pub title: String,
    #[serde(default)]
    #[validate(non_empty, message = "Author is required")]
    pub author: String,
    #[serde(default)]
    #[validate(non_empty, message = "Image is required")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl NewSetup {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            image_url: image_url.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Materialize into a stored entity under `id`, applying defaults.
    pub(crate) fn into_setup(self, id: String) -> Setup {
        Setup {
            id,
            title: self.title,
            author: self.author,
            image_url: self.image_url,
            description: self.description,
            likes: self.likes.unwrap_or(0),
            tags: self.tags.unwrap_or_default(),
        }
    }
}
