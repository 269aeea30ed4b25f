//! Product categories shown on the gallery pages.

/// How many categories the home page features when the caller does not say.
pub const DEFAULT_FEATURED_LIMIT: usize = 3;

const BUNDLED_CATEGORIES: &str = include_str!("../catalog/categories.json");

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub long_description: String,
    pub featured_image: String,
    pub images: Vec<String>,
    pub banner: Banner,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub subtitle: String,
    pub background_image: String,
}

/// The ordered list of categories. Order decides which ones are featured.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<ProductCategory>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Catalog, serde_json::Error> {
        let categories = serde_json::from_str(json)?;
        Ok(Self { categories })
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Catalog, serde_json::Error> {
        Self::from_json(BUNDLED_CATEGORIES)
    }

    pub fn all(&self) -> &[ProductCategory] {
        &self.categories
    }

    pub fn by_slug(&self, slug: &str) -> Option<&ProductCategory> {
        self.categories.iter().find(|category| category.slug == slug)
    }

    pub fn featured(&self, limit: usize) -> &[ProductCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
