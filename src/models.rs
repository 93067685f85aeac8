use serde::Deserialize;
use serde::Serialize;

/// One row of the property corpus after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: String,
    /// Whole currency units; 0 when the source price could not be parsed
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub sq_ft: u32,
    pub description: String,
}

impl PropertyRecord {
    /// Feature line appended to the description before embedding
    #[must_use]
    pub fn feature_summary(&self) -> String {
        format!(
            "Features: {} Bed, {} Bath, {} sqft.",
            self.bedrooms, self.bathrooms, self.sq_ft
        )
    }

    #[must_use]
    pub fn metadata(&self) -> PropertyMetadata {
        PropertyMetadata {
            id: self.id.clone(),
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            sq_ft: self.sq_ft,
        }
    }

    /// Build the searchable document for this record
    #[must_use]
    pub fn to_document(&self) -> IndexedDocument {
        IndexedDocument {
            content: format!("{} | {}", self.description.trim(), self.feature_summary()),
            metadata: self.metadata(),
        }
    }
}

/// Structured metadata stored next to each document.
///
/// Serializes as a flat key-value object so it can live in a JSONB column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    pub id: String,
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub sq_ft: u32,
}

/// Text + metadata pair held by the vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub content: String,
    pub metadata: PropertyMetadata,
}

impl IndexedDocument {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.metadata.id
    }
}

/// Hard constraints applied after similarity retrieval. 0 means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub max_price: u64,
    pub min_bedrooms: u32,
}

impl SearchFilters {
    #[must_use]
    pub const fn new(max_price: u64, min_bedrooms: u32) -> Self {
        Self {
            max_price,
            min_bedrooms,
        }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_price == 0 && self.min_bedrooms == 0
    }

    /// Whether a property satisfies both constraints
    #[must_use]
    pub const fn admits(&self, metadata: &PropertyMetadata) -> bool {
        if self.max_price > 0 && metadata.price > self.max_price {
            return false;
        }
        if self.min_bedrooms > 0 && metadata.bedrooms < self.min_bedrooms {
            return false;
        }
        true
    }
}

/// A document that survived retrieval and filtering, with its similarity rank
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub document: IndexedDocument,
    /// 0-based position in similarity order
    pub rank: usize,
}

impl Candidate {
    #[must_use]
    pub fn id(&self) -> &str {
        self.document.id()
    }

    #[must_use]
    pub const fn price(&self) -> u64 {
        self.document.metadata.price
    }

    #[must_use]
    pub const fn bedrooms(&self) -> u32 {
        self.document.metadata.bedrooms
    }
}

/// Property fields passed through to consumers of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub id: String,
    pub price: u64,
    pub bedrooms: u32,
    pub bathrooms: f32,
    pub sq_ft: u32,
    pub content: String,
}

impl From<&IndexedDocument> for PropertyDetails {
    fn from(doc: &IndexedDocument) -> Self {
        Self {
            id: doc.metadata.id.clone(),
            price: doc.metadata.price,
            bedrooms: doc.metadata.bedrooms,
            bathrooms: doc.metadata.bathrooms,
            sq_ft: doc.metadata.sq_ft,
            content: doc.content.clone(),
        }
    }
}

/// A scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub id: String,
    /// 0-100
    pub score: u8,
    pub reason: String,
    pub details: PropertyDetails,
}

/// Pipeline input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub user_input: String,
}

impl MatchRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
        }
    }

    /// Compose the pipeline input from discrete profile fields
    #[must_use]
    pub fn from_preferences(budget: &str, bedrooms: u32, preferences: &str) -> Self {
        Self::new(format!(
            "I have a strict budget of {budget}. I need minimum {bedrooms} bedrooms. My preferences are: {preferences}"
        ))
    }
}

/// Pipeline output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub optimized_query: String,
    pub filters: SearchFilters,
    /// Sorted by score, highest first
    pub final_response: Vec<ScoredMatch>,
}
