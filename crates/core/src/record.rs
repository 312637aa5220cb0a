use serde::{Deserialize, Serialize};

/// Sentinel for fields the extractor could not find on a listing.
///
/// Every field of a [`BusinessRecord`] is always populated; clients render
/// records uniformly and never have to null-check individual columns.
pub const NOT_AVAILABLE: &str = "N/A";

/// One extracted business listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub business_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub category: String,
    /// Listing URL the record was extracted from.
    pub source_url: String,
}

impl BusinessRecord {
    /// A record with every extractable field set to the `N/A` sentinel.
    ///
    /// Backends start from this and fill in whatever the page yields.
    pub fn unavailable(category: &str, city: &str, state: &str) -> Self {
        Self {
            business_name: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            phone: NOT_AVAILABLE.to_string(),
            website: NOT_AVAILABLE.to_string(),
            category: category.to_string(),
            source_url: NOT_AVAILABLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serde_roundtrip() {
        let record = BusinessRecord {
            business_name: "Joe's Diner".to_string(),
            address: "1 Main St".to_string(),
            city: "Los Angeles".to_string(),
            state: "California".to_string(),
            phone: "(555) 010-0100".to_string(),
            website: "https://joesdiner.example".to_string(),
            category: "Restaurants".to_string(),
            source_url: "https://maps.example/place/joes".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: BusinessRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_unavailable_fills_sentinels() {
        let record = BusinessRecord::unavailable("Plumbers", "San Diego", "California");
        assert_eq!(record.business_name, NOT_AVAILABLE);
        assert_eq!(record.phone, NOT_AVAILABLE);
        assert_eq!(record.website, NOT_AVAILABLE);
        assert_eq!(record.city, "San Diego");
        assert_eq!(record.category, "Plumbers");
    }
}
