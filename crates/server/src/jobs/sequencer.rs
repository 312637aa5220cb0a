//! City sequencer: turns a job's requested city list into ordered,
//! stateless work units.
//!
//! Caller order is preserved: polling clients rely on `current_city`
//! reflecting real progress through the list. Duplicates are processed
//! twice; the submitting UI does not guarantee uniqueness and silently
//! deduplicating would desynchronize progress from the request.

use leadmap_extract::ExtractionQuery;

/// One city's worth of extraction work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityWorkUnit {
    /// Zero-based position in the job's city list.
    pub index: usize,
    pub query: ExtractionQuery,
}

/// Build the ordered work list for a job.
pub fn work_units(category: &str, cities: &[String], max_results_per_city: usize) -> Vec<CityWorkUnit> {
    cities
        .iter()
        .enumerate()
        .map(|(index, city)| CityWorkUnit {
            index,
            query: ExtractionQuery {
                category: category.to_string(),
                city: city.clone(),
                limit: max_results_per_city,
            },
        })
        .collect()
}
