//! Search filtering for the school list
//!
//! Case-insensitive substring match on name, city or address.
//! Order is preserved; an empty query matches everything.

use crate::api::School;

/// Matches schools against a search query
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    /// Prepare a filter for `query`
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Checks if a school matches the query
    pub fn matches(&self, school: &School) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [&school.name, &school.city, &school.address]
            .iter()
            .any(|text| text.to_lowercase().contains(&self.needle))
    }
}

/// Entries of `schools` matching `query`, in their original order
pub fn filter_schools<'a>(schools: &'a [School], query: &str) -> Vec<&'a School> {
    let filter = SearchFilter::new(query);
    schools.iter().filter(|s| filter.matches(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SchoolId;

    fn school(id: u64, name: &str, city: &str, address: &str) -> School {
        School {
            id: SchoolId::Number(id),
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: "TX".into(),
            image: String::new(),
            contact: String::new(),
            email: String::new(),
        }
    }

    fn sample() -> Vec<School> {
        vec![
            school(1, "Green Valley", "Austin", "12 Orchard Road"),
            school(2, "Blue Ridge", "Dallas", "9 Hill Street"),
        ]
    }

    #[test]
    fn test_city_match_any_case() {
        let schools = sample();
        for query in ["austin", "AUSTIN", "Austin", "aUsTiN"] {
            let found = filter_schools(&schools, query);
            assert_eq!(found.len(), 1, "query {}", query);
            assert_eq!(found[0].name, "Green Valley");
        }
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let schools = sample();
        let found = filter_schools(&schools, "");
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Green Valley", "Blue Ridge"]);
    }

    #[test]
    fn test_name_and_address_match() {
        let schools = sample();
        assert_eq!(filter_schools(&schools, "ridge")[0].name, "Blue Ridge");
        assert_eq!(filter_schools(&schools, "orchard")[0].name, "Green Valley");
    }

    #[test]
    fn test_other_fields_do_not_match() {
        let schools = sample();
        // Every sample is in TX, but state is not searched
        assert!(filter_schools(&schools, "tx").is_empty());
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let schools = sample();
        assert!(filter_schools(&schools, " austin").is_empty());
        assert_eq!(filter_schools(&schools, "green valley").len(), 1);
    }

    #[test]
    fn test_order_preserved_for_multiple_matches() {
        let schools = vec![
            school(3, "Zeta Academy", "Houston", "1 Main"),
            school(4, "Alpha School", "Houston", "2 Main"),
        ];
        let found = filter_schools(&schools, "houston");
        assert_eq!(found[0].id, SchoolId::Number(3));
        assert_eq!(found[1].id, SchoolId::Number(4));
    }
}
