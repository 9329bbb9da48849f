//! Display records for schools

use std::collections::BTreeSet;

use serde::Serialize;

use super::image::ImageSource;
use crate::api::School;

/// One school as displayed in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolCard {
    pub id: String,
    pub name: String,
    pub address: String,
    /// `"<city>, <state>"`
    pub location: String,
    pub contact: String,
    pub email: String,
    pub image: ImageSource,
}

impl SchoolCard {
    pub fn from_school(school: &School, asset_base: &str) -> Self {
        Self {
            id: school.id.to_string(),
            name: school.name.clone(),
            address: school.address.clone(),
            location: format!("{}, {}", school.city, school.state),
            contact: school.contact.clone(),
            email: school.email.clone(),
            image: ImageSource::resolve(asset_base, &school.image, false),
        }
    }

    /// Swap the image for the placeholder after a failed load
    pub fn image_failed(&mut self) {
        if !self.image.is_placeholder() {
            self.image = ImageSource::resolve("", "", true);
        }
    }
}

/// Summary figures over the whole (unfiltered) list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total_schools: usize,
    pub cities_covered: usize,
    pub states_covered: usize,
}

impl DirectoryStats {
    pub fn from_schools(schools: &[School]) -> Self {
        let cities: BTreeSet<&str> = schools.iter().map(|s| s.city.as_str()).collect();
        let states: BTreeSet<&str> = schools.iter().map(|s| s.state.as_str()).collect();
        Self {
            total_schools: schools.len(),
            cities_covered: cities.len(),
            states_covered: states.len(),
        }
    }
}
