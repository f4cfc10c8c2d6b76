use crate::criteria::CUISINE_ALL;
use crate::models::{Location, RestaurantRecord};
use serde::Serialize;

pub const ALL_CUISINES_LABEL: &str = "--All Cuisines--";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarkerView {
    pub index: usize,
    pub position: Location,
    pub logo_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListingView {
    pub index: usize,
    pub name: String,
    pub logo_url: String,
    pub rating_label: String,
    pub address_lines: [String; 2],
    pub cuisines_label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PopupView {
    pub index: usize,
    pub position: Location,
    pub title: String,
    pub address_lines: [String; 2],
    pub rating_label: String,
    pub cuisines_label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CuisineOption {
    pub value: String,
    pub label: String,
}

/// Side effects the view layer performs, in order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum RenderInstruction {
    ClearPopups,
    ClearHighlight,
    ReplaceMarkers(Vec<MarkerView>),
    ReplaceListings(Vec<ListingView>),
    FlyTo { center: Location, zoom: f64 },
    OpenPopup(PopupView),
    Highlight { index: usize },
    ShowFilterButton,
    PopulateCuisines(Vec<CuisineOption>),
    OpenFilterPanel,
    CloseFilterPanel,
}

pub fn marker_views(selection: &[RestaurantRecord], placeholder_logo: &str) -> Vec<MarkerView> {
    selection
        .iter()
        .enumerate()
        .map(|(index, record)| MarkerView {
            index,
            position: record.position(),
            logo_url: logo_or(record, placeholder_logo),
        })
        .collect()
}

pub fn listing_views(selection: &[RestaurantRecord], placeholder_logo: &str) -> Vec<ListingView> {
    selection
        .iter()
        .enumerate()
        .map(|(index, record)| ListingView {
            index,
            name: record.name.clone(),
            logo_url: logo_or(record, placeholder_logo),
            rating_label: rating_label(record),
            address_lines: address_lines(record),
            cuisines_label: cuisines_label(record),
        })
        .collect()
}

pub fn popup_view(index: usize, record: &RestaurantRecord) -> PopupView {
    PopupView {
        index,
        position: record.position(),
        title: record.name.clone(),
        address_lines: address_lines(record),
        rating_label: rating_label(record),
        cuisines_label: cuisines_label(record),
    }
}

/// The "all" entry first, then one option per cuisine with a capitalized label.
pub fn cuisine_options(cuisines: &[String]) -> Vec<CuisineOption> {
    let mut options = Vec::with_capacity(cuisines.len() + 1);
    options.push(CuisineOption {
        value: CUISINE_ALL.to_string(),
        label: ALL_CUISINES_LABEL.to_string(),
    });
    options.extend(cuisines.iter().map(|cuisine| CuisineOption {
        value: cuisine.clone(),
        label: capitalize(cuisine),
    }));
    options
}

pub fn rating_label(record: &RestaurantRecord) -> String {
    format!("\u{2605} {} ({})", record.rating.star_rating, record.rating.count)
}

fn cuisines_label(record: &RestaurantRecord) -> String {
    record.cuisine_names().collect::<Vec<_>>().join(", ")
}

fn address_lines(record: &RestaurantRecord) -> [String; 2] {
    [
        record.address.first_line.clone(),
        record.address.postal_code.clone(),
    ]
}

fn logo_or(record: &RestaurantRecord, placeholder_logo: &str) -> String {
    record
        .logo_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(placeholder_logo)
        .to_string()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::fixtures::{record, with_cuisines};

    #[test]
    fn markers_and_listings_share_indices() {
        let mut with_logo = record("Logo", 4.5, 10);
        with_logo.logo_url = Some("https://cdn.example.test/a.png".to_string());
        let selection = vec![with_logo, record("Plain", 4.0, 3)];

        let markers = marker_views(&selection, "placeholder.png");
        let listings = listing_views(&selection, "placeholder.png");

        assert_eq!(markers.len(), listings.len());
        for (marker, listing) in markers.iter().zip(&listings) {
            assert_eq!(marker.index, listing.index);
            assert_eq!(marker.logo_url, listing.logo_url);
        }
        assert_eq!(markers[0].logo_url, "https://cdn.example.test/a.png");
        assert_eq!(markers[1].logo_url, "placeholder.png");
    }

    #[test]
    fn listing_labels_follow_record() {
        let selection = vec![with_cuisines(record("Dosa Hut", 4.5, 120), &["Indian", "Vegan"])];
        let listing = &listing_views(&selection, "p.png")[0];

        assert_eq!(listing.rating_label, "\u{2605} 4.5 (120)");
        assert_eq!(listing.cuisines_label, "Indian, Vegan");
        assert_eq!(listing.address_lines[0], "Dosa Hut House");
        assert_eq!(listing.address_lines[1], "EC4M 7RF");
    }

    #[test]
    fn whole_number_rating_has_no_fraction() {
        assert_eq!(rating_label(&record("Four", 4.0, 2)), "\u{2605} 4 (2)");
    }

    #[test]
    fn cuisine_options_start_with_all() {
        let options = cuisine_options(&["indian".to_string(), "Pizza".to_string()]);
        let labels: Vec<_> = options.iter().map(|option| option.label.as_str()).collect();
        assert_eq!(labels, vec![ALL_CUISINES_LABEL, "Indian", "Pizza"]);
        assert_eq!(options[0].value, CUISINE_ALL);
        assert_eq!(options[1].value, "indian");
    }
}
