//! Places, coordinates and the small closed vocabularies attached to them.

use std::fmt;
use std::str::FromStr;

use geo::Coord;

/// Region key used for places without an area code.
pub const UNCLASSIFIED_REGION: &str = "other";

/// A WGS84 position in decimal degrees.
///
/// Values are not range-checked; callers are trusted to supply sensible
/// degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use lovetrip_core::Coordinate;
///
/// let seoul = Coordinate::new(37.5665, 126.978);
/// let coord: Coord<f64> = seoul.into();
/// assert_eq!(coord.x, 126.978);
/// assert_eq!(coord.y, 37.5665);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(rename = "lat"))]
    pub latitude: f64,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(rename = "lng"))]
    pub longitude: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance to `other` in kilometres.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        crate::haversine_km(*self, *other)
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}

/// Coarse classification of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum PlaceCategory {
    /// Cafes and coffee shops.
    Cafe,
    /// Restaurants and other food venues.
    Food,
    /// Viewpoints, parks and sightseeing spots.
    View,
    /// Museums, galleries and exhibitions.
    Museum,
    /// Anything else.
    #[default]
    #[cfg_attr(feature = "serde", serde(other))]
    Etc,
}

/// Keyword table used by [`PlaceCategory::infer`], checked in order.
const CATEGORY_KEYWORDS: &[(PlaceCategory, &[&str])] = &[
    (PlaceCategory::Cafe, &["카페", "커피", "cafe", "coffee"]),
    (
        PlaceCategory::Food,
        &["음식", "식당", "레스토랑", "restaurant", "food"],
    ),
    (
        PlaceCategory::View,
        &["관광", "명소", "공원", "park", "attraction"],
    ),
    (
        PlaceCategory::Museum,
        &["박물관", "미술관", "전시", "museum", "gallery"],
    ),
];

impl PlaceCategory {
    /// Return the upper-case tag for this category.
    ///
    /// # Examples
    /// ```
    /// use lovetrip_core::PlaceCategory;
    ///
    /// assert_eq!(PlaceCategory::Museum.as_str(), "MUSEUM");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cafe => "CAFE",
            Self::Food => "FOOD",
            Self::View => "VIEW",
            Self::Museum => "MUSEUM",
            Self::Etc => "ETC",
        }
    }

    /// Classify a free-form category label from a search provider.
    ///
    /// Matching is a case-insensitive keyword search; labels that match
    /// nothing become [`PlaceCategory::Etc`].
    ///
    /// # Examples
    /// ```
    /// use lovetrip_core::PlaceCategory;
    ///
    /// assert_eq!(PlaceCategory::infer("음식점>한식"), PlaceCategory::Food);
    /// assert_eq!(PlaceCategory::infer("Coffee Shop"), PlaceCategory::Cafe);
    /// assert_eq!(PlaceCategory::infer("bookstore"), PlaceCategory::Etc);
    /// ```
    #[must_use]
    pub fn infer(label: &str) -> Self {
        let lowered = label.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map_or(Self::Etc, |(category, _)| *category)
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceCategory {
    type Err = std::convert::Infallible;

    /// Parse a category tag; unknown tags map to [`PlaceCategory::Etc`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "CAFE" => Self::Cafe,
            "FOOD" => Self::Food,
            "VIEW" => Self::View,
            "MUSEUM" => Self::Museum,
            _ => Self::Etc,
        })
    }
}

/// Administrative region a place belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKey {
    /// A numeric area code.
    Code(u32),
    /// No area code was recorded.
    Unclassified,
}

impl RegionKey {
    /// Normalise the key to the string used in grouped route maps.
    ///
    /// # Examples
    /// ```
    /// use lovetrip_core::{RegionKey, UNCLASSIFIED_REGION};
    ///
    /// assert_eq!(RegionKey::Code(1).as_key(), "1");
    /// assert_eq!(RegionKey::Unclassified.as_key(), UNCLASSIFIED_REGION);
    /// ```
    #[must_use]
    pub fn as_key(&self) -> String {
        match self {
            Self::Code(code) => code.to_string(),
            Self::Unclassified => UNCLASSIFIED_REGION.to_owned(),
        }
    }
}

impl From<Option<u32>> for RegionKey {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Unclassified, Self::Code)
    }
}

/// A point of interest that can appear in a course.
///
/// Places are plain values: the planner reads them and never mutates them.
///
/// # Examples
/// ```
/// use lovetrip_core::{Coordinate, Place, PlaceCategory, RegionKey};
///
/// let place = Place::new("p1", "Namsan Tower", Coordinate::new(37.5512, 126.9882))
///     .with_category(PlaceCategory::View)
///     .with_area_code(1);
///
/// assert_eq!(place.category, PlaceCategory::View);
/// assert_eq!(place.region(), RegionKey::Code(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: Option<String>,
    /// Geographic position.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub location: Coordinate,
    /// Category tag.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub category: PlaceCategory,
    /// Average rating.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<f64>,
    /// Price tier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price_level: Option<u8>,
    /// Free-text description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Image reference.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_url: Option<String>,
    /// Administrative area code.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area_code: Option<u32>,
}

impl Place {
    /// Construct a place with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            location,
            category: PlaceCategory::Etc,
            rating: None,
            price_level: None,
            description: None,
            image_url: None,
            area_code: None,
        }
    }

    /// Set the category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: PlaceCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the address while returning `self` for chaining.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the area code while returning `self` for chaining.
    #[must_use]
    pub fn with_area_code(mut self, area_code: u32) -> Self {
        self.area_code = Some(area_code);
        self
    }

    /// Set the image reference while returning `self` for chaining.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Region this place is grouped under.
    #[must_use]
    pub fn region(&self) -> RegionKey {
        RegionKey::from(self.area_code)
    }
}
