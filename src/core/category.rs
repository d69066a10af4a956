//! Point-of-interest taxonomy and the places the overlays are built from.

use crate::core::constants::DEFAULT_MARKER_ICON;
use crate::core::geo::LatLng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// POI category. Controls the marker icon and the supplemental info-window line.
///
/// Categories are identified by their localized label; anything outside the
/// known taxonomy is kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    ConvenienceStore,
    FireFacility,
    Police,
    ConstructionSite,
    CrimeProneArea,
    EmergencyBell,
    Cctv,
    AccessibleElevator,
    NightPharmacy,
    WheelchairCharger,
    WelfareFacility,
    Other(String),
}

impl Category {
    /// Every category of the fixed taxonomy, in menu order.
    pub const KNOWN: [Category; 11] = [
        Category::ConvenienceStore,
        Category::FireFacility,
        Category::Police,
        Category::ConstructionSite,
        Category::CrimeProneArea,
        Category::EmergencyBell,
        Category::Cctv,
        Category::AccessibleElevator,
        Category::NightPharmacy,
        Category::WheelchairCharger,
        Category::WelfareFacility,
    ];

    /// Resolves a localized label. Never fails: unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|category| category.label() == label)
            .cloned()
            .unwrap_or_else(|| Category::Other(label.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Category::ConvenienceStore => "편의점",
            Category::FireFacility => "소방시설",
            Category::Police => "경찰서",
            Category::ConstructionSite => "공사현장",
            Category::CrimeProneArea => "범죄주의구간",
            Category::EmergencyBell => "안전비상벨",
            Category::Cctv => "CCTV",
            Category::AccessibleElevator => "지하철역 엘레베이터",
            Category::NightPharmacy => "심야약국",
            Category::WheelchairCharger => "휠체어 전소",
            Category::WelfareFacility => "복지시설",
            Category::Other(label) => label,
        }
    }

    /// Icon asset for the marker
    pub fn icon_url(&self) -> &'static str {
        match self {
            Category::ConvenienceStore => "/images/icon/normal/store.png",
            Category::FireFacility => "/images/icon/normal/oneonenine.png",
            Category::Police => "/images/icon/normal/police.png",
            Category::ConstructionSite => "/images/icon/normal/gong4.png",
            Category::CrimeProneArea => "/images/icon/normal/warning.png",
            Category::EmergencyBell => "/images/icon/wemen/siren.png",
            Category::Cctv => "/images/icon/wemen/cctv.png",
            Category::AccessibleElevator => "/images/icon/old/ele.svg",
            Category::NightPharmacy => "/images/icon/old/drugstore.svg",
            Category::WheelchairCharger => "/images/icon/old/charge.png",
            Category::WelfareFacility => "/images/icon/old/noin.png",
            Category::Other(_) => DEFAULT_MARKER_ICON,
        }
    }

    /// Extra line shown in the info-window under the address
    pub fn supplemental_info(&self) -> Option<&'static str> {
        match self {
            Category::ConvenienceStore => Some("운영시간: 24시간"),
            Category::FireFacility => Some("긴급전화: 119"),
            Category::Police => Some("긴급전화: 112"),
            Category::EmergencyBell => Some("비상시 즉시 호출 가능"),
            Category::Cctv => Some("24시간 촬영중"),
            Category::AccessibleElevator => Some("운영시간: 첫차~막차"),
            Category::NightPharmacy => Some("야간 운영 가능"),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}

/// A point of interest supplied by the host application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(flatten)]
    pub coords: LatLng,
    pub category: Category,
}

impl Place {
    pub fn new(name: impl Into<String>, coords: LatLng, category: Category) -> Self {
        Self {
            name: name.into(),
            coords,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_for_taxonomy() {
        for category in Category::KNOWN.iter() {
            assert_eq!(&Category::from_label(category.label()), category);
        }
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let category = Category::from_label("놀이터");
        assert_eq!(category, Category::Other("놀이터".to_string()));
        assert_eq!(category.icon_url(), DEFAULT_MARKER_ICON);
        assert_eq!(category.supplemental_info(), None);
        assert_eq!(category.to_string(), "놀이터");
    }

    #[test]
    fn test_supplemental_info() {
        assert_eq!(Category::Police.supplemental_info(), Some("긴급전화: 112"));
        assert_eq!(Category::FireFacility.supplemental_info(), Some("긴급전화: 119"));
        assert_eq!(Category::ConstructionSite.supplemental_info(), None);
        assert_eq!(Category::WelfareFacility.supplemental_info(), None);
    }

    #[test]
    fn test_place_deserialize() {
        let place: Place = serde_json::from_str(
            r#"{"name":"중부경찰서","lat":35.87,"lng":128.59,"category":"경찰서"}"#,
        )
        .unwrap();
        assert_eq!(place.category, Category::Police);
        assert_eq!(place.coords, LatLng::new(35.87, 128.59));
    }

    #[test]
    fn test_place_deserialize_long_coordinate_names() {
        let place: Place = serde_json::from_str(
            r#"{"name":"반월당 비상벨","latitude":35.865,"longitude":128.593,"category":"안전비상벨"}"#,
        )
        .unwrap();
        assert_eq!(place.category, Category::EmergencyBell);
        assert_eq!(place.coords, LatLng::new(35.865, 128.593));
    }
}
