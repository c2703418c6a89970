//! Geo bubble map: state coordinates, growth banding and bubble sizing.

use crate::charts::Rgb;
use crate::format::{format_currency, format_growth};
use crate::payload::GeoGrowth;
use serde::Serialize;

/// Map view centre (lat, lng) and zoom used when the map is first created.
pub const US_CENTER: (f64, f64) = (37.8, -96.0);
pub const US_ZOOM: u8 = 4;

/// Longitude and latitude shown by the map canvas, covering all fifty states.
pub const LON_BOUNDS: [f64; 2] = [-170.0, -65.0];
pub const LAT_BOUNDS: [f64; 2] = [15.0, 72.0];

/// Radius in degrees of the largest bubble. Both front ends draw on a
/// character-cell canvas, where metre radii would be invisible.
pub const MAX_BUBBLE_RADIUS_DEG: f64 = 2.5;

pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Approximate geographic centres of the 50 US states.
pub const STATE_COORDINATES: [(&str, f64, f64); 50] = [
    ("Alabama", 32.806_671, -86.791_130),
    ("Alaska", 61.370_716, -152.404_419),
    ("Arizona", 33.729_759, -111.431_221),
    ("Arkansas", 34.969_704, -92.373_123),
    ("California", 36.116_203, -119.681_564),
    ("Colorado", 39.059_811, -105.311_104),
    ("Connecticut", 41.597_782, -72.755_371),
    ("Delaware", 39.318_523, -75.507_141),
    ("Florida", 27.766_279, -81.686_783),
    ("Georgia", 33.040_619, -83.643_074),
    ("Hawaii", 21.094_318, -157.498_337),
    ("Idaho", 44.240_459, -114.478_828),
    ("Illinois", 40.349_457, -88.986_137),
    ("Indiana", 39.849_426, -86.258_278),
    ("Iowa", 42.011_539, -93.210_526),
    ("Kansas", 38.526_600, -96.726_486),
    ("Kentucky", 37.668_140, -84.670_067),
    ("Louisiana", 31.169_546, -91.867_805),
    ("Maine", 44.693_947, -69.381_927),
    ("Maryland", 39.063_946, -76.802_101),
    ("Massachusetts", 42.230_171, -71.530_106),
    ("Michigan", 43.326_618, -84.536_095),
    ("Minnesota", 45.694_454, -93.900_192),
    ("Mississippi", 32.741_646, -89.678_696),
    ("Missouri", 38.456_085, -92.288_368),
    ("Montana", 46.921_925, -110.454_353),
    ("Nebraska", 41.125_370, -98.268_082),
    ("Nevada", 38.313_515, -117.055_374),
    ("New Hampshire", 43.452_492, -71.563_896),
    ("New Jersey", 40.298_904, -74.521_011),
    ("New Mexico", 34.840_515, -106.248_482),
    ("New York", 42.165_726, -74.948_051),
    ("North Carolina", 35.630_066, -79.806_419),
    ("North Dakota", 47.528_912, -99.784_012),
    ("Ohio", 40.388_783, -82.764_915),
    ("Oklahoma", 35.565_342, -96.928_917),
    ("Oregon", 44.572_021, -122.070_938),
    ("Pennsylvania", 40.590_752, -77.209_755),
    ("Rhode Island", 41.680_893, -71.511_780),
    ("South Carolina", 33.856_892, -80.945_007),
    ("South Dakota", 44.299_782, -99.438_828),
    ("Tennessee", 35.747_845, -86.692_345),
    ("Texas", 31.054_487, -97.563_461),
    ("Utah", 40.150_032, -111.862_434),
    ("Vermont", 44.045_876, -72.710_686),
    ("Virginia", 37.769_337, -78.169_968),
    ("Washington", 47.400_902, -121.490_494),
    ("West Virginia", 38.491_226, -80.954_453),
    ("Wisconsin", 44.268_543, -89.616_508),
    ("Wyoming", 42.755_966, -107.302_490),
];

/// `(lat, lng)` of a state by exact name.
pub fn state_coordinate(state: &str) -> Option<(f64, f64)> {
    STATE_COORDINATES
        .iter()
        .find(|(name, _, _)| *name == state)
        .map(|(_, lat, lng)| (*lat, *lng))
}

/// Discrete growth-rate categories used to colour bubbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthBand {
    SharpDecline,
    Decline,
    Flat,
    Growth,
    StrongGrowth,
}

impl GrowthBand {
    /// Legend order, strongest growth first.
    pub const LEGEND: [Self; 5] = [
        Self::StrongGrowth,
        Self::Growth,
        Self::Flat,
        Self::Decline,
        Self::SharpDecline,
    ];

    pub fn from_growth(growth: f64) -> Self {
        if growth <= -10.0 {
            Self::SharpDecline
        } else if growth < 0.0 {
            Self::Decline
        } else if growth < 5.0 {
            Self::Flat
        } else if growth < 15.0 {
            Self::Growth
        } else {
            Self::StrongGrowth
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            Self::SharpDecline => Rgb(0xd7, 0x19, 0x1c),
            Self::Decline => Rgb(0xfd, 0xae, 0x61),
            Self::Flat => Rgb(0xff, 0xff, 0xbf),
            Self::Growth => Rgb(0xa6, 0xd9, 0x6a),
            Self::StrongGrowth => Rgb(0x1a, 0x96, 0x41),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SharpDecline => "< -10%",
            Self::Decline => "-10-0%",
            Self::Flat => "0-5%",
            Self::Growth => "5-15%",
            Self::StrongGrowth => "> 15%",
        }
    }
}

/// Fraction of the maximum bubble radius for `revenue`.
///
/// Square-root scaling keeps bubble *area* proportional to revenue. Returns 0
/// for non-positive revenue or when there is no positive maximum.
pub fn bubble_scale(revenue: f64, max_revenue: f64) -> f64 {
    if max_revenue <= 0.0 || revenue <= 0.0 || !revenue.is_finite() {
        return 0.0;
    }
    (revenue / max_revenue).sqrt()
}

/// One state marker ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub region: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
    pub revenue: f64,
    pub growth: f64,
    /// Radius as a fraction of the largest bubble, in `0.0..=1.0`.
    pub scale: f64,
    pub band: GrowthBand,
}

impl Bubble {
    pub fn radius_deg(&self) -> f64 {
        self.scale * MAX_BUBBLE_RADIUS_DEG
    }

    pub fn popup_lines(&self) -> [String; 4] {
        [
            self.state.clone(),
            format!("Region: {}", self.region),
            format!("Revenue: {}", format_currency(self.revenue)),
            format!("Growth: {}", format_growth(self.growth).trim_start_matches('+')),
        ]
    }
}

/// Builds one bubble per state with a known coordinate. The maximum revenue
/// is taken over the whole payload, including states that are skipped.
pub fn plan_bubbles(data: &GeoGrowth) -> Vec<Bubble> {
    let max_revenue = data.max_revenue();
    data.records()
        .filter_map(|record| {
            let (lat, lng) = state_coordinate(record.state)?;
            Some(Bubble {
                region: record.region.to_string(),
                state: record.state.to_string(),
                lat,
                lng,
                revenue: record.revenue,
                growth: record.growth,
                scale: bubble_scale(record.revenue, max_revenue),
                band: GrowthBand::from_growth(record.growth),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::RegionGrowth;
    use std::collections::BTreeMap;

    #[test]
    fn banding_matches_examples() {
        assert_eq!(GrowthBand::from_growth(-15.0), GrowthBand::SharpDecline);
        assert_eq!(GrowthBand::from_growth(-5.0), GrowthBand::Decline);
        assert_eq!(GrowthBand::from_growth(3.0), GrowthBand::Flat);
        assert_eq!(GrowthBand::from_growth(10.0), GrowthBand::Growth);
        assert_eq!(GrowthBand::from_growth(20.0), GrowthBand::StrongGrowth);
    }

    #[test]
    fn banding_boundaries() {
        assert_eq!(GrowthBand::from_growth(-10.0), GrowthBand::SharpDecline);
        assert_eq!(GrowthBand::from_growth(-9.999), GrowthBand::Decline);
        assert_eq!(GrowthBand::from_growth(0.0), GrowthBand::Flat);
        assert_eq!(GrowthBand::from_growth(-0.001), GrowthBand::Decline);
        assert_eq!(GrowthBand::from_growth(5.0), GrowthBand::Growth);
        assert_eq!(GrowthBand::from_growth(4.999), GrowthBand::Flat);
        assert_eq!(GrowthBand::from_growth(15.0), GrowthBand::StrongGrowth);
        assert_eq!(GrowthBand::from_growth(14.999), GrowthBand::Growth);
    }

    #[test]
    fn band_colors_are_the_legend_palette() {
        assert_eq!(GrowthBand::SharpDecline.color().hex(), "#d7191c");
        assert_eq!(GrowthBand::StrongGrowth.color().hex(), "#1a9641");
    }

    #[test]
    fn every_state_has_a_coordinate() {
        assert_eq!(STATE_COORDINATES.len(), 50);
        assert_eq!(state_coordinate("Texas"), Some((31.054_487, -97.563_461)));
        assert_eq!(state_coordinate("Puerto Rico"), None);
        assert_eq!(state_coordinate("texas"), None);
    }

    #[test]
    fn bubble_scale_is_monotonic_and_zero_only_for_zero_revenue() {
        let max = 1000.0;
        let mut last = -1.0;
        for revenue in [0.0, 1.0, 10.0, 250.0, 999.0, 1000.0] {
            let scale = bubble_scale(revenue, max);
            assert!(scale > last);
            assert_eq!(scale == 0.0, revenue == 0.0);
            last = scale;
        }
        assert!((bubble_scale(250.0, 1000.0) - 0.5).abs() < 1e-12);
        assert!((bubble_scale(0.0, 0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_states_are_skipped_but_count_towards_the_maximum() {
        let mut regions = BTreeMap::new();
        regions.insert(
            "South".to_string(),
            RegionGrowth {
                states: vec!["Texas".into(), "Atlantis".into()],
                revenue: vec![100.0, 400.0],
                growth: vec![2.0, 50.0],
            },
        );
        let bubbles = plan_bubbles(&GeoGrowth(regions));

        assert_eq!(bubbles.len(), 1);
        assert_eq!(bubbles[0].state, "Texas");
        assert!((bubbles[0].scale - 0.5).abs() < 1e-12);
        assert!((bubbles[0].radius_deg() - MAX_BUBBLE_RADIUS_DEG / 2.0).abs() < 1e-9);
        assert_eq!(bubbles[0].band, GrowthBand::Flat);
    }

    #[test]
    fn every_state_fits_the_map_bounds() {
        for (_, lat, lng) in STATE_COORDINATES {
            assert!((LON_BOUNDS[0]..=LON_BOUNDS[1]).contains(&lng));
            assert!((LAT_BOUNDS[0]..=LAT_BOUNDS[1]).contains(&lat));
        }
    }

    #[test]
    fn popup_describes_the_state() {
        let bubble = Bubble {
            region: "West".into(),
            state: "Oregon".into(),
            lat: 0.0,
            lng: 0.0,
            revenue: 12_345.0,
            growth: -3.04,
            scale: 1.0,
            band: GrowthBand::Decline,
        };
        assert_eq!(
            bubble.popup_lines(),
            [
                "Oregon".to_string(),
                "Region: West".to_string(),
                "Revenue: $12,345".to_string(),
                "Growth: -3.0%".to_string(),
            ]
        );
    }
}
