//! Widget handles owned by the dashboard: KPI cards, chart slots, lists and
//! the geo map.

use crate::charts::{CategoryChart, RegionChart, RevenueChart, Rgb};
use crate::format::{format_currency, format_growth, format_number};
use crate::geo::{plan_bubbles, Bubble, GrowthBand, TILE_ATTRIBUTION, US_CENTER, US_ZOOM};
use crate::payload::{CategoryGrowth, GeoGrowth, KpiPayload, RegionBreakdown};
use serde::Serialize;

pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCards {
    pub total_revenue: String,
    pub total_profit: String,
    pub regions_count: String,
    pub units_sold: String,
}

impl KpiCards {
    pub fn build(data: &KpiPayload) -> Self {
        Self {
            total_revenue: format_currency(data.total_revenue),
            total_profit: format_currency(data.total_profit),
            regions_count: data.regions_count.to_string(),
            units_sold: format_number(data.total_units),
        }
    }
}

/// Holds at most one chart. Rendering always builds a fresh chart and drops
/// the previous one rather than patching it.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSlot<T> {
    instance: Option<T>,
    builds: u64,
}

impl<T> Default for ChartSlot<T> {
    fn default() -> Self {
        Self {
            instance: None,
            builds: 0,
        }
    }
}

impl<T> ChartSlot<T> {
    /// Installs `chart`, returning the instance it replaced.
    pub fn replace(&mut self, chart: T) -> Option<T> {
        self.builds += 1;
        self.instance.replace(chart)
    }

    pub const fn get(&self) -> Option<&T> {
        self.instance.as_ref()
    }

    pub const fn builds(&self) -> u64 {
        self.builds
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListWidget {
    rows: Vec<ListRow>,
}

impl ListWidget {
    /// Clears the list, then appends `rows` in the order given.
    pub fn repopulate(&mut self, rows: impl IntoIterator<Item = ListRow>) {
        self.rows.clear();
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }
}

pub fn growing_category_rows(data: &CategoryGrowth) -> Vec<ListRow> {
    data.records()
        .map(|(category, growth)| ListRow {
            label: category.to_string(),
            value: format_growth(growth),
        })
        .collect()
}

pub fn outperforming_region_rows(data: &RegionBreakdown) -> Vec<ListRow> {
    data.records()
        .map(|(region, revenue)| ListRow {
            label: region.to_string(),
            value: format_currency(revenue),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapLayer {
    Tiles { attribution: &'static str },
    Legend { entries: Vec<LegendEntry> },
    Marker(Bubble),
}

impl MapLayer {
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker(_))
    }

    fn legend() -> Self {
        Self::Legend {
            entries: GrowthBand::LEGEND
                .iter()
                .map(|band| LegendEntry {
                    label: band.label(),
                    color: band.color(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapInstance {
    pub center: (f64, f64),
    pub zoom: u8,
    layers: Vec<MapLayer>,
    selected_marker: Option<usize>,
    layout_requested: bool,
}

impl MapInstance {
    fn new() -> Self {
        Self {
            center: US_CENTER,
            zoom: US_ZOOM,
            layers: vec![MapLayer::Tiles {
                attribution: TILE_ATTRIBUTION,
            }],
            selected_marker: None,
            layout_requested: false,
        }
    }

    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    pub fn markers(&self) -> impl Iterator<Item = &Bubble> + '_ {
        self.layers.iter().filter_map(|layer| match layer {
            MapLayer::Marker(bubble) => Some(bubble),
            _ => None,
        })
    }

    pub fn legend(&self) -> Option<&[LegendEntry]> {
        self.layers.iter().find_map(|layer| match layer {
            MapLayer::Legend { entries } => Some(entries.as_slice()),
            _ => None,
        })
    }

    pub fn selected_marker(&self) -> Option<&Bubble> {
        self.markers().nth(self.selected_marker?)
    }

    pub const fn selected_index(&self) -> Option<usize> {
        self.selected_marker
    }
}

/// The bubble map. Uninitialized until the first geo payload arrives, then
/// kept for the life of the dashboard; refreshes only swap its marker layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoMap {
    instance: Option<MapInstance>,
}

impl GeoMap {
    pub const fn instance(&self) -> Option<&MapInstance> {
        self.instance.as_ref()
    }

    pub const fn is_active(&self) -> bool {
        self.instance.is_some()
    }

    /// Draws `data`, creating the map first if needed. Returns the number of
    /// markers placed.
    pub fn render(&mut self, data: &GeoGrowth) -> usize {
        let map = self.instance.get_or_insert_with(MapInstance::new);

        map.layers.retain(|layer| !layer.is_marker());
        if map.legend().is_none() {
            map.layers.push(MapLayer::legend());
        }

        let bubbles = plan_bubbles(data);
        let placed = bubbles.len();
        map.layers.extend(bubbles.into_iter().map(MapLayer::Marker));

        map.selected_marker = map.selected_marker.filter(|index| *index < placed);
        placed
    }

    /// Asks the front end to recompute the map layout. No-op before the map
    /// exists.
    pub fn invalidate_layout(&mut self) -> bool {
        self.instance.as_mut().map_or(false, |map| {
            map.layout_requested = true;
            true
        })
    }

    /// Consumes a pending layout request.
    pub fn take_layout_request(&mut self) -> bool {
        self.instance
            .as_mut()
            .is_some_and(|map| std::mem::take(&mut map.layout_requested))
    }

    pub fn select_next_marker(&mut self) -> Option<&Bubble> {
        self.step_marker(true)
    }

    pub fn select_previous_marker(&mut self) -> Option<&Bubble> {
        self.step_marker(false)
    }

    fn step_marker(&mut self, forward: bool) -> Option<&Bubble> {
        let map = self.instance.as_mut()?;
        let count = map.markers().count();
        if count == 0 {
            map.selected_marker = None;
            return None;
        }
        map.selected_marker = Some(match (map.selected_marker, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(index), true) => (index + 1) % count,
            (Some(index), false) => (index + count - 1) % count,
        });
        map.selected_marker()
    }
}

/// Every widget handle, owned by the dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WidgetRegistry {
    pub kpi: Option<KpiCards>,
    pub revenue: ChartSlot<RevenueChart>,
    pub category: ChartSlot<CategoryChart>,
    pub region: ChartSlot<RegionChart>,
    pub map: GeoMap,
    pub growing_categories: ListWidget,
    pub outperforming_regions: ListWidget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::RegionGrowth;
    use std::collections::BTreeMap;

    fn geo(states: &[(&str, f64, f64)]) -> GeoGrowth {
        let mut regions = BTreeMap::new();
        regions.insert(
            "West".to_string(),
            RegionGrowth {
                states: states.iter().map(|(s, _, _)| (*s).to_string()).collect(),
                revenue: states.iter().map(|(_, r, _)| *r).collect(),
                growth: states.iter().map(|(_, _, g)| *g).collect(),
            },
        );
        GeoGrowth(regions)
    }

    #[test]
    fn kpi_cards_format_currency_and_units() {
        let cards = KpiCards::build(&KpiPayload {
            total_revenue: 1_234_567.0,
            total_profit: 370_370.1,
            regions_count: 5,
            total_units: 48_213.0,
        });
        assert_eq!(cards.total_revenue, "$1,234,567");
        assert_eq!(cards.total_profit, "$370,370");
        assert_eq!(cards.regions_count, "5");
        assert_eq!(cards.units_sold, "48,213");
    }

    #[test]
    fn chart_slot_replaces_previous_instance() {
        let mut slot = ChartSlot::default();
        assert_eq!(slot.replace(1), None);
        assert_eq!(slot.replace(2), Some(1));
        assert_eq!(slot.get(), Some(&2));
        assert_eq!(slot.builds(), 2);
    }

    #[test]
    fn list_keeps_payload_order() {
        let mut list = ListWidget::default();
        list.repopulate(growing_category_rows(&CategoryGrowth {
            categories: vec!["Water".into(), "Juice".into()],
            growth: vec![3.0, 12.345],
        }));
        list.repopulate(growing_category_rows(&CategoryGrowth {
            categories: vec!["Soda".into(), "Tea".into()],
            growth: vec![12.345, 3.0],
        }));
        assert_eq!(
            list.rows(),
            [
                ListRow {
                    label: "Soda".into(),
                    value: "+12.3%".into()
                },
                ListRow {
                    label: "Tea".into(),
                    value: "+3.0%".into()
                },
            ]
        );
    }

    #[test]
    fn outperforming_rows_use_currency() {
        let rows = outperforming_region_rows(&RegionBreakdown {
            regions: vec!["West".into()],
            revenue: vec![98_765.4],
        });
        assert_eq!(rows[0].value, "$98,765");
    }

    #[test]
    fn map_activates_once_and_keeps_tiles_and_legend() {
        let mut map = GeoMap::default();
        assert!(!map.invalidate_layout());

        assert_eq!(map.render(&geo(&[("Oregon", 10.0, 1.0), ("Utah", 5.0, 20.0)])), 2);
        assert_eq!(map.render(&geo(&[("Texas", 7.0, -12.0)])), 1);

        let instance = map.instance().unwrap();
        let tiles = instance
            .layers()
            .iter()
            .filter(|layer| matches!(layer, MapLayer::Tiles { .. }))
            .count();
        let legends = instance
            .layers()
            .iter()
            .filter(|layer| matches!(layer, MapLayer::Legend { .. }))
            .count();
        assert_eq!((tiles, legends), (1, 1));

        let states: Vec<_> = instance.markers().map(|b| b.state.as_str()).collect();
        assert_eq!(states, vec!["Texas"]);
        assert_eq!(instance.legend().unwrap()[0].label, "> 15%");
    }

    #[test]
    fn empty_payload_still_creates_the_map() {
        let mut map = GeoMap::default();
        assert_eq!(map.render(&GeoGrowth::default()), 0);
        assert!(map.is_active());
        assert!(map.invalidate_layout());
        assert!(map.take_layout_request());
        assert!(!map.take_layout_request());
    }

    #[test]
    fn marker_selection_wraps_and_resets_when_markers_shrink() {
        let mut map = GeoMap::default();
        map.render(&geo(&[("Oregon", 10.0, 1.0), ("Utah", 5.0, 20.0)]));

        assert_eq!(map.select_previous_marker().map(|b| b.state.clone()), Some("Utah".into()));
        assert_eq!(map.select_next_marker().map(|b| b.state.clone()), Some("Oregon".into()));
        map.select_next_marker();

        map.render(&geo(&[("Texas", 7.0, -12.0)]));
        assert_eq!(map.instance().unwrap().selected_index(), None);
    }
}
