//! Fixed literal dataset shown when live data is unavailable or access is
//! restricted. Pure functions of no inputs so the preview is reproducible
//! verbatim, for the anonymous view, for any failed load and for preview mode
//! alike.

use cafemap_shared::map::{CafeStatus, MapPoint, MapStatistics, PopulationInfo, RegionStats};

pub fn demo_map_points() -> Vec<MapPoint> {
    vec![
        demo_point(
            1,
            "데모 망원점",
            "마포구 망원동 57-1",
            37.5625,
            126.9090,
            CafeStatus::Safe,
            45,
            8.5,
            12_400,
            "높음",
        ),
        demo_point(
            2,
            "데모 합정점",
            "마포구 합정동 369-2",
            37.5574,
            126.9160,
            CafeStatus::Warning,
            32,
            -2.1,
            9_800,
            "보통",
        ),
        demo_point(
            3,
            "데모 연남점",
            "마포구 연남동 223-14",
            37.5646,
            126.9275,
            CafeStatus::Risk,
            28,
            12.3,
            15_200,
            "높음",
        ),
        demo_point(
            4,
            "데모 공덕점",
            "마포구 공덕동 105-7",
            37.5544,
            126.9340,
            CafeStatus::Safe,
            52,
            15.7,
            18_900,
            "높음",
        ),
        demo_point(
            5,
            "데모 상수점",
            "마포구 상수동 72-1",
            37.5598,
            126.9410,
            CafeStatus::Warning,
            18,
            -8.4,
            7_300,
            "낮음",
        ),
    ]
}

pub fn demo_statistics() -> MapStatistics {
    MapStatistics {
        total_shops: 175,
        avg_growth: 5.2,
        danger_zones: 1,
        new_businesses: 23,
    }
}

pub fn demo_region_stats() -> RegionStats {
    RegionStats {
        total_stores: 175,
        growth_rate: "+5.2%".to_string(),
        risk_areas_count: 1,
        new_businesses: 23,
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_point(
    id: u64,
    name: &str,
    address: &str,
    latitude: f64,
    longitude: f64,
    status: CafeStatus,
    shops: u32,
    growth: f64,
    total_population: u64,
    traffic_level: &str,
) -> MapPoint {
    MapPoint {
        id,
        name: name.to_string(),
        address: address.to_string(),
        latitude,
        longitude,
        status,
        shops,
        growth,
        population_data: PopulationInfo {
            total_population,
            traffic_level: traffic_level.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_points_are_the_fixed_five() {
        let points = demo_map_points();

        assert_eq!(points.len(), 5);
        // Reproducible verbatim
        assert_eq!(points, demo_map_points());
    }

    #[test]
    fn demo_statistics_literals() {
        let stats = demo_statistics();

        assert_eq!(stats.total_shops, 175);
        assert_eq!(stats.avg_growth, 5.2);
        assert_eq!(stats.danger_zones, 1);
        assert_eq!(stats.new_businesses, 23);
    }

    #[test]
    fn demo_risk_count_matches_the_danger_zone_figure() {
        let risky = demo_map_points()
            .iter()
            .filter(|p| p.status == CafeStatus::Risk)
            .count();

        assert_eq!(risky as u32, demo_statistics().danger_zones);
    }
}
