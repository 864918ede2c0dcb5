//! Map data returned by the cafe analytics endpoints

/// Risk classification of a map point
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(serialize_all = "lowercase")]
pub enum CafeStatus {
    Safe,
    Warning,
    Risk,
    /// Anything the backend sends that we do not recognize
    #[default]
    Unknown,
}

impl From<String> for CafeStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl CafeStatus {
    /// Fixed marker color; unrecognized values get the neutral fallback
    pub fn color_rgb(&self) -> [u8; 3] {
        match self {
            CafeStatus::Safe => [0x22, 0xc5, 0x5e],
            CafeStatus::Warning => [0xf5, 0x9e, 0x0b],
            CafeStatus::Risk => [0xef, 0x44, 0x44],
            CafeStatus::Unknown => [0x6b, 0x72, 0x80],
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PopulationInfo {
    #[serde(default)]
    pub total_population: u64,
    #[serde(default)]
    pub traffic_level: String,
}

/// One cafe as returned per query. Not persisted; the whole set is recomputed
/// on every filter change.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapPoint {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default, alias = "detail_address")]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub status: CafeStatus,
    #[serde(default)]
    pub shops: u32,
    #[serde(default)]
    pub growth: f64,
    #[serde(default)]
    pub population_data: PopulationInfo,
}

/// Aggregates for the KPI slots. Absent fields project as their zero value.
/// The aliases accept the backend's spelling of the same figures.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MapStatistics {
    #[serde(default, alias = "total_cafes")]
    pub total_shops: u32,
    #[serde(default, alias = "avg_growth_rate")]
    pub avg_growth: f64,
    #[serde(default, alias = "risk_areas")]
    pub danger_zones: u32,
    #[serde(default)]
    pub new_businesses: u32,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct FilteredDataResponse {
    pub map_data: Vec<MapPoint>,
    #[serde(default)]
    pub statistics: MapStatistics,
}

/// Region-level aggregates backing the trend pane
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionStats {
    #[serde(default)]
    pub total_stores: u32,
    #[serde(default)]
    pub growth_rate: String,
    #[serde(default)]
    pub risk_areas_count: u32,
    #[serde(default)]
    pub new_businesses: u32,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::safe("safe", CafeStatus::Safe)]
    #[case::warning("warning", CafeStatus::Warning)]
    #[case::risk("risk", CafeStatus::Risk)]
    #[case::unrecognized("thriving", CafeStatus::Unknown)]
    fn status_from_wire(#[case] wire: &str, #[case] expected: CafeStatus) {
        let json = format!(r#""{wire}""#);

        let actual: CafeStatus = serde_json::from_str(&json).unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn unknown_status_uses_the_neutral_color() {
        assert_eq!(CafeStatus::Unknown.color_rgb(), [0x6b, 0x72, 0x80]);
    }

    #[test]
    fn map_point_accepts_the_backend_spelling() {
        let json = r#"{
            "id": 7,
            "name": "어느 카페",
            "detail_address": "마포구 서교동 1-1",
            "latitude": 37.55,
            "longitude": 126.91,
            "status": "risk",
            "business_code": "Q01",
            "population_data": {"total_population": 1200, "traffic_level": "높음"}
        }"#;

        let actual: MapPoint = serde_json::from_str(json).unwrap();

        assert_eq!(actual.address, "마포구 서교동 1-1");
        assert_eq!(actual.status, CafeStatus::Risk);
        assert_eq!(actual.shops, 0);
        assert_eq!(actual.population_data.traffic_level, "높음");
    }

    #[test]
    fn absent_statistics_fields_project_as_zero() {
        let json = r#"{"total_cafes": 3, "risk_areas": 1}"#;

        let actual: MapStatistics = serde_json::from_str(json).unwrap();

        assert_eq!(actual.total_shops, 3);
        assert_eq!(actual.danger_zones, 1);
        assert_eq!(actual.avg_growth, 0.0);
        assert_eq!(actual.new_businesses, 0);
    }
}
