//! The filter selection that drives the map data queries

use crate::const_config::filter::{CATEGORY_ALL, DEFAULT_REGION};

/// One value per filter dimension (single-select). Lives for the whole app
/// session and is mutated in place by the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub region: String,
    pub major_category: String,
    pub mid_category: String,
    pub franchise: Option<String>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            major_category: CATEGORY_ALL.to_string(),
            mid_category: CATEGORY_ALL.to_string(),
            franchise: None,
        }
    }
}

impl FilterSelection {
    /// Selecting the same chip again clears it, otherwise it replaces the
    /// previous selection (at most one franchise at a time)
    pub fn toggle_franchise(&mut self, name: &str) {
        if self.franchise.as_deref() == Some(name) {
            self.franchise = None;
        } else {
            self.franchise = Some(name.to_string());
        }
    }

    /// Query pairs for the filtered data endpoint.
    ///
    /// Only dimensions that narrow the query are sent: the category
    /// dimensions are omitted while they still hold the "전체" sentinel and
    /// the franchise is omitted while no chip is selected. The region is a
    /// concrete district and always goes out.
    pub fn to_query_args(&self) -> Vec<(&'static str, String)> {
        let mut args = vec![("region", self.region.clone())];
        if self.major_category != CATEGORY_ALL {
            args.push(("major_category", self.major_category.clone()));
        }
        if self.mid_category != CATEGORY_ALL {
            args.push(("mid_category", self.mid_category.clone()));
        }
        if let Some(franchise) = &self.franchise {
            args.push(("franchise", franchise.clone()));
        }
        args
    }

    /// Heading of the map pane, derived from the selected region
    pub fn map_title(&self) -> String {
        format!("{} 상권 지도", self.region)
    }

    /// Subtitle summarizing the narrowing dimensions
    pub fn description(&self) -> String {
        let mut parts = Vec::new();
        if self.major_category != CATEGORY_ALL {
            parts.push(self.major_category.as_str());
        }
        if self.mid_category != CATEGORY_ALL {
            parts.push(self.mid_category.as_str());
        }
        if let Some(franchise) = &self.franchise {
            parts.push(franchise);
        }
        if parts.is_empty() {
            "전체 업종 분석 결과".to_string()
        } else {
            format!("{} 분석 결과", parts.join(" · "))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn keys(selection: &FilterSelection) -> Vec<&'static str> {
        selection
            .to_query_args()
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    #[test]
    fn defaults_serialize_to_region_only() {
        let selection = FilterSelection::default();

        assert_eq!(keys(&selection), vec!["region"]);
    }

    #[rstest]
    #[case::major(
        FilterSelection { major_category: "프랜차이즈".into(), ..Default::default() },
        vec!["region", "major_category"]
    )]
    #[case::mid(
        FilterSelection { mid_category: "베이커리".into(), ..Default::default() },
        vec!["region", "mid_category"]
    )]
    #[case::franchise(
        FilterSelection { franchise: Some("이디야".into()), ..Default::default() },
        vec!["region", "franchise"]
    )]
    #[case::all_set(
        FilterSelection {
            region: "강남구".into(),
            major_category: "프랜차이즈".into(),
            mid_category: "커피전문점".into(),
            franchise: Some("스타벅스".into()),
        },
        vec!["region", "major_category", "mid_category", "franchise"]
    )]
    fn non_default_dimensions_are_serialized(
        #[case] selection: FilterSelection,
        #[case] expected: Vec<&'static str>,
    ) {
        assert_eq!(keys(&selection), expected);
    }

    #[test]
    fn sentinel_values_are_not_serialized() {
        let selection = FilterSelection {
            major_category: CATEGORY_ALL.to_string(),
            mid_category: CATEGORY_ALL.to_string(),
            ..Default::default()
        };

        let args = selection.to_query_args();

        assert!(args.iter().all(|(key, _)| *key == "region"));
    }

    #[test]
    fn toggling_the_same_chip_twice_clears_it() {
        let mut selection = FilterSelection::default();

        selection.toggle_franchise("스타벅스");
        assert_eq!(selection.franchise.as_deref(), Some("스타벅스"));

        selection.toggle_franchise("스타벅스");
        assert_eq!(selection.franchise, None);
    }

    #[test]
    fn toggling_a_different_chip_replaces_the_selection() {
        let mut selection = FilterSelection::default();

        selection.toggle_franchise("스타벅스");
        selection.toggle_franchise("이디야");

        assert_eq!(selection.franchise.as_deref(), Some("이디야"));
    }

    #[test]
    fn description_lists_the_narrowing_dimensions() {
        let selection = FilterSelection {
            mid_category: "베이커리".into(),
            franchise: Some("이디야".into()),
            ..Default::default()
        };

        assert_eq!(selection.description(), "베이커리 · 이디야 분석 결과");
        assert_eq!(
            FilterSelection::default().description(),
            "전체 업종 분석 결과"
        );
    }

    #[test]
    fn map_title_follows_the_region() {
        let selection = FilterSelection {
            region: "강남구".into(),
            ..Default::default()
        };

        assert_eq!(selection.map_title(), "강남구 상권 지도");
    }
}
