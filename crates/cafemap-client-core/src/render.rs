//! Pure render planning: what the shell should show, decoupled from how it is
//! drawn. Everything here is a function of the current state only.

use cafemap_shared::map::{MapPoint, MapStatistics};

use crate::client::session::SessionSnapshot;

/// What the map canvas should show for the current data set
#[derive(Debug, Clone, PartialEq)]
pub enum MapScene {
    /// Explicit placeholder instead of an empty canvas
    NoResults,
    Markers(Vec<Marker>),
}

impl MapScene {
    pub fn marker_count(&self) -> usize {
        match self {
            Self::NoResults => 0,
            Self::Markers(markers) => markers.len(),
        }
    }
}

/// A point rescaled into the unit square, north up
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub point: MapPoint,
}

impl Marker {
    pub fn color_rgb(&self) -> [u8; 3] {
        self.point.status.color_rgb()
    }
}

/// Rescales every point into the unit square over the min/max of the set.
/// A degenerate axis (all latitudes or all longitudes equal) maps to the
/// center instead of dividing by zero.
pub fn layout_markers(points: &[MapPoint]) -> MapScene {
    if points.is_empty() {
        return MapScene::NoResults;
    }
    let mut lat_min = f64::INFINITY;
    let mut lat_max = f64::NEG_INFINITY;
    let mut lng_min = f64::INFINITY;
    let mut lng_max = f64::NEG_INFINITY;
    for point in points {
        lat_min = lat_min.min(point.latitude);
        lat_max = lat_max.max(point.latitude);
        lng_min = lng_min.min(point.longitude);
        lng_max = lng_max.max(point.longitude);
    }
    let markers = points
        .iter()
        .map(|point| {
            let x = if lng_max != lng_min {
                (point.longitude - lng_min) / (lng_max - lng_min)
            } else {
                0.5
            };
            let y = if lat_max != lat_min {
                1.0 - (point.latitude - lat_min) / (lat_max - lat_min)
            } else {
                0.5
            };
            Marker {
                x,
                y,
                point: point.clone(),
            }
        })
        .collect();
    MapScene::Markers(markers)
}

/// At most one transient detail popup exists at any time
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PopupState {
    active: Option<usize>,
}

impl PopupState {
    /// Hovering a marker displaces whatever popup was showing before
    pub fn hover_in(&mut self, marker_index: usize) {
        self.active = Some(marker_index);
    }

    /// Only the marker that owns the popup may remove it
    pub fn hover_out(&mut self, marker_index: usize) {
        if self.active == Some(marker_index) {
            self.active = None;
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

/// The four fixed KPI display slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsBoard {
    pub total_shops: String,
    pub avg_growth: String,
    pub danger_zones: String,
    pub new_businesses: String,
}

pub fn statistics_board(stats: &MapStatistics) -> StatisticsBoard {
    StatisticsBoard {
        total_shops: stats.total_shops.to_string(),
        avg_growth: format_growth(stats.avg_growth),
        danger_zones: stats.danger_zones.to_string(),
        new_businesses: stats.new_businesses.to_string(),
    }
}

/// Matches the backend's presentation: positive growth gets a leading plus
pub fn format_growth(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

/// Visibility intents for the navigation chrome and the notice panels,
/// derived from session state alone (no historical flags)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChrome {
    pub show_logged_in_nav: bool,
    pub show_logged_out_nav: bool,
    pub show_full_access_note: bool,
    pub show_preview_note: bool,
    pub show_logged_in_notice: bool,
    pub show_login_required_notice: bool,
    pub user_name: Option<String>,
    pub user_role: Option<String>,
}

pub fn session_chrome(snapshot: &SessionSnapshot) -> SessionChrome {
    let user = snapshot.user_info();
    let logged_in = user.is_some();
    SessionChrome {
        show_logged_in_nav: logged_in,
        show_logged_out_nav: !logged_in,
        show_full_access_note: logged_in,
        show_preview_note: !logged_in,
        show_logged_in_notice: logged_in,
        show_login_required_notice: !logged_in,
        user_name: user.as_ref().map(|u| u.username.to_string()),
        user_role: user.as_ref().map(|u| u.role.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cafemap_shared::{map::CafeStatus, uac::UserInfo};
    use rstest::rstest;

    use super::*;
    use crate::client::session::SessionState;

    fn point(name: &str, latitude: f64, longitude: f64) -> MapPoint {
        MapPoint {
            id: 0,
            name: name.to_string(),
            address: String::new(),
            latitude,
            longitude,
            status: CafeStatus::Safe,
            shops: 0,
            growth: 0.0,
            population_data: Default::default(),
        }
    }

    #[test]
    fn empty_input_yields_the_no_results_placeholder() {
        let scene = layout_markers(&[]);

        assert_eq!(scene, MapScene::NoResults);
        assert_eq!(scene.marker_count(), 0);
    }

    #[test]
    fn extreme_latitudes_pin_to_the_vertical_edges() {
        let points = vec![
            point("south", 37.50, 126.90),
            point("middle", 37.55, 126.92),
            point("north", 37.60, 126.95),
        ];

        let MapScene::Markers(markers) = layout_markers(&points) else {
            panic!("expected markers");
        };

        // Minimum latitude is the bottom of the square, maximum the top
        assert_eq!(markers[0].y, 1.0);
        assert_eq!(markers[2].y, 0.0);
        assert_eq!(markers[0].x, 0.0);
        assert_eq!(markers[2].x, 1.0);
        assert!(markers[1].y > 0.0 && markers[1].y < 1.0);
    }

    #[test]
    fn degenerate_axes_map_to_the_center() {
        let same_lat = vec![point("a", 37.55, 126.90), point("b", 37.55, 126.95)];
        let MapScene::Markers(markers) = layout_markers(&same_lat) else {
            panic!("expected markers");
        };
        assert!(markers.iter().all(|m| m.y == 0.5));

        let single = vec![point("only", 37.55, 126.90)];
        let MapScene::Markers(markers) = layout_markers(&single) else {
            panic!("expected markers");
        };
        assert_eq!((markers[0].x, markers[0].y), (0.5, 0.5));
    }

    #[test]
    fn unknown_status_renders_the_neutral_color() {
        let mut unknown = point("odd", 37.55, 126.90);
        unknown.status = CafeStatus::Unknown;

        let MapScene::Markers(markers) = layout_markers(&[unknown]) else {
            panic!("expected markers");
        };

        assert_eq!(markers[0].color_rgb(), [0x6b, 0x72, 0x80]);
    }

    #[test]
    fn a_new_hover_displaces_the_previous_popup() {
        let mut popup = PopupState::default();

        popup.hover_in(0);
        assert_eq!(popup.active(), Some(0));

        popup.hover_in(3);
        assert_eq!(popup.active(), Some(3));

        // A stale hover-out from the displaced marker changes nothing
        popup.hover_out(0);
        assert_eq!(popup.active(), Some(3));

        popup.hover_out(3);
        assert_eq!(popup.active(), None);
    }

    #[rstest]
    #[case::positive(5.2, "+5.2%")]
    #[case::negative(-8.4, "-8.4%")]
    #[case::zero(0.0, "0.0%")]
    fn growth_formatting(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_growth(value), expected);
    }

    #[test]
    fn statistics_board_fills_every_slot() {
        let board = statistics_board(&MapStatistics {
            total_shops: 175,
            avg_growth: 5.2,
            danger_zones: 1,
            new_businesses: 23,
        });

        assert_eq!(board.total_shops, "175");
        assert_eq!(board.avg_growth, "+5.2%");
        assert_eq!(board.danger_zones, "1");
        assert_eq!(board.new_businesses, "23");
    }

    #[test]
    fn chrome_is_a_pure_function_of_the_session() {
        let anonymous = session_chrome(&SessionSnapshot {
            state: SessionState::Unauthenticated,
        });
        assert!(anonymous.show_logged_out_nav);
        assert!(anonymous.show_preview_note);
        assert!(anonymous.show_login_required_notice);
        assert!(!anonymous.show_logged_in_nav);
        assert_eq!(anonymous.user_name, None);

        let user = UserInfo {
            username: "tester".try_into().unwrap(),
            role: "analyst".try_into().unwrap(),
        };
        let logged_in = session_chrome(&SessionSnapshot {
            state: SessionState::Authenticated(Arc::new(user)),
        });
        assert!(logged_in.show_logged_in_nav);
        assert!(logged_in.show_full_access_note);
        assert!(logged_in.show_logged_in_notice);
        assert!(!logged_in.show_preview_note);
        assert_eq!(logged_in.user_name.as_deref(), Some("tester"));
        assert_eq!(logged_in.user_role.as_deref(), Some("analyst"));
    }

    #[test]
    fn validating_renders_like_logged_out() {
        let chrome = session_chrome(&SessionSnapshot {
            state: SessionState::Validating,
        });

        assert!(chrome.show_logged_out_nav);
        assert!(chrome.show_preview_note);
    }
}
