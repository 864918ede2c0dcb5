use cafemap_client_core::{
    format_growth, FilterController, MapScene, Marker, PopupState, SessionChrome,
};
use cafemap_shared::const_config::filter::{
    FRANCHISE_CHIPS, MAJOR_CATEGORY_CHOICES, MID_CATEGORY_CHOICES, REGION_CHOICES,
};
use egui::{Color32, Sense, Stroke};

const MARKER_RADIUS: f32 = 7.0;

/// The map pane: filter controls, the marker canvas and the KPI row
#[derive(Debug, Default)]
pub struct UiMapPane {
    popup: PopupState,
}

impl UiMapPane {
    pub fn show(&mut self, ui: &mut egui::Ui, filter: &FilterController, chrome: &SessionChrome) {
        self.filter_row(ui, filter);
        ui.separator();
        ui.horizontal(|ui| {
            ui.heading(filter.map_title());
            ui.weak(filter.filter_description());
        });
        if chrome.show_preview_note {
            ui.weak("미리보기 모드: 데모 데이터가 표시됩니다.");
        }
        if chrome.show_full_access_note {
            ui.weak("전체 상권 데이터를 이용 중입니다.");
        }
        self.kpi_row(ui, filter);
        ui.separator();
        self.canvas(ui, filter);
    }

    fn filter_row(&mut self, ui: &mut egui::Ui, filter: &FilterController) {
        let filters = filter.filters();
        ui.horizontal_wrapped(|ui| {
            ui.label("지역");
            if let Some(region) = filter_combo(ui, "region", &filters.region, REGION_CHOICES) {
                let _ = filter.set_region(region);
            }
            ui.label("대분류");
            if let Some(category) =
                filter_combo(ui, "major", &filters.major_category, MAJOR_CATEGORY_CHOICES)
            {
                let _ = filter.set_major_category(category);
            }
            ui.label("중분류");
            if let Some(category) =
                filter_combo(ui, "mid", &filters.mid_category, MID_CATEGORY_CHOICES)
            {
                let _ = filter.set_mid_category(category);
            }
        });
        ui.horizontal_wrapped(|ui| {
            for chip in FRANCHISE_CHIPS {
                let selected = filters.franchise.as_deref() == Some(*chip);
                if ui.selectable_label(selected, *chip).clicked() {
                    let _ = filter.toggle_franchise(chip);
                }
            }
        });
    }

    fn kpi_row(&self, ui: &mut egui::Ui, filter: &FilterController) {
        let board = filter.board();
        ui.horizontal(|ui| {
            kpi(ui, "총 상가수", &board.total_shops);
            kpi(ui, "평균 성장률", &board.avg_growth);
            kpi(ui, "위험 지역", &board.danger_zones);
            kpi(ui, "신규 창업", &board.new_businesses);
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui, filter: &FilterController) {
        let scene = filter.scene();
        let size = egui::vec2(ui.available_width(), ui.available_height().max(240.0));
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 6.0, ui.visuals().extreme_bg_color);

        let markers = match &scene {
            MapScene::NoResults => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "선택한 조건에 맞는 카페가 없습니다.",
                    egui::TextStyle::Body.resolve(ui.style()),
                    ui.visuals().weak_text_color(),
                );
                return;
            }
            MapScene::Markers(markers) => markers,
        };

        let pointer = response.hover_pos();
        for (i, marker) in markers.iter().enumerate() {
            let pos = egui::pos2(
                rect.left() + (marker.x as f32) * rect.width(),
                rect.top() + (marker.y as f32) * rect.height(),
            );
            let hovered = pointer.is_some_and(|p| p.distance(pos) <= MARKER_RADIUS + 2.0);
            if hovered {
                self.popup.hover_in(i);
            } else {
                self.popup.hover_out(i);
            }
            let [r, g, b] = marker.color_rgb();
            let radius = if self.popup.active() == Some(i) {
                MARKER_RADIUS * 1.3
            } else {
                MARKER_RADIUS
            };
            painter.circle(
                pos,
                radius,
                Color32::from_rgb(r, g, b),
                Stroke::new(2.0, Color32::from_white_alpha(230)),
            );
        }

        if let Some(active) = self.popup.active() {
            if let Some(marker) = markers.get(active) {
                response
                    .clone()
                    .on_hover_ui_at_pointer(|ui| marker_details(ui, marker));
            }
        }
    }
}

fn filter_combo(
    ui: &mut egui::Ui,
    id: &str,
    current: &str,
    choices: &[&str],
) -> Option<String> {
    let mut selection = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .show_ui(ui, |ui| {
            for choice in choices {
                if ui.selectable_label(current == *choice, *choice).clicked() {
                    selection = Some(choice.to_string());
                }
            }
        });
    selection
}

fn kpi(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.vertical(|ui| {
        ui.weak(label);
        ui.strong(value);
    });
    ui.separator();
}

fn marker_details(ui: &mut egui::Ui, marker: &Marker) {
    ui.strong(&marker.point.name);
    if !marker.point.address.is_empty() {
        ui.label(&marker.point.address);
    }
    ui.label(format!(
        "교통량: {}",
        marker.point.population_data.traffic_level
    ));
    ui.label(format!(
        "점포 {} · 성장률 {}",
        marker.point.shops,
        format_growth(marker.point.growth)
    ));
}
