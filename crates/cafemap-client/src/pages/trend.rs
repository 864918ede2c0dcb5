use cafemap_client_core::FilterController;
use cafemap_shared::map::RegionStats;

use crate::app::wake_fn;
use crate::pages::{AwaitingType, DataState};

/// Region-level aggregates for the current filter selection
#[derive(Debug, Default)]
pub struct UiTrend {
    stats: DataState<RegionStats>,
}

impl UiTrend {
    pub fn show(&mut self, ui: &mut egui::Ui, filter: &FilterController) {
        ui.heading("지역 트렌드");
        match &mut self.stats {
            DataState::None => {
                ui.spinner();
                let rx = filter.region_stats(wake_fn(ui.ctx().clone()));
                self.stats = DataState::AwaitingResponse(AwaitingType(rx));
            }
            DataState::AwaitingResponse(rx) => {
                if let Some(state) = DataState::await_data(rx) {
                    self.stats = state;
                } else {
                    ui.spinner();
                }
            }
            DataState::Present(stats) => {
                ui.label(format!("총 상가수: {}", stats.total_stores));
                ui.label(format!("매출 증가율: {}", stats.growth_rate));
                ui.label(format!("위험 지역: {}", stats.risk_areas_count));
                ui.label(format!("신규 창업: {}", stats.new_businesses));
                if ui.button("새로고침").clicked() {
                    self.stats = DataState::default();
                }
            }
            DataState::Failed(e) => {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("불러오기 실패: {e}"),
                );
                if ui.button("다시 시도").clicked() {
                    self.stats = DataState::default();
                }
            }
        }
    }
}
