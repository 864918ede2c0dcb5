use std::sync::Arc;

use cafemap_client_core::{
    session_chrome, Client, FilterController, MemoryTokenStore, SessionChrome, TokenStore, WakeFn,
};
use cafemap_shared::const_config::client::DEFAULT_SERVER_ADDRESS;
use strum::IntoEnumIterator;
use tracing::info;

use crate::pages::{AwaitingType, DataState, UiLogin, UiMapPane, UiTrend};

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Tab {
    #[default]
    #[strum(serialize = "상권 지도")]
    Map,
    #[strum(serialize = "프랜차이즈")]
    Franchise,
    #[strum(serialize = "트렌드")]
    Trend,
    #[strum(serialize = "리포트")]
    Report,
}

/// The part of the UI state worth restoring between runs
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedUi {
    active_tab: Tab,
}

pub struct CafeMapApp {
    client: Client,
    /// Constructed only once the startup validation settles
    filter: Option<FilterController>,
    startup: DataState<bool>,
    active_tab: Tab,
    login_page: Option<UiLogin>,
    map_pane: UiMapPane,
    trend_pane: UiTrend,
}

impl CafeMapApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, server_address: Option<String>) -> Self {
        let active_tab = cc
            .storage
            .and_then(|storage| eframe::get_value::<PersistedUi>(storage, eframe::APP_KEY))
            .map(|persisted| persisted.active_tab)
            .unwrap_or_default();
        let client = Client::new(
            server_address.unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            make_token_store(),
        );
        Self {
            client,
            filter: None,
            startup: DataState::default(),
            active_tab,
            login_page: None,
            map_pane: UiMapPane::default(),
            trend_pane: UiTrend::default(),
        }
    }

    /// Startup ordering: the filter controller only exists once the session
    /// validation has settled, so its first reload sees the restored state
    fn drive_startup(&mut self, ctx: &egui::Context) {
        match &mut self.startup {
            DataState::None => {
                let rx = self.client.validate_session(wake_fn(ctx.clone()));
                self.startup = DataState::AwaitingResponse(AwaitingType(rx));
            }
            DataState::AwaitingResponse(rx) => {
                if let Some(state) = DataState::await_data(rx) {
                    self.startup = state;
                }
            }
            DataState::Present(restored) => {
                if self.filter.is_none() {
                    info!(
                        restored = *restored,
                        "session validation settled, starting the filter controller"
                    );
                    let filter = FilterController::new(self.client.clone(), wake_fn(ctx.clone()));
                    let _ = filter.reload();
                    self.filter = Some(filter);
                }
            }
            DataState::Failed(e) => {
                // Proceed anonymously rather than block the UI
                tracing::error!(%e, "session validation channel failed");
                self.startup = DataState::Present(false);
            }
        }
    }

    fn top_panel(&mut self, ctx: &egui::Context, chrome: &SessionChrome) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.separator();
                for tab in Tab::iter() {
                    ui.selectable_value(&mut self.active_tab, tab, tab.to_string());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if chrome.show_logged_out_nav && ui.button("로그인").clicked() {
                        self.login_page = Some(UiLogin::default());
                    }
                    if chrome.show_logged_in_nav {
                        if ui.button("로그아웃").clicked() {
                            self.logout();
                        }
                        if let (Some(name), Some(role)) = (&chrome.user_name, &chrome.user_role) {
                            ui.label(format!("{name} ({role})"));
                        }
                    }
                });
            });
        });
    }

    fn bottom_panel(&mut self, ctx: &egui::Context, chrome: &SessionChrome) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if chrome.show_logged_in_notice {
                    ui.label("모든 상권 데이터를 이용 중입니다.");
                }
                if chrome.show_login_required_notice {
                    ui.label("로그인하면 실제 상권 데이터를 볼 수 있습니다.");
                }
                egui::warn_if_debug_build(ui);
            });
        });
    }

    fn central_panel(&mut self, ctx: &egui::Context, chrome: &SessionChrome) {
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.active_tab {
                Tab::Map => match &self.filter {
                    Some(filter) => self.map_pane.show(ui, filter, chrome),
                    None => {
                        ui.spinner();
                    }
                },
                Tab::Franchise => {
                    ui.label("프랜차이즈 비교는 준비 중입니다.");
                }
                Tab::Trend => match &self.filter {
                    Some(filter) => self.trend_pane.show(ui, filter),
                    None => {
                        ui.spinner();
                    }
                },
                Tab::Report => {
                    ui.label("리포트는 준비 중입니다.");
                }
            };
        });
    }

    fn logout(&mut self) {
        self.client.logout();
        // Dropping the dialog clears the credential fields it owns
        self.login_page = None;
    }
}

impl eframe::App for CafeMapApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(
            storage,
            eframe::APP_KEY,
            &PersistedUi {
                active_tab: self.active_tab,
            },
        );
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_startup(ctx);
        let chrome = session_chrome(&self.client.session_snapshot());
        self.top_panel(ctx, &chrome);
        self.bottom_panel(ctx, &chrome);
        self.central_panel(ctx, &chrome);

        let mut close_login = false;
        if let Some(login_page) = &mut self.login_page {
            close_login = !login_page.show(ctx, &self.client);
        }
        if close_login {
            self.login_page = None;
        }
    }
}

fn make_token_store() -> Arc<dyn TokenStore> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(dir) = eframe::storage_dir("CafeMap") {
            return Arc::new(cafemap_client_core::FileTokenStore::new(dir));
        }
    }
    // On the web the token only lives for the page session
    Arc::new(MemoryTokenStore::default())
}

#[inline]
pub fn wake_fn(ctx: egui::Context) -> impl WakeFn {
    move || ctx.request_repaint()
}
