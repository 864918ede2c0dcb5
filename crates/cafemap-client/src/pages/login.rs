use cafemap_client_core::{Client, LoginOutcome};
use cafemap_shared::req_args::LoginReqArgs;
use futures::channel::oneshot;
use secrecy::SecretString;
use tracing::{error, info};

use crate::{app::wake_fn, ui_helpers::ui_password_edit};

type AwaitingLogin = oneshot::Receiver<anyhow::Result<LoginOutcome>>;

/// The login dialog. Dropping it clears the credential fields it owns.
pub struct UiLogin {
    email: String,
    password: SecretString,
    attempt: LoginAttemptStatus,
}

#[derive(Default)]
enum LoginAttemptStatus {
    #[default]
    NotAttempted,
    AwaitingResponse(AwaitingLogin),
    Failed(String),
    Success,
}

impl Default for UiLogin {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: SecretString::from(String::new()),
            attempt: LoginAttemptStatus::default(),
        }
    }
}

impl UiLogin {
    /// Returns `false` once the dialog should be closed
    pub fn show(&mut self, ctx: &egui::Context, client: &Client) -> bool {
        let mut keep_open = true;
        let mut open = true;
        egui::Window::new("로그인")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add(egui::TextEdit::singleline(&mut self.email).hint_text("이메일"));
                ui_password_edit(ui, &mut self.password, "비밀번호");

                self.check_attempt_status(ui);
                if matches!(self.attempt, LoginAttemptStatus::Success) {
                    keep_open = false;
                }

                let allowed = !matches!(self.attempt, LoginAttemptStatus::AwaitingResponse(_));
                let clicked = ui
                    .add_enabled(allowed, egui::Button::new("로그인"))
                    .clicked();
                if clicked || (allowed && ui.input(|i| i.key_pressed(egui::Key::Enter))) {
                    self.send_login_attempt(ui, client);
                }
            });
        keep_open && open
    }

    fn check_attempt_status(&mut self, ui: &mut egui::Ui) {
        match &mut self.attempt {
            LoginAttemptStatus::NotAttempted => {
                // No special UI needed
            }
            LoginAttemptStatus::AwaitingResponse(rx) => match rx.try_recv() {
                Ok(Some(outcome_result)) => match outcome_result {
                    Ok(LoginOutcome::Success) => {
                        info!("login succeeded");
                        self.attempt = LoginAttemptStatus::Success;
                        ui.ctx().request_repaint(); // Repaint with new value
                    }
                    Ok(LoginOutcome::Rejected(msg)) => {
                        info!("login rejected: {msg}");
                        self.attempt = LoginAttemptStatus::Failed(msg);
                    }
                    Err(e) => {
                        info!("error returned from client-core: {e:?}");
                        self.attempt = LoginAttemptStatus::Failed(
                            "로그인 중 오류가 발생했습니다.".to_string(),
                        );
                    }
                },
                Ok(None) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("로그인 중...");
                    });
                }
                Err(e) => {
                    error!("Error receiving on channel. Canceled: {e:?}");
                    self.attempt = LoginAttemptStatus::Failed(
                        "로그인 중 오류가 발생했습니다.".to_string(),
                    );
                }
            },
            LoginAttemptStatus::Failed(msg) => {
                let err_msg = msg.clone();
                ui.colored_label(ui.visuals().error_fg_color, err_msg);
            }
            LoginAttemptStatus::Success => {
                ui.label("로그인 성공!");
            }
        }
    }

    fn send_login_attempt(&mut self, ui: &mut egui::Ui, client: &Client) {
        let args = LoginReqArgs::new(self.email.trim(), self.password.clone());
        let rx = client.login(args, wake_fn(ui.ctx().clone()));
        self.attempt = LoginAttemptStatus::AwaitingResponse(rx);
    }
}
