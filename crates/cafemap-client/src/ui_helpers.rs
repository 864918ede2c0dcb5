use secrecy::{ExposeSecret as _, SecretString};

pub fn ui_password_edit(
    ui: &mut egui::Ui,
    password: &mut SecretString,
    hint_text: &str,
) -> egui::Response {
    let mut temp = password.expose_secret().to_owned();
    let result = ui.add(
        egui::TextEdit::singleline(&mut temp)
            .password(true)
            .hint_text(hint_text),
    );
    *password = SecretString::from(temp);
    result
}
