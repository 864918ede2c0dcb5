mod data_state;
mod login;
mod map_pane;
mod trend;

pub use data_state::{AwaitingType, DataState};
pub use login::UiLogin;
pub use map_pane::UiMapPane;
pub use trend::UiTrend;
