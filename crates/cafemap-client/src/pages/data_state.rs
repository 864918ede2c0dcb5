use futures::channel::oneshot;
use tracing::error;

#[derive(Debug)]
pub struct AwaitingType<T>(pub oneshot::Receiver<T>);

/// Poll-the-receiver state for data fetched through the client core
#[derive(Debug, Default)]
pub enum DataState<T> {
    #[default]
    None,
    AwaitingResponse(AwaitingType<T>),
    Present(T),
    Failed(String),
}

impl<T> DataState<T> {
    /// Checks the channel once; `None` means still pending
    pub fn await_data(rx: &mut AwaitingType<T>) -> Option<Self> {
        match rx.0.try_recv() {
            Ok(Some(data)) => Some(DataState::Present(data)),
            Ok(None) => None,
            Err(e) => {
                error!("Error receiving on channel: {e:?}");
                Some(DataState::Failed(format!("{e}")))
            }
        }
    }
}
