use dioxus::prelude::*;
use services::PracticeError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The table could not be read; the user may upload another file.
    Load {
        message: String,
        hint: Option<&'static str>,
    },
    /// Something the user can only retry.
    Action { message: String },
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Load { message, .. } | ViewError::Action { message } => message,
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ViewError::Load { hint, .. } => *hint,
            ViewError::Action { .. } | ViewError::Unknown => None,
        }
    }

    #[must_use]
    pub fn offers_upload(&self) -> bool {
        matches!(self, ViewError::Load { .. })
    }
}

impl From<PracticeError> for ViewError {
    fn from(err: PracticeError) -> Self {
        if err.offers_upload() {
            ViewError::Load {
                message: err.user_message(),
                hint: err.hint(),
            }
        } else {
            ViewError::Action {
                message: err.user_message(),
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
