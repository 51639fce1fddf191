use crate::menu::MenuError;
use oba_core::layer::LayerError;
use oba_core::ApiError;
use thiserror::Error;

/// Failure of a dashboard operation, as returned to the caller.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Layer(#[from] LayerError),

    #[error(transparent)]
    Menu(#[from] MenuError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
