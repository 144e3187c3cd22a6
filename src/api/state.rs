use std::sync::Arc;

use crate::calculate::{CalculatorSettings, Clock};

#[derive(Clone)]
pub struct AppState {
    pub settings: CalculatorSettings,
    pub clock: Arc<dyn Clock>,
    pub cors_origin: String,
}
