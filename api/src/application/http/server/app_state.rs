use std::sync::Arc;

use safetech_core::application::SafetechService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: SafetechService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: SafetechService) -> Self {
        Self { args, service }
    }
}
