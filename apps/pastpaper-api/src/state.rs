use std::sync::Arc;

use pastpaper_service::PaperService;

use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PaperService>,
	pub limiter: Arc<RateLimiter>,
}
impl AppState {
	pub fn new(config: pastpaper_config::Config) -> color_eyre::Result<Self> {
		let service = PaperService::new(config)?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: PaperService) -> Self {
		let limiter = RateLimiter::from_config(&service.cfg.proxy);

		Self { service: Arc::new(service), limiter: Arc::new(limiter) }
	}
}
