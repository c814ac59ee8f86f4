//! Per-client request limiter guarding the file endpoints.

use std::{num::NonZeroU32, time::Duration};

use axum::http::HeaderMap;
use governor::{
	Quota, RateLimiter as Governor,
	clock::{Clock, DefaultClock},
	middleware::StateInformationMiddleware,
	state::keyed::DefaultKeyedStateStore,
};

const CLIENT_HEADERS: [&str; 3] = ["x-forwarded-for", "x-real-ip", "cf-connecting-ip"];
const UNKNOWN_CLIENT: &str = "unknown";
const PRUNE_THRESHOLD: usize = 1_024;

type KeyedLimiter =
	Governor<String, DefaultKeyedStateStore<String>, DefaultClock, StateInformationMiddleware>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
	Allowed { remaining: u32 },
	Limited { retry_after: Duration },
}

/// `max_requests` may be spent at once; the budget then refills evenly across the window.
pub struct RateLimiter {
	max_requests: u32,
	limiter: KeyedLimiter,
	clock: DefaultClock,
}
impl RateLimiter {
	pub fn new(max_requests: u32, window: Duration) -> Self {
		let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
		let quota = Quota::with_period(window / burst.get())
			.unwrap_or_else(|| Quota::per_second(burst))
			.allow_burst(burst);
		let limiter = Governor::keyed(quota).with_middleware::<StateInformationMiddleware>();

		Self { max_requests: burst.get(), limiter, clock: DefaultClock::default() }
	}

	pub fn from_config(proxy: &pastpaper_config::Proxy) -> Self {
		Self::new(proxy.max_requests, Duration::from_secs(proxy.window_secs))
	}

	pub fn max_requests(&self) -> u32 {
		self.max_requests
	}

	pub fn check(&self, client: &str) -> Decision {
		if self.limiter.len() > PRUNE_THRESHOLD {
			self.limiter.retain_recent();
		}

		match self.limiter.check_key(&client.to_string()) {
			Ok(snapshot) => Decision::Allowed { remaining: snapshot.remaining_burst_capacity() },
			Err(not_until) =>
				Decision::Limited { retry_after: not_until.wait_time_from(self.clock.now()) },
		}
	}
}

/// First entry of `x-forwarded-for`, then `x-real-ip`, then `cf-connecting-ip`.
pub fn client_identifier(headers: &HeaderMap) -> String {
	CLIENT_HEADERS
		.iter()
		.find_map(|name| {
			let value = headers.get(*name)?.to_str().ok()?;
			let first = value.split(',').next()?.trim();

			(!first.is_empty()).then(|| first.to_string())
		})
		.unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
