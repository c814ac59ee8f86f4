use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub drive: Drive,
	#[serde(default)]
	pub catalog: Catalog,
	#[serde(default)]
	pub proxy: Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Drive {
	#[serde(default = "default_api_base")]
	pub api_base: String,
	/// Folder whose direct children are the year folders.
	pub root_folder_id: String,
	/// Optional. Bearer token for the remote store; requests fail with a credential error without it.
	pub access_token: Option<String>,
	#[serde(default = "default_page_size")]
	pub page_size: u32,
	/// Per-request timeout.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Budget for one paginated listing, all pages included.
	#[serde(default = "default_list_timeout_ms")]
	pub list_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Catalog {
	pub min_year: u16,
	pub max_year: u16,
	pub audio_group: String,
	pub language_acquisition_group: String,
	/// Substring identifying the arts group, e.g. "Group 6 - The Arts".
	pub arts_group_marker: String,
	/// Substring identifying language groups, which keep every language variant.
	pub language_group_marker: String,
	pub audio_supplement_min_year: u16,
}
impl Default for Catalog {
	fn default() -> Self {
		Self {
			min_year: 2010,
			max_year: 2025,
			audio_group: "Group Ex - Audio".to_string(),
			language_acquisition_group: "Group 2 - Language Acquisition".to_string(),
			arts_group_marker: "The Arts".to_string(),
			language_group_marker: "Language".to_string(),
			audio_supplement_min_year: 2022,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Proxy {
	pub max_requests: u32,
	pub window_secs: u64,
}
impl Default for Proxy {
	fn default() -> Self {
		Self { max_requests: 10, window_secs: 60 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_api_base() -> String {
	"https://www.googleapis.com/drive/v3".to_string()
}

fn default_page_size() -> u32 {
	1_000
}

fn default_timeout_ms() -> u64 {
	15_000
}

fn default_list_timeout_ms() -> u64 {
	60_000
}
