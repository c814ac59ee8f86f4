use std::{sync::Arc, time::Duration};

use pastpaper_domain::{Level, Month, Paper, StructuredQuery};
use pastpaper_drive::{FileKind, RemoteFile};
use pastpaper_service::{Error, PaperService};
use pastpaper_testkit::{FakeDrive, Failure, test_config};

const SCIENCES: &str = "Group 4 - Sciences";
const LANGUAGE_ACQUISITION: &str = "Group 2 - Language Acquisition";
const AUDIO: &str = "Group Ex - Audio";

fn query(
	year: u16,
	group: &str,
	subject: &str,
	level: Option<Level>,
	paper: Option<Paper>,
) -> StructuredQuery {
	StructuredQuery {
		year,
		month: Month::May,
		group: group.to_string(),
		subject: subject.to_string(),
		level,
		paper,
	}
}

fn names(files: &[RemoteFile]) -> Vec<&str> {
	files.iter().map(|file| file.name.as_str()).collect()
}

fn archive() -> Arc<FakeDrive> {
	let drive = Arc::new(FakeDrive::new());
	let sciences = drive.add_group("2023", "May", SCIENCES);
	let languages = drive.add_group("2023", "May", LANGUAGE_ACQUISITION);
	let audio = drive.add_group("2023", "May", AUDIO);
	let arts = drive.add_group("2023", "May", "Group 6 - The Arts");

	for name in [
		"Biology_paper_1__TZ1_HL.pdf",
		"Biology_paper_1__TZ1_HL_French.pdf",
		"Biology_paper_2__TZ1_HL.pdf",
		"Biology_paper_1__TZ1_SL.pdf",
		"Chemistry_paper_1_HL.pdf",
	] {
		drive.add_pdf(&sciences, name);
	}
	for name in [
		"French_B_paper_2__TZ1_HL.pdf",
		"French_A_paper_2__TZ1_HL.pdf",
		"French_B_paper_1__TZ1_HL.pdf",
		"Spanish_B_paper_2__TZ1_HL.pdf",
	] {
		drive.add_pdf(&languages, name);
	}

	drive.add_file(&audio, "French_B_HL.mp3", "audio/mpeg");
	drive.add_file(&audio, "Spanish_B_HL.mp3", "audio/mpeg");
	drive.add_file(&audio, "Arabic_ab_initio_SL.mp3", "audio/mpeg");
	drive.add_file(&audio, "Arabic_ab_initio_SL_part2.mp3", "application/octet-stream");
	drive.add_pdf(&audio, "Arabic_ab_initio_SL_transcript.pdf");

	for name in [
		"Music___HLSL_listening.pdf",
		"Music_listening_paper_HL.pdf",
		"Music_listening_paper_SL.pdf",
		"Music_listening_paper_HL_Spanish.pdf",
	] {
		drive.add_pdf(&arts, name);
	}

	drive
}

#[tokio::test]
async fn science_search_keeps_english_copy_of_requested_paper() {
	let drive = archive();
	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2023, SCIENCES, "Biology", Some(Level::Hl), Some(Paper::One)))
		.await
		.expect("search failed");

	assert_eq!(names(&response.files), vec!["Biology_paper_1__TZ1_HL.pdf"]);
	assert_eq!(response.files[0].kind, FileKind::Pdf);
}

#[tokio::test]
async fn language_b_paper_two_returns_pdf_and_matching_audio() {
	let drive = archive();
	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2023, LANGUAGE_ACQUISITION, "French_B", Some(Level::Hl), Some(Paper::Two)))
		.await
		.expect("search failed");

	assert_eq!(names(&response.files), vec!["French_B_paper_2__TZ1_HL.pdf", "French_B_HL.mp3"]);
	assert_eq!(response.files[0].kind, FileKind::Pdf);
	assert_eq!(response.files[1].kind, FileKind::Audio);
}

#[tokio::test]
async fn audio_supplement_waits_for_supported_years() {
	let drive = archive();
	let languages = drive.add_group("2021", "May", LANGUAGE_ACQUISITION);
	let audio = drive.add_group("2021", "May", AUDIO);

	drive.add_pdf(&languages, "French_B_paper_2__TZ1_HL.pdf");
	drive.add_file(&audio, "French_B_HL.mp3", "audio/mpeg");

	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2021, LANGUAGE_ACQUISITION, "French B", Some(Level::Hl), Some(Paper::Two)))
		.await
		.expect("search failed");

	assert_eq!(names(&response.files), vec!["French_B_paper_2__TZ1_HL.pdf"]);
}

#[tokio::test]
async fn audio_escalates_to_broader_search_when_audio_folder_lacks_track() {
	let drive = Arc::new(FakeDrive::new());
	let languages = drive.add_group("2024", "May", LANGUAGE_ACQUISITION);
	let audio = drive.add_group("2024", "May", AUDIO);

	drive.add_file(&audio, "French_B_SL.mp3", "audio/mpeg");
	drive.add_pdf(&languages, "Spanish_B_paper_2_SL.pdf");
	drive.add_file(&languages, "Spanish_B_SL.mp3", "audio/mpeg");

	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2024, LANGUAGE_ACQUISITION, "Spanish_B", Some(Level::Sl), Some(Paper::Two)))
		.await
		.expect("search failed");

	assert_eq!(names(&response.files), vec!["Spanish_B_paper_2_SL.pdf", "Spanish_B_SL.mp3"]);
}

#[tokio::test]
async fn audio_falls_back_to_global_search_across_sessions() {
	let drive = Arc::new(FakeDrive::new());
	let languages = drive.add_group("2023", "May", LANGUAGE_ACQUISITION);
	let audio = drive.add_group("2023", "May", AUDIO);
	let older_audio = drive.add_group("2019", "November", AUDIO);

	drive.add_pdf(&languages, "French_B_paper_2__TZ1_HL.pdf");
	drive.add_file(&audio, "Spanish_B_HL.mp3", "audio/mpeg");
	drive.add_file(&older_audio, "French_B_HL.mp3", "audio/mpeg");

	let service = PaperService::with_store(test_config(), drive.clone());
	let response = service
		.search(query(2023, LANGUAGE_ACQUISITION, "French_B", Some(Level::Hl), Some(Paper::Two)))
		.await
		.expect("search failed");

	assert_eq!(names(&response.files), vec!["French_B_paper_2__TZ1_HL.pdf", "French_B_HL.mp3"]);

	let unscoped = drive
		.queries()
		.into_iter()
		.filter(|rendered| rendered.contains("French_B_HL") && !rendered.contains("in parents"))
		.count();

	assert_eq!(unscoped, 1);
}

#[tokio::test]
async fn years_past_the_listed_range_are_still_searchable() {
	let drive = Arc::new(FakeDrive::new());
	let sciences = drive.add_group("2026", "May", SCIENCES);

	drive.add_pdf(&sciences, "Biology_paper_1__TZ1_HL.pdf");

	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2026, SCIENCES, "Biology", Some(Level::Hl), Some(Paper::One)))
		.await
		.expect("search failed");

	assert_eq!(names(&response.files), vec!["Biology_paper_1__TZ1_HL.pdf"]);
}

#[tokio::test]
async fn auxiliary_pass_pulls_paper_two_from_language_acquisition() {
	let drive = archive();

	drive.add_group("2023", "May", "Group 1 - Studies in Language and Literature");

	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(
			2023,
			"Group 1 - Studies in Language and Literature",
			"French_B",
			Some(Level::Hl),
			Some(Paper::Two),
		))
		.await
		.expect("search failed");

	assert_eq!(names(&response.files), vec!["French_B_HL.mp3", "French_B_paper_2__TZ1_HL.pdf"]);
}

#[tokio::test]
async fn audio_group_returns_only_audio_files() {
	let drive = archive();
	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2023, AUDIO, "Arabic_ab_initio_SL", None, None))
		.await
		.expect("search failed");

	assert_eq!(
		names(&response.files),
		vec!["Arabic_ab_initio_SL.mp3", "Arabic_ab_initio_SL_part2.mp3"]
	);
	assert!(response.files.iter().all(|file| file.kind == FileKind::Audio));
}

#[tokio::test]
async fn music_filters_by_level_without_paper() {
	let drive = archive();
	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2023, "Group 6 - The Arts", "Music", Some(Level::Hl), None))
		.await
		.expect("search failed");

	assert_eq!(
		names(&response.files),
		vec!["Music___HLSL_listening.pdf", "Music_listening_paper_HL.pdf"]
	);
}

#[tokio::test]
async fn unresolvable_folder_yields_empty_result() {
	let drive = archive();
	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2019, SCIENCES, "Biology", Some(Level::Hl), Some(Paper::One)))
		.await
		.expect("search failed");

	assert!(response.files.is_empty());
}

#[tokio::test]
async fn invalid_query_is_rejected_before_any_listing() {
	let drive = archive();
	let service = PaperService::with_store(test_config(), drive.clone());
	let err = service
		.search(query(2023, SCIENCES, "Biology", None, Some(Paper::One)))
		.await
		.expect_err("level is required");

	assert!(matches!(err, Error::InvalidRequest { .. }));
	assert_eq!(drive.list_calls(), 0);
}

#[tokio::test]
async fn failing_listing_degrades_to_empty() {
	let drive = archive();

	drive.fail_listings("application/pdf", Failure::Status(503));

	let service = PaperService::with_store(test_config(), drive);
	let response = service
		.search(query(2023, SCIENCES, "Biology", Some(Level::Hl), Some(Paper::One)))
		.await
		.expect("degraded search must succeed");

	assert!(response.files.is_empty());
}

#[tokio::test]
async fn slow_listing_is_abandoned_after_budget() {
	let drive = archive();
	let mut cfg = test_config();

	cfg.drive.list_timeout_ms = 50;
	drive.fail_listings("application/pdf", Failure::Stall(Duration::from_secs(5)));

	let service = PaperService::with_store(cfg, drive);
	let response = service
		.search(query(2023, SCIENCES, "Biology", Some(Level::Hl), Some(Paper::One)))
		.await
		.expect("timed out search must succeed");

	assert!(response.files.is_empty());
}

#[tokio::test]
async fn missing_credential_is_not_swallowed() {
	let drive = archive();

	drive.fail_listings("", Failure::MissingCredential);

	let service = PaperService::with_store(test_config(), drive);
	let err = service
		.search(query(2023, SCIENCES, "Biology", Some(Level::Hl), Some(Paper::One)))
		.await
		.expect_err("credential failure must propagate");

	assert!(matches!(err, Error::MissingCredential));
}
