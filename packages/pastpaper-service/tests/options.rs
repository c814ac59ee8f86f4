use std::sync::Arc;

use pastpaper_domain::Month;
use pastpaper_service::{AvailableOptions, Error, OptionsRequest, PaperService};
use pastpaper_testkit::{FakeDrive, Failure, test_config};

fn request(year: Option<u16>, month: Option<Month>, group: Option<&str>) -> OptionsRequest {
	OptionsRequest { year, month, group: group.map(str::to_string) }
}

fn archive() -> Arc<FakeDrive> {
	let drive = Arc::new(FakeDrive::new());
	let sciences = drive.add_group("2023", "May", "Group 4 - Sciences");
	let languages = drive.add_group("2023", "May", "Group 2 - Language Acquisition");
	let audio = drive.add_group("2023", "May", "Group Ex - Audio");

	drive.add_group("2022", "November", "Group 4 - Sciences");

	for name in [
		"Biology_paper_1__TZ1_HL.pdf",
		"Biology_paper_2__TZ1_HL.pdf",
		"Physics_paper_1_SL.pdf",
		"paper_1.pdf",
	] {
		drive.add_pdf(&sciences, name);
	}
	for name in ["French_B_paper_1_HL.pdf", "Arabic_ab_initio_paper_1_SL.pdf", "French_A_paper_1.pdf"] {
		drive.add_pdf(&languages, name);
	}

	drive.add_file(&audio, "French_B_HL.mp3", "audio/mpeg");
	drive.add_file(&audio, "intro.mp3", "audio/mpeg");

	drive
}

#[tokio::test]
async fn options_follow_picker_depth() {
	let service = PaperService::with_store(test_config(), archive());

	assert_eq!(
		service.available_options(request(None, None, None)).await.expect("years failed"),
		AvailableOptions::Years(vec![2023, 2022])
	);
	assert_eq!(
		service.available_options(request(Some(2022), None, None)).await.expect("months failed"),
		AvailableOptions::Months(vec![Month::November])
	);
	assert_eq!(
		service
			.available_options(request(Some(2023), Some(Month::May), None))
			.await
			.expect("groups failed"),
		AvailableOptions::Groups(vec![
			"Group 2 - Language Acquisition".to_string(),
			"Group 4 - Sciences".to_string(),
			"Group Ex - Audio".to_string(),
		])
	);
}

#[tokio::test]
async fn subjects_come_from_file_names() {
	let service = PaperService::with_store(test_config(), archive());
	let subjects = service
		.get_available_subjects(2023, Month::May, "Group 4 - Sciences")
		.await
		.expect("subjects failed");

	assert_eq!(subjects, vec!["Biology", "Physics"]);
}

#[tokio::test]
async fn language_acquisition_lists_only_second_language_courses() {
	let service = PaperService::with_store(test_config(), archive());
	let subjects = service
		.get_available_subjects(2023, Month::May, "Group 2 - Language Acquisition")
		.await
		.expect("subjects failed");

	assert_eq!(subjects, vec!["Arabic_ab_initio", "French_B"]);
}

#[tokio::test]
async fn audio_subjects_keep_level_suffix() {
	let drive = archive();
	let service = PaperService::with_store(test_config(), drive.clone());
	let subjects = service
		.get_available_subjects(2023, Month::May, "Group Ex - Audio")
		.await
		.expect("subjects failed");

	assert_eq!(subjects, vec!["French_B_HL"]);

	drive.reset_calls();
	service
		.get_available_subjects(2023, Month::May, "Group Ex - Audio")
		.await
		.expect("subjects failed");

	assert_eq!(drive.list_calls(), 0);
}

#[tokio::test]
async fn degraded_subject_listing_is_not_cached() {
	let drive = archive();
	let service = PaperService::with_store(test_config(), drive.clone());

	drive.fail_listings("mimeType = 'application/pdf'", Failure::Status(503));

	let first = service
		.get_available_subjects(2023, Month::May, "Group 4 - Sciences")
		.await
		.expect("degraded listing must succeed");

	assert!(first.is_empty());

	drive.clear_failures();

	let second = service
		.get_available_subjects(2023, Month::May, "Group 4 - Sciences")
		.await
		.expect("subjects failed");

	assert_eq!(second, vec!["Biology", "Physics"]);
}

#[tokio::test]
async fn unknown_group_has_no_subjects() {
	let service = PaperService::with_store(test_config(), archive());
	let subjects = service
		.get_available_subjects(2023, Month::May, "Group 9 - Unknown")
		.await
		.expect("subjects failed");

	assert!(subjects.is_empty());
}

#[tokio::test]
async fn group_without_month_is_rejected() {
	let service = PaperService::with_store(test_config(), archive());
	let err = service
		.available_options(request(Some(2023), None, Some("Group 4 - Sciences")))
		.await
		.expect_err("group requires month");

	assert!(matches!(err, Error::InvalidRequest { .. }));
}
