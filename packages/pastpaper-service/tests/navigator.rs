use std::sync::Arc;

use pastpaper_domain::Month;
use pastpaper_service::{Error, PaperService};
use pastpaper_testkit::{FakeDrive, Failure, test_config};

fn service(drive: &Arc<FakeDrive>) -> PaperService {
	PaperService::with_store(test_config(), drive.clone())
}

#[tokio::test]
async fn group_resolution_is_cached_after_first_walk() {
	let drive = Arc::new(FakeDrive::new());
	let group_id = drive.add_group("2023", "May", "Group 4 - Sciences");
	let service = service(&drive);

	let first = service
		.resolve_group_folder(2023, Month::May, "Group 4 - Sciences")
		.await
		.expect("first resolution failed");

	assert_eq!(first.as_ref().map(|folder| folder.id.as_str()), Some(group_id.as_str()));
	assert_eq!(drive.list_calls(), 3);

	drive.reset_calls();

	let second = service
		.resolve_group_folder(2023, Month::May, "Group 4 - Sciences")
		.await
		.expect("second resolution failed");

	assert_eq!(second, first);
	assert_eq!(drive.list_calls(), 0);
}

#[tokio::test]
async fn missing_levels_resolve_to_none_and_are_retried() {
	let drive = Arc::new(FakeDrive::new());

	drive.add_group("2023", "May", "Group 4 - Sciences");

	let service = service(&drive);
	let missing = service
		.resolve_group_folder(2023, Month::November, "Group 4 - Sciences")
		.await
		.expect("resolution failed");

	assert!(missing.is_none());

	let calls_after_miss = drive.list_calls();

	drive.add_group("2023", "November", "Group 4 - Sciences");

	let found = service
		.resolve_group_folder(2023, Month::November, "Group 4 - Sciences")
		.await
		.expect("resolution failed");

	assert!(found.is_some());
	assert!(drive.list_calls() > calls_after_miss);
}

#[tokio::test]
async fn folder_names_must_match_exactly() {
	let drive = Arc::new(FakeDrive::new());

	drive.add_group("2023", "May", "group 4 - sciences");

	let found = service(&drive)
		.resolve_group_folder(2023, Month::May, "Group 4 - Sciences")
		.await
		.expect("resolution failed");

	assert!(found.is_none());
}

#[tokio::test]
async fn years_are_filtered_and_sorted_newest_first() {
	let drive = Arc::new(FakeDrive::new());

	for name in ["2019", "2023", "2009", "Archive", "2021"] {
		drive.add_folder(pastpaper_testkit::ROOT_FOLDER_ID, name);
	}

	let service = service(&drive);
	let years = service.list_available_years().await.expect("years failed");

	assert_eq!(years, vec![2023, 2021, 2019]);

	drive.reset_calls();

	assert_eq!(service.list_available_years().await.expect("years failed"), years);
	assert_eq!(drive.list_calls(), 0);
}

#[tokio::test]
async fn months_list_only_exam_sessions() {
	let drive = Arc::new(FakeDrive::new());

	drive.add_group("2022", "November", "Group 1");
	drive.add_group("2022", "May", "Group 1");

	let year_id = drive.ensure_path(&["2022"]);

	drive.add_folder(&year_id, "June");

	let months = service(&drive).list_available_months(2022).await.expect("months failed");

	assert_eq!(months, vec![Month::May, Month::November]);
}

#[tokio::test]
async fn listing_failures_degrade_but_credentials_do_not() {
	let drive = Arc::new(FakeDrive::new());

	drive.add_group("2023", "May", "Group 4 - Sciences");
	drive.fail_listings("", Failure::Status(500));

	let degraded = service(&drive)
		.resolve_group_folder(2023, Month::May, "Group 4 - Sciences")
		.await
		.expect("degraded listing must not fail");

	assert!(degraded.is_none());

	let drive = Arc::new(FakeDrive::new());

	drive.fail_listings("", Failure::MissingCredential);

	let err = service(&drive)
		.resolve_group_folder(2023, Month::May, "Group 4 - Sciences")
		.await
		.expect_err("missing credential must propagate");

	assert!(matches!(err, Error::MissingCredential));
}
