// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn unknown_venue_reports_not_exists() {
    let sdk = FakeProvisioningSdk::new();
    let venue = VenueId::new("V1");
    assert!(!sdk.venue_exists(&venue).await.unwrap());
    let (devices, exists) = sdk.venue_devices(&venue, false).await.unwrap();
    assert!(devices.is_empty());
    assert!(!exists);
}

#[tokio::test]
async fn registered_venue_reports_its_devices() {
    let sdk = FakeProvisioningSdk::new();
    let venue = VenueId::new("V1");
    sdk.set_devices(venue.clone(), vec!["aa:bb:cc:dd:ee:ff".to_string()]);

    assert!(sdk.venue_exists(&venue).await.unwrap());
    let (devices, exists) = sdk.venue_devices(&venue, false).await.unwrap();
    assert_eq!(devices, vec!["aa:bb:cc:dd:ee:ff".to_string()]);
    assert!(exists);
}

#[tokio::test]
async fn removing_a_venue_makes_it_disappear() {
    let sdk = FakeProvisioningSdk::new();
    let venue = VenueId::new("V1");
    sdk.set_devices(venue.clone(), vec![]);
    sdk.remove_venue(&venue);
    assert!(!sdk.venue_exists(&venue).await.unwrap());
}
