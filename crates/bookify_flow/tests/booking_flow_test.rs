//! Behavior tests for the booking flow controller.


use bookify_common::services::TokenProvider;
use bookify_flow::{BookingFlow, Feedback};
use fixtures::{
    accepted, api_error, date, logged_in, logged_out, rejected, service, slot, ScriptedApi,
};
use std::sync::Arc;

fn flow_with(
    api: Arc<ScriptedApi>,
    tokens: fixtures::StaticTokens,
) -> BookingFlow<ScriptedApi, fixtures::StaticTokens> {
    BookingFlow::new(api, Arc::new(tokens))
}

/// Drives the flow to a complete (service, date, slot) selection, scripting
/// the availability fetch the date change triggers.
async fn select_all(
    flow: &mut BookingFlow<ScriptedApi, fixtures::StaticTokens>,
    api: &ScriptedApi,
) {
    api.script_availability(Ok(vec![
        slot("2025-06-01T10:00:00Z"),
        slot("2025-06-01T11:00:00Z"),
    ]));
    flow.set_service("svc1").await;
    flow.set_date(date("2025-06-01")).await;
    let first = flow.available_slots()[0].to_rfc3339();
    flow.select_slot(first);
}

#[tokio::test]
async fn load_services_replaces_catalog() {
    let api = Arc::new(ScriptedApi::new());
    api.script_services(Ok(vec![service("svc1", "Haircut"), service("svc2", "Massage")]));
    let mut flow = flow_with(api.clone(), logged_in());

    flow.load_services().await;

    assert_eq!(flow.services().len(), 2);
    assert!(flow.feedback().is_none());
}

#[tokio::test]
async fn failed_catalog_load_leaves_services_empty() {
    let api = Arc::new(ScriptedApi::new());
    api.script_services(Err(api_error("connection refused")));
    let mut flow = flow_with(api.clone(), logged_in());

    flow.load_services().await;

    assert!(flow.services().is_empty());
    assert_eq!(flow.feedback(), Some(&Feedback::ServicesUnavailable));
}

#[tokio::test]
async fn availability_is_not_fetched_for_partial_selection() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_in());

    // Only the service is chosen; no date yet.
    flow.set_service("svc1").await;

    assert!(api.availability_calls.lock().unwrap().is_empty());
    assert!(flow.available_slots().is_empty());
}

#[tokio::test]
async fn empty_availability_raises_no_slots_not_a_load_error() {
    let api = Arc::new(ScriptedApi::new());
    api.script_availability(Ok(vec![]));
    let mut flow = flow_with(api.clone(), logged_in());

    flow.set_service("svc1").await;
    flow.set_date(date("2025-06-01")).await;

    assert!(flow.available_slots().is_empty());
    assert_eq!(flow.feedback(), Some(&Feedback::NoSlots));
}

#[tokio::test]
async fn failed_availability_clears_stale_slots() {
    let api = Arc::new(ScriptedApi::new());
    api.script_availability(Ok(vec![slot("2025-06-01T10:00:00Z")]));
    let mut flow = flow_with(api.clone(), logged_in());

    flow.set_service("svc1").await;
    flow.set_date(date("2025-06-01")).await;
    assert_eq!(flow.available_slots().len(), 1);

    // The next (service, date) change fails; yesterday's slots must not
    // survive it.
    api.script_availability(Err(api_error("malformed availability shape")));
    flow.set_date(date("2025-06-02")).await;

    assert!(flow.available_slots().is_empty());
    assert_eq!(flow.feedback(), Some(&Feedback::SlotsUnavailable));
}

#[tokio::test]
async fn availability_fetches_settle_in_selection_order() {
    let api = Arc::new(ScriptedApi::new());
    api.script_availability(Ok(vec![slot("2025-06-01T10:00:00Z")]));
    api.script_availability(Ok(vec![slot("2025-06-02T09:00:00Z")]));
    let mut flow = flow_with(api.clone(), logged_in());

    flow.set_service("svc1").await;
    flow.set_date(date("2025-06-01")).await;
    // Each change awaits its own fetch before the next can start, so the
    // last selection's result is the one left in place.
    flow.set_date(date("2025-06-02")).await;

    let calls = api.availability_calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            ("svc1".to_string(), date("2025-06-01")),
            ("svc1".to_string(), date("2025-06-02")),
        ]
    );
    drop(calls);
    assert_eq!(flow.available_slots(), &[slot("2025-06-02T09:00:00Z")]);
}

#[tokio::test]
async fn changing_service_drops_the_selected_slot() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_in());
    select_all(&mut flow, &api).await;
    assert!(flow.selected_slot().is_some());

    api.script_availability(Ok(vec![slot("2025-06-01T14:00:00Z")]));
    flow.set_service("svc2").await;

    assert_eq!(flow.selected_slot(), None);
}

#[tokio::test]
async fn submitting_with_missing_selection_short_circuits() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_in());

    flow.set_service("svc1").await;
    // No date, no slot.
    flow.submit_booking().await;

    assert_eq!(flow.feedback(), Some(&Feedback::MissingSelection));
    assert!(api.submitted.lock().unwrap().is_empty());
    assert!(!flow.is_loading());
}

#[tokio::test]
async fn missing_selection_wins_over_missing_token() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_out());

    flow.submit_booking().await;

    // Precondition order: fields first, then auth.
    assert_eq!(flow.feedback(), Some(&Feedback::MissingSelection));
    assert!(api.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn submitting_without_token_short_circuits() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_out());
    select_all(&mut flow, &api).await;

    flow.submit_booking().await;

    assert_eq!(flow.feedback(), Some(&Feedback::NotLoggedIn));
    assert!(api.submitted.lock().unwrap().is_empty());
    assert!(!flow.is_loading());
}

#[tokio::test]
async fn unparseable_slot_short_circuits() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_in());
    select_all(&mut flow, &api).await;
    flow.select_slot("half past ten");

    flow.submit_booking().await;

    assert_eq!(flow.feedback(), Some(&Feedback::InvalidSlot));
    assert!(api.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn successful_booking_clears_slot_and_refetches_availability() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_in());
    select_all(&mut flow, &api).await;

    api.script_outcome(Ok(accepted("bkg_1")));
    // The refreshed set no longer contains the booked 10:00 slot.
    api.script_availability(Ok(vec![slot("2025-06-01T11:00:00Z")]));
    flow.submit_booking().await;

    assert_eq!(flow.feedback(), Some(&Feedback::BookingConfirmed));
    assert_eq!(flow.selected_slot(), None);
    assert!(!flow.is_loading());

    // The bearer token was attached and the request carried the slot.
    let submitted = api.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    let (request, token) = &submitted[0];
    assert_eq!(request.service_id, "svc1");
    assert_eq!(request.start_time, slot("2025-06-01T10:00:00Z"));
    assert_eq!(token, "tok_test");

    // One fetch from the date change, one follow-up for the same pair.
    let calls = api.availability_calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    drop(calls);
    assert_eq!(flow.available_slots(), &[slot("2025-06-01T11:00:00Z")]);
}

#[tokio::test]
async fn server_rejection_surfaces_the_server_message() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_in());
    select_all(&mut flow, &api).await;

    api.script_outcome(Ok(rejected("slot_taken")));
    flow.submit_booking().await;

    match flow.feedback() {
        Some(Feedback::BookingFailed(message)) => assert!(message.contains("slot_taken")),
        other => panic!("expected a booking failure, got {other:?}"),
    }
    assert!(!flow.is_loading());
    // The slot stays selected so the user can retry.
    assert!(flow.selected_slot().is_some());
}

#[tokio::test]
async fn transport_failure_yields_generic_feedback() {
    let api = Arc::new(ScriptedApi::new());
    let mut flow = flow_with(api.clone(), logged_in());
    select_all(&mut flow, &api).await;

    api.script_outcome(Err(api_error("connection reset by peer")));
    flow.submit_booking().await;

    assert_eq!(flow.feedback(), Some(&Feedback::RequestFailed));
    assert!(!flow.is_loading());
}

#[tokio::test]
async fn loading_is_false_after_every_submission_outcome() {
    for outcome in [
        Ok(accepted("bkg_1")),
        Ok(rejected("slot_taken")),
        Err(api_error("timeout")),
    ] {
        let api = Arc::new(ScriptedApi::new());
        let mut flow = flow_with(api.clone(), logged_in());
        select_all(&mut flow, &api).await;

        let succeeded = matches!(&outcome, Ok(o) if o.success);
        api.script_outcome(outcome);
        if succeeded {
            api.script_availability(Ok(vec![]));
        }
        flow.submit_booking().await;

        assert!(!flow.is_loading());
    }
}

#[tokio::test]
async fn token_is_read_only_at_submission_time() {
    mockall::mock! {
        Tokens {}
        impl TokenProvider for Tokens {
            fn access_token(&self) -> Option<String>;
        }
    }

    let mut tokens = MockTokens::new();
    tokens
        .expect_access_token()
        .times(1)
        .returning(|| Some("tok_test".to_string()));

    let api = Arc::new(ScriptedApi::new());
    let mut flow = BookingFlow::new(api.clone(), Arc::new(tokens));

    // Selection changes never touch the token.
    api.script_availability(Ok(vec![slot("2025-06-01T10:00:00Z")]));
    flow.set_service("svc1").await;
    flow.set_date(date("2025-06-01")).await;
    flow.select_slot("2025-06-01T10:00:00Z");

    api.script_outcome(Ok(accepted("bkg_1")));
    api.script_availability(Ok(vec![]));
    flow.submit_booking().await;

    assert_eq!(flow.feedback(), Some(&Feedback::BookingConfirmed));
}
